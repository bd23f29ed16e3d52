//! Virtual tool palette.
//!
//! A virtual tool is a stored mix. Selecting one is the mixing extruder's
//! equivalent of a tool change: the next planned blocks take its color.
//!
//! Tool ids are laid out as:
//!
//! ```text
//!   0 .. user_tools      operator tools
//!   user_tools           direct-set tool (scratch mix for one-off edits)
//!   user_tools + 1       auto-retract tool (only with a sync channel)
//! ```

pub mod collector;

pub use collector::Collector;

use crate::{
    config::MixerConfig,
    error::{MixError, MixResult},
    fixed::{MixColor, MixWidth},
};

pub struct VirtualTools<W: MixWidth, const N: usize> {
    colors: Vec<MixColor<W, N>>,
    selected: u8,
    user_tools: u8,
    sync_channel: bool,
}

impl<W: MixWidth, const N: usize> VirtualTools<W, N> {
    /// Palette sized by `config`, every entry at its boot default.
    ///
    /// The config is expected to be validated; the tool count is capped at
    /// 255 ids regardless.
    pub fn new(config: &MixerConfig) -> Self {
        let count = config.tool_count().min(u8::MAX as usize);
        let mut tools = Self {
            colors: vec![MixColor::flat(); count],
            selected: 0,
            user_tools: config.user_tools,
            sync_channel: config.sync_channel,
        };
        tools.reset(true);
        tools
    }

    pub fn len(&self) -> u8 {
        self.colors.len() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn user_tools(&self) -> u8 {
        self.user_tools
    }

    pub fn direct_set_tool(&self) -> u8 {
        self.user_tools
    }

    pub fn autoretract_tool(&self) -> Option<u8> {
        self.sync_channel.then_some(self.user_tools + 1)
    }

    pub fn selected(&self) -> u8 {
        self.selected
    }

    pub fn check(&self, tool: u8) -> MixResult<()> {
        if (tool as usize) < self.colors.len() {
            Ok(())
        } else {
            Err(MixError::ToolOutOfRange {
                tool,
                tools: self.len(),
            })
        }
    }

    /// Change the selected tool. Dependent state is the caller's business.
    pub fn select(&mut self, tool: u8) -> MixResult<()> {
        self.check(tool)?;
        self.selected = tool;
        Ok(())
    }

    pub fn color(&self, tool: u8) -> MixResult<&MixColor<W, N>> {
        self.check(tool)?;
        Ok(&self.colors[tool as usize])
    }

    pub fn selected_color(&self) -> &MixColor<W, N> {
        &self.colors[self.selected as usize]
    }

    /// Store a raw color, normalized scale-to-max.
    ///
    /// An all-zero color is stored as an even split and reported as
    /// `DegenerateRatio`. An unknown tool changes nothing.
    pub fn set_color(&mut self, tool: u8, raw: MixColor<W, N>) -> MixResult<()> {
        self.check(tool)?;
        match raw.normalized() {
            Some(color) => {
                self.colors[tool as usize] = color;
                Ok(())
            }
            None => {
                self.colors[tool as usize] = MixColor::flat();
                Err(MixError::DegenerateRatio)
            }
        }
    }

    /// Boot color of a tool id.
    pub fn default_color(&self, tool: u8) -> MixColor<W, N> {
        let t = tool as usize;
        if tool < self.user_tools && t < N {
            MixColor::pure(t).unwrap_or_else(|_| MixColor::flat())
        } else if Some(tool) == self.autoretract_tool() {
            MixColor::pure(0).unwrap_or_else(|_| MixColor::flat())
        } else {
            MixColor::flat()
        }
    }

    /// Restore boot colors. Without `force` only entries that are not
    /// normalized are rewritten. Returns how many entries changed.
    pub fn reset(&mut self, force: bool) -> usize {
        let mut rewritten = 0;
        for tool in 0..self.len() {
            let current = self.colors[tool as usize];
            if !force && current.is_normalized() {
                continue;
            }
            let fresh = self.default_color(tool);
            if fresh != current {
                rewritten += 1;
            }
            self.colors[tool as usize] = fresh;
        }
        rewritten
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &MixColor<W, N>)> + '_ {
        self.colors.iter().enumerate().map(|(t, c)| (t as u8, c))
    }
}
