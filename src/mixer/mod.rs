//! The mixing runtime context.
//!
//! One [`Mixer`] per machine, owned by the planner side. It holds the
//! palette, the editor percentages, the collector and both height modes, and
//! stamps each planned segment with a [`BlockColor`]. Nothing here is read by
//! the pulse path; segments carry everything the stepper side needs.

mod height;

use rand::{rngs::SmallRng, RngCore, SeedableRng};
use tracing::{debug, warn};

use crate::{
    config::MixerConfig,
    error::{MixError, MixResult},
    fixed::{MixColor, MixWidth},
    height::{GradientMix, RandomMix},
    palette::{Collector, VirtualTools},
    percent::{Percent, PercentMix},
    stepper::{BlockColor, Segment},
    MAX_MIXING_STEPPERS,
};

pub struct Mixer<W: MixWidth, const N: usize, R: RngCore = SmallRng> {
    config: MixerConfig,
    tools: VirtualTools<W, N>,
    percent: PercentMix<N>,
    collector: Collector<N>,
    gradient: GradientMix<W, N>,
    random: RandomMix<W, N>,
    paused: bool,
    enabled: bool,
    current_z: f32,
    rng: R,
}

impl<W: MixWidth, const N: usize> Mixer<W, N, SmallRng> {
    pub fn new(config: MixerConfig) -> MixResult<Self> {
        Self::with_rng(config, SmallRng::from_entropy())
    }
}

impl<W: MixWidth, const N: usize, R: RngCore> Mixer<W, N, R> {
    /// Mixer with an injected random source for random mixing.
    pub fn with_rng(config: MixerConfig, rng: R) -> MixResult<Self> {
        if !(2..=MAX_MIXING_STEPPERS).contains(&N) {
            return Err(MixError::Config("mixing stepper count must be 2..=10"));
        }
        config.validate()?;

        let tools = VirtualTools::new(&config);
        let mut mixer = Self {
            gradient: GradientMix::new(),
            random: RandomMix::new(config.random_band),
            enabled: config.mixing_enabled,
            percent: PercentMix::equal(),
            collector: Collector::new(),
            paused: false,
            current_z: 0.0,
            tools,
            config,
            rng,
        };
        mixer.refresh_percentages();
        debug!(
            steppers = N,
            tools = mixer.tools.len(),
            full_scale = W::FULL_SCALE,
            "mixer ready"
        );
        Ok(mixer)
    }

    pub fn config(&self) -> &MixerConfig {
        &self.config
    }

    pub fn palette(&self) -> &VirtualTools<W, N> {
        &self.tools
    }

    pub fn gradient(&self) -> &GradientMix<W, N> {
        &self.gradient
    }

    pub fn random(&self) -> &RandomMix<W, N> {
        &self.random
    }

    pub fn collector(&self) -> &Collector<N> {
        &self.collector
    }

    /// Last height handed to [`update_for_height`](Mixer::update_for_height).
    pub fn current_z(&self) -> f32 {
        self.current_z
    }

    // ---- tools ----

    pub fn selected_tool(&self) -> u8 {
        self.tools.selected()
    }

    /// Tool change. A pinned gradient re-evaluates against the new tool and
    /// the editor percentages follow the tool's color.
    pub fn select_tool(&mut self, tool: u8) -> MixResult<()> {
        self.tools.select(tool)?;
        debug!(tool, "tool selected");
        self.refresh_percentages();
        if self.gradient.settings().pin.is_some() {
            self.refresh_gradient();
        }
        Ok(())
    }

    /// Store a raw color into the selected tool.
    pub fn set_color_of_current_tool(&mut self, raw: MixColor<W, N>) -> MixResult<()> {
        self.set_tool_color(self.tools.selected(), raw)
    }

    /// Store a raw color into any tool, normalized scale-to-max.
    ///
    /// An all-zero color leaves the tool flat and returns `DegenerateRatio`.
    pub fn set_tool_color(&mut self, tool: u8, raw: MixColor<W, N>) -> MixResult<()> {
        let stored = self.tools.set_color(tool, raw);
        if let Err(err) = stored {
            if err != MixError::DegenerateRatio {
                return Err(err);
            }
            warn!(tool, "all-zero color, tool set to an even split");
        }
        self.tool_changed(tool);
        stored
    }

    /// Restore boot colors; see [`VirtualTools::reset`].
    pub fn reset_tools(&mut self, force: bool) -> usize {
        let rewritten = self.tools.reset(force);
        debug!(force, rewritten, "palette reset");
        self.refresh_percentages();
        if self.gradient.is_enabled() {
            self.refresh_gradient();
        }
        rewritten
    }

    /// Keep dependent views in step after a palette entry was written.
    fn tool_changed(&mut self, tool: u8) {
        if tool == self.tools.selected() {
            self.refresh_percentages();
        }
        if self.feeds_gradient(tool) {
            self.refresh_gradient();
        }
    }

    /// The live gradient caches this tool's mix as an endpoint.
    fn feeds_gradient(&self, tool: u8) -> bool {
        let settings = self.gradient.settings();
        self.gradient.is_enabled() && (tool == settings.start_tool || tool == settings.end_tool)
    }

    // ---- percentages ----

    /// The editor view: the selected tool's mix, or the live gradient or
    /// random mix while one of those is driving.
    pub fn percentages(&self) -> &PercentMix<N> {
        &self.percent
    }

    /// Edit one percentage without normalizing.
    pub fn set_percentage(&mut self, stepper: usize, value: Percent) -> MixResult<()> {
        self.percent.set(stepper, value)
    }

    pub fn set_percentages(&mut self, mix: PercentMix<N>) {
        self.percent = mix;
    }

    /// Normalize the editor percentages and store them into the selected
    /// tool. A vector with nothing positive is stored as an even split and
    /// reported as `DegenerateRatio`.
    pub fn commit_percentages(&mut self) -> MixResult<()> {
        let normalized = self.percent.normalize();
        if normalized.is_err() {
            warn!("no positive percentage, committing an even split");
        }
        let tool = self.tools.selected();
        self.tools.set_color(tool, self.percent.to_color())?;
        self.collector.load_percent(&self.percent);
        debug!(tool, mix = %self.percent, "percentages committed");

        if self.feeds_gradient(tool) {
            self.refresh_gradient();
        }
        normalized
    }

    fn refresh_percentages(&mut self) {
        self.percent = PercentMix::from_color(self.tools.selected_color());
        self.collector.load_percent(&self.percent);
    }

    // ---- collector ----

    pub fn set_collector(&mut self, stepper: usize, value: f32) -> MixResult<()> {
        self.collector.set(stepper, value)
    }

    pub fn reset_collector(&mut self, stepper: usize) -> MixResult<()> {
        self.collector.reset_to(stepper)
    }

    /// Load a tool's color into the collector, scaled by `proportion`.
    pub fn refresh_collector(&mut self, tool: u8, proportion: f32) -> MixResult<()> {
        let color = *self.tools.color(tool)?;
        self.collector.load_color(&color, proportion);
        Ok(())
    }

    /// Write the collector into a tool. An empty collector changes nothing.
    pub fn commit_collector(&mut self, tool: u8) -> MixResult<()> {
        self.tools.check(tool)?;
        let color = self.collector.to_color().ok_or_else(|| {
            warn!(tool, "collector is empty, nothing committed");
            MixError::DegenerateRatio
        })?;
        self.tools.set_color(tool, color)?;
        debug!(tool, %color, "collector committed");
        self.tool_changed(tool);
        Ok(())
    }

    // ---- switches ----

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// While paused, height updates are ignored. Mode settings are kept.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "pause state changed");
        }
        self.paused = paused;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Mixing switch. While off, blocks take the selected tool's color and
    /// height updates are ignored; turning it back on re-evaluates the
    /// active mode at the current height.
    pub fn set_enabled(&mut self, enabled: bool) {
        let resumed = enabled && !self.enabled;
        self.enabled = enabled;
        debug!(enabled, "mixing switch");
        if resumed {
            self.update_for_height(self.current_z, true);
        }
    }

    // ---- block colors ----

    /// Color the next planned block gets: the gradient if live, else the
    /// random mix if live, else the selected tool.
    pub fn color_for_block(&self) -> MixColor<W, N> {
        if !self.enabled {
            return *self.tools.selected_color();
        }
        if self.gradient.is_enabled() {
            *self.gradient.color()
        } else if self.random.is_enabled() {
            *self.random.color()
        } else {
            *self.tools.selected_color()
        }
    }

    /// Snapshot for one finalized block.
    pub fn capture_block(&self) -> BlockColor<W, N> {
        BlockColor::capture(self.color_for_block())
    }

    pub fn plan_segment(&self, steps: u32) -> Segment<W, N> {
        Segment {
            steps,
            color: self.capture_block(),
        }
    }
}
