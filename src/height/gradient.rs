#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{MixError, MixResult},
    fixed::{MixColor, MixWidth},
    palette::VirtualTools,
    percent::PercentMix,
};

/// Operator-facing gradient parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientSettings {
    pub start_z: f32,
    pub end_z: f32,
    pub start_tool: u8,
    pub end_tool: u8,
    /// Only run while this tool is selected; `None` runs for any tool.
    pub pin: Option<u8>,
}

impl Default for GradientSettings {
    fn default() -> Self {
        Self {
            start_z: 0.0,
            end_z: 0.0,
            start_tool: 0,
            end_tool: 1,
            pin: None,
        }
    }
}

impl GradientSettings {
    /// Ordering rules; a failing gradient simply stays off.
    pub fn check(&self) -> MixResult<()> {
        if self.start_tool != self.end_tool && self.start_z < self.end_z {
            Ok(())
        } else {
            Err(MixError::InvalidGradientConfig)
        }
    }
}

pub struct GradientMix<W: MixWidth, const N: usize> {
    settings: GradientSettings,
    enabled: bool,
    start_mix: PercentMix<N>,
    end_mix: PercentMix<N>,
    mix: PercentMix<N>,
    color: MixColor<W, N>,
    prev_z: Option<f32>,
}

impl<W: MixWidth, const N: usize> GradientMix<W, N> {
    pub fn new() -> Self {
        Self {
            settings: GradientSettings::default(),
            enabled: false,
            start_mix: PercentMix::equal(),
            end_mix: PercentMix::equal(),
            mix: PercentMix::equal(),
            color: MixColor::flat(),
            prev_z: None,
        }
    }

    pub fn settings(&self) -> &GradientSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn color(&self) -> &MixColor<W, N> {
        &self.color
    }

    pub fn mix(&self) -> &PercentMix<N> {
        &self.mix
    }

    pub fn start_mix(&self) -> &PercentMix<N> {
        &self.start_mix
    }

    pub fn end_mix(&self) -> &PercentMix<N> {
        &self.end_mix
    }

    pub fn end_z(&self) -> f32 {
        self.settings.end_z
    }

    /// Store new settings. Takes effect on the next [`refresh`].
    ///
    /// [`refresh`]: GradientMix::refresh
    pub fn configure(&mut self, settings: GradientSettings) {
        self.settings = settings;
    }

    /// Forget the range and tools, keeping the pin.
    pub fn clear(&mut self) {
        self.settings = GradientSettings {
            start_z: 0.0,
            end_z: 0.0,
            start_tool: 0,
            end_tool: 0,
            pin: self.settings.pin,
        };
        self.enabled = false;
    }

    /// Forget the last evaluated height so the next update recomputes.
    pub(crate) fn rearm(&mut self) {
        self.prev_z = None;
    }

    /// Switched off because random mixing took over.
    pub(crate) fn yield_to_random(&mut self) {
        self.settings.start_tool = 0;
        self.settings.end_tool = 1;
        self.settings.start_z = 0.0;
        self.settings.end_z = 0.0;
        self.enabled = false;
    }

    /// Re-evaluate whether the gradient is live and, if so, cache the two
    /// endpoint mixes from the palette.
    pub fn refresh(&mut self, palette: &VirtualTools<W, N>) -> bool {
        let tracks_selection = self.settings.pin.map_or(true, |t| t == palette.selected());
        let endpoints = (
            palette.color(self.settings.start_tool),
            palette.color(self.settings.end_tool),
        );

        self.enabled = false;
        if let (true, Ok(()), (Ok(start), Ok(end))) =
            (tracks_selection, self.settings.check(), endpoints)
        {
            self.start_mix = PercentMix::from_color(start);
            self.end_mix = PercentMix::from_color(end);
            self.prev_z = None;
            self.enabled = true;
        }
        self.enabled
    }

    /// Blend for height `z`. Returns the new mix, or `None` when the
    /// gradient is off or `z` was already evaluated and `force` is unset.
    pub fn blend(&mut self, z: f32, force: bool) -> Option<PercentMix<N>> {
        if !self.enabled || (!force && self.prev_z == Some(z)) {
            return None;
        }
        self.prev_z = Some(z);

        let GradientSettings { start_z, end_z, .. } = self.settings;
        let t = (z - start_z) / (end_z - start_z);
        self.mix = PercentMix::blend(&self.start_mix, &self.end_mix, t).normalized();
        self.color = self.mix.to_color();
        Some(self.mix)
    }
}

impl<W: MixWidth, const N: usize> Default for GradientMix<W, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::MixerConfig, fixed::Wide};

    fn palette() -> VirtualTools<Wide, 4> {
        VirtualTools::new(&MixerConfig {
            user_tools: 4,
            ..Default::default()
        })
    }

    fn ramp(pin: Option<u8>) -> GradientSettings {
        GradientSettings {
            start_z: 0.0,
            end_z: 10.0,
            start_tool: 0,
            end_tool: 1,
            pin,
        }
    }

    #[test]
    fn default_settings_are_off() {
        let mut gradient = GradientMix::<Wide, 4>::new();
        assert!(!gradient.refresh(&palette()));
        assert_eq!(
            gradient.settings().check(),
            Err(MixError::InvalidGradientConfig)
        );
    }

    #[test]
    fn refresh_caches_endpoint_mixes() {
        let mut gradient = GradientMix::<Wide, 4>::new();
        gradient.configure(ramp(None));
        assert!(gradient.refresh(&palette()));
        assert_eq!(gradient.start_mix().parts(), &[100, 0, 0, 0]);
        assert_eq!(gradient.end_mix().parts(), &[0, 100, 0, 0]);
    }

    #[test]
    fn same_tool_or_inverted_range_stays_off() {
        let mut gradient = GradientMix::<Wide, 4>::new();
        gradient.configure(GradientSettings {
            end_tool: 0,
            ..ramp(None)
        });
        assert!(!gradient.refresh(&palette()));

        gradient.configure(GradientSettings {
            start_z: 12.0,
            ..ramp(None)
        });
        assert!(!gradient.refresh(&palette()));
    }

    #[test]
    fn unknown_endpoint_tool_stays_off() {
        let mut gradient = GradientMix::<Wide, 4>::new();
        gradient.configure(GradientSettings {
            end_tool: 40,
            ..ramp(None)
        });
        assert!(!gradient.refresh(&palette()));
    }

    #[test]
    fn pinned_gradient_follows_selection() {
        let mut tools = palette();
        let mut gradient = GradientMix::<Wide, 4>::new();
        gradient.configure(ramp(Some(2)));
        assert!(!gradient.refresh(&tools));

        tools.select(2).unwrap();
        assert!(gradient.refresh(&tools));
    }

    #[test]
    fn blend_interpolates_and_clamps() {
        let mut gradient = GradientMix::<Wide, 4>::new();
        gradient.configure(ramp(None));
        gradient.refresh(&palette());

        assert_eq!(gradient.blend(5.0, false).unwrap().parts(), &[50, 50, 0, 0]);
        assert_eq!(gradient.color().weights(), &[0x8000, 0x8000, 0, 0]);

        assert_eq!(gradient.blend(2.5, false).unwrap().parts(), &[75, 25, 0, 0]);
        assert_eq!(gradient.blend(-3.0, false).unwrap().parts(), &[100, 0, 0, 0]);
        assert_eq!(gradient.blend(30.0, false).unwrap().parts(), &[0, 100, 0, 0]);
    }

    #[test]
    fn blend_skips_repeated_height_unless_forced() {
        let mut gradient = GradientMix::<Wide, 4>::new();
        gradient.configure(ramp(None));
        gradient.refresh(&palette());

        assert!(gradient.blend(4.0, false).is_some());
        assert!(gradient.blend(4.0, false).is_none());
        assert!(gradient.blend(4.0, true).is_some());
    }

    #[test]
    fn disabled_gradient_never_blends() {
        let mut gradient = GradientMix::<Wide, 4>::new();
        assert!(gradient.blend(1.0, true).is_none());
    }

    #[test]
    fn clear_keeps_pin_and_turns_off() {
        let mut tools = palette();
        tools.select(3).unwrap();
        let mut gradient = GradientMix::<Wide, 4>::new();
        gradient.configure(ramp(Some(3)));
        assert!(gradient.refresh(&tools));

        gradient.clear();
        assert!(!gradient.is_enabled());
        assert_eq!(gradient.settings().pin, Some(3));
        assert!(!gradient.refresh(&tools));
    }
}
