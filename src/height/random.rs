use rand::{seq::SliceRandom, Rng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{MixError, MixResult},
    fixed::{MixColor, MixWidth},
    percent::{Percent, PercentMix},
};

/// Random mix parameters. `band` is the Z distance between rolls and
/// `extruders` the number of leading steppers that take part.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomSettings {
    pub start_z: f32,
    pub end_z: f32,
    pub band: f32,
    pub extruders: u8,
}

impl RandomSettings {
    pub fn check(&self) -> MixResult<()> {
        if self.start_z < self.end_z && self.band > 0.0 && self.extruders > 0 {
            Ok(())
        } else {
            Err(MixError::InvalidRandomConfig)
        }
    }
}

pub struct RandomMix<W: MixWidth, const N: usize> {
    settings: RandomSettings,
    default_band: f32,
    enabled: bool,
    mix: PercentMix<N>,
    color: MixColor<W, N>,
    prev_z: Option<f32>,
}

impl<W: MixWidth, const N: usize> RandomMix<W, N> {
    pub fn new(default_band: f32) -> Self {
        Self {
            settings: Self::idle_settings(default_band),
            default_band,
            enabled: false,
            mix: PercentMix::equal(),
            color: MixColor::flat(),
            prev_z: None,
        }
    }

    fn idle_settings(band: f32) -> RandomSettings {
        RandomSettings {
            start_z: 0.0,
            end_z: 0.0,
            band,
            extruders: N.min(u8::MAX as usize) as u8,
        }
    }

    pub fn settings(&self) -> &RandomSettings {
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

    pub fn end_z(&self) -> f32 {
        self.settings.end_z
    }

    /// Store new settings with `extruders` clamped to the stepper count.
    /// Takes effect on the next [`refresh`].
    ///
    /// [`refresh`]: RandomMix::refresh
    pub fn configure(&mut self, settings: RandomSettings) {
        let most = N.min(u8::MAX as usize) as u8;
        self.settings = RandomSettings {
            extruders: settings.extruders.min(most),
            ..settings
        };
    }

    /// Back to idle defaults and off.
    pub fn clear(&mut self) {
        self.settings = Self::idle_settings(self.default_band);
        self.enabled = false;
    }

    /// Switched off because a gradient took over.
    pub(crate) fn yield_to_gradient(&mut self) {
        self.settings.start_z = 0.0;
        self.settings.end_z = 0.0;
        self.enabled = false;
    }

    pub fn refresh(&mut self) -> bool {
        self.enabled = self.settings.check().is_ok();
        if self.enabled {
            self.prev_z = None;
        }
        self.enabled
    }

    /// Roll a new mix for height `z` if it moved at least one band since the
    /// last roll. `None` means the mix is unchanged.
    pub fn roll<R: Rng + ?Sized>(
        &mut self,
        z: f32,
        force: bool,
        rng: &mut R,
    ) -> Option<PercentMix<N>> {
        if !self.enabled {
            return None;
        }
        if !force {
            if let Some(prev) = self.prev_z {
                if (z - prev).abs() < self.settings.band {
                    return None;
                }
            }
        }
        self.prev_z = Some(z);

        self.mix = self.draw(rng);
        self.color = self.mix.to_color();
        Some(self.mix)
    }

    /// Split 100 points over a shuffled order of the participating steppers.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> PercentMix<N> {
        let count = (self.settings.extruders as usize).clamp(1, N.max(1));

        let mut order = [0usize; N];
        for (i, slot) in order.iter_mut().enumerate() {
            *slot = i;
        }
        let order = &mut order[..count.min(N)];
        order.shuffle(rng);

        let mut parts = [0 as Percent; N];
        let mut left: i32 = 100;
        for (k, &stepper) in order.iter().enumerate() {
            let share = if k + 1 == order.len() {
                left
            } else {
                rng.gen_range(0..=left)
            };
            parts[stepper] = share as Percent;
            left -= share;
        }
        PercentMix::new(parts).normalized()
    }
}
