//! Component-by-component mix entry.
//!
//! The collector holds one non-negative float per stepper. A mix is built up
//! here a component at a time and only becomes a tool color when it is
//! committed, at which point it is scaled so the largest component lands on
//! FULL_SCALE.

use crate::{
    error::{MixError, MixResult},
    fixed::{MixColor, MixWidth},
    percent::PercentMix,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collector<const N: usize> {
    parts: [f32; N],
}

impl<const N: usize> Collector<N> {
    pub fn new() -> Self {
        Self { parts: [0.0; N] }
    }

    pub fn parts(&self) -> &[f32; N] {
        &self.parts
    }

    /// Set one component; negatives are stored as zero.
    pub fn set(&mut self, stepper: usize, value: f32) -> MixResult<()> {
        let part = self
            .parts
            .get_mut(stepper)
            .ok_or(MixError::StepperOutOfRange {
                stepper,
                steppers: N,
            })?;
        *part = if value.is_finite() { value.max(0.0) } else { 0.0 };
        Ok(())
    }

    /// 1.0 on one stepper, zero elsewhere.
    pub fn reset_to(&mut self, stepper: usize) -> MixResult<()> {
        if stepper >= N {
            return Err(MixError::StepperOutOfRange {
                stepper,
                steppers: N,
            });
        }
        for (i, part) in self.parts.iter_mut().enumerate() {
            *part = if i == stepper { 1.0 } else { 0.0 };
        }
        Ok(())
    }

    /// Load a color scaled by `proportion` (1.0 = FULL_SCALE reads as 1.0).
    pub fn load_color<W: MixWidth>(&mut self, color: &MixColor<W, N>, proportion: f32) {
        let scale = proportion.max(0.0) / W::FULL_SCALE as f32;
        for (i, part) in self.parts.iter_mut().enumerate() {
            *part = color.weight(i) as f32 * scale;
        }
    }

    /// Mirror a percentage mix (50% reads as 0.5).
    pub fn load_percent(&mut self, mix: &PercentMix<N>) {
        for (part, &p) in self.parts.iter_mut().zip(mix.parts().iter()) {
            *part = (p.max(0) as f32) / 100.0;
        }
    }

    /// Scale-to-max color, `None` while every component is zero.
    pub fn to_color<W: MixWidth>(&self) -> Option<MixColor<W, N>> {
        MixColor::from_proportions(&self.parts)
    }
}

impl<const N: usize> Default for Collector<N> {
    fn default() -> Self {
        Self::new()
    }
}
