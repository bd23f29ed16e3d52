use core::fmt;

use crate::{
    error::{MixError, MixResult},
    fixed::width::MixWidth,
};

/// N stepper weights in the fixed-point format of `W`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixColor<W: MixWidth, const N: usize> {
    weights: [W::Comp; N],
}

impl<W: MixWidth, const N: usize> MixColor<W, N> {
    /// Wrap raw weights as given. The result may be unnormalized.
    pub fn from_weights(weights: [W::Comp; N]) -> Self {
        Self { weights }
    }

    pub fn zero() -> Self {
        Self {
            weights: [W::Comp::default(); N],
        }
    }

    /// Every stepper at FULL_SCALE: an even split.
    pub fn flat() -> Self {
        Self {
            weights: [W::comp(W::FULL_SCALE); N],
        }
    }

    /// All of the feed on one stepper.
    pub fn pure(stepper: usize) -> MixResult<Self> {
        if stepper >= N {
            return Err(MixError::StepperOutOfRange {
                stepper,
                steppers: N,
            });
        }
        let mut color = Self::zero();
        color.weights[stepper] = W::comp(W::FULL_SCALE);
        Ok(color)
    }

    /// Scale float proportions so the largest one lands on FULL_SCALE.
    ///
    /// Negative and non-finite inputs count as zero. Returns `None` when no
    /// component is positive.
    pub fn from_proportions(values: &[f32; N]) -> Option<Self> {
        let clean = values.map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 });
        let max = clean.iter().copied().fold(0.0f32, f32::max);
        if max <= 0.0 {
            return None;
        }

        let mut weights = [W::Comp::default(); N];
        for (w, &v) in weights.iter_mut().zip(clean.iter()) {
            let scaled = if v == max {
                W::FULL_SCALE
            } else {
                ((v / max) * W::FULL_SCALE as f32).min(W::FULL_SCALE as f32) as u32
            };
            *w = W::comp(scaled);
        }
        Some(Self { weights })
    }

    pub fn weights(&self) -> &[W::Comp; N] {
        &self.weights
    }

    /// Weight of one stepper widened to `u32`.
    ///
    /// # Panics
    /// If `stepper >= N`.
    #[inline(always)]
    pub fn weight(&self, stepper: usize) -> u32 {
        self.weights[stepper].into()
    }

    #[inline(always)]
    pub(crate) fn comp(&self, stepper: usize) -> W::Comp {
        self.weights[stepper]
    }

    pub fn max_weight(&self) -> u32 {
        self.weights
            .iter()
            .map(|&w| Into::<u32>::into(w))
            .max()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.weights.iter().map(|&w| Into::<u32>::into(w)).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.max_weight() == 0
    }

    /// True when the dominant weight sits exactly at FULL_SCALE.
    pub fn is_normalized(&self) -> bool {
        self.max_weight() == W::FULL_SCALE
    }

    /// Rescale so the largest weight equals FULL_SCALE, truncating the rest.
    ///
    /// Returns `None` for an all-zero color, which has no ratio to keep.
    pub fn normalized(&self) -> Option<Self> {
        let max = self.max_weight();
        if max == 0 {
            return None;
        }
        if max == W::FULL_SCALE {
            return Some(*self);
        }

        let mut weights = self.weights;
        for w in weights.iter_mut() {
            let v: u32 = (*w).into();
            *w = W::comp(v * W::FULL_SCALE / max);
        }
        Some(Self { weights })
    }

    /// Share of the feed taken by each stepper, in [0, 1].
    pub fn shares(&self) -> [f32; N] {
        let total = self.total();
        if total == 0 {
            return [0.0; N];
        }
        let mut out = [0.0; N];
        for (o, &w) in out.iter_mut().zip(self.weights.iter()) {
            let v: u32 = w.into();
            *o = v as f32 / total as f32;
        }
        out
    }
}

impl<W: MixWidth, const N: usize> fmt::Display for MixColor<W, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &w) in self.weights.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            let v: u32 = w.into();
            write!(f, "{v:#x}")?;
        }
        Ok(())
    }
}
