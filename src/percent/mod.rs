//! Percentage view of a mix, and conversion to and from fixed-point colors.

/*
Percentages
===========

Operators think in percentages: "60% cyan, 40% magenta". The editor vector
is N signed percentages, one per stepper, each editable on its own. While
someone is typing it does not have to add up to anything.

Before a percentage vector becomes a color it is normalized:

  1. negative parts are clamped to zero
  2. the parts are rescaled so they sum to exactly 100
  3. rounding loss goes to the largest part (the first one on ties)
  4. a part that was positive stays at least 1

A vector that already sums to 100 with no negative part is left alone, so
normalizing twice is the same as normalizing once. A vector with nothing
positive in it has no ratio at all and becomes an equal split.


Percent -> Color
----------------

    color[i] = percent[i] * FULL_SCALE / max(percent)

Integer math, truncating. The largest part maps to FULL_SCALE exactly.

    [50, 50, 0, 0]  ->  [0x8000, 0x8000, 0, 0]
    [60, 30, 10]    ->  [0x8000, 0x4000, 0x1555]


Color -> Percent
----------------

Each stepper's exact share is 100 * color[i] / sum(color). Flooring every
share loses up to one point per stepper; the points left over go to the
steppers with the largest fractional remainders (largest remainder
apportionment). Every result is within one point of the exact share and the
total is 100 without a correction pass.

Both directions are lossy. A round trip keeps the set of non-zero parts and
lands within one point of where it started.
*/

use core::fmt;

use crate::{
    error::{MixError, MixResult},
    fixed::{MixColor, MixWidth},
};

/// One percentage, as stored by the editor.
pub type Percent = i8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PercentMix<const N: usize> {
    parts: [Percent; N],
}

impl<const N: usize> PercentMix<N> {
    /// Wrap raw parts as given; nothing is checked until [`normalize`].
    ///
    /// [`normalize`]: PercentMix::normalize
    pub fn new(parts: [Percent; N]) -> Self {
        Self { parts }
    }

    /// 100 / N each, the remainder on the first stepper.
    pub fn equal() -> Self {
        let n = N.max(1) as i32;
        let mut parts = [(100 / n) as Percent; N];
        if let Some(first) = parts.first_mut() {
            *first += (100 % n) as Percent;
        }
        Self { parts }
    }

    pub fn parts(&self) -> &[Percent; N] {
        &self.parts
    }

    pub fn get(&self, stepper: usize) -> MixResult<Percent> {
        self.parts
            .get(stepper)
            .copied()
            .ok_or(MixError::StepperOutOfRange {
                stepper,
                steppers: N,
            })
    }

    /// Edit one part without normalizing.
    pub fn set(&mut self, stepper: usize, value: Percent) -> MixResult<()> {
        let part = self
            .parts
            .get_mut(stepper)
            .ok_or(MixError::StepperOutOfRange {
                stepper,
                steppers: N,
            })?;
        *part = value;
        Ok(())
    }

    pub fn sum(&self) -> i32 {
        self.parts.iter().map(|&p| p as i32).sum()
    }

    pub fn is_normalized(&self) -> bool {
        self.parts.iter().all(|&p| p >= 0) && self.sum() == 100
    }

    /// Clamp, rescale to a total of 100 and settle the rounding.
    ///
    /// `Err(DegenerateRatio)` means nothing was positive and the mix is now
    /// an equal split; `self` is valid either way.
    pub fn normalize(&mut self) -> MixResult<()> {
        for p in self.parts.iter_mut() {
            if *p < 0 {
                *p = 0;
            }
        }

        let sum = self.sum();
        if sum == 0 {
            *self = Self::equal();
            return Err(MixError::DegenerateRatio);
        }
        if sum == 100 {
            return Ok(());
        }

        let mut shares = [0u64; N];
        for (share, &p) in shares.iter_mut().zip(self.parts.iter()) {
            *share = p as u64;
        }
        self.parts = apportion(&shares, sum as u64);
        Ok(())
    }

    /// Normalized copy; a degenerate mix comes back as an equal split.
    pub fn normalized(&self) -> Self {
        let mut mix = *self;
        let _ = mix.normalize();
        mix
    }

    /// Scale-to-max fixed-point color of the normalized mix.
    pub fn to_color<W: MixWidth>(&self) -> MixColor<W, N> {
        let mix = self.normalized();
        let max = mix.parts.iter().copied().max().unwrap_or(0).max(1) as u32;

        let mut weights = [W::Comp::default(); N];
        for (w, &p) in weights.iter_mut().zip(mix.parts.iter()) {
            *w = W::comp(p as u32 * W::FULL_SCALE / max);
        }
        MixColor::from_weights(weights)
    }

    /// Percentages of a color by largest remainder apportionment.
    pub fn from_color<W: MixWidth>(color: &MixColor<W, N>) -> Self {
        let total = color.total() as u64;
        if total == 0 {
            return Self::equal();
        }

        let mut shares = [0u64; N];
        for (i, share) in shares.iter_mut().enumerate() {
            *share = color.weight(i) as u64;
        }
        Self {
            parts: apportion(&shares, total),
        }
    }

    /// Linear blend of two mixes, `t` clamped to [0, 1], rounded per part.
    ///
    /// The result is raw: callers normalize it.
    pub fn blend(start: &Self, end: &Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mut parts = [0 as Percent; N];
        for ((p, &s), &e) in parts.iter_mut().zip(start.parts.iter()).zip(end.parts.iter()) {
            let (s, e) = (s as f32, e as f32);
            *p = (s + (e - s) * t).round() as Percent;
        }
        Self { parts }
    }
}

impl<const N: usize> Default for PercentMix<N> {
    fn default() -> Self {
        Self::equal()
    }
}

impl<const N: usize> fmt::Display for PercentMix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// Split 100 points over `shares` (summing to `total > 0`) by largest
/// remainder apportionment, first index on ties.
fn apportion<const N: usize>(shares: &[u64; N], total: u64) -> [Percent; N] {
    let mut parts = [0 as Percent; N];
    let mut remainders = [0u64; N];
    let mut handed_out = 0i32;
    for ((p, r), &share) in parts.iter_mut().zip(remainders.iter_mut()).zip(shares.iter()) {
        let quota = 100 * share;
        *p = (quota / total) as Percent;
        *r = quota % total;
        handed_out += *p as i32;
    }

    // The leftover is the sum of the fractional shares, so there are
    // always enough non-zero remainders to absorb it.
    for _ in handed_out..100 {
        let next = remainders
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r > 0)
            .fold(None, |best: Option<(usize, u64)>, (i, &r)| match best {
                Some((_, b)) if b >= r => best,
                _ => Some((i, r)),
            });
        match next {
            Some((i, _)) => {
                parts[i] += 1;
                remainders[i] = 0;
            }
            None => break,
        }
    }

    // a stepper that carries weight must not vanish from the editor
    for i in 0..N {
        if shares[i] > 0 && parts[i] == 0 {
            let lead = lead_index(&parts);
            if parts[lead] > 1 {
                parts[lead] -= 1;
                parts[i] = 1;
            }
        }
    }
    parts
}

/// Index of the largest value, first one on ties.
fn lead_index<T: Copy + PartialOrd>(values: &[T]) -> usize {
    let mut lead = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[lead] {
            lead = i;
        }
    }
    lead
}
