use crate::fixed::MixWidth;

use super::block::BlockColor;

/// Chooses which physical stepper takes each mixed-axis step.
///
/// One accumulator per stepper. Each call walks the steppers downward from
/// the last one chosen, wrapping from 0 to N - 1, adding each stepper's
/// weight to its accumulator. The first accumulator to carry wins the step
/// and keeps its remainder.
///
/// Over `sum(weights)` consecutive calls from reset, stepper `i` is chosen
/// exactly `weights[i]` times. A stepper with weight 0 is never chosen.
pub struct PulseDistributor<W: MixWidth, const N: usize> {
    runner: usize,
    accu: [W::Accu; N],
}

impl<W: MixWidth, const N: usize> PulseDistributor<W, N> {
    pub fn new() -> Self {
        Self {
            runner: 0,
            accu: [W::Accu::default(); N],
        }
    }

    /// Zero the accumulators and the scan position.
    pub fn reset(&mut self) {
        self.runner = 0;
        self.accu = [W::Accu::default(); N];
    }

    /// Stepper chosen by the previous call (0 after reset).
    pub fn last_stepper(&self) -> usize {
        self.runner
    }

    #[inline]
    pub fn next_stepper(&mut self, color: &BlockColor<W, N>) -> usize {
        if N == 0 {
            return 0;
        }
        // a normalized color has a FULL_SCALE component, which carries on
        // every visit, so this settles within N iterations
        loop {
            self.runner = if self.runner == 0 { N - 1 } else { self.runner - 1 };
            if W::accumulate(&mut self.accu[self.runner], color.comp(self.runner)) {
                return self.runner;
            }
        }
    }
}

impl<W: MixWidth, const N: usize> Default for PulseDistributor<W, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{MixColor, Narrow, Wide};

    fn block<W: MixWidth, const N: usize>(weights: [u32; N]) -> BlockColor<W, N> {
        let mut comps = [W::Comp::default(); N];
        for (c, w) in comps.iter_mut().zip(weights) {
            *c = W::comp(w);
        }
        BlockColor::try_from(MixColor::from_weights(comps)).unwrap()
    }

    fn tally<W: MixWidth, const N: usize>(color: &BlockColor<W, N>, calls: usize) -> [u32; N] {
        let mut distributor = PulseDistributor::<W, N>::new();
        let mut counts = [0u32; N];
        for _ in 0..calls {
            counts[distributor.next_stepper(color)] += 1;
        }
        counts
    }

    /// Replay `calls` picks and rebuild the scan walk from the chosen
    /// steppers. After `k` visits a stepper has fired exactly
    /// `floor(k * weight / FULL_SCALE)` times, and it never goes more than
    /// `ceil(FULL_SCALE / weight)` of its own visits without firing.
    fn assert_bounded<W: MixWidth, const N: usize>(weights: [u32; N], calls: usize) {
        let color = block::<W, N>(weights);
        let full = W::FULL_SCALE as u64;
        let n = N as u64;
        let mut distributor = PulseDistributor::<W, N>::new();
        let mut walked = 0u64;
        let mut fired = [0u64; N];
        let mut last_fire: [Option<u64>; N] = [None; N];

        for call in 0..calls {
            let prev = distributor.last_stepper();
            let chosen = distributor.next_stepper(&color);
            walked += match (prev + N - chosen) % N {
                0 => n,
                d => d as u64,
            };
            fired[chosen] += 1;

            if let Some(before) = last_fire[chosen] {
                let gap = (walked - before) / n;
                let bound = full.div_ceil(weights[chosen] as u64);
                assert!(
                    gap <= bound,
                    "weights={weights:?} call={call} stepper={chosen} gap={gap} bound={bound}"
                );
            }
            last_fire[chosen] = Some(walked);

            for (i, &w) in weights.iter().enumerate() {
                // the walk first reaches stepper i after N - i visits (N for 0)
                let first = n - i as u64;
                let visits = if walked >= first { (walked - first) / n + 1 } else { 0 };
                assert_eq!(
                    fired[i],
                    visits * w as u64 / full,
                    "weights={weights:?} call={call} stepper={i}"
                );
            }
        }
    }

    #[test]
    fn wide_grid_stays_within_one_unit() {
        const GRID: [u32; 7] = [0, 1, 0x0155, 0x2AAA, 0x4000, 0x7FFF, 0x8000];
        for (k, &a) in GRID.iter().enumerate() {
            for &b in &GRID {
                for &c in &GRID {
                    // move the full-scale component around the scan order
                    let slot = k % 4;
                    let mut rest = [a, b, c].into_iter();
                    let weights: [u32; 4] = std::array::from_fn(|i| {
                        if i == slot {
                            0x8000
                        } else {
                            rest.next().unwrap_or(0)
                        }
                    });
                    assert_bounded::<Wide, 4>(weights, 3000);
                }
            }
        }
    }

    #[test]
    fn narrow_grid_stays_within_one_unit() {
        const GRID: [u32; 8] = [0, 1, 0x15, 0x2A, 0x40, 0x55, 0x7F, 0x80];
        for &a in &GRID {
            for &b in &GRID {
                let weights = [a, 0x80, b];
                let period = weights.iter().sum::<u32>() as usize;
                assert_bounded::<Narrow, 3>(weights, 2 * period);
            }
        }
    }

    #[test]
    fn half_weight_full_period_interleaves() {
        let weights = [0x8000, 0x4000, 0];
        let color = block::<Wide, 3>(weights);
        let mut distributor = PulseDistributor::new();
        let picks: Vec<usize> = (0..0xC000).map(|_| distributor.next_stepper(&color)).collect();

        let mut counts = [0u32; 3];
        for &p in &picks {
            counts[p] += 1;
        }
        assert_eq!(counts, weights);
        // never batched: stepper 1 always sits between zeros
        assert!(picks.windows(2).all(|w| w != [1, 1]));
        assert!(picks.windows(3).all(|w| w != [0, 0, 0]));
    }

    #[test]
    fn half_weight_interleaves() {
        let color = block::<Wide, 3>([0x8000, 0x4000, 0]);
        let mut distributor = PulseDistributor::new();
        let picks: Vec<usize> = (0..8).map(|_| distributor.next_stepper(&color)).collect();
        assert_eq!(picks, vec![0, 1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn pure_color_drives_one_stepper() {
        let color = block::<Wide, 4>([0, 0, 0x8000, 0]);
        assert_eq!(tally(&color, 1000), [0, 0, 1000, 0]);
    }

    #[test]
    fn flat_color_round_robins_downward() {
        let color = block::<Wide, 3>([0x8000, 0x8000, 0x8000]);
        let mut distributor = PulseDistributor::new();
        let picks: Vec<usize> = (0..6).map(|_| distributor.next_stepper(&color)).collect();
        assert_eq!(picks, vec![2, 1, 0, 2, 1, 0]);
    }

    #[test]
    fn one_period_matches_weights_exactly() {
        let weights = [0x8000, 0x4000, 0x1555, 0x0001];
        let color = block::<Wide, 4>(weights);
        let period = weights.iter().sum::<u32>() as usize;
        assert_eq!(tally(&color, period), weights);
    }

    #[test]
    fn narrow_period_matches_weights_exactly() {
        let weights = [0x33, 0x80, 0x07, 0x00, 0x41];
        let color = block::<Narrow, 5>(weights);
        let period = weights.iter().sum::<u32>() as usize;
        assert_eq!(tally(&color, period), weights);
    }

    #[test]
    fn zero_weight_is_never_chosen() {
        let color = block::<Wide, 3>([0x8000, 0, 0x0100]);
        assert_eq!(tally(&color, 50_000)[1], 0);
    }

    #[test]
    fn reset_restarts_the_sequence() {
        let color = block::<Wide, 3>([0x8000, 0x4000, 0x2000]);
        let mut distributor = PulseDistributor::new();
        let first: Vec<usize> = (0..10).map(|_| distributor.next_stepper(&color)).collect();
        distributor.reset();
        assert_eq!(distributor.last_stepper(), 0);
        let again: Vec<usize> = (0..10).map(|_| distributor.next_stepper(&color)).collect();
        assert_eq!(first, again);
    }
}
