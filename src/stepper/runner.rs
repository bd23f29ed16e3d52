use crate::fixed::MixWidth;

use super::{
    block::{BlockColor, Segment},
    distributor::PulseDistributor,
    message::SegmentReceiver,
};

/// Consumer side of the segment queue: drains planned segments and turns
/// each of their steps into one physical stepper pulse.
///
/// Never allocates or logs; safe to drive from the stepper interrupt
/// stand-in thread.
pub struct StepperRunner<W: MixWidth, const N: usize, Rx: SegmentReceiver<W, N>> {
    rx: Rx,
    distributor: PulseDistributor<W, N>,
    color: BlockColor<W, N>,
    remaining: u32,
    pulses: [u64; N],
    segments: u64,
}

impl<W: MixWidth, const N: usize, Rx: SegmentReceiver<W, N>> StepperRunner<W, N, Rx> {
    pub fn new(rx: Rx) -> Self {
        Self {
            rx,
            distributor: PulseDistributor::new(),
            color: BlockColor::default(),
            remaining: 0,
            pulses: [0; N],
            segments: 0,
        }
    }

    /// One pulse. `None` when the queue has nothing left to step.
    pub fn step(&mut self) -> Option<usize> {
        while self.remaining == 0 {
            let Segment { steps, color } = self.rx.pop()?;
            self.color = color;
            self.remaining = steps;
            self.segments += 1;
        }

        let stepper = self.distributor.next_stepper(&self.color);
        self.remaining -= 1;
        self.pulses[stepper] += 1;
        Some(stepper)
    }

    /// Up to `budget` pulses; returns how many were issued.
    pub fn run(&mut self, budget: usize, mut on_pulse: impl FnMut(usize)) -> usize {
        let mut issued = 0;
        while issued < budget {
            match self.step() {
                Some(stepper) => on_pulse(stepper),
                None => break,
            }
            issued += 1;
        }
        issued
    }

    /// Color of the segment being stepped.
    pub fn color(&self) -> &BlockColor<W, N> {
        &self.color
    }

    /// Steps left in the current segment.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Pulses per stepper since construction or the last tally reset.
    pub fn pulses(&self) -> &[u64; N] {
        &self.pulses
    }

    pub fn segments(&self) -> u64 {
        self.segments
    }

    pub fn reset_tallies(&mut self) {
        self.pulses = [0; N];
        self.segments = 0;
    }

    pub fn receiver_mut(&mut self) -> &mut Rx {
        &mut self.rx
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::fixed::{MixColor, Wide};

    fn segment(steps: u32, weights: [u16; 2]) -> Segment<Wide, 2> {
        Segment {
            steps,
            color: BlockColor::try_from(MixColor::from_weights(weights)).unwrap(),
        }
    }

    #[test]
    fn empty_queue_issues_nothing() {
        let mut runner = StepperRunner::<Wide, 2, _>::new(VecDeque::<Segment<Wide, 2>>::new());
        assert_eq!(runner.step(), None);
        assert_eq!(runner.segments(), 0);
    }

    #[test]
    fn each_segment_keeps_its_own_color() {
        let queue = VecDeque::from(vec![
            segment(4, [0x8000, 0]),
            segment(0, [0x8000, 0x8000]),
            segment(3, [0, 0x8000]),
        ]);
        let mut runner = StepperRunner::<Wide, 2, _>::new(queue);

        let mut picks = Vec::new();
        let issued = runner.run(100, |s| picks.push(s));

        assert_eq!(issued, 7);
        assert_eq!(picks, vec![0, 0, 0, 0, 1, 1, 1]);
        assert_eq!(runner.pulses(), &[4, 3]);
        assert_eq!(runner.segments(), 3);
    }

    #[test]
    fn run_respects_budget() {
        let queue = VecDeque::from(vec![segment(10, [0x8000, 0x8000])]);
        let mut runner = StepperRunner::<Wide, 2, _>::new(queue);
        assert_eq!(runner.run(4, |_| {}), 4);
        assert_eq!(runner.remaining(), 6);
        assert_eq!(runner.pulses().iter().sum::<u64>(), 4);

        runner.reset_tallies();
        assert_eq!(runner.pulses(), &[0, 0]);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn drains_ring_buffer() {
        let (mut tx, rx) = crate::stepper::segment_queue::<Wide, 2>(4);
        tx.push(segment(2, [0x8000, 0x8000])).unwrap();

        let mut runner = StepperRunner::<Wide, 2, _>::new(rx);
        assert_eq!(runner.run(10, |_| {}), 2);
        assert_eq!(runner.pulses(), &[1, 1]);
    }
}
