use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::fixed::MixWidth;

use super::block::Segment;

pub trait SegmentReceiver<W: MixWidth, const N: usize> {
    fn pop(&mut self) -> Option<Segment<W, N>>;
}

#[cfg(feature = "rtrb")]
impl<W: MixWidth, const N: usize> SegmentReceiver<W, N> for Consumer<Segment<W, N>> {
    fn pop(&mut self) -> Option<Segment<W, N>> {
        Consumer::pop(self).ok()
    }
}

impl<W: MixWidth, const N: usize> SegmentReceiver<W, N> for VecDeque<Segment<W, N>> {
    fn pop(&mut self) -> Option<Segment<W, N>> {
        self.pop_front()
    }
}

/// Wait-free planner to stepper queue.
#[cfg(feature = "rtrb")]
pub fn segment_queue<W: MixWidth, const N: usize>(
    capacity: usize,
) -> (Producer<Segment<W, N>>, Consumer<Segment<W, N>>) {
    RingBuffer::new(capacity)
}
