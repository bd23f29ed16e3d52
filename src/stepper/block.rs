use crate::{
    error::MixError,
    fixed::{MixColor, MixWidth},
};

/// The color a planned block was stamped with.
///
/// Taken by value when the block is planned. Later palette edits or height
/// updates never reach a block that is already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockColor<W: MixWidth, const N: usize> {
    color: MixColor<W, N>,
}

impl<W: MixWidth, const N: usize> BlockColor<W, N> {
    /// Snapshot of a color the mixer already holds normalized.
    pub(crate) fn capture(color: MixColor<W, N>) -> Self {
        debug_assert!(color.is_normalized(), "unnormalized block color {color}");
        Self { color }
    }

    pub fn color(&self) -> &MixColor<W, N> {
        &self.color
    }

    pub fn weight(&self, stepper: usize) -> u32 {
        self.color.weight(stepper)
    }

    #[inline(always)]
    pub(crate) fn comp(&self, stepper: usize) -> W::Comp {
        self.color.comp(stepper)
    }
}

impl<W: MixWidth, const N: usize> Default for BlockColor<W, N> {
    fn default() -> Self {
        Self {
            color: MixColor::flat(),
        }
    }
}

/// Only a color with a component at FULL_SCALE may drive the distributor;
/// anything else could scan forever without a carry.
impl<W: MixWidth, const N: usize> TryFrom<MixColor<W, N>> for BlockColor<W, N> {
    type Error = MixError;

    fn try_from(color: MixColor<W, N>) -> Result<Self, Self::Error> {
        if color.is_normalized() {
            Ok(Self { color })
        } else {
            Err(MixError::NotNormalized)
        }
    }
}

/// A run of steps on the mixed extruder axis, all with one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<W: MixWidth, const N: usize> {
    pub steps: u32,
    pub color: BlockColor<W, N>,
}
