use core::fmt::Debug;

/// Storage width for mix weights and the pulse accumulators.
///
/// A width fixes three things at once: the integer type of one weight, the
/// integer type of one accumulator, and `FULL_SCALE`, the weight that means
/// "this stepper fires on every scan". The accumulator is always at least one
/// bit wider than the largest weight so the carry can be seen without losing
/// the remainder.
pub trait MixWidth: Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    /// One stored weight.
    type Comp: Copy + Debug + Default + PartialEq + Eq + Ord + Send + Sync + Into<u32>;
    /// One per-stepper accumulator (consumer context only).
    type Accu: Copy + Debug + Default + PartialEq + Send + Sync;

    /// Weight of the dominant component of a normalized color.
    const FULL_SCALE: u32;

    /// Narrow a computed weight. Callers guarantee `value <= FULL_SCALE`.
    fn comp(value: u32) -> Self::Comp;

    /// Add `weight` to `accu`. Returns `true` on carry, leaving only the
    /// remainder in `accu`.
    fn accumulate(accu: &mut Self::Accu, weight: Self::Comp) -> bool;
}

/// 16-bit weights with a 0x8000 carry bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Wide;

/// 8-bit weights with a signed 8-bit accumulator; the carry is the sign bit.
///
/// Trades exactness of the minority components for speed on small cores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Narrow;

impl Wide {
    const CARRY: u16 = 0x8000;
    const MASK: u16 = 0x7FFF;
}

impl Narrow {
    const MASK: i8 = 0x7F;
}

impl MixWidth for Wide {
    type Comp = u16;
    type Accu = u16;

    const FULL_SCALE: u32 = Wide::CARRY as u32;

    #[inline(always)]
    fn comp(value: u32) -> u16 {
        debug_assert!(value <= Self::FULL_SCALE);
        value as u16
    }

    #[inline(always)]
    fn accumulate(accu: &mut u16, weight: u16) -> bool {
        // accu <= 0x7FFF and weight <= 0x8000, so the sum fits in 16 bits
        *accu += weight;
        if *accu & Wide::CARRY != 0 {
            *accu &= Wide::MASK;
            true
        } else {
            false
        }
    }
}

impl MixWidth for Narrow {
    type Comp = u8;
    type Accu = i8;

    const FULL_SCALE: u32 = 0x80;

    #[inline(always)]
    fn comp(value: u32) -> u8 {
        debug_assert!(value <= Self::FULL_SCALE);
        value as u8
    }

    #[inline(always)]
    fn accumulate(accu: &mut i8, weight: u8) -> bool {
        *accu = accu.wrapping_add(weight as i8);
        if *accu < 0 {
            *accu &= Narrow::MASK;
            true
        } else {
            false
        }
    }
}
