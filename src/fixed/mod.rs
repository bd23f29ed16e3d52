//! Fixed-point mix colors.

/*
Fixed-Point Mix Colors
======================

A "color" is the ratio in which the mixing steppers share the filament
feed. It is stored as N integer weights, one per stepper, in a fixed-point
format chosen per build (see `width.rs`).

Vocabulary
----------

  weight        One stepper's share, an integer in [0, FULL_SCALE].

  FULL_SCALE    The weight that means "this stepper takes a pulse every time
                it is scanned". A power of two: 0x8000 (wide) or 0x80 (narrow).

  normalized    The largest weight equals FULL_SCALE exactly. Only normalized
                colors may drive the pulse distributor.

  raw           Any other vector of weights. A valid intermediate (user input,
                collector output), never valid for distribution.


Scale To Max, Not To Sum
------------------------

Two obvious ways to turn a ratio into integers:

    ratio 3 : 1 : 0

    scale to sum:   weights sum to FULL_SCALE   [0x6000, 0x2000, 0]
    scale to max:   largest = FULL_SCALE        [0x8000, 0x2AAA, 0]

The distributor adds each weight into an accumulator and fires on carry.
With scale-to-max the dominant stepper carries on every single scan, so a
pulse request never walks more than N steppers before something fires, and
the minority components get the most resolution the width can offer. With
scale-to-sum a request could scan many rounds before any carry.


Narrow vs Wide
--------------

  Wide     u16 weights, u16 accumulators, carry = bit 15.
           Max accumulator before an add is 0x7FFF, max weight 0x8000,
           so the sum tops out at 0xFFFF: no overflow, ever.

  Narrow   u8 weights, i8 accumulators, carry = sign bit.
           0x7F + 0x80 wraps to a negative i8; masking the sign bit off
           keeps the remainder (modulo 0x80 arithmetic).
*/

pub mod color;
pub mod width;

pub use color::MixColor;
pub use width::{MixWidth, Narrow, Wide};
