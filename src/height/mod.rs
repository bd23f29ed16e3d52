//! Height-driven mix variation.

/*
Mixing Along Z
==============

Two optional modes change the active mix as the print climbs. At most one
of them is active at any time; turning one on turns the other off.

GRADIENT
    Blend linearly between two virtual tools over a Z range.

        z <= start_z              start tool's mix
        start_z < z < end_z       (z - start_z) / (end_z - start_z) of the way
        z >= end_z                end tool selected outright

    The two endpoint mixes are cached as percentages when the gradient is
    switched on, not looked up per update. A gradient may be pinned to one
    tool id: it is then only live while that tool is selected.

RANDOM
    Every `band` millimetres of Z, roll a fresh mix over the first
    `extruders` steppers. Past end_z the mode switches itself off and
    forgets its settings.

Both modes remember the last height they evaluated. An update at the same
height (gradient) or within one band (random) does nothing unless forced.
The "never evaluated" state is a missing height, so the first update after
switching on always computes.

Neither mode looks at the pulse path. They only decide which color the
next planned block will be stamped with.
*/

pub mod gradient;
pub mod random;

pub use gradient::{GradientMix, GradientSettings};
pub use random::{RandomMix, RandomSettings};
