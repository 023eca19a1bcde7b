// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Vertical layout measurement for rows, offsets, and viewports - see [`Px`] type.

use std::{fmt::{Debug, Display},
          hash::Hash,
          ops::{Add, AddAssign, Deref, Sub}};

use serde::{Deserialize, Serialize};

/// A vertical distance in layout units. Row heights, cumulative row offsets, scroll
/// offsets, and viewport heights all use this type, so they can be compared and added
/// without casts.
///
/// In a pixel based host one unit is one pixel. The terminal painter treats one unit as
/// one line.
///
/// Arithmetic saturates instead of wrapping, so a scroll offset far past the end of the
/// content never overflows when a viewport height is added to it.
///
/// # Examples
///
/// ```
/// use select_virtualized::{Px, px};
///
/// let offset = px(20) + px(30);
/// assert_eq!(offset, Px(50));
/// assert_eq!(px(10) - px(30), px(0));
/// ```
#[derive(
    Copy, Clone, PartialEq, PartialOrd, Ord, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Px(pub u32);

/// Creates a new [`Px`] from a value that can be converted into one.
pub fn px(arg_px: impl Into<Px>) -> Px { arg_px.into() }

impl Debug for Px {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Px({})", self.0)
    }
}

impl Display for Px {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.0)
    }
}

mod impl_core {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    impl Px {
        pub const ZERO: Px = Px(0);

        #[must_use]
        pub fn is_zero(&self) -> bool { self.0 == 0 }

        #[must_use]
        pub fn as_usize(&self) -> usize { self.0 as usize }

        /// This is for use with [crossterm] crate.
        #[must_use]
        pub fn as_u16(&self) -> u16 { u16::try_from(self.0).unwrap_or(u16::MAX) }
    }
}

mod impl_from_numeric {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    impl From<u32> for Px {
        fn from(val: u32) -> Self { Px(val) }
    }

    impl From<u16> for Px {
        fn from(val: u16) -> Self { Px(val.into()) }
    }

    impl From<u8> for Px {
        fn from(val: u8) -> Self { Px(val.into()) }
    }

    /// Values that don't fit are pinned to [`u32::MAX`].
    impl From<usize> for Px {
        fn from(val: usize) -> Self { Px(u32::try_from(val).unwrap_or(u32::MAX)) }
    }

    /// Negative values are pinned to zero. Hosts report scroll offsets as signed numbers
    /// during overscroll bounce.
    impl From<i32> for Px {
        fn from(val: i32) -> Self { Px(u32::try_from(val).unwrap_or(0)) }
    }
}

mod impl_deref {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    impl Deref for Px {
        type Target = u32;

        fn deref(&self) -> &Self::Target { &self.0 }
    }
}

mod arithmetic_operators {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    impl Add<Px> for Px {
        type Output = Px;

        fn add(self, rhs: Px) -> Self::Output { Px(self.0.saturating_add(rhs.0)) }
    }

    impl AddAssign<Px> for Px {
        fn add_assign(&mut self, rhs: Px) { *self = *self + rhs; }
    }

    impl Sub<Px> for Px {
        type Output = Px;

        fn sub(self, rhs: Px) -> Self::Output { Px(self.0.saturating_sub(rhs.0)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_saturating_arithmetic() {
        assert_eq2!(px(u32::MAX) + px(1), px(u32::MAX));
        assert_eq2!(px(5) - px(10), Px::ZERO);

        let mut acc = px(0);
        acc += px(20);
        acc += px(30);
        assert_eq2!(acc, px(50));
    }

    #[test]
    fn test_from_signed_and_wide_values() {
        assert_eq2!(px(-40_i32), Px::ZERO);
        assert_eq2!(px(usize::MAX), Px(u32::MAX));
        assert_eq2!(px(70_000_u32).as_u16(), u16::MAX);
    }

    #[test]
    fn test_display_and_debug() {
        assert_eq2!(format!("{}", px(31)), "31px");
        assert_eq2!(format!("{:?}", px(31)), "Px(31)");
    }
}
