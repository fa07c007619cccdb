//! Integral address representation for slot pointers.
//!
//! An [`Addr`] is the machine-word form of a slot pointer. It round-trips
//! exactly with the pointer types in `loam-ptr` and is what allocation
//! providers hand out and take back.

use std::fmt;

/// A machine-word memory address.
///
/// Zero is the null sentinel. An `Addr` carries no type or provenance
/// information by itself; it is the integral half of the pointer/address
/// round trip, usable as a map key or a compact struct field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct Addr(pub usize);

impl Addr {
    /// The null sentinel address.
    pub const NULL: Addr = Addr(0);

    /// Whether this address is the null sentinel.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// The raw machine word.
    pub fn get(self) -> usize {
        self.0
    }

    /// The address `count` slots of `elem_size` bytes away.
    ///
    /// Wraps on overflow, matching the pointer arithmetic in `loam-ptr`:
    /// computing an address is always defined, only dereferencing an
    /// out-of-range result is not.
    pub fn offset(self, count: isize, elem_size: usize) -> Addr {
        let delta = (elem_size as isize).wrapping_mul(count);
        Addr(self.0.wrapping_add_signed(delta))
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for Addr {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

impl From<Addr> for usize {
    fn from(a: Addr) -> Self {
        a.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_null() {
        assert!(Addr::default().is_null());
        assert_eq!(Addr::default(), Addr::NULL);
    }

    #[test]
    fn nonzero_is_not_null() {
        assert!(!Addr(0x1000).is_null());
    }

    #[test]
    fn usize_round_trip() {
        let a = Addr::from(0xdead_beefusize);
        assert_eq!(usize::from(a), 0xdead_beef);
    }

    #[test]
    fn offset_scales_by_elem_size() {
        let a = Addr(0x1000);
        assert_eq!(a.offset(3, 8), Addr(0x1018));
        assert_eq!(a.offset(-2, 8), Addr(0x0ff0));
        assert_eq!(a.offset(0, 8), a);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Addr(0x2a).to_string(), "0x2a");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offset_matches_wrapping_arithmetic(
                base in any::<usize>(),
                count in -1024isize..1024,
                elem_size in 1usize..512,
            ) {
                let expect = base
                    .wrapping_add_signed((elem_size as isize).wrapping_mul(count));
                prop_assert_eq!(Addr(base).offset(count, elem_size).get(), expect);
            }

            #[test]
            fn offset_zero_is_identity(base in any::<usize>(), elem_size in 1usize..512) {
                prop_assert_eq!(Addr(base).offset(0, elem_size), Addr(base));
            }
        }
    }
}
