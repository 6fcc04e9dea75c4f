//! Injective mapping of battle sub-state into minimal non-negative integers.
//!
//! Each type has a fixed `CARDINALITY`; `compress` maps every value into
//! `[0, CARDINALITY)` without collisions. Composite values are built with
//! [`compress_combine`], a mixed-radix composition where the first part is
//! the most significant digit. The result is a canonical key for offline
//! statistics, not something the search consults.

/// A value that can be packed into `[0, CARDINALITY)` without collisions
pub trait Compress {
    const CARDINALITY: u128;

    fn compress(&self) -> u128;
}

/// Combine `(value, cardinality)` pairs in mixed radix, first part most
/// significant: `combine((a, A), (b, B)) = a * B + b`.
pub fn compress_combine(parts: &[(u128, u128)]) -> u128 {
    parts.iter().fold(0, |acc, &(value, cardinality)| {
        debug_assert!(value < cardinality, "{value} out of range {cardinality}");
        acc * cardinality + value
    })
}

/// Total cardinality of a composition
pub fn combined_cardinality(cardinalities: &[u128]) -> u128 {
    cardinalities.iter().product()
}

/// Shorthand for a `(value, cardinality)` part of a type that implements [`Compress`]
pub fn part<T: Compress>(value: &T) -> (u128, u128) {
    (value.compress(), T::CARDINALITY)
}

impl Compress for bool {
    const CARDINALITY: u128 = 2;

    fn compress(&self) -> u128 {
        u128::from(*self)
    }
}

impl Compress for u8 {
    const CARDINALITY: u128 = 256;

    fn compress(&self) -> u128 {
        u128::from(*self)
    }
}

impl<T: Compress> Compress for Option<T> {
    const CARDINALITY: u128 = T::CARDINALITY + 1;

    fn compress(&self) -> u128 {
        match self {
            None => 0,
            Some(value) => value.compress() + 1,
        }
    }
}

impl<A: Compress, B: Compress> Compress for (A, B) {
    const CARDINALITY: u128 = A::CARDINALITY * B::CARDINALITY;

    fn compress(&self) -> u128 {
        compress_combine(&[part(&self.0), part(&self.1)])
    }
}

/// An integer known to lie in `[0, N)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bounded<const N: u128>(u128);

impl<const N: u128> Bounded<N> {
    pub fn new(value: u128) -> Option<Self> {
        (value < N).then_some(Self(value))
    }

    pub fn value(self) -> u128 {
        self.0
    }
}

impl<const N: u128> Compress for Bounded<N> {
    const CARDINALITY: u128 = N;

    fn compress(&self) -> u128 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_bools() {
        assert_eq!(compress_combine(&[part(&true), part(&false)]), 2);
        assert_eq!(compress_combine(&[part(&false), part(&true)]), 1);
        assert_eq!((true, true).compress(), 3);
    }

    #[test]
    fn test_combine_digits() {
        assert_eq!(compress_combine(&[(4, 10), (6, 10)]), 46);
        assert_eq!(compress_combine(&[(1, 10), (29, 100)]), 129);
        assert_eq!(compress_combine(&[(1, 5), (1, 2)]), 3);
    }

    #[test]
    fn test_combine_bytes() {
        let parts = [part(&255u8); 8];
        assert_eq!(compress_combine(&parts), u128::from(u64::MAX));
        assert_eq!(combined_cardinality(&[256; 8]), u128::from(u64::MAX) + 1);
    }

    #[test]
    fn test_option() {
        assert_eq!(None::<bool>.compress(), 0);
        assert_eq!(Some(false).compress(), 1);
        assert_eq!(Some(true).compress(), 2);
        assert_eq!(<Option<bool>>::CARDINALITY, 3);
    }

    #[test]
    fn test_bounded() {
        assert!(Bounded::<5>::new(5).is_none());
        let value = Bounded::<5>::new(4).unwrap();
        assert_eq!(value.compress(), 4);
        assert_eq!((value, true).compress(), 9);
    }
}
