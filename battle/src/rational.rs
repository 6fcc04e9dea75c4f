//! Small fractions applied to integer quantities with truncation

use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    numerator: i32,
    denominator: i32,
}

impl Rational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        assert!(denominator != 0);
        Self {
            numerator,
            denominator,
        }
    }

    pub fn numerator(self) -> i32 {
        self.numerator
    }

    pub fn denominator(self) -> i32 {
        self.denominator
    }

    /// `value * numerator / denominator`, truncated toward zero
    pub fn apply(self, value: u16) -> i32 {
        i32::from(value) * self.numerator / self.denominator
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    pub fn is_negative(self) -> bool {
        (self.numerator < 0) != (self.denominator < 0) && self.numerator != 0
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Rational::new(
            self.numerator * rhs.numerator,
            self.denominator * rhs.denominator,
        )
    }
}
