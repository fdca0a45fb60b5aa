use anyhow::{Result, anyhow};
use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub};
use std::{
    borrow::Borrow,
    cmp::Ordering,
    hash::Hash,
    iter::Sum,
    ops::{Add, Div, Mul, Neg, Sub},
};

use super::traits::{One, Signed, Zero};

/// An exact fraction, always stored in lowest terms with a positive denominator.
///
/// The operators (`+`, `-`, `*`, `/`) panic on `i128` overflow and on division by zero, like the
/// primitive integers do. Code that must not panic uses the `checked_*` methods instead, which
/// report overflow as an error.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational(Ratio<i128>);

impl Rational {
    /// Construct `numerator / denominator`, reduced.
    pub fn new(numerator: i128, denominator: i128) -> Result<Self> {
        if denominator == 0 {
            return Err(anyhow!("fraction {}/0 has a zero denominator", numerator));
        }
        if numerator == i128::MIN || denominator == i128::MIN {
            //normalising the sign would overflow
            return Err(anyhow!(
                "fraction {}/{} is out of range",
                numerator,
                denominator
            ));
        }
        Ok(Self(Ratio::new(numerator, denominator)))
    }

    pub fn from_integer(value: i128) -> Self {
        Self(Ratio::from_integer(value))
    }

    pub fn numerator(&self) -> i128 {
        *self.0.numer()
    }

    pub fn denominator(&self) -> i128 {
        *self.0.denom()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Returns the value if the fraction is a whole number.
    pub fn to_integer(&self) -> Option<i128> {
        if self.is_integer() {
            Some(self.numerator())
        } else {
            None
        }
    }

    /// Largest integer that is not larger than self.
    pub fn floor(&self) -> i128 {
        self.0.floor().to_integer()
    }

    /// Smallest integer that is not smaller than self.
    pub fn ceil(&self) -> i128 {
        self.0.ceil().to_integer()
    }

    pub fn checked_add(&self, rhs: &Rational) -> Result<Rational> {
        self.0
            .checked_add(&rhs.0)
            .map(Self)
            .ok_or_else(|| anyhow!("overflow when computing {} + {}", self, rhs))
    }

    pub fn checked_sub(&self, rhs: &Rational) -> Result<Rational> {
        self.0
            .checked_sub(&rhs.0)
            .map(Self)
            .ok_or_else(|| anyhow!("overflow when computing {} - {}", self, rhs))
    }

    pub fn checked_mul(&self, rhs: &Rational) -> Result<Rational> {
        self.0
            .checked_mul(&rhs.0)
            .map(Self)
            .ok_or_else(|| anyhow!("overflow when computing {} * {}", self, rhs))
    }

    pub fn checked_div(&self, rhs: &Rational) -> Result<Rational> {
        if rhs.is_zero() {
            return Err(anyhow!("division of {} by zero", self));
        }
        self.0
            .checked_div(&rhs.0)
            .map(Self)
            .ok_or_else(|| anyhow!("overflow when computing {} / {}", self, rhs))
    }

    /// self - factor * other, the elementary row operation of Gaussian elimination.
    pub fn checked_sub_product(&self, factor: &Rational, other: &Rational) -> Result<Rational> {
        self.checked_sub(&factor.checked_mul(other)?)
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(num_traits::One::one())
    }

    fn is_one(&self) -> bool {
        num_traits::One::is_one(&self.0)
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(num_traits::Zero::zero())
    }

    fn is_zero(&self) -> bool {
        num_traits::Zero::is_zero(&self.0)
    }
}

impl Signed for Rational {
    fn abs(&self) -> Self {
        Self(num_traits::Signed::abs(&self.0))
    }

    fn is_positive(&self) -> bool {
        num_traits::Signed::is_positive(&self.0)
    }

    fn is_negative(&self) -> bool {
        num_traits::Signed::is_negative(&self.0)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::fmt::Debug for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Rational").field(&self.to_string()).finish()
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        //Ratio compares without cross-multiplying, so this cannot overflow
        self.0.cmp(&other.0)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-self.0)
    }
}

impl<'a> Neg for &'a Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-self.0)
    }
}

macro_rules! operator {
    ($trait:ident, $fn:ident, $checked:ident) => {
        impl<T> $trait<T> for &Rational
        where
            T: Borrow<Rational>,
        {
            type Output = Rational;

            fn $fn(self, rhs: T) -> Self::Output {
                match self.$checked(rhs.borrow()) {
                    Ok(result) => result,
                    Err(err) => panic!("{}", err),
                }
            }
        }

        impl<T> $trait<T> for Rational
        where
            T: Borrow<Rational>,
        {
            type Output = Rational;

            fn $fn(self, rhs: T) -> Self::Output {
                (&self).$fn(rhs)
            }
        }
    };
}

operator!(Add, add, checked_add);
operator!(Sub, sub, checked_sub);
operator!(Mul, mul, checked_mul);
operator!(Div, div, checked_div);

impl<'a> Sum<&'a Rational> for Rational {
    fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |sum, f| &sum + f)
    }
}

impl Sum for Rational {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |sum, f| &sum + &f)
    }
}

//======================== primitive types ========================//

macro_rules! from {
    ($t:ident) => {
        impl From<$t> for Rational {
            fn from(value: $t) -> Self {
                Self::from_integer(value.into())
            }
        }
    };
}

from!(i64);
from!(i32);
from!(u32);
from!(u8);
