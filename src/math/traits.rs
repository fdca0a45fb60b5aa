use num_traits::{One as NumOne, Signed as NumSigned, Zero as NumZero};

pub trait One: Sized {
    fn one() -> Self;

    fn set_one(&mut self) {
        *self = One::one();
    }

    fn is_one(&self) -> bool;
}

pub trait Zero: Sized {
    fn zero() -> Self;

    fn set_zero(&mut self) {
        *self = Zero::zero();
    }

    fn is_zero(&self) -> bool;
}

pub trait Signed: Sized {
    fn abs(&self) -> Self;

    /// Returns true if the number is positive and false if the number is zero or negative.
    fn is_positive(&self) -> bool;

    /// Returns true if the number is negative and false if the number is zero or positive.
    fn is_negative(&self) -> bool;
}

// ============ implementations ============

macro_rules! ttype_signed {
    ($t:ident) => {
        impl Zero for $t {
            fn zero() -> Self {
                0
            }

            fn is_zero(&self) -> bool {
                NumZero::is_zero(self)
            }
        }

        impl One for $t {
            fn one() -> Self {
                1
            }

            fn is_one(&self) -> bool {
                NumOne::is_one(self)
            }
        }

        impl Signed for $t {
            fn abs(&self) -> Self {
                NumSigned::abs(self)
            }

            fn is_positive(&self) -> bool {
                NumSigned::is_positive(self)
            }

            fn is_negative(&self) -> bool {
                NumSigned::is_negative(self)
            }
        }
    };
}

ttype_signed!(i128);
