use anyhow::{Result, anyhow};
use itertools::Either;
use num_integer::Integer;

use crate::math::{
    matrix::{Matrix, Pivots},
    rational::Rational,
    traits::{One, Signed, Zero},
};

/// A reduced system together with the order in which its free columns are assigned.
pub struct SearchSpace<'a> {
    pub reduced: &'a Matrix,
    pub pivots: &'a Pivots,
    pub free_columns: Vec<usize>,
    pub fallback_upper_bound: i128,
}

/// Feasible values of one free variable, given the values of the free variables before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FreeVariableRange {
    pub min: i128,
    pub max: i128,

    /// The change of sum(x) when this free variable increases by one: its own contribution minus its coefficient
    /// in every pivot row.
    pub cost_coefficient: Rational,

    /// Least common denominator of the coefficients of this free variable. Whether the pivot variables are integers
    /// repeats with this period in the value of the variable.
    pub period: i128,
}

impl FreeVariableRange {
    /// The values to try, cheapest first.
    pub fn values(&self) -> impl Iterator<Item = i128> {
        if self.cost_coefficient.is_negative() {
            Either::Left((self.min..=self.max).rev())
        } else {
            Either::Right(self.min..=self.max)
        }
    }

    pub fn scans_upwards(&self) -> bool {
        !self.cost_coefficient.is_negative()
    }
}

impl<'a> SearchSpace<'a> {
    pub fn new(reduced: &'a Matrix, pivots: &'a Pivots, fallback_upper_bound: i128) -> Self {
        Self {
            reduced,
            pivots,
            free_columns: pivots.free_columns(),
            fallback_upper_bound,
        }
    }

    pub fn number_of_free_columns(&self) -> usize {
        self.free_columns.len()
    }

    /**
     * Derives the range of the free variable at position `depth`, where `assigned` holds the values of the free
     * variables at positions 0..depth.
     *
     * A pivot row only bounds the variable if every later free variable has a non-negative coefficient in it, as
     * those can then only lower the pivot variable. A variable that occurs in no equation only adds to the sum, so
     * its range is just zero. Returns None if the range is empty.
     */
    pub fn range_of(&self, depth: usize, assigned: &[i128]) -> Result<Option<FreeVariableRange>> {
        let column = self.free_columns[depth];
        let later_columns = &self.free_columns[depth + 1..];

        let mut min = 0;
        let mut max = self.fallback_upper_bound;
        let mut cost_coefficient = Rational::one();
        let mut period = 1;
        let mut occurs = false;

        for row in self.pivots.rows() {
            let coefficient = self.reduced[row][column];
            if coefficient.is_zero() {
                continue;
            }
            occurs = true;
            cost_coefficient = cost_coefficient.checked_sub(&coefficient)?;
            period = lcm(period, coefficient.denominator())?;

            if later_columns
                .iter()
                .any(|later| self.reduced[row][*later].is_negative())
            {
                continue;
            }

            let remainder = self.remainder(row, assigned)?;
            if coefficient.is_positive() {
                if remainder.is_negative() {
                    return Ok(None);
                }
                max = max.min(remainder.checked_div(&coefficient)?.floor());
            } else {
                min = min.max(remainder.checked_div(&coefficient)?.ceil());
            }
        }

        if !occurs {
            max = max.min(min);
        }
        if min > max {
            return Ok(None);
        }

        Ok(Some(FreeVariableRange {
            min,
            max,
            cost_coefficient,
            period,
        }))
    }

    /// The augmented value of `row` minus the contributions of the assigned free variables.
    fn remainder(&self, row: usize, assigned: &[i128]) -> Result<Rational> {
        let mut result = *self.reduced.get_augmented(row);
        for (column, value) in self.free_columns.iter().zip(assigned) {
            let coefficient = &self.reduced[row][*column];
            if !coefficient.is_zero() && !value.is_zero() {
                result = result.checked_sub_product(coefficient, &Rational::from_integer(*value))?;
            }
        }
        Ok(result)
    }
}

fn lcm(a: i128, b: i128) -> Result<i128> {
    (a / a.gcd(&b))
        .checked_mul(b)
        .ok_or_else(|| anyhow!("common denominator of {} and {} overflows", a, b))
}
