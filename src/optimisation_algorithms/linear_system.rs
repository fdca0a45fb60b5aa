use anyhow::{Context, Result};
use log::debug;

use crate::{
    math::matrix::{Matrix, Pivots},
    optimisation_algorithms::{
        branch_and_bound::BranchAndBound, free_variable_bounds::SearchSpace,
        search_parameters::SearchParameters,
    },
};

/**
 * A system A x = b with integer coefficients, of which we seek the non-negative integer solution x with the smallest
 * sum(x).
 *
 * The system is reduced to row-echelon form once, on construction. Every call to `solve` searches from scratch.
 */
#[derive(Clone, Debug)]
pub struct LinearSystem {
    a: Vec<Vec<i64>>,
    b: Vec<i64>,
    reduced: Matrix,
    pivots: Pivots,
}

impl LinearSystem {
    /// # Panics
    ///
    /// Panics if `a` and `b` have different lengths, or if the rows of `a` differ in length.
    pub fn new(a: &[Vec<i64>], b: &[i64]) -> Result<Self> {
        let mut reduced = Matrix::new_augmented(a, b);
        let pivots = reduced
            .reduce_to_row_echelon_form()
            .context("reducing the system to row-echelon form")?;

        Ok(Self {
            a: a.to_vec(),
            b: b.to_vec(),
            reduced,
            pivots,
        })
    }

    pub fn get_number_of_equations(&self) -> usize {
        self.b.len()
    }

    pub fn get_number_of_variables(&self) -> usize {
        self.reduced.get_number_of_coefficient_columns()
    }

    /// The augmented matrix [A|b] in reduced row-echelon form.
    pub fn reduced(&self) -> &Matrix {
        &self.reduced
    }

    pub fn pivots(&self) -> &Pivots {
        &self.pivots
    }

    /// Returns false if the system has no solution, not even a fractional or negative one.
    pub fn is_consistent(&self) -> bool {
        !self.reduced.has_contradictory_row()
    }

    /// Solve with the default parameters. See `solve_with`.
    pub fn solve(&self) -> Result<Option<Vec<u64>>> {
        self.solve_with(&SearchParameters::default())
    }

    /**
     * Returns the non-negative integer solution with the smallest sum, or None if there is none within the bounds.
     * Of several solutions with the same sum, the one found first is returned: free variables are assigned left to
     * right, each starting at its cheapest end.
     *
     * Errors only if the search exceeds the limits in `parameters` or the arithmetic overflows.
     */
    pub fn solve_with(&self, parameters: &SearchParameters) -> Result<Option<Vec<u64>>> {
        if !self.is_consistent() {
            debug!("system {} is inconsistent", self);
            return Ok(None);
        }

        let fallback_upper_bound = parameters.fallback_upper_bound.resolve(&self.a, &self.b);
        let space = SearchSpace::new(&self.reduced, &self.pivots, fallback_upper_bound);
        let solution = BranchAndBound::new(space, parameters)
            .run()
            .with_context(|| format!("solving {}", self))?;

        match solution {
            Some(solution) => Ok(Some(
                solution
                    .into_iter()
                    .map(|value| u64::try_from(value).context("solution value out of range"))
                    .collect::<Result<Vec<_>>>()?,
            )),
            None => Ok(None),
        }
    }
}

impl std::fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (row, value)) in self.a.iter().zip(self.b.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            for (j, coefficient) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", coefficient)?;
            }
            write!(f, " = {}", value)?;
        }
        write!(f, "}}")
    }
}
