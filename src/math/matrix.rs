use anyhow::Result;
use std::ops::Index;

use super::{
    rational::Rational,
    traits::{One, Zero},
};

/**
 * A dense matrix of exact fractions. When used as an augmented matrix [A|b], the last column holds b.
 */
#[derive(Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<Rational>>,
}

impl Matrix {
    /// Build [A|b]. All rows of `a` must have the same width, and `a` and `b` must have the same length.
    pub fn new_augmented(a: &[Vec<i64>], b: &[i64]) -> Self {
        assert!(
            a.len() == b.len(),
            "{} coefficient rows but {} target values",
            a.len(),
            b.len()
        );
        let columns = a.first().map_or(0, |row| row.len());
        assert!(
            a.iter().all(|row| row.len() == columns),
            "coefficient rows have different lengths"
        );

        Matrix {
            rows: a
                .iter()
                .zip(b.iter())
                .map(|(row, value)| {
                    row.iter()
                        .chain(std::iter::once(value))
                        .map(|c| Rational::from(*c))
                        .collect()
                })
                .collect(),
        }
    }

    pub fn get_number_of_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn get_number_of_columns(&self) -> usize {
        if self.rows.len() == 0 {
            return 0;
        }
        self.rows[0].len()
    }

    /// The number of columns left of the augmented column.
    pub fn get_number_of_coefficient_columns(&self) -> usize {
        self.get_number_of_columns().saturating_sub(1)
    }

    /// The value of the augmented column in the given row.
    pub fn get_augmented(&self, row: usize) -> &Rational {
        &self.rows[row][self.get_number_of_coefficient_columns()]
    }

    /**
     * Transforms this augmented matrix in place into reduced row-echelon form and returns which row owns each pivot column.
     *
     * Columns are processed left to right. For each column, the first row at or below the current pivot row with a
     * non-zero entry is swapped up, scaled to a leading one and used to clear that column in every other row.
     * Columns without such a row are free.
     */
    pub fn reduce_to_row_echelon_form(&mut self) -> Result<Pivots> {
        let number_of_rows = self.get_number_of_rows();
        let number_of_columns = self.get_number_of_columns();
        let mut pivots = Pivots::new(self.get_number_of_coefficient_columns());

        let mut pivot_row = 0;
        for column in 0..self.get_number_of_coefficient_columns() {
            if pivot_row >= number_of_rows {
                break;
            }

            //find the pivot
            let found = match (pivot_row..number_of_rows).find(|i| !self.rows[*i][column].is_zero())
            {
                Some(row) => row,
                None => continue,
            };
            self.rows.swap(pivot_row, found);

            //normalise
            let pivot_value = self.rows[pivot_row][column];
            if !pivot_value.is_one() {
                for k in column..number_of_columns {
                    self.rows[pivot_row][k] = self.rows[pivot_row][k].checked_div(&pivot_value)?;
                }
            }

            //eliminate
            let normalised = self.rows[pivot_row].clone();
            for (i, row) in self.rows.iter_mut().enumerate() {
                if i == pivot_row || row[column].is_zero() {
                    continue;
                }
                let factor = row[column];
                for k in column..number_of_columns {
                    row[k] = row[k].checked_sub_product(&factor, &normalised[k])?;
                }
            }

            pivots.set(column, pivot_row);
            pivot_row += 1;
        }

        log::trace!(
            "reduced {}x{} matrix to rank {}",
            number_of_rows,
            number_of_columns,
            pivots.len()
        );

        Ok(pivots)
    }

    /**
     * Returns true if some row reads 0 = c with c non-zero, i.e. the system has no solution at all.
     * Only meaningful after reduction to row-echelon form.
     */
    pub fn has_contradictory_row(&self) -> bool {
        let coefficients = self.get_number_of_coefficient_columns();
        self.rows.iter().any(|row| {
            row[..coefficients].iter().all(|c| c.is_zero()) && !row[coefficients].is_zero()
        })
    }
}

impl Index<usize> for Matrix {
    type Output = Vec<Rational>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{{")?;
        for (i, row) in self.rows.iter().enumerate() {
            for (j, fraction) in row.iter().enumerate() {
                write!(f, "{}", fraction)?;
                if j < row.len() - 1 {
                    write!(f, ", ")?;
                }
            }
            if i < self.rows.len() - 1 {
                write!(f, "}}, {{")?;
            }
        }
        write!(f, "}}}}")
    }
}

impl std::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} matrix",
            self.get_number_of_rows(),
            self.get_number_of_columns()
        )
    }
}

/// For each column of a reduced matrix, the row holding its leading one, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pivots {
    row_of_column: Vec<Option<usize>>,
}

impl Pivots {
    pub fn new(number_of_columns: usize) -> Self {
        Self {
            row_of_column: vec![None; number_of_columns],
        }
    }

    fn set(&mut self, column: usize, row: usize) {
        self.row_of_column[column] = Some(row);
    }

    pub fn get_row(&self, column: usize) -> Option<usize> {
        self.row_of_column[column]
    }

    pub fn is_pivot(&self, column: usize) -> bool {
        self.row_of_column[column].is_some()
    }

    /// (column, row) pairs, in increasing column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.row_of_column
            .iter()
            .enumerate()
            .filter_map(|(column, row)| row.map(|row| (column, row)))
    }

    /// The rows that own a pivot, in increasing column order.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().map(|(_, row)| row)
    }

    pub fn free_columns(&self) -> Vec<usize> {
        (0..self.row_of_column.len())
            .filter(|column| !self.is_pivot(*column))
            .collect()
    }

    /// The number of pivots, i.e. the rank of the coefficient part.
    pub fn len(&self) -> usize {
        self.row_of_column.iter().filter(|row| row.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use crate::math::{
        rational::Rational,
        traits::{One, Zero},
    };

    use super::Matrix;

    #[test]
    fn matrix_row_echelon_form() {
        let mut m = Matrix::new_augmented(&[vec![2, 4, 2], vec![1, 3, 0]], &[8, 5]);
        let pivots = m.reduce_to_row_echelon_form().unwrap();

        assert_eq!(pivots.get_row(0), Some(0));
        assert_eq!(pivots.get_row(1), Some(1));
        assert_eq!(pivots.get_row(2), None);
        assert_eq!(pivots.free_columns(), vec![2]);
        assert_eq!(pivots.len(), 2);

        //x0 + 3 x2 = 2, x1 - x2 = 1
        assert_eq!(m[0], vec![Rational::one(), Rational::zero(), Rational::from(3), Rational::from(2)]);
        assert_eq!(m[1], vec![Rational::zero(), Rational::one(), Rational::from(-1), Rational::from(1)]);
        assert!(!m.has_contradictory_row());
    }

    #[test]
    fn matrix_row_echelon_form_swaps_and_skips() {
        //column 0 is zero everywhere and becomes free; the pivot for column 1 is in the second row
        let mut m = Matrix::new_augmented(&[vec![0, 0, 1], vec![0, 3, 1]], &[1, 4]);
        let pivots = m.reduce_to_row_echelon_form().unwrap();

        assert_eq!(pivots.free_columns(), vec![0]);
        assert_eq!(pivots.iter().collect::<Vec<_>>(), vec![(1, 0), (2, 1)]);
        assert_eq!(m[0][1], Rational::one());
        assert_eq!(m[0][2], Rational::zero());
        assert_eq!(*m.get_augmented(0), Rational::one());
        assert_eq!(m[1][2], Rational::one());
        assert_eq!(*m.get_augmented(1), Rational::one());
    }

    #[test]
    fn matrix_fractional_pivots() {
        let mut m = Matrix::new_augmented(&[vec![2]], &[3]);
        m.reduce_to_row_echelon_form().unwrap();
        assert_eq!(*m.get_augmented(0), Rational::new(3, 2).unwrap());
    }

    #[test]
    fn matrix_contradiction() {
        let mut m = Matrix::new_augmented(&[vec![1, 1], vec![2, 2]], &[1, 3]);
        let pivots = m.reduce_to_row_echelon_form().unwrap();
        assert_eq!(pivots.len(), 1);
        assert!(m.has_contradictory_row());

        let mut m = Matrix::new_augmented(&[vec![1, 1], vec![2, 2]], &[1, 2]);
        m.reduce_to_row_echelon_form().unwrap();
        assert!(!m.has_contradictory_row());
    }

    #[test]
    fn matrix_empty() {
        let mut m = Matrix::new_augmented(&[], &[]);
        assert_eq!(m.get_number_of_rows(), 0);
        assert_eq!(m.get_number_of_coefficient_columns(), 0);
        let pivots = m.reduce_to_row_echelon_form().unwrap();
        assert!(pivots.is_empty());
        assert!(!m.has_contradictory_row());
    }

    #[test]
    #[should_panic]
    fn matrix_dimension_mismatch() {
        Matrix::new_augmented(&[vec![1, 2]], &[1, 2]);
    }

    #[test]
    fn matrix_display() {
        let mut m = Matrix::new_augmented(&[vec![2], vec![0]], &[1, 0]);
        m.reduce_to_row_echelon_form().unwrap();
        assert_eq!(m.to_string(), "{{1, 1/2}, {0, 0}}");
        assert_eq!(format!("{:?}", m), "2x2 matrix");
    }
}
