use anyhow::Result;

use crate::math::{
    matrix::{Matrix, Pivots},
    rational::Rational,
    traits::{Signed, Zero},
};

/**
 * Completes a solution vector whose free columns have been filled in.
 *
 * For each pivot column j owned by row i, x_j = b_i - sum over k > j of (a_ik * x_k).
 * Returns None if some pivot variable would be fractional or negative.
 */
pub fn back_substitute(
    reduced: &Matrix,
    pivots: &Pivots,
    mut values: Vec<i128>,
) -> Result<Option<Vec<i128>>> {
    let number_of_columns = reduced.get_number_of_coefficient_columns();

    for (column, row) in pivots.iter() {
        let mut value = *reduced.get_augmented(row);
        for k in column + 1..number_of_columns {
            let coefficient = &reduced[row][k];
            if coefficient.is_zero() || values[k].is_zero() {
                continue;
            }
            value = value.checked_sub_product(coefficient, &Rational::from_integer(values[k]))?;
        }

        match value.to_integer() {
            Some(integer) if !value.is_negative() => values[column] = integer,
            _ => return Ok(None),
        }
    }

    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use crate::math::matrix::Matrix;

    use super::back_substitute;

    fn reduce(a: &[Vec<i64>], b: &[i64]) -> (Matrix, crate::math::matrix::Pivots) {
        let mut m = Matrix::new_augmented(a, b);
        let pivots = m.reduce_to_row_echelon_form().unwrap();
        (m, pivots)
    }

    #[test]
    fn back_substitution_valid() {
        //x0 + x2 = 5, x1 + x2 = 3
        let (m, pivots) = reduce(&[vec![1, 0, 1], vec![0, 1, 1]], &[5, 3]);
        assert_eq!(
            back_substitute(&m, &pivots, vec![0, 0, 2]).unwrap(),
            Some(vec![3, 1, 2])
        );
        assert_eq!(
            back_substitute(&m, &pivots, vec![0, 0, 3]).unwrap(),
            Some(vec![2, 0, 3])
        );
    }

    #[test]
    fn back_substitution_negative() {
        let (m, pivots) = reduce(&[vec![1, 0, 1], vec![0, 1, 1]], &[5, 3]);
        assert_eq!(back_substitute(&m, &pivots, vec![0, 0, 4]).unwrap(), None);
    }

    #[test]
    fn back_substitution_fractional() {
        //2 x0 + x1 = 3 reduces to x0 + x1/2 = 3/2
        let (m, pivots) = reduce(&[vec![2, 1]], &[3]);
        assert_eq!(back_substitute(&m, &pivots, vec![0, 0]).unwrap(), None);
        assert_eq!(back_substitute(&m, &pivots, vec![0, 1]).unwrap(), Some(vec![1, 1]));
    }

    #[test]
    fn back_substitution_without_free_columns() {
        let (m, pivots) = reduce(&[vec![2, 0], vec![0, 2]], &[4, 6]);
        assert_eq!(back_substitute(&m, &pivots, vec![0, 0]).unwrap(), Some(vec![2, 3]));
    }
}
