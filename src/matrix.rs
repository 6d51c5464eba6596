//! Validated input for the solver.
//!
//! A [`Matrix`] is the boundary between an exact cover problem and the
//! dancing links structure: columns are the constraints that must be
//! satisfied exactly once, rows are the candidate choices. Internally every
//! row is stored sparsely, as the ascending list of columns it satisfies.

use crate::error::StructuralError;

/// A 0/1 matrix describing an instance of the exact cover problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    num_columns: usize,
    rows: Vec<Vec<usize>>,
}

impl Matrix {
    /// Create a matrix from dense rows of uniform width.
    ///
    /// Rows that contain no set cells are kept, so row indices of the input
    /// are preserved, but they can never appear in a solution.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::NoColumns`] if there are no rows or the rows
    /// are empty, and [`StructuralError::RaggedRow`] if the rows differ in
    /// width.
    pub fn from_dense<R, T>(rows: impl IntoIterator<Item = R>) -> Result<Self, StructuralError>
    where
        R: AsRef<[T]>,
        T: Into<bool> + Copy,
    {
        let mut num_columns = None;
        let mut sparse_rows = Vec::new();

        for (row_idx, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *num_columns.get_or_insert(row.len());
            if row.len() != expected {
                return Err(StructuralError::RaggedRow {
                    row: row_idx,
                    expected,
                    found: row.len(),
                });
            }

            sparse_rows.push(
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| (**cell).into())
                    .map(|(column, _)| column)
                    .collect(),
            );
        }

        match num_columns {
            Some(num_columns) if num_columns > 0 => Ok(Matrix {
                num_columns,
                rows: sparse_rows,
            }),
            _ => Err(StructuralError::NoColumns),
        }
    }

    /// Create a matrix from a list of rows, each given as the column indices
    /// that the row satisfies.
    ///
    /// The column indices of a row may be given in any order, they are stored
    /// sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::NoColumns`] if `num_columns` is zero,
    /// [`StructuralError::ColumnOutOfRange`] if a row names a column past
    /// `num_columns` and [`StructuralError::DuplicateColumn`] if a row names
    /// the same column twice.
    pub fn from_sparse<R>(
        num_columns: usize,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, StructuralError>
    where
        R: IntoIterator<Item = usize>,
    {
        if num_columns == 0 {
            return Err(StructuralError::NoColumns);
        }

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let mut columns: Vec<usize> = row.into_iter().collect();
                columns.sort_unstable();

                if let Some(&column) = columns.iter().find(|column| **column >= num_columns) {
                    return Err(StructuralError::ColumnOutOfRange {
                        row: row_idx,
                        column,
                        num_columns,
                    });
                }
                if let Some(pair) = columns.windows(2).find(|pair| pair[0] == pair[1]) {
                    return Err(StructuralError::DuplicateColumn {
                        row: row_idx,
                        column: pair[0],
                    });
                }

                Ok(columns)
            })
            .collect::<Result<_, _>>()?;

        Ok(Matrix { num_columns, rows })
    }

    /// Build a matrix without validation, for callers that already uphold the
    /// invariants (ascending, in range, no duplicates). Zero columns is
    /// allowed here.
    pub(crate) fn from_sorted_rows_unchecked(num_columns: usize, rows: Vec<Vec<usize>>) -> Self {
        debug_assert!(rows
            .iter()
            .all(|row| row.windows(2).all(|pair| pair[0] < pair[1])
                && row.iter().all(|column| *column < num_columns)));

        Matrix { num_columns, rows }
    }

    /// Return the number of columns.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Return the number of rows, including rows with no set cells.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Return the ascending column indices satisfied by the given row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[usize] {
        &self.rows[row]
    }

    /// Return an iterator over all rows, as ascending column indices.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Return the total number of set cells.
    pub fn num_filled(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Return true if the given rows cover every column exactly once.
    ///
    /// Row indices out of range make this return false.
    pub fn is_exact_cover(&self, rows: &[usize]) -> bool {
        let mut covered = vec![false; self.num_columns];

        for &row in rows {
            let Some(columns) = self.rows.get(row) else {
                return false;
            };

            for &column in columns {
                if covered[column] {
                    return false;
                }
                covered[column] = true;
            }
        }

        covered.into_iter().all(|covered| covered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_rows_become_sparse() {
        let matrix = Matrix::from_dense([[false, true, true], [true, false, false]]).unwrap();

        assert_eq!(matrix.num_columns(), 3);
        assert_eq!(matrix.num_rows(), 2);
        assert_eq!(matrix.row(0), &[1, 2]);
        assert_eq!(matrix.row(1), &[0]);
        assert_eq!(matrix.num_filled(), 3);
    }

    #[test]
    fn ragged_dense_rows_are_rejected() {
        let err = Matrix::from_dense(vec![vec![true, false], vec![true]]).unwrap_err();

        assert_eq!(
            err,
            StructuralError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn zero_columns_are_rejected() {
        let no_rows: Vec<Vec<bool>> = Vec::new();
        assert_eq!(
            Matrix::from_dense(no_rows).unwrap_err(),
            StructuralError::NoColumns
        );
        assert_eq!(
            Matrix::from_dense([[false; 0]]).unwrap_err(),
            StructuralError::NoColumns
        );
        assert_eq!(
            Matrix::from_sparse(0, Vec::<Vec<usize>>::new()).unwrap_err(),
            StructuralError::NoColumns
        );
    }

    #[test]
    fn sparse_rows_are_sorted_and_checked() {
        let matrix = Matrix::from_sparse(4, vec![vec![3, 0], vec![], vec![2]]).unwrap();
        assert_eq!(matrix.row(0), &[0, 3]);
        assert!(matrix.row(1).is_empty());

        assert_eq!(
            Matrix::from_sparse(2, vec![vec![0], vec![2]]).unwrap_err(),
            StructuralError::ColumnOutOfRange {
                row: 1,
                column: 2,
                num_columns: 2
            }
        );
        assert_eq!(
            Matrix::from_sparse(3, vec![vec![1, 2, 1]]).unwrap_err(),
            StructuralError::DuplicateColumn { row: 0, column: 1 }
        );
    }

    #[test]
    fn exact_cover_check() {
        let matrix = Matrix::from_sparse(3, vec![vec![0, 1], vec![2], vec![1, 2]]).unwrap();

        assert!(matrix.is_exact_cover(&[0, 1]));
        assert!(matrix.is_exact_cover(&[1, 0]));
        assert!(!matrix.is_exact_cover(&[0, 2]));
        assert!(!matrix.is_exact_cover(&[1]));
        assert!(!matrix.is_exact_cover(&[0, 7]));
    }
}
