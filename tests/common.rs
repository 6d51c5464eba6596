#![allow(dead_code)]

use dlx_exact_cover::{ExactCover, Matrix};
use std::collections::HashSet;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A cell of a Latin square or Sudoku grid holding a value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possibility {
    pub row: usize,
    pub column: usize,
    pub value: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    RowColumn { row: usize, column: usize },
    RowNumber { row: usize, value: usize },
    ColumnNumber { column: usize, value: usize },
    SquareNumber { square: usize, value: usize },
}

/// A Latin square, or a Sudoku when `box_side_length` is set.
#[derive(Debug)]
pub struct Sudoku {
    pub possibilities: Vec<Possibility>,
    pub constraints: Vec<Constraint>,
    pub filled_values: Vec<Possibility>,
    box_side_length: Option<usize>,
}

impl Sudoku {
    pub fn latin_square(side_length: usize) -> Self {
        Self::build(side_length, None, Vec::new())
    }

    pub fn new(box_side_length: usize, filled_values: Vec<Possibility>) -> Self {
        Self::build(
            box_side_length * box_side_length,
            Some(box_side_length),
            filled_values,
        )
    }

    fn build(
        side_length: usize,
        box_side_length: Option<usize>,
        filled_values: Vec<Possibility>,
    ) -> Self {
        let mut puzzle = Sudoku {
            possibilities: Vec::new(),
            constraints: Vec::new(),
            filled_values,
            box_side_length,
        };

        let satisfied: HashSet<_> = puzzle
            .filled_values
            .iter()
            .flat_map(|poss| puzzle.satisfied_constraints(poss))
            .collect();

        let cells: Vec<(usize, usize)> = (0..side_length)
            .flat_map(|row| (0..side_length).map(move |column| (row, column)))
            .collect();
        puzzle.possibilities = cells
            .iter()
            .flat_map(|&(row, column)| {
                (1..=side_length).map(move |value| Possibility { row, column, value })
            })
            .filter(|poss| {
                puzzle
                    .satisfied_constraints(poss)
                    .iter()
                    .all(|cons| !satisfied.contains(cons))
            })
            .collect();

        let mut constraints: Vec<_> = cells
            .iter()
            .map(|&(row, column)| Constraint::RowColumn { row, column })
            .collect();
        for index in 0..side_length {
            for value in 1..=side_length {
                constraints.push(Constraint::RowNumber { row: index, value });
                constraints.push(Constraint::ColumnNumber {
                    column: index,
                    value,
                });
                if box_side_length.is_some() {
                    constraints.push(Constraint::SquareNumber {
                        square: index,
                        value,
                    });
                }
            }
        }
        constraints.retain(|cons| !satisfied.contains(cons));
        puzzle.constraints = constraints;

        puzzle
    }

    fn satisfied_constraints(&self, poss: &Possibility) -> Vec<Constraint> {
        let Possibility { row, column, value } = *poss;
        let mut constraints = vec![
            Constraint::RowColumn { row, column },
            Constraint::RowNumber { row, value },
            Constraint::ColumnNumber { column, value },
        ];
        if let Some(box_side_length) = self.box_side_length {
            let square = box_side_length * (row / box_side_length) + column / box_side_length;
            constraints.push(Constraint::SquareNumber { square, value });
        }

        constraints
    }
}

impl ExactCover for Sudoku {
    type Constraint = Constraint;
    type Possibility = Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        self.satisfied_constraints(poss).contains(cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }
}

/// Parse a 9x9 Sudoku in row-major order, `0` marking an empty cell.
pub fn parse_sudoku(sudoku_input: &str) -> Sudoku {
    assert_eq!(sudoku_input.len(), 81, "input needs to be 81 digits long");

    let filled_values = sudoku_input
        .chars()
        .enumerate()
        .filter_map(|(index, c)| {
            let value = c.to_digit(10).expect("input must be digits") as usize;

            (value != 0).then_some(Possibility {
                row: index / 9,
                column: index % 9,
                value,
            })
        })
        .collect();

    Sudoku::new(3, filled_values)
}

/// Format a solved 9x9 Sudoku back into the input format of `parse_sudoku`.
pub fn format_sudoku<'a>(possibilities: impl IntoIterator<Item = &'a Possibility>) -> String {
    let mut output = vec![b'0'; 81];

    for poss in possibilities {
        let index = poss.row * 9 + poss.column;
        assert_eq!(output[index], b'0', "cell [{},{}] filled twice", poss.row, poss.column);
        output[index] = b'0' + poss.value as u8;
    }

    String::from_utf8(output).unwrap()
}

/// Every exact cover of the matrix, found by trying all subsets of the rows
/// that have at least one set cell. Each cover is sorted, and the list of
/// covers is sorted.
pub fn brute_force_covers(matrix: &Matrix) -> Vec<Vec<usize>> {
    assert!(matrix.num_rows() <= 16, "too many rows to brute force");

    let candidates: Vec<usize> = (0..matrix.num_rows())
        .filter(|row| !matrix.row(*row).is_empty())
        .collect();

    let mut covers: Vec<Vec<usize>> = (0u32..(1 << candidates.len()))
        .map(|mask| {
            candidates
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, row)| *row)
                .collect::<Vec<_>>()
        })
        .filter(|rows| matrix.is_exact_cover(rows))
        .collect();
    covers.sort();

    covers
}

/// Sort every solution and then the list of solutions.
pub fn normalize(solutions: impl IntoIterator<Item = Vec<usize>>) -> Vec<Vec<usize>> {
    let mut solutions: Vec<_> = solutions
        .into_iter()
        .map(|mut solution| {
            solution.sort_unstable();
            solution
        })
        .collect();
    solutions.sort();

    solutions
}

/// Deterministic pseudo random sparse matrices for cross checking.
pub fn random_matrix(seed: u64, num_columns: usize, num_rows: usize) -> Matrix {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let rows: Vec<Vec<usize>> = (0..num_rows)
        .map(|_| {
            (0..num_columns)
                .filter(|_| next() % 3 == 0)
                .collect()
        })
        .collect();

    Matrix::from_sparse(num_columns, rows).unwrap()
}
