#![deny(missing_docs)]

//! Implementation of [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links)
//! and [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X) for solving
//!  [exact cover](https://en.wikipedia.org/wiki/Exact_cover) problems.
//!
//! Given a 0/1 [`Matrix`], the [`Solver`] lazily enumerates every subset of rows
//! that covers each column exactly once:
//!
//! ```
//! use dlx_exact_cover::{Matrix, Solver};
//!
//! let matrix = Matrix::from_sparse(
//!     7,
//!     vec![
//!         vec![2, 4, 5],
//!         vec![0, 3, 6],
//!         vec![1, 2, 5],
//!         vec![0, 3],
//!         vec![1, 6],
//!         vec![3, 4, 6],
//!     ],
//! )
//! .unwrap();
//!
//! let solutions: Vec<_> = Solver::new(matrix).collect();
//! assert_eq!(solutions, vec![vec![3, 0, 4]]);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod matrix;
pub(crate) mod solver;

pub use config::SearchConfig;
pub use error::{SearchAborted, StructuralError};
pub use grid::Grid;
pub use matrix::Matrix;
pub use solver::{ProblemSolver, SearchStats, SearchStatus, Solution, Solver};

/// An instance of an exact cover problem.
///
/// Implementors describe their problem as a list of possibilities (the rows of
/// the matrix) and a list of constraints (the columns). A solution is a set of
/// possibilities that satisfies every constraint exactly once.
pub trait ExactCover {
    /// The type of values that are elements of a solution to the exact cover
    /// problem.
    type Possibility: core::fmt::Debug;

    /// The type of value that are constraints on a given instance of an exact
    /// cover problem.
    type Constraint: core::fmt::Debug;

    /// Return true if the given `Possibility` will satisfy the given
    /// `Constraint`.
    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool;

    /// Return a list of possibilities for this instance of the problem.
    fn possibilities(&self) -> &[Self::Possibility];

    /// Return a list of constraints that must be satisfied for this instance of
    /// the problem.
    fn constraints(&self) -> &[Self::Constraint];

    /// Return an iterator over all solutions to this instance of the exact
    /// cover problem.
    fn solver(&self) -> ProblemSolver<'_, Self>
    where
        Self: Sized,
    {
        ProblemSolver::new(self)
    }
}

impl<E> ExactCover for &E
where
    E: ExactCover,
{
    type Constraint = E::Constraint;
    type Possibility = E::Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::satisfies(self, poss, cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        <E as ExactCover>::possibilities(self)
    }

    fn constraints(&self) -> &[Self::Constraint] {
        <E as ExactCover>::constraints(self)
    }
}
