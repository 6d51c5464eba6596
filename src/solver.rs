use crate::{config::SearchConfig, error::SearchAborted, grid::Grid, matrix::Matrix, ExactCover};
use std::{collections::VecDeque, time::Instant};

/// How many rows are tried between two reads of the clock when a deadline is
/// configured.
const DEADLINE_POLL_INTERVAL: u64 = 256;

/// A solution to an exact cover problem, as the indices of the selected
/// matrix rows in the order they were chosen.
pub type Solution = Vec<usize>;

/// Where a [`Solver`] is in its enumeration of solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No solution has been requested yet.
    NotStarted,
    /// Some solutions may remain.
    Running,
    /// Every solution has been produced.
    Exhausted,
    /// A limit from the [`SearchConfig`] stopped the search.
    Aborted(SearchAborted),
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of rows tried.
    pub nodes_visited: u64,
    /// Number of solutions produced.
    pub solutions: u64,
    /// Number of times the chosen column had no rows left.
    pub dead_ends: u64,
    /// Largest number of rows in a partial solution.
    pub max_depth: usize,
}

/// Solver that iteratively returns solutions to exact cover problems.
///
/// Solutions are produced lazily and in a fixed order: identical matrices
/// always yield identical sequences. Each solution is copied out of the
/// structure before it is returned, so it stays valid while the search
/// continues.
#[derive(Debug)]
pub struct Solver {
    matrix: Matrix,
    config: SearchConfig,

    // Values used to track the state of solving
    grid: Grid,
    partial_solution: Vec<usize>,
    stack: Vec<Frame>,
    status: SearchStatus,
    stats: SearchStats,
    polls: u64,
}

#[derive(Debug, Clone, Copy)]
enum FrameState {
    // Before covering the columns of the front row
    Cover,
    // After searching below the front row, before uncovering
    Uncover,
}

#[derive(Debug)]
struct Frame {
    column: usize,
    rows: VecDeque<usize>,
    state: FrameState,
}

impl Solver {
    /// Create a new `Solver` over the given matrix, without search limits.
    pub fn new(matrix: Matrix) -> Self {
        Self::with_config(matrix, SearchConfig::default())
    }

    /// Create a new `Solver` over the given matrix, stopping early according
    /// to `config`.
    pub fn with_config(matrix: Matrix, config: SearchConfig) -> Self {
        let grid = Grid::new(&matrix);

        Solver {
            matrix,
            config,

            grid,
            partial_solution: Vec::new(),
            stack: Vec::new(),
            status: SearchStatus::NotStarted,
            stats: SearchStats::default(),
            polls: 0,
        }
    }

    /// Return the matrix being solved.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Return the progress of the enumeration.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Return the counters collected so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Discard all search state and start over on a freshly built structure.
    pub fn reset(&mut self) {
        self.grid = Grid::new(&self.matrix);
        self.partial_solution.clear();
        self.stack.clear();
        self.status = SearchStatus::NotStarted;
        self.stats = SearchStats::default();
        self.polls = 0;
    }

    /// Return all remaining solutions.
    ///
    /// # Errors
    ///
    /// Returns the reason if a limit from the [`SearchConfig`] was reached
    /// before the search was exhausted.
    pub fn all_solutions(&mut self) -> Result<Vec<Solution>, SearchAborted> {
        let mut solutions = Vec::new();
        while let Some(solution) = self.try_next_solution()? {
            solutions.push(solution);
        }

        Ok(solutions)
    }

    /// Return the first solution, starting over if the search was already
    /// under way.
    ///
    /// # Errors
    ///
    /// Returns the reason if a limit from the [`SearchConfig`] was reached
    /// before a solution was found or the search was exhausted.
    pub fn first_solution(&mut self) -> Result<Option<Solution>, SearchAborted> {
        if self.status != SearchStatus::NotStarted {
            self.reset();
        }

        self.try_next_solution()
    }

    /// Compute up to the next solution.
    ///
    /// Returns `Ok(None)` once every solution has been produced.
    ///
    /// # Errors
    ///
    /// Returns the reason if a limit from the [`SearchConfig`] was reached.
    /// Aborting is final, every later call returns the same error.
    pub fn try_next_solution(&mut self) -> Result<Option<Solution>, SearchAborted> {
        match self.status {
            SearchStatus::Aborted(reason) => return Err(reason),
            SearchStatus::Exhausted => return Ok(None),
            SearchStatus::NotStarted => {
                self.status = SearchStatus::Running;
                if let Some(solution) = self.descend() {
                    return Ok(Some(solution));
                }
            }
            SearchStatus::Running => {}
        }

        loop {
            let Some(curr_frame) = self.stack.last_mut() else {
                break;
            };

            match curr_frame.state {
                // Select the front row of this frame: add it to the solution, cover the other
                // columns it satisfies and branch on the next column.
                FrameState::Cover => {
                    let Some(&row) = curr_frame.rows.front() else {
                        // Every row was tried, backtrack
                        let column = curr_frame.column;
                        self.stack.pop();
                        self.grid.uncover(column);
                        continue;
                    };

                    let depth = self.stack.len() - 1;
                    self.check_limits()?;
                    self.stack[depth].state = FrameState::Uncover;

                    self.stats.nodes_visited += 1;
                    self.partial_solution.push(row);
                    self.grid.cover_row(row);

                    if let Some(solution) = self.descend() {
                        return Ok(Some(solution));
                    }
                }
                // Undo the front row and move on to the next one.
                FrameState::Uncover => {
                    curr_frame.state = FrameState::Cover;
                    if let Some(row) = curr_frame.rows.pop_front() {
                        self.grid.uncover_row(row);
                        self.partial_solution.pop();
                    }
                }
            }
        }

        log::debug!(
            "Search exhausted after [{}] solutions and [{}] visited nodes.",
            self.stats.solutions,
            self.stats.nodes_visited
        );
        self.status = SearchStatus::Exhausted;

        Ok(None)
    }

    /// Branch on the uncovered column with the fewest rows, or return the
    /// current solution if every column is covered.
    fn descend(&mut self) -> Option<Solution> {
        self.stats.max_depth = self.stats.max_depth.max(self.partial_solution.len());

        let Some(column) = self.grid.choose_column() else {
            return Some(self.emit());
        };

        let size = self.grid.column_size(column);
        log::trace!(
            "Chose column [{}] with [{}] rows at depth [{}].",
            column,
            size,
            self.partial_solution.len()
        );

        if size == 0 {
            self.stats.dead_ends += 1;
            return None;
        }

        self.grid.cover(column);
        let rows = self.grid.rows_in_column(column).collect();
        self.stack.push(Frame {
            column,
            rows,
            state: FrameState::Cover,
        });

        None
    }

    fn emit(&mut self) -> Solution {
        self.stats.solutions += 1;

        let solution: Solution = self
            .partial_solution
            .iter()
            .map(|node| self.grid.row_of(*node))
            .collect();
        log::debug!("Found solution [{:?}].", solution);

        solution
    }

    /// Called before each row is tried, while the structure is consistent.
    fn check_limits(&mut self) -> Result<(), SearchAborted> {
        let polls = self.polls;
        self.polls += 1;

        if let Some(limit) = self.config.max_steps() {
            if self.stats.nodes_visited >= limit {
                return Err(self.abort(SearchAborted::StepLimit { limit }));
            }
        }

        if self.config.is_cancelled() {
            return Err(self.abort(SearchAborted::Cancelled));
        }

        if let Some(deadline) = self.config.deadline() {
            if polls % DEADLINE_POLL_INTERVAL == 0 && Instant::now() >= deadline {
                return Err(self.abort(SearchAborted::Deadline));
            }
        }

        Ok(())
    }

    fn abort(&mut self, reason: SearchAborted) -> SearchAborted {
        log::debug!(
            "Search aborted [{}] after [{}] visited nodes.",
            reason,
            self.stats.nodes_visited
        );
        self.status = SearchStatus::Aborted(reason);

        reason
    }
}

/// Iterating stops at the first abort, use
/// [`try_next_solution`](Solver::try_next_solution) or
/// [`status`](Solver::status) to tell an abort from exhaustion.
impl Iterator for Solver {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next_solution().ok().flatten()
    }
}

/// Solver for an [`ExactCover`] problem, returning solutions as references to
/// the problem's possibilities.
#[derive(Debug)]
pub struct ProblemSolver<'e, E: ExactCover> {
    problem: &'e E,
    solver: Solver,
}

impl<'e, E> ProblemSolver<'e, E>
where
    E: ExactCover,
{
    /// Create a new `ProblemSolver` with the given instance of an exact cover
    /// problem.
    pub fn new(problem: &'e E) -> Self {
        Self::with_config(problem, SearchConfig::default())
    }

    /// Create a new `ProblemSolver` that stops early according to `config`.
    pub fn with_config(problem: &'e E, config: SearchConfig) -> Self {
        let matrix = Self::populate_matrix(problem);

        ProblemSolver {
            problem,
            solver: Solver::with_config(matrix, config),
        }
    }

    fn populate_matrix(problem: &E) -> Matrix {
        let rows = problem
            .possibilities()
            .iter()
            .map(|poss| {
                problem
                    .constraints()
                    .iter()
                    .enumerate()
                    .filter(|(_, cons)| problem.satisfies(poss, cons))
                    .map(|(col_idx, _)| col_idx)
                    .collect()
            })
            .collect();

        Matrix::from_sorted_rows_unchecked(problem.constraints().len(), rows)
    }

    /// Return the underlying row-index solver.
    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// Discard all search state and start over.
    pub fn reset(&mut self) {
        self.solver.reset();
    }

    /// Return all remaining solutions.
    ///
    /// # Errors
    ///
    /// Returns the reason if a limit from the [`SearchConfig`] was reached
    /// before the search was exhausted.
    pub fn all_solutions(&mut self) -> Result<Vec<Vec<&'e E::Possibility>>, SearchAborted> {
        let mut solutions = Vec::new();
        while let Some(solution) = self.try_next_solution()? {
            solutions.push(solution);
        }

        Ok(solutions)
    }

    /// Compute up to the next solution.
    ///
    /// # Errors
    ///
    /// Returns the reason if a limit from the [`SearchConfig`] was reached.
    pub fn try_next_solution(&mut self) -> Result<Option<Vec<&'e E::Possibility>>, SearchAborted> {
        let problem = self.problem;

        Ok(self.solver.try_next_solution()?.map(|solution| {
            solution
                .into_iter()
                .map(|row_index| &problem.possibilities()[row_index])
                .collect()
        }))
    }
}

impl<'e, E> Iterator for ProblemSolver<'e, E>
where
    E: ExactCover,
{
    type Item = Vec<&'e E::Possibility>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next_solution().ok().flatten()
    }
}
