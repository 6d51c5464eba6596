//! The toroidal doubly linked structure used by dancing links.
//!
//! All nodes live in a single arena and refer to each other by index. The
//! arena is laid out as:
//!
//! ```text
//! [ root ] [ header 0 ] [ header 1 ] ... [ header n-1 ] [ row nodes ... ]
//! ```
//!
//! The root and the headers form the horizontal header ring. Every header is
//! also the anchor of the vertical ring of its column. The nodes of one row are
//! stored contiguously and form their own horizontal ring.
//!
//! Nodes are never added or removed after construction. Covering a column only
//! rewrites the links of the neighbors of the removed nodes, which leaves the
//! removed nodes' own links intact so that uncovering in reverse order restores
//! the structure exactly.

use crate::matrix::Matrix;

const ROOT: usize = 0;

/// A single entry in the arena, either the root, a column header or a set cell
/// of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Index of the header of this node's column. Headers and the root point
    /// to themselves.
    header: usize,
    /// The matrix row this node came from, `None` for headers and the root.
    row: Option<usize>,
}

impl Node {
    fn header(index: usize, left: usize, right: usize) -> Self {
        Node {
            left,
            right,
            up: index,
            down: index,
            header: index,
            row: None,
        }
    }
}

/// Dancing links representation of a sparse 0/1 matrix.
///
/// Columns are addressed by their index in the source [`Matrix`]. Set cells
/// are addressed by opaque node indices, as returned from
/// [`rows_in_column`](Grid::rows_in_column); a node index stands for the row
/// it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    nodes: Vec<Node>,
    /// Number of nodes currently linked into each column's vertical ring.
    sizes: Vec<usize>,
}

impl Grid {
    /// Build the structure for the given matrix.
    pub fn new(matrix: &Matrix) -> Self {
        let num_columns = matrix.num_columns();
        let mut nodes = Vec::with_capacity(1 + num_columns + matrix.num_filled());
        let mut sizes = vec![0; num_columns];

        for index in 0..=num_columns {
            let left = if index == ROOT { num_columns } else { index - 1 };
            let right = if index == num_columns { ROOT } else { index + 1 };

            nodes.push(Node::header(index, left, right));
        }

        for (row, columns) in matrix.rows().enumerate() {
            let Some(last_offset) = columns.len().checked_sub(1) else {
                continue;
            };
            let first = nodes.len();
            let last = first + last_offset;

            for (offset, &column) in columns.iter().enumerate() {
                let index = first + offset;
                let header = Self::header_index(column);
                let bottom = nodes[header].up;

                nodes.push(Node {
                    left: if index == first { last } else { index - 1 },
                    right: if index == last { first } else { index + 1 },
                    up: bottom,
                    down: header,
                    header,
                    row: Some(row),
                });
                nodes[bottom].down = index;
                nodes[header].up = index;
                sizes[column] += 1;
            }
        }

        log::debug!(
            "Built grid with [{}] columns, [{}] rows and [{}] nodes.",
            num_columns,
            matrix.num_rows(),
            nodes.len() - num_columns - 1
        );

        Grid { nodes, sizes }
    }

    #[inline]
    fn header_index(column: usize) -> usize {
        column + 1
    }

    fn checked_header(&self, column: usize) -> usize {
        assert!(
            column < self.num_columns(),
            "column [{column}] is out of range for [{}] columns",
            self.num_columns()
        );

        Self::header_index(column)
    }

    /// Return the number of columns, covered or not.
    pub fn num_columns(&self) -> usize {
        self.sizes.len()
    }

    /// Return true if every column has been covered.
    pub fn is_solved(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Return true if the given column is currently linked into the header
    /// ring.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn is_uncovered(&self, column: usize) -> bool {
        let header = self.checked_header(column);
        let Node { left, right, .. } = self.nodes[header];

        self.nodes[left].right == header && self.nodes[right].left == header
    }

    /// Return the number of rows currently linked into the given column.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn column_size(&self, column: usize) -> usize {
        self.checked_header(column);
        self.sizes[column]
    }

    /// Return the uncovered column with the fewest rows, preferring the
    /// leftmost one on ties, or `None` if every column is covered.
    pub fn choose_column(&self) -> Option<usize> {
        self.uncovered_columns()
            .min_by_key(|column| self.column_size(*column))
    }

    /// Return an iterator over the uncovered columns, in matrix order.
    pub fn uncovered_columns(&self) -> impl Iterator<Item = usize> + '_ {
        Ring::new(self, ROOT, Direction::Right).map(|header| header - 1)
    }

    /// Return an iterator over the nodes currently linked into the given
    /// column, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn rows_in_column(&self, column: usize) -> impl Iterator<Item = usize> + '_ {
        Ring::new(self, self.checked_header(column), Direction::Down)
    }

    /// Return the other columns intersected by the row of the given node, left
    /// to right starting after the node.
    pub fn row_columns(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        Ring::new(self, node, Direction::Right).map(|other| self.column_of(other))
    }

    /// Return the matrix row the given node belongs to.
    ///
    /// # Panics
    ///
    /// Panics if `node` is the root or a column header.
    pub fn row_of(&self, node: usize) -> usize {
        match self.nodes[node].row {
            Some(row) => row,
            None => panic!("node [{node}] is a header and belongs to no row"),
        }
    }

    /// Return the column the given node belongs to.
    pub fn column_of(&self, node: usize) -> usize {
        self.nodes[node].header - 1
    }

    /// Cover the given column: unlink its header from the header ring and
    /// unlink every row intersecting it from all other columns.
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range or already covered.
    pub fn cover(&mut self, column: usize) {
        assert!(
            self.is_uncovered(column),
            "column [{column}] is already covered"
        );
        let header = Self::header_index(column);

        let Node { left, right, .. } = self.nodes[header];
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut row = self.nodes[header].down;
        while row != header {
            let mut node = self.nodes[row].right;
            while node != row {
                self.unlink_vertical(node);
                node = self.nodes[node].right;
            }
            row = self.nodes[row].down;
        }
    }

    /// Uncover the given column, exactly undoing the matching [`cover`].
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range, or is not the most recently
    /// covered column among its neighbors, which means covers and uncovers
    /// were not properly nested.
    ///
    /// [`cover`]: Grid::cover
    pub fn uncover(&mut self, column: usize) {
        let header = self.checked_header(column);
        let Node { left, right, .. } = self.nodes[header];
        assert!(
            self.nodes[left].right == right && self.nodes[right].left == left,
            "column [{column}] is not the last covered column at its position"
        );

        let mut row = self.nodes[header].up;
        while row != header {
            let mut node = self.nodes[row].left;
            while node != row {
                self.relink_vertical(node);
                node = self.nodes[node].left;
            }
            row = self.nodes[row].up;
        }

        self.nodes[left].right = header;
        self.nodes[right].left = header;
    }

    /// Cover every other column intersected by the row of the given node, left
    /// to right.
    pub fn cover_row(&mut self, node: usize) {
        let mut other = self.nodes[node].right;
        while other != node {
            self.cover(self.column_of(other));
            other = self.nodes[other].right;
        }
    }

    /// Undo [`cover_row`](Grid::cover_row), uncovering right to left.
    pub fn uncover_row(&mut self, node: usize) {
        let mut other = self.nodes[node].left;
        while other != node {
            self.uncover(self.column_of(other));
            other = self.nodes[other].left;
        }
    }

    fn unlink_vertical(&mut self, node: usize) {
        let Node {
            up, down, header, ..
        } = self.nodes[node];
        self.nodes[up].down = down;
        self.nodes[down].up = up;

        let size = &mut self.sizes[header - 1];
        assert!(*size > 0, "column [{}] size underflow", header - 1);
        *size -= 1;
    }

    fn relink_vertical(&mut self, node: usize) {
        let Node {
            up, down, header, ..
        } = self.nodes[node];
        self.nodes[up].down = node;
        self.nodes[down].up = node;
        self.sizes[header - 1] += 1;
    }

    /// Walk every live ring and check that all links are symmetric and that
    /// column sizes match their rings.
    ///
    /// # Panics
    ///
    /// Panics on the first violation found.
    pub fn check_invariants(&self) {
        let mut previous = ROOT;
        for header in Ring::new(self, ROOT, Direction::Right) {
            assert_eq!(
                self.nodes[header].left, previous,
                "header [{header}] is not linked back to its left neighbor"
            );
            previous = header;
        }
        assert_eq!(
            self.nodes[ROOT].left, previous,
            "root is not linked back to the last header"
        );

        for column in 0..self.num_columns() {
            let header = Self::header_index(column);
            let mut previous = header;
            let mut count = 0;

            for node in Ring::new(self, header, Direction::Down) {
                let Node { up, header: owner, .. } = self.nodes[node];
                assert_eq!(up, previous, "node [{node}] is not linked back up");
                assert_eq!(owner, header, "node [{node}] is in a foreign column");
                self.check_row_ring(node);

                previous = node;
                count += 1;
            }

            assert_eq!(
                self.nodes[header].up, previous,
                "header of column [{column}] is not linked back from the bottom"
            );
            assert_eq!(
                self.sizes[column], count,
                "size of column [{column}] does not match its ring"
            );
        }
    }

    fn check_row_ring(&self, node: usize) {
        let row = self.nodes[node].row;
        let mut current = node;
        loop {
            let next = self.nodes[current].right;
            assert_eq!(
                self.nodes[next].left, current,
                "row ring is not symmetric at node [{current}]"
            );
            assert_eq!(self.nodes[next].row, row, "row ring crosses rows");
            current = next;
            if current == node {
                break;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Right,
    Down,
}

/// Iterator around one ring, starting after (and excluding) the given node.
#[derive(Debug)]
struct Ring<'g> {
    grid: &'g Grid,
    original: usize,
    current: usize,
    direction: Direction,
}

impl<'g> Ring<'g> {
    fn new(grid: &'g Grid, original: usize, direction: Direction) -> Self {
        Ring {
            grid,
            original,
            current: original,
            direction,
        }
    }
}

impl Iterator for Ring<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.grid.nodes[self.current];
        let next = match self.direction {
            Direction::Right => node.right,
            Direction::Down => node.down,
        };

        if next == self.original {
            None
        } else {
            self.current = next;
            Some(next)
        }
    }
}
