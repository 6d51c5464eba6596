#![no_main]

use dlx_exact_cover::{Grid, Matrix};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct CoverInput {
    rows: Vec<u8>,
    columns: Vec<u8>,
}

fuzz_target!(|data: CoverInput| {
    let rows = data.rows.iter().map(|mask| (0..8).filter(move |column| mask & (1 << column) != 0));
    let matrix = Matrix::from_sparse(8, rows).unwrap();
    let original = Grid::new(&matrix);
    let mut grid = original.clone();

    // Cover a nested sequence of distinct columns, then unwind it.
    let mut covered = Vec::new();
    for column in data.columns.iter().map(|column| usize::from(column % 8)) {
        if grid.is_uncovered(column) {
            grid.cover(column);
            grid.check_invariants();
            covered.push(column);
        }
    }
    while let Some(column) = covered.pop() {
        grid.uncover(column);
    }

    grid.check_invariants();
    assert_eq!(grid, original);
});
