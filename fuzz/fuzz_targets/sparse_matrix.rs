#![no_main]

use dlx_exact_cover::{Matrix, SearchConfig, Solver};
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct SparseInput {
    num_columns: usize,
    rows: Vec<Vec<usize>>,
}

impl<'a> arbitrary::Arbitrary<'a> for SparseInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let num_columns = usize::from(u.int_in_range(1u8..=12)?);
        let num_rows = usize::from(u.int_in_range(0u8..=24)?);

        let rows = (0..num_rows)
            .map(|_| {
                let mask = u.arbitrary::<u16>()?;
                Ok((0..num_columns)
                    .filter(|column| mask & (1 << column) != 0)
                    .collect())
            })
            .collect::<arbitrary::Result<_>>()?;

        Ok(SparseInput { num_columns, rows })
    }
}

fuzz_target!(|data: SparseInput| {
    let matrix = Matrix::from_sparse(data.num_columns, data.rows).unwrap();
    let config = SearchConfig::new().with_max_steps(100_000);

    let mut solver = Solver::with_config(matrix.clone(), config.clone());
    let Ok(solutions) = solver.all_solutions() else {
        return;
    };
    for solution in &solutions {
        assert!(matrix.is_exact_cover(solution));
    }

    // A fresh structure yields the same sequence
    let rebuilt = Solver::with_config(matrix, config).all_solutions();
    assert_eq!(Ok(solutions), rebuilt);
});
