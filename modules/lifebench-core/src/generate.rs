use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::Board;

/// Deterministic random board: one Bernoulli(density) draw per cell in
/// row-major order from a ChaCha8 stream seeded with `seed`.
///
/// ChaCha8 is fixed here deliberately. Its output stream is specified and
/// stable across platforms and releases, so the same (rows, cols, density,
/// seed) always reproduces the identical board — required both for
/// benchmark reproducibility and for regenerating expected boards
/// independently of any recorded run. Swapping the generator would silently
/// change the content of every test case.
pub fn random_board(rows: usize, cols: usize, density: f64, seed: u64) -> Board {
    let cols = if rows == 0 { 0 } else { cols };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = (0..rows * cols)
        .map(|_| rng.random::<f64>() < density)
        .collect();
    Board::from_cells(rows, cols, cells)
}
