use serde::Serialize;

use crate::error::LifeBenchError;

/// One benchmark trial's inputs. Together with the fixed generator this
/// fully determines the initial board, so a case can be replayed without
/// any recorded run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    pub rows: usize,
    pub cols: usize,
    pub density: f64,
    pub seed: u64,
    pub difficulty: String,
    pub test_type: String,
}

impl TestCase {
    pub const DEFAULT_DENSITY: f64 = 0.3;
    pub const DEFAULT_SEED: u64 = 42;

    pub fn simple(rows: usize, cols: usize, difficulty: &str, seed: u64) -> Self {
        Self {
            rows,
            cols,
            density: Self::DEFAULT_DENSITY,
            seed,
            difficulty: difficulty.to_string(),
            test_type: "Simple".to_string(),
        }
    }

    pub fn grid_size(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    /// One point per cell; a perfect prediction earns them all.
    pub fn max_points(&self) -> u32 {
        (self.rows * self.cols) as u32
    }
}

/// The standard nine-case ladder: difficulty scales with grid size.
pub fn standard_suite() -> Vec<TestCase> {
    vec![
        TestCase::simple(3, 3, "Easy", 42),
        TestCase::simple(3, 3, "Easy", 43),
        TestCase::simple(5, 5, "Medium", 42),
        TestCase::simple(5, 5, "Medium", 43),
        TestCase::simple(5, 5, "Medium", 44),
        TestCase::simple(8, 8, "Hard", 42),
        TestCase::simple(8, 8, "Hard", 43),
        TestCase::simple(10, 10, "Expert", 42),
        TestCase::simple(10, 10, "Expert", 43),
    ]
}

/// Parse an advanced test list: one `<size> <density>` pair per non-blank,
/// non-`#` line. Sizes must be positive, densities in [0, 1]. Malformed
/// lines fail loading with their line number; an empty result is an error.
///
/// Case N (1-based) gets seed 42 + N so each trial draws a distinct board.
pub fn load_test_cases(text: &str) -> Result<Vec<TestCase>, LifeBenchError> {
    let mut cases = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        let mut tokens = stripped.split_whitespace();
        let (size_tok, density_tok) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(size), Some(density), None) => (size, density),
            _ => {
                return Err(invalid(line_no, "expected `<size> <density>`"));
            }
        };

        let size: usize = size_tok
            .parse()
            .map_err(|_| invalid(line_no, &format!("invalid size {size_tok:?}")))?;
        if size == 0 {
            return Err(invalid(line_no, "size must be positive"));
        }

        let density: f64 = density_tok
            .parse()
            .map_err(|_| invalid(line_no, &format!("invalid density {density_tok:?}")))?;
        if !(0.0..=1.0).contains(&density) {
            return Err(invalid(line_no, "density must be in [0, 1]"));
        }

        let seed = TestCase::DEFAULT_SEED + (cases.len() as u64 + 1);
        cases.push(TestCase {
            rows: size,
            cols: size,
            density,
            seed,
            difficulty: "Advanced".to_string(),
            test_type: "Advanced".to_string(),
        });
    }

    if cases.is_empty() {
        return Err(LifeBenchError::EmptyTestList);
    }
    Ok(cases)
}

fn invalid(line: usize, message: &str) -> LifeBenchError {
    LifeBenchError::InvalidTestCase {
        line,
        message: message.to_string(),
    }
}
