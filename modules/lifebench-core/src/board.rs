use serde::{Deserialize, Serialize};

/// The two characters a board is encoded with. Passed explicitly so the
/// core carries no hidden global defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbols {
    pub alive: char,
    pub dead: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            alive: '#',
            dead: '.',
        }
    }
}

/// Rectangular grid of alive/dead cells, row-major. Never mutated after
/// construction; equality is structural (shape + cells).
///
/// A board with zero rows is always the 0x0 board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Board {
    /// All-dead board of the given shape.
    pub fn dead(rows: usize, cols: usize) -> Self {
        let cols = if rows == 0 { 0 } else { cols };
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub(crate) fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Canonical text encoding: one line of `cols` symbols per row, rows
    /// joined with '\n', no trailing whitespace.
    pub fn encode(&self, symbols: Symbols) -> String {
        let mut lines = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| {
                    if self.is_alive(row, col) {
                        symbols.alive
                    } else {
                        symbols.dead
                    }
                })
                .collect();
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Lenient decode: total over all inputs, by design. Model output is
    /// noisy free text and must never fail to produce a board.
    ///
    /// The whole input is trimmed; an empty remainder is the 0x0 board.
    /// Column count is the longest line's length — shorter lines pad with
    /// dead cells — and any character other than the alive symbol reads as
    /// dead. Do not tighten this into strict rectangularity.
    pub fn decode(text: &str, symbols: Symbols) -> Self {
        let stripped = text.trim();
        if stripped.is_empty() {
            return Self::dead(0, 0);
        }

        let lines: Vec<&str> = stripped.split('\n').collect();
        let rows = lines.len();
        let cols = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let mut cells = vec![false; rows * cols];
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == symbols.alive {
                    cells[row * cols + col] = true;
                }
            }
        }

        Self { rows, cols, cells }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode(Symbols::default()))
    }
}
