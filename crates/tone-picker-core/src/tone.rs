//! The 3x3 tone grid.
//!
//! Rows run from formal to informal, columns from short to long. The centre
//! cell is plain "Neutral"; every other cell combines its row and column.
use std::fmt;

/// Row axis, top to bottom.
pub const ROW_TONES: [&str; 3] = ["Professional", "Neutral", "Casual"];

/// Column axis, left to right.
pub const COL_TONES: [&str; 3] = ["Concise", "Neutral", "Expanded"];

/// Cells per side.
pub const GRID_SIZE: usize = 3;

/// One cell of the tone grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tone {
    row: usize,
    col: usize,
}

impl Tone {
    /// Returns the tone at `(row, col)`, or `None` outside the grid.
    pub fn at(row: usize, col: usize) -> Option<Self> {
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Self { row, col })
    }

    /// All nine tones, row-major.
    pub fn all() -> impl Iterator<Item = Tone> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Tone { row, col }))
    }

    /// Finds a tone by its display name, ignoring case and spacing around `+`.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::all().find(|tone| normalize(&tone.name()) == wanted)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_center(&self) -> bool {
        self.row == 1 && self.col == 1
    }

    /// The name sent to the text-transform service.
    pub fn name(&self) -> String {
        if self.is_center() {
            return "Neutral".to_string();
        }
        format!("{} + {}", ROW_TONES[self.row], COL_TONES[self.col])
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn normalize(name: &str) -> String {
    name.split('+')
        .map(|part| part.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join("+")
}
