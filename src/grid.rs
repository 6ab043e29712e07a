use serde::{Deserialize, Serialize};

/// Position of a cell in the snapshot, as sent back in `/modifier-case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell<'a> {
    pub pos: CellPos,
    pub color: &'a str,
}

/// Full copy of `/tableau`: rows of CSS color strings.
///
/// Never patched in place; every refresh replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Grid { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Row count and the width of the widest row.
    pub fn dimensions(&self) -> (usize, usize) {
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (self.rows.len(), cols)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Cells in row-major order. Ragged rows are kept as they came.
    pub fn cells(&self) -> impl Iterator<Item = GridCell<'_>> {
        self.rows.iter().enumerate().flat_map(|(row, colors)| {
            colors.iter().enumerate().map(move |(col, color)| GridCell {
                pos: CellPos { row, col },
                color: color.as_str(),
            })
        })
    }
}
