use schemars::JsonSchema;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Zero-based cell position. `(0, 0)` is `A1`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, JsonSchema)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parses an A1-style address (`"B2"`, `"aa10"`). Absolute markers are not accepted.
    pub fn parse(s: &str) -> Option<Self> {
        let split_idx = s.find(|c: char| c.is_ascii_digit())?;
        let (col_str, row_str) = s.split_at(split_idx);
        if col_str.is_empty() {
            return None;
        }

        let row = row_str.parse::<u32>().ok()?.checked_sub(1)?;
        let col = col_from_letters(col_str)?.checked_sub(1)?;

        Some(Self { row, col })
    }

    pub fn a1(&self) -> String {
        format!("{}{}", col_to_letters(self.col), self.row as u64 + 1)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.a1())
    }
}

fn col_from_letters(s: &str) -> Option<u32> {
    let mut col: u32 = 0;
    for c in s.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col
            .checked_mul(26)?
            .checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
    }
    Some(col)
}

pub fn col_to_letters(col: u32) -> String {
    let mut n = col as u64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        // Row-major ordering
        match self.row.cmp(&other.row) {
            Ordering::Equal => self.col.cmp(&other.col),
            ord => ord,
        }
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
