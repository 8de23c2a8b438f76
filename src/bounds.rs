use core::fmt;

use crate::Rgb;

/// Half-open range of cells, `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: usize,
    pub end: usize,
}

/// Error returned when a range does not fit inside the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub range: CellRange,
    pub len: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell range {}..{} is outside of 0..{}",
            self.range.start, self.range.end, self.len
        )
    }
}

impl CellRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the number of cells in the range
    pub const fn count(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.count() == 0
    }
}

/// Get a slice of the cells within the range
///
/// Reversed ranges and ranges reaching past the end are rejected instead of
/// being clipped.
pub(crate) fn bounded(cells: &mut [Rgb], range: CellRange) -> Result<&mut [Rgb], OutOfBounds> {
    let len = cells.len();
    if range.start > range.end || range.end > len {
        return Err(OutOfBounds { range, len });
    }
    Ok(&mut cells[range.start..range.end])
}
