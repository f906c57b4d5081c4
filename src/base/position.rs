/// Position tracking for tokens and diagnostics
///
/// Positions are 1-based, matching what a Modula-2 programmer sees in an
/// editor and what diagnostics print.
use std::fmt;

/// A position in source code (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// An inclusive range of source lines, used for warnings that cover a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub first: u32,
    pub last: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a source
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl LineRange {
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Check if a line falls within this range
    pub fn contains(&self, line: u32) -> bool {
        line >= self.first && line <= self.last
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "line {}", self.first)
        } else {
            write!(f, "lines {}-{}", self.first, self.last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_order_by_line_then_column() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 7));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(4, 12).to_string(), "line 4, column 12");
    }

    #[test]
    fn test_line_range_display_and_contains() {
        let range = LineRange::new(3, 8);
        assert!(range.contains(3));
        assert!(range.contains(8));
        assert!(!range.contains(9));
        assert_eq!(range.to_string(), "lines 3-8");
        assert_eq!(LineRange::new(5, 5).to_string(), "line 5");
    }
}
