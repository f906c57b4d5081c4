//! Character source for the lexer
//!
//! An [`Infile`] owns the complete text of one source file and hands out
//! characters one at a time with one and two character lookahead. Reading
//! past the end yields the [`EOT`] sentinel. Line endings are normalised to
//! `'\n'` on load so line and column counting only has one case to handle.
//!
//! Lexemes are captured with a mark/read protocol: the lexer marks the
//! lookahead character, consumes the lexeme's characters, then reads back
//! the marked span.

use crate::base::{Position, TextRange, TextSize};
use smol_str::SmolStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// End-of-transmission sentinel returned when reading past the end of input
pub const EOT: char = '\u{4}';

/// Maximum source size in bytes
pub const MAX_SIZE: usize = 260_000;

/// Maximum number of source lines
pub const MAX_LINES: usize = 64_000;

/// Maximum number of columns per line that diagnostics will echo
pub const MAX_COLUMNS: usize = 250;

/// Errors raised at the character source boundary
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("access denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    #[error("file too large: {} has {size} bytes, limit is {MAX_SIZE}", path.display())]
    FileTooLarge { path: PathBuf, size: usize },

    #[error("too many lines: {} has {lines} lines, limit is {MAX_LINES}", path.display())]
    TooManyLines { path: PathBuf, lines: usize },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No lexeme mark is set, or the marked character has not been consumed
    #[error("no lexeme mark set")]
    NoMarkSet,
}

impl SourceError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::AccessDenied { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Whether this error prevents a parse from starting
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NoMarkSet)
    }
}

/// Shared, read-only view of a source text split into lines.
///
/// Cloning is cheap; diagnostics use it to echo the offending line.
#[derive(Debug, Clone)]
pub struct SourceLines {
    text: Arc<str>,
    starts: Arc<[TextSize]>,
}

impl SourceLines {
    fn new(text: &str) -> Self {
        let mut starts = vec![TextSize::from(0)];
        starts.extend(
            text.match_indices('\n')
                .map(|(i, _)| TextSize::from((i + 1) as u32))
                .filter(|start| usize::from(*start) < text.len()),
        );
        Self {
            text: Arc::from(text),
            starts: Arc::from(starts),
        }
    }

    /// Source text of the given 1-based line, without its line terminator
    pub fn line(&self, line: u32) -> Option<&str> {
        let index = (line as usize).checked_sub(1)?;
        let start = usize::from(*self.starts.get(index)?);
        let end = self
            .starts
            .get(index + 1)
            .map(|next| usize::from(*next))
            .unwrap_or(self.text.len());
        let line = &self.text[start..end];
        Some(line.strip_suffix('\n').unwrap_or(line))
    }

    pub fn count(&self) -> usize {
        self.starts.len()
    }

    fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone)]
pub struct Infile {
    filename: SmolStr,
    lines: SourceLines,
    offset: usize,
    line: u32,
    column: u32,
    mark: Option<TextSize>,
}

impl Infile {
    /// Open and load the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| SourceError::from_io(path, e))?;
        if bytes.len() > MAX_SIZE {
            return Err(SourceError::FileTooLarge {
                path: path.to_path_buf(),
                size: bytes.len(),
            });
        }
        let text = String::from_utf8(bytes).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        Self::from_source(path.to_string_lossy(), &text).map_err(|err| match err {
            SourceError::TooManyLines { lines, .. } => SourceError::TooManyLines {
                path: path.to_path_buf(),
                lines,
            },
            other => other,
        })
    }

    /// Create a source from in-memory text; `filename` is used for reporting.
    pub fn from_source(filename: impl Into<SmolStr>, text: &str) -> Result<Self, SourceError> {
        let filename = filename.into();
        if text.len() > MAX_SIZE {
            return Err(SourceError::FileTooLarge {
                path: PathBuf::from(filename.as_str()),
                size: text.len(),
            });
        }
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let lines = SourceLines::new(&text);
        if lines.count() > MAX_LINES {
            return Err(SourceError::TooManyLines {
                path: PathBuf::from(filename.as_str()),
                lines: lines.count(),
            });
        }

        Ok(Self {
            filename,
            lines,
            offset: 0,
            line: 1,
            column: 1,
            mark: None,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Line of the lookahead character
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Column of the lookahead character
    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Byte offset of the lookahead character
    pub fn offset(&self) -> TextSize {
        TextSize::from(self.offset as u32)
    }

    /// Whether every character has been consumed
    pub fn is_eof(&self) -> bool {
        self.offset >= self.lines.text().len()
    }

    /// The lookahead character, without consuming it
    pub fn next_char(&self) -> char {
        self.lines.text()[self.offset..].chars().next().unwrap_or(EOT)
    }

    /// The character after the lookahead character, without consuming anything
    pub fn la2_char(&self) -> char {
        self.lines.text()[self.offset..]
            .chars()
            .nth(1)
            .unwrap_or(EOT)
    }

    /// Consume the lookahead character and return it.
    pub fn read_char(&mut self) -> char {
        let ch = self.next_char();
        if ch == EOT && self.is_eof() {
            return EOT;
        }
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    /// Consume the lookahead character and return the new lookahead character.
    pub fn consume_char(&mut self) -> char {
        self.read_char();
        self.next_char()
    }

    /// Mark the lookahead character as the start of a lexeme.
    pub fn mark_lexeme(&mut self) {
        self.mark = Some(self.offset());
    }

    /// Read the text from the marked character up to the last consumed
    /// character, clearing the mark.
    ///
    /// Fails with [`SourceError::NoMarkSet`] when no mark is set or the
    /// marked character has not been consumed yet; the mark is left as is.
    pub fn read_marked_lexeme(&mut self) -> Result<SmolStr, SourceError> {
        let start = self.mark.ok_or(SourceError::NoMarkSet)?;
        if start >= self.offset() {
            return Err(SourceError::NoMarkSet);
        }
        self.mark = None;
        let range = TextRange::new(start, self.offset());
        Ok(SmolStr::new(&self.lines.text()[range]))
    }

    /// Text from byte offset `start` up to the lookahead character
    pub fn text_since(&self, start: TextSize) -> &str {
        let start = start.min(self.offset());
        &self.lines.text()[TextRange::new(start, self.offset())]
    }

    /// Source text of the given 1-based line, without its line terminator
    pub fn source_for_line(&self, line: u32) -> Option<&str> {
        self.lines.line(line)
    }

    pub fn line_count(&self) -> usize {
        self.lines.count()
    }

    /// A shared handle on the source lines
    pub fn lines(&self) -> SourceLines {
        self.lines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn infile(text: &str) -> Infile {
        Infile::from_source("test.mod", text).unwrap()
    }

    #[test]
    fn test_lookahead_and_positions() {
        let mut src = infile("ab\ncd");
        assert_eq!(src.next_char(), 'a');
        assert_eq!(src.la2_char(), 'b');
        assert_eq!(src.consume_char(), 'b');
        assert_eq!(src.position(), Position::new(1, 2));
        assert_eq!(src.read_char(), 'b');
        assert_eq!(src.read_char(), '\n');
        assert_eq!(src.position(), Position::new(2, 1));
        assert_eq!(src.read_char(), 'c');
        assert_eq!(src.la2_char(), EOT);
        assert_eq!(src.read_char(), 'd');
        assert!(src.is_eof());
        assert_eq!(src.read_char(), EOT);
        assert_eq!(src.position(), Position::new(2, 3));
    }

    #[test]
    fn test_mark_and_read_lexeme() {
        let mut src = infile("BEGIN END");
        src.mark_lexeme();
        for _ in 0..5 {
            src.read_char();
        }
        assert_eq!(src.read_marked_lexeme().unwrap(), "BEGIN");
        // mark is cleared after a successful read
        assert!(matches!(
            src.read_marked_lexeme(),
            Err(SourceError::NoMarkSet)
        ));
    }

    #[test]
    fn test_read_before_marked_char_consumed_fails() {
        let mut src = infile("xyz");
        assert!(matches!(
            src.read_marked_lexeme(),
            Err(SourceError::NoMarkSet)
        ));
        src.mark_lexeme();
        assert!(matches!(
            src.read_marked_lexeme(),
            Err(SourceError::NoMarkSet)
        ));
        src.read_char();
        assert_eq!(src.read_marked_lexeme().unwrap(), "x");
    }

    #[test]
    fn test_source_for_line() {
        let src = infile("first\r\nsecond\n\nfourth");
        assert_eq!(src.source_for_line(1), Some("first"));
        assert_eq!(src.source_for_line(2), Some("second"));
        assert_eq!(src.source_for_line(3), Some(""));
        assert_eq!(src.source_for_line(4), Some("fourth"));
        assert_eq!(src.source_for_line(5), None);
        assert_eq!(src.source_for_line(0), None);
    }

    #[test]
    fn test_last_line_excludes_final_newline() {
        let src = infile("MODULE M;\nx := @;\n");
        assert_eq!(src.source_for_line(2), Some("x := @;"));
        assert_eq!(src.source_for_line(3), None);
        assert_eq!(src.lines().count(), 2);
    }

    #[test]
    fn test_limits() {
        let big = "x".repeat(MAX_SIZE + 1);
        assert!(matches!(
            Infile::from_source("big.mod", &big),
            Err(SourceError::FileTooLarge { .. })
        ));
        let tall = "\n".repeat(MAX_LINES + 1);
        assert!(matches!(
            Infile::from_source("tall.mod", &tall),
            Err(SourceError::TooManyLines { .. })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let err = Infile::open("/nonexistent/dir/Missing.def").unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "MODULE M;").unwrap();
        let mut src = Infile::open(file.path()).unwrap();
        assert_eq!(src.next_char(), 'M');
        assert_eq!(src.consume_char(), 'O');
    }
}
