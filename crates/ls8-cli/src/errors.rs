//! Structured error reporting for program loading.
//!
//! Errors format to stderr in the standard style:
//! ```text
//! program.ls8:12: error: message
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// A source location for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLoc {
    /// File path.
    pub file: PathBuf,
    /// 1-indexed line number.
    pub line: usize,
}

impl SourceLoc {
    /// Creates a new source location.
    #[must_use]
    pub const fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }

    /// Formats the location as `file:line`.
    #[must_use]
    pub fn format_location(&self) -> String {
        format!("{}:{}", self.file.display(), self.line)
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_location())
    }
}

/// An error found while parsing a program file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Where the error was found.
    pub loc: SourceLoc,
    /// Human-readable description.
    pub message: String,
}

impl ParseError {
    /// Creates a parse error at a specific line of `file`.
    #[must_use]
    pub fn new(file: &Path, line: usize, message: String) -> Self {
        Self {
            loc: SourceLoc::new(file.to_path_buf(), line),
            message,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error: {}", self.loc, self.message)
    }
}

impl std::error::Error for ParseError {}
