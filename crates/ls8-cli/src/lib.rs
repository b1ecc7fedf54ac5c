//! Program-loading front end for the LS-8 emulator.

/// Source-located error reporting for program files.
pub mod errors;
/// Parser for the textual `.ls8` machine-code format.
pub mod loader;

#[cfg(test)]
use tempfile as _;
