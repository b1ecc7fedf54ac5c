//! Parser for the textual `.ls8` machine-code format.
//!
//! One binary-literal instruction or operand per line, written as exactly
//! eight binary digits. A `#` starts a comment that runs to the end of the
//! line; blank lines are ignored. The parsed bytes load contiguously from
//! address 0.

use std::path::Path;

use ls8_core::MEMORY_SIZE;

use crate::errors::ParseError;

/// Parses `.ls8` source text into a program image.
///
/// `file` is used only for error locations; reading the file is the
/// caller's job.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the file and 1-indexed line for the
/// first malformed literal, or when the program exceeds the 256-byte
/// memory.
pub fn parse_program(file: &Path, content: &str) -> Result<Vec<u8>, ParseError> {
    let mut program = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let token = raw.split('#').next().unwrap_or("").trim();
        if token.is_empty() {
            continue;
        }

        if token.len() != 8 || !token.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ParseError::new(
                file,
                line_no,
                format!("expected an 8-digit binary literal, found `{token}`"),
            ));
        }

        let byte = u8::from_str_radix(token, 2).map_err(|_| {
            ParseError::new(file, line_no, format!("invalid binary literal `{token}`"))
        })?;

        if program.len() == MEMORY_SIZE {
            return Err(ParseError::new(
                file,
                line_no,
                format!("program exceeds the {MEMORY_SIZE}-byte memory"),
            ));
        }
        program.push(byte);
    }

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::{parse_program, MEMORY_SIZE};
    use std::path::Path;

    const FILE: &str = "test.ls8";

    fn parse(content: &str) -> Result<Vec<u8>, String> {
        parse_program(Path::new(FILE), content).map_err(|e| e.to_string())
    }

    #[test]
    fn parses_one_literal_per_line() {
        let program = parse("10000010\n00000000\n00001000\n").expect("valid source");
        assert_eq!(program, vec![0x82, 0x00, 0x08]);
    }

    #[test]
    fn strips_trailing_comments_and_blank_lines() {
        let source = "\
# print8.ls8

10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";
        let program = parse(source).expect("valid source");
        assert_eq!(program, vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
    }

    #[test]
    fn rejects_short_literals_with_the_line_number() {
        let error = parse("00000001\n1010\n").expect_err("short literal");
        assert_eq!(
            error,
            "test.ls8:2: error: expected an 8-digit binary literal, found `1010`"
        );
    }

    #[test]
    fn rejects_non_binary_digits() {
        let error = parse("10203040\n").expect_err("non-binary digits");
        assert!(error.starts_with("test.ls8:1: error:"), "{error}");
    }

    #[test]
    fn rejects_trailing_garbage_after_the_literal() {
        let error = parse("10000010 LDI\n").expect_err("trailing garbage");
        assert!(error.contains("`10000010 LDI`"), "{error}");
    }

    #[test]
    fn rejects_programs_longer_than_memory() {
        let source = "00000000\n".repeat(MEMORY_SIZE + 1);
        let error = parse(&source).expect_err("oversized program");
        assert_eq!(
            error,
            format!("test.ls8:{}: error: program exceeds the 256-byte memory", MEMORY_SIZE + 1)
        );
    }

    #[test]
    fn accepts_a_program_that_exactly_fills_memory() {
        let source = "00000000\n".repeat(MEMORY_SIZE);
        let program = parse(&source).expect("program fits");
        assert_eq!(program.len(), MEMORY_SIZE);
    }
}
