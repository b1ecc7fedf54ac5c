//! CLI entry point for the LS-8 emulator binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use ls8_cli::loader::parse_program;
use ls8_core::{Machine, OutputSink, StepOutcome, TraceSnapshot};
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: ls8 <program.ls8> [options]

Runs an LS-8 machine-code program. Each PRN value is printed to stdout
on its own line.

Options:
  -t, --trace          Print a machine-state line to stderr before each step
  -h, --help           Show this help message

Examples:
  ls8 print8.ls8
  ls8 mul.ls8 --trace
";

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    program: PathBuf,
    trace: bool,
}

#[derive(Debug)]
enum ParsedArgs {
    Run(RunArgs),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParsedArgs, String> {
    let mut program: Option<PathBuf> = None;
    let mut trace = false;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(ParsedArgs::Help);
        }

        if arg == "--trace" || arg == "-t" {
            trace = true;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if program.is_some() {
            return Err("multiple program paths provided".to_string());
        }
        program = Some(PathBuf::from(arg));
    }

    let program = program.ok_or_else(|| "missing program path".to_string())?;
    Ok(ParsedArgs::Run(RunArgs { program, trace }))
}

/// Prints each emitted value to stdout on its own line.
struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit_decimal(&mut self, value: u8) {
        println!("{value}");
    }
}

fn format_trace(snapshot: &TraceSnapshot) -> String {
    let registers = snapshot
        .registers
        .iter()
        .map(|r| format!("{r:02X}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "TRACE: {:02X} | {:02X} {:02X} {:02X} | {registers}",
        snapshot.pc, snapshot.next[0], snapshot.next[1], snapshot.next[2]
    )
}

fn run(args: &RunArgs) -> Result<(), i32> {
    let content = match fs::read_to_string(&args.program) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("error: cannot read {}: {error}", args.program.display());
            return Err(1);
        }
    };

    let image = match parse_program(&args.program, &content) {
        Ok(image) => image,
        Err(error) => {
            eprintln!("{error}");
            return Err(1);
        }
    };

    let mut machine = Machine::new();
    if let Err(fault) = machine.load_program(&image) {
        eprintln!("ls8: error: {fault}");
        return Err(1);
    }

    let mut sink = StdoutSink;
    loop {
        if args.trace {
            eprintln!("{}", format_trace(&machine.trace()));
        }

        match machine.step(&mut sink) {
            Ok(StepOutcome::Retired) => {}
            Ok(StepOutcome::Halted) => return Ok(()),
            Err(fault) => {
                eprintln!("ls8: error: {fault}");
                return Err(1);
            }
        }
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParsedArgs::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParsedArgs::Run(args)) => match run(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::{format_trace, parse_args, ParsedArgs, RunArgs};
    use ls8_core::TraceSnapshot;
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn parses_program_path_and_trace_flag() {
        let result = parse_args(
            [OsString::from("print8.ls8"), OsString::from("--trace")].into_iter(),
        )
        .expect("valid args should parse");

        match result {
            ParsedArgs::Run(args) => assert_eq!(
                args,
                RunArgs {
                    program: PathBuf::from("print8.ls8"),
                    trace: true,
                }
            ),
            ParsedArgs::Help => panic!("expected run args"),
        }
    }

    #[test]
    fn help_flag_wins_over_other_arguments() {
        let result = parse_args(
            [OsString::from("print8.ls8"), OsString::from("--help")].into_iter(),
        )
        .expect("help should parse");
        assert!(matches!(result, ParsedArgs::Help));
    }

    #[test]
    fn missing_program_path_is_an_error() {
        let error = parse_args(std::iter::empty()).expect_err("no args");
        assert_eq!(error, "missing program path");
    }

    #[test]
    fn unknown_options_are_rejected() {
        let error =
            parse_args([OsString::from("--bogus")].into_iter()).expect_err("unknown option");
        assert_eq!(error, "unknown option: --bogus");
    }

    #[test]
    fn trace_line_matches_the_fixed_layout() {
        let snapshot = TraceSnapshot {
            pc: 0x03,
            next: [0x47, 0x00, 0x01],
            registers: [0x08, 0, 0, 0, 0, 0, 0, 0xF4],
            fl: 0,
        };

        assert_eq!(
            format_trace(&snapshot),
            "TRACE: 03 | 47 00 01 | 08 00 00 00 00 00 00 F4"
        );
    }
}
