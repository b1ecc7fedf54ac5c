//! Core execution engine for the LS-8 8-bit microcomputer.
//!
//! The engine drives a fetch-decode-execute cycle over a 256-byte memory,
//! eight general-purpose registers, a downward-growing hardware stack, and
//! an arithmetic/logic unit. Program loading and console output live with
//! the host; the core exposes a loader boundary, an output sink trait, and
//! a read-only trace snapshot.

/// Fault taxonomy for fatal machine conditions.
pub mod fault;
pub use fault::{Fault, FaultClass};

/// Flat byte-addressed memory with checked access.
pub mod memory;
pub use memory::{Memory, MEMORY_SIZE, STACK_TOP};

/// Register file, reserved register roles, flags, and run state.
pub mod state;
pub use state::{
    Flags, Register, RegisterFile, RunState, FL_ACTIVE_MASK, FL_EQUAL, FL_GREATER, FL_LESS,
    GENERAL_REGISTER_COUNT,
};

/// Instruction-byte classification from the fixed bit layout.
pub mod decoder;
pub use decoder::{DecodedInstruction, Decoder};

/// Registered opcode set and dispatch table.
pub mod opcode;
pub use opcode::{Opcode, OPCODE_TABLE};

/// Arithmetic/logic unit operations.
pub mod alu;
pub use alu::{compare, BinaryAluOp, UnaryAluOp};

/// The machine and its fetch-decode-execute loop.
pub mod execute;
pub use execute::{Machine, OutputSink, StepOutcome, TraceSnapshot};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
