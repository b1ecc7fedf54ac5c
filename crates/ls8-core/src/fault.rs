use thiserror::Error;

/// Fault classes used to group fault kinds for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Memory or fetch address outside the addressable range.
    Memory,
    /// Opcode dispatch found no registered handler.
    Dispatch,
    /// ALU arithmetic violation.
    Alu,
    /// Stack discipline violation.
    Stack,
    /// Register-operand decode violation.
    Register,
}

/// Fatal machine faults.
///
/// Every fault halts the run loop immediately and surfaces to the caller.
/// Memory and registers keep their last-mutated values for post-mortem
/// inspection. There is no recoverable fault kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// PC or operand address fell outside the 256-byte address space.
    #[error("memory address {addr:#05X} is outside the addressable range")]
    AddressOutOfRange {
        /// The offending address.
        addr: u16,
    },
    /// The opcode byte has no registered handler.
    #[error("no handler registered for opcode {opcode:#04X}")]
    UnsupportedOpcode {
        /// The unhandled opcode byte.
        opcode: u8,
    },
    /// DIV or MOD executed with a zero divisor register.
    #[error("division by zero in instruction {opcode:#04X}")]
    DivisionByZero {
        /// The instruction byte that attempted the division.
        opcode: u8,
    },
    /// POP executed with SP at or above the empty-stack marker.
    #[error("pop from an empty stack")]
    StackUnderflow,
    /// PUSH would have moved SP below address zero.
    #[error("push past the bottom of memory")]
    StackOverflow,
    /// A register operand byte named a register outside `R0..R7`.
    #[error("register operand {index} is outside the register file")]
    RegisterOutOfRange {
        /// The out-of-range register index.
        index: u8,
    },
}

impl Fault {
    /// Stable low-byte code identifying the fault kind.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::AddressOutOfRange { .. } => 0x01,
            Self::UnsupportedOpcode { .. } => 0x02,
            Self::DivisionByZero { .. } => 0x03,
            Self::StackUnderflow => 0x04,
            Self::StackOverflow => 0x05,
            Self::RegisterOutOfRange { .. } => 0x06,
        }
    }

    /// Returns the diagnostics class for this fault.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::AddressOutOfRange { .. } => FaultClass::Memory,
            Self::UnsupportedOpcode { .. } => FaultClass::Dispatch,
            Self::DivisionByZero { .. } => FaultClass::Alu,
            Self::StackUnderflow | Self::StackOverflow => FaultClass::Stack,
            Self::RegisterOutOfRange { .. } => FaultClass::Register,
        }
    }
}
