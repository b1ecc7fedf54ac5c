//! Instruction-byte decoder for the LS-8 fixed bit layout.
//!
//! An instruction byte reads `AABCDDDD` from high bit to low:
//!
//! - bits 7-6 (`AA`): number of trailing operand bytes,
//! - bit 5 (`B`): the operation routes through the ALU,
//! - bit 4 (`C`): the operation sets PC itself,
//! - bits 3-0 (`DDDD`): operation identifier.
//!
//! Decoding the operand count from the byte itself lets the engine know how
//! many bytes to fetch before it knows which operation it is running.

/// The classified fields of one instruction byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DecodedInstruction {
    /// Number of operand bytes following the instruction.
    pub operand_count: u8,
    /// The operation routes through the ALU.
    pub is_alu_op: bool,
    /// The operation writes PC itself; the engine must not auto-advance.
    ///
    /// Reserved metadata: no registered opcode sets this bit yet. Honoring
    /// it here lets jump/call/return handlers be added without changing the
    /// run loop.
    pub sets_pc: bool,
    /// Low four bits identifying the operation within its class.
    pub op_id: u8,
}

/// Decoder for the fixed `AABCDDDD` instruction layout.
pub struct Decoder;

impl Decoder {
    /// Classifies one instruction byte.
    ///
    /// Total over all 256 byte values; identifiers with no registered
    /// handler fail later, at dispatch.
    #[must_use]
    pub const fn decode(byte: u8) -> DecodedInstruction {
        DecodedInstruction {
            operand_count: byte >> 6,
            is_alu_op: (byte >> 5) & 1 == 1,
            sets_pc: (byte >> 4) & 1 == 1,
            op_id: byte & 0x0F,
        }
    }
}
