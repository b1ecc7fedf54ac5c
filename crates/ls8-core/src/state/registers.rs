use crate::fault::Fault;
use crate::memory::STACK_TOP;

/// Number of general-purpose registers (`R0..R7`).
pub const GENERAL_REGISTER_COUNT: usize = 8;

/// `FL` bit set when the last CMP found its operands equal.
pub const FL_EQUAL: u8 = 1 << 0;
/// `FL` bit set when the last CMP found register A greater.
pub const FL_GREATER: u8 = 1 << 1;
/// `FL` bit set when the last CMP found register A lesser.
pub const FL_LESS: u8 = 1 << 2;
/// Mask of architecturally active `FL` bits (`L/G/E`).
pub const FL_ACTIVE_MASK: u8 = FL_EQUAL | FL_GREATER | FL_LESS;

/// General-purpose register identifier.
///
/// Three registers carry reserved roles: R5 is the interrupt mask, R6 the
/// interrupt status, R7 the stack pointer. The interrupt slots are inert in
/// this core; only SP has live semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl Register {
    /// Ordered list of all registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
    ];

    /// Interrupt mask register.
    pub const IM: Self = Self::R5;
    /// Interrupt status register.
    pub const IS: Self = Self::R6;
    /// Stack pointer register.
    pub const SP: Self = Self::R7;

    /// Returns the array index for this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a register operand byte into a register.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::RegisterOutOfRange`] for operand bytes `>= 8`.
    pub const fn from_operand(byte: u8) -> Result<Self, Fault> {
        match byte {
            0 => Ok(Self::R0),
            1 => Ok(Self::R1),
            2 => Ok(Self::R2),
            3 => Ok(Self::R3),
            4 => Ok(Self::R4),
            5 => Ok(Self::R5),
            6 => Ok(Self::R6),
            7 => Ok(Self::R7),
            index => Err(Fault::RegisterOutOfRange { index }),
        }
    }
}

/// The eight 8-bit general-purpose register slots.
///
/// Values are stored as `u8`, so a register can never hold a value outside
/// `[0,255]`; arithmetic paths wrap before writing back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: [u8; GENERAL_REGISTER_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with all slots zeroed and SP at the
    /// empty-stack marker.
    #[must_use]
    pub const fn new() -> Self {
        let mut gpr = [0; GENERAL_REGISTER_COUNT];
        gpr[Register::SP.index()] = STACK_TOP;
        Self { gpr }
    }

    /// Reads a register.
    #[must_use]
    pub const fn get(&self, reg: Register) -> u8 {
        self.gpr[reg.index()]
    }

    /// Writes a register.
    pub const fn set(&mut self, reg: Register, value: u8) {
        self.gpr[reg.index()] = value;
    }

    /// Reads the stack pointer (R7).
    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.get(Register::SP)
    }

    /// Writes the stack pointer (R7).
    pub const fn set_sp(&mut self, value: u8) {
        self.set(Register::SP, value);
    }

    /// Copies out all register values in index order.
    #[must_use]
    pub const fn snapshot(&self) -> [u8; GENERAL_REGISTER_COUNT] {
        self.gpr
    }
}

/// The `FL` comparison-flags byte.
///
/// Mutated only by CMP; read only by conditional-branch instructions, none
/// of which are in the registered opcode set yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Flags(u8);

impl Flags {
    /// Returns the raw flags byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Replaces the flags byte, keeping only active bits.
    pub const fn set(&mut self, value: u8) {
        self.0 = value & FL_ACTIVE_MASK;
    }

    /// Returns `true` when a specific flag bit is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }
}
