//! Registered opcode set and dispatch table.

/// Operations with registered handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Opcode {
    Hlt,
    Ldi,
    Prn,
    Push,
    Pop,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    Cmp,
    And,
    Not,
    Or,
    Xor,
    Shl,
    Shr,
}

/// Single source-of-truth dispatch table from full opcode byte to operation.
///
/// The full 8-bit value is the key, not just the 4-bit identifier: the same
/// identifier bits can collide across the operand-count and flag bits. Any
/// byte not present here is illegal by definition.
pub const OPCODE_TABLE: &[(u8, Opcode)] = &[
    (0x01, Opcode::Hlt),
    (0x45, Opcode::Push),
    (0x46, Opcode::Pop),
    (0x47, Opcode::Prn),
    (0x65, Opcode::Inc),
    (0x66, Opcode::Dec),
    (0x69, Opcode::Not),
    (0x82, Opcode::Ldi),
    (0xA0, Opcode::Add),
    (0xA1, Opcode::Sub),
    (0xA2, Opcode::Mul),
    (0xA3, Opcode::Div),
    (0xA4, Opcode::Mod),
    (0xA7, Opcode::Cmp),
    (0xA8, Opcode::And),
    (0xAA, Opcode::Or),
    (0xAB, Opcode::Xor),
    (0xAC, Opcode::Shl),
    (0xAD, Opcode::Shr),
];

impl Opcode {
    /// Resolves an opcode byte against the dispatch table.
    ///
    /// Returns `None` for unregistered bytes; the engine turns that into an
    /// unsupported-opcode fault at dispatch time.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        OPCODE_TABLE
            .iter()
            .find(|(key, _)| *key == byte)
            .map(|(_, opcode)| *opcode)
    }

    /// Assembly mnemonic for this operation.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Hlt => "HLT",
            Self::Ldi => "LDI",
            Self::Prn => "PRN",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::Cmp => "CMP",
            Self::And => "AND",
            Self::Not => "NOT",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Opcode, OPCODE_TABLE};
    use crate::decoder::Decoder;

    const fn expected_operand_count(opcode: Opcode) -> u8 {
        match opcode {
            Opcode::Hlt => 0,
            Opcode::Prn | Opcode::Push | Opcode::Pop | Opcode::Inc | Opcode::Dec | Opcode::Not => {
                1
            }
            Opcode::Ldi
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Cmp
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Shl
            | Opcode::Shr => 2,
        }
    }

    const fn routes_through_alu(opcode: Opcode) -> bool {
        !matches!(
            opcode,
            Opcode::Hlt | Opcode::Ldi | Opcode::Prn | Opcode::Push | Opcode::Pop
        )
    }

    #[test]
    fn every_table_entry_resolves_to_itself() {
        for &(byte, opcode) in OPCODE_TABLE {
            assert_eq!(Opcode::from_byte(byte), Some(opcode));
        }
    }

    #[test]
    fn table_keys_are_unique() {
        for (i, &(a, _)) in OPCODE_TABLE.iter().enumerate() {
            for &(b, _) in &OPCODE_TABLE[i + 1..] {
                assert_ne!(a, b, "duplicate opcode byte {a:#04X}");
            }
        }
    }

    #[test]
    fn unregistered_bytes_resolve_to_none() {
        let registered: Vec<u8> = OPCODE_TABLE.iter().map(|(byte, _)| *byte).collect();
        for byte in 0_u8..=u8::MAX {
            if !registered.contains(&byte) {
                assert_eq!(Opcode::from_byte(byte), None, "byte {byte:#04X}");
            }
        }
    }

    #[test]
    fn table_bytes_encode_each_operations_arity() {
        for &(byte, opcode) in OPCODE_TABLE {
            let decoded = Decoder::decode(byte);
            assert_eq!(
                decoded.operand_count,
                expected_operand_count(opcode),
                "{} ({byte:#04X})",
                opcode.mnemonic()
            );
        }
    }

    #[test]
    fn table_bytes_encode_the_alu_flag() {
        for &(byte, opcode) in OPCODE_TABLE {
            let decoded = Decoder::decode(byte);
            assert_eq!(
                decoded.is_alu_op,
                routes_through_alu(opcode),
                "{} ({byte:#04X})",
                opcode.mnemonic()
            );
        }
    }

    #[test]
    fn no_registered_opcode_sets_pc() {
        for &(byte, _) in OPCODE_TABLE {
            assert!(!Decoder::decode(byte).sets_pc, "byte {byte:#04X}");
        }
    }
}
