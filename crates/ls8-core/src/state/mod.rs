/// Register file, reserved register roles, and flags bits.
pub mod registers;
/// Running/halted machine state.
pub mod run_state;

pub use registers::{
    Flags, Register, RegisterFile, FL_ACTIVE_MASK, FL_EQUAL, FL_GREATER, FL_LESS,
    GENERAL_REGISTER_COUNT,
};
pub use run_state::RunState;
