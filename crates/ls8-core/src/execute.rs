//! Fetch-decode-execute engine for the LS-8 machine.
//!
//! Each step fetches the opcode byte at PC, classifies it, fetches the
//! trailing operand bytes the classification announced, resolves a handler
//! from the dispatch table, executes it, and advances PC past the
//! instruction unless the instruction's sets-PC bit claims that job. Any
//! fault halts the machine and propagates to the caller; the loop never
//! continues after a fault.

use crate::alu::{self, BinaryAluOp, UnaryAluOp};
use crate::decoder::Decoder;
use crate::fault::Fault;
use crate::memory::{Memory, STACK_TOP};
use crate::opcode::Opcode;
use crate::state::{Flags, Register, RegisterFile, RunState, GENERAL_REGISTER_COUNT};

/// Receiver for the machine's observable output (PRN).
///
/// The core decides *what* is emitted, never how it is rendered; hosts
/// provide the sink. Output is an immediate, blocking side effect of the
/// emitting instruction.
pub trait OutputSink {
    /// Receives one register value to be shown in decimal.
    fn emit_decimal(&mut self, value: u8);
}

/// Collecting sink for tests and embedders.
impl OutputSink for Vec<u8> {
    fn emit_decimal(&mut self, value: u8) {
        self.push(value);
    }
}

/// Status of one instruction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// Instruction executed and the machine is still running.
    Retired,
    /// The machine is halted; either this step retired HLT or the machine
    /// was already halted and the step was a no-op.
    Halted,
}

/// Read-only machine snapshot for external logging.
///
/// The core never decides whether or how a snapshot is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TraceSnapshot {
    /// Program counter at the time of the snapshot.
    pub pc: u16,
    /// The next three memory bytes starting at PC; out-of-range reads as 0.
    pub next: [u8; 3],
    /// All register values in index order.
    pub registers: [u8; GENERAL_REGISTER_COUNT],
    /// The comparison-flags byte.
    pub fl: u8,
}

/// One LS-8 machine: memory, register file, PC, FL, and run state.
///
/// An explicitly owned value; memory and registers belong to exactly one
/// machine, which emulates a single sequential core. Construction leaves
/// the machine halted until a program is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Machine {
    memory: Memory,
    registers: RegisterFile,
    fl: Flags,
    pc: u16,
    run_state: RunState,
}

impl Machine {
    /// Creates a halted machine with zeroed memory and registers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies a contiguous program image to address 0 and starts the
    /// machine: PC moves to 0 and the state becomes running.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when the image does not fit in
    /// memory; the machine stays halted.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), Fault> {
        self.memory.load(image)?;
        self.start();
        Ok(())
    }

    /// Loads a sparse `(address, byte)` image and starts the machine.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when any pair names an address
    /// outside memory; the machine stays halted.
    pub fn load_image(&mut self, pairs: &[(u16, u8)]) -> Result<(), Fault> {
        self.memory.load_image(pairs)?;
        self.start();
        Ok(())
    }

    fn start(&mut self) {
        self.pc = 0;
        self.run_state = RunState::Running;
    }

    /// Current program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Current comparison flags.
    #[must_use]
    pub const fn fl(&self) -> Flags {
        self.fl
    }

    /// Current run state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Read access to the register file.
    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Read access to memory.
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Captures a read-only snapshot of PC, the next three memory bytes,
    /// the register file, and FL.
    #[must_use]
    pub fn trace(&self) -> TraceSnapshot {
        let mut next = [0_u8; 3];
        for (slot, offset) in next.iter_mut().zip(0_u16..) {
            *slot = self.memory.peek(self.pc.wrapping_add(offset));
        }
        TraceSnapshot {
            pc: self.pc,
            next,
            registers: self.registers.snapshot(),
            fl: self.fl.bits(),
        }
    }

    /// Executes one instruction.
    ///
    /// Stepping a halted machine is a no-op that reports
    /// [`StepOutcome::Halted`] without touching PC or memory.
    ///
    /// # Errors
    ///
    /// Any [`Fault`] halts the machine and propagates; memory and registers
    /// keep their last-mutated values for post-mortem inspection.
    pub fn step(&mut self, out: &mut dyn OutputSink) -> Result<StepOutcome, Fault> {
        if !self.run_state.is_running() {
            return Ok(StepOutcome::Halted);
        }

        match self.step_running(out) {
            Ok(outcome) => Ok(outcome),
            Err(fault) => {
                self.run_state = RunState::Halted;
                Err(fault)
            }
        }
    }

    /// Runs the machine until it halts.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Fault`] raised by a step.
    pub fn run(&mut self, out: &mut dyn OutputSink) -> Result<(), Fault> {
        while self.run_state.is_running() {
            self.step(out)?;
        }
        Ok(())
    }

    fn step_running(&mut self, out: &mut dyn OutputSink) -> Result<StepOutcome, Fault> {
        let instruction = self.memory.read(self.pc)?;
        let decoded = Decoder::decode(instruction);

        // Two count bits, so at most three trailing bytes.
        let mut operands = [0_u8; 3];
        for (slot, offset) in operands
            .iter_mut()
            .zip(1_u16..)
            .take(usize::from(decoded.operand_count))
        {
            *slot = self.memory.read(self.pc.wrapping_add(offset))?;
        }

        let Some(opcode) = Opcode::from_byte(instruction) else {
            return Err(Fault::UnsupportedOpcode {
                opcode: instruction,
            });
        };

        self.execute(opcode, operands, instruction, out)?;

        if !decoded.sets_pc {
            self.pc += u16::from(decoded.operand_count) + 1;
        }

        Ok(if self.run_state.is_running() {
            StepOutcome::Retired
        } else {
            StepOutcome::Halted
        })
    }

    fn execute(
        &mut self,
        opcode: Opcode,
        operands: [u8; 3],
        instruction: u8,
        out: &mut dyn OutputSink,
    ) -> Result<(), Fault> {
        match opcode {
            Opcode::Hlt => {
                self.run_state = RunState::Halted;
                Ok(())
            }
            Opcode::Ldi => {
                let reg = Register::from_operand(operands[0])?;
                self.registers.set(reg, operands[1]);
                Ok(())
            }
            Opcode::Prn => {
                let reg = Register::from_operand(operands[0])?;
                out.emit_decimal(self.registers.get(reg));
                Ok(())
            }
            Opcode::Push => {
                let reg = Register::from_operand(operands[0])?;
                self.push(self.registers.get(reg))
            }
            Opcode::Pop => {
                let reg = Register::from_operand(operands[0])?;
                let value = self.pop()?;
                self.registers.set(reg, value);
                Ok(())
            }
            Opcode::Add => self.binary_alu(BinaryAluOp::Add, operands, instruction),
            Opcode::Sub => self.binary_alu(BinaryAluOp::Sub, operands, instruction),
            Opcode::Mul => self.binary_alu(BinaryAluOp::Mul, operands, instruction),
            Opcode::Div => self.binary_alu(BinaryAluOp::Div, operands, instruction),
            Opcode::Mod => self.binary_alu(BinaryAluOp::Mod, operands, instruction),
            Opcode::And => self.binary_alu(BinaryAluOp::And, operands, instruction),
            Opcode::Or => self.binary_alu(BinaryAluOp::Or, operands, instruction),
            Opcode::Xor => self.binary_alu(BinaryAluOp::Xor, operands, instruction),
            Opcode::Shl => self.binary_alu(BinaryAluOp::Shl, operands, instruction),
            Opcode::Shr => self.binary_alu(BinaryAluOp::Shr, operands, instruction),
            Opcode::Inc => self.unary_alu(UnaryAluOp::Inc, operands),
            Opcode::Dec => self.unary_alu(UnaryAluOp::Dec, operands),
            Opcode::Not => self.unary_alu(UnaryAluOp::Not, operands),
            Opcode::Cmp => {
                let a = Register::from_operand(operands[0])?;
                let b = Register::from_operand(operands[1])?;
                self.fl
                    .set(alu::compare(self.registers.get(a), self.registers.get(b)));
                Ok(())
            }
        }
    }

    fn binary_alu(
        &mut self,
        op: BinaryAluOp,
        operands: [u8; 3],
        instruction: u8,
    ) -> Result<(), Fault> {
        let a = Register::from_operand(operands[0])?;
        let b = Register::from_operand(operands[1])?;
        let result = op.apply(self.registers.get(a), self.registers.get(b), instruction)?;
        self.registers.set(a, result);
        Ok(())
    }

    fn unary_alu(&mut self, op: UnaryAluOp, operands: [u8; 3]) -> Result<(), Fault> {
        let reg = Register::from_operand(operands[0])?;
        self.registers.set(reg, op.apply(self.registers.get(reg)));
        Ok(())
    }

    fn push(&mut self, value: u8) -> Result<(), Fault> {
        let sp = self.registers.sp();
        if sp == 0 {
            return Err(Fault::StackOverflow);
        }
        let sp = sp - 1;
        self.memory.write(u16::from(sp), value)?;
        self.registers.set_sp(sp);
        Ok(())
    }

    fn pop(&mut self) -> Result<u8, Fault> {
        let sp = self.registers.sp();
        if sp >= STACK_TOP {
            return Err(Fault::StackUnderflow);
        }
        let value = self.memory.read(u16::from(sp))?;
        self.registers.set_sp(sp + 1);
        Ok(value)
    }
}
