//! Flat byte-addressed memory for the LS-8 machine.

use crate::fault::Fault;

/// Size in bytes of the flat address space.
pub const MEMORY_SIZE: usize = 256;

/// SP value when the stack is empty. The stack grows downward from here.
pub const STACK_TOP: u8 = 0xF4;

/// Linearly addressed byte store with checked access.
///
/// Addresses are `u16` at the API edge so an out-of-range address can be
/// named in the fault instead of being truncated to fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates a zeroed address space.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Reads the byte at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when `addr` is outside `[0,256)`.
    pub fn read(&self, addr: u16) -> Result<u8, Fault> {
        self.cells
            .get(usize::from(addr))
            .copied()
            .ok_or(Fault::AddressOutOfRange { addr })
    }

    /// Writes `value` to the byte at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when `addr` is outside `[0,256)`.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), Fault> {
        match self.cells.get_mut(usize::from(addr)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Fault::AddressOutOfRange { addr }),
        }
    }

    /// Reads the byte at `addr`, or 0 when `addr` is out of range.
    ///
    /// Used only for read-only lookahead in trace snapshots; execution paths
    /// use the checked [`Memory::read`].
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        self.cells.get(usize::from(addr)).copied().unwrap_or(0)
    }

    /// Copies a contiguous program image into memory starting at address 0.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when the image does not fit.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Fault> {
        for (addr, byte) in (0_u16..).zip(image.iter().copied()) {
            self.write(addr, byte)?;
        }
        Ok(())
    }

    /// Writes a sparse `(address, byte)` image, the loader-boundary form.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when any pair names an address
    /// outside `[0,256)`.
    pub fn load_image(&mut self, pairs: &[(u16, u8)]) -> Result<(), Fault> {
        for &(addr, byte) in pairs {
            self.write(addr, byte)?;
        }
        Ok(())
    }
}
