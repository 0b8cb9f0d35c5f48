use crate::operand::Operand;
use std::fmt::{self, Formatter};

/// One decoded instruction, rendered as `addr mnemonic[operand]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub address: usize,
    pub opcode: u8,
    pub size: u8,
    pub mnemonic: String,
    pub operand: Operand,
}

impl Listing {
    pub fn new(address: usize, opcode: u8, size: u8, mnemonic: &str, operand: Operand) -> Self {
        Listing {
            address,
            opcode,
            size,
            mnemonic: mnemonic.to_owned(),
            operand,
        }
    }

    /// Offset of the next instruction.
    pub fn next_address(&self) -> usize {
        self.address + self.size as usize
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x} {}{}", self.address, self.mnemonic, self.operand)
    }
}
