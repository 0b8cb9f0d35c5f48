use std::fmt::{self, Display, Formatter};
use strum_macros::IntoStaticStr;
use Operand::*;

/// Prefix written in front of an operand value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum Sigil {
    #[strum(serialize = "#")]
    Immediate,
    #[strum(serialize = "$")]
    Address,
}

impl Display for Sigil {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s: &'static str = self.into();
        f.write_str(s)
    }
}

/// How the bytes following an opcode are rendered, fixed per table slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperandStyle {
    /// Length 0, decoding it is an error.
    Vacant,
    Implied,
    Immediate8,
    Port,
    Immediate16,
    Address16,
}

impl OperandStyle {
    /// Picks the style for a `length` byte instruction named `mnemonic`.
    ///
    /// Lengths above 3 are rejected while loading the table, they map to
    /// `Vacant` here.
    pub fn classify(mnemonic: &str, length: u8) -> Self {
        match length {
            1 => OperandStyle::Implied,
            2 if mnemonic.contains("out") || mnemonic.contains("in") => OperandStyle::Port,
            2 => OperandStyle::Immediate8,
            3 if mnemonic.contains("lxi") => OperandStyle::Immediate16,
            3 => OperandStyle::Address16,
            _ => OperandStyle::Vacant,
        }
    }

    /// Builds the operand from the bytes after the opcode.
    /// `tail` must hold at least `length - 1` bytes.
    pub(crate) fn operand(self, tail: &[u8]) -> Operand {
        match self {
            OperandStyle::Vacant | OperandStyle::Implied => Empty,
            OperandStyle::Immediate8 => D8(tail[0]),
            OperandStyle::Port => Port(tail[0]),
            OperandStyle::Immediate16 => D16(tail[0], tail[1]),
            OperandStyle::Address16 => Addr(tail[0], tail[1]),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    Empty,
    D8(u8),
    Port(u8),
    /// lo, hi
    D16(u8, u8),
    /// lo, hi
    Addr(u8, u8),
}

impl Operand {
    pub fn sigil(&self) -> Option<Sigil> {
        match *self {
            Empty => None,
            D8(_) | D16(..) => Some(Sigil::Immediate),
            Port(_) | Addr(..) => Some(Sigil::Address),
        }
    }

    /// Little-endian word value for 16 bit operands.
    pub fn word(&self) -> Option<u16> {
        match *self {
            D16(lo, hi) | Addr(lo, hi) => Some(u16::from_le_bytes([lo, hi])),
            _ => None,
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sigil = match self.sigil() {
            Some(sigil) => sigil,
            None => return Ok(()),
        };
        match *self {
            D8(d8) | Port(d8) => write!(f, "{}{:02x}", sigil, d8),
            D16(lo, hi) | Addr(lo, hi) => write!(f, "{}{:02x}{:02x}", sigil, hi, lo),
            Empty => Ok(()),
        }
    }
}
