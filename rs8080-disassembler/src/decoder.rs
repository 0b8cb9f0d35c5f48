use crate::operand::OperandStyle;
use crate::{Listing, ListingSink, OpcodeTable};
use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(
        "truncated instruction at {position:04x}: opcode {opcode:02x} needs {length} bytes, \
         {available} left"
    )]
    TruncatedInstruction {
        opcode: u8,
        position: usize,
        length: u8,
        available: usize,
    },
    #[error("zero-length instruction at {position:04x}: opcode {opcode:02x} has length 0")]
    ZeroLengthInstruction { opcode: u8, position: usize },
    #[error("unsupported instruction at {position:04x}: opcode {opcode:02x} has length {length}")]
    UnsupportedLength {
        opcode: u8,
        position: usize,
        length: u8,
    },
    #[error("cannot write listing for {position:04x}: {source}")]
    Sink {
        position: usize,
        source: std::io::Error,
    },
}

/// Walks a byte buffer front to back, one instruction at a time.
#[derive(Debug, Clone)]
pub struct Decoder {
    buffer: Vec<u8>,
    position: usize,
    halted: bool,
}

impl Decoder {
    pub fn new(buffer: Vec<u8>) -> Self {
        Decoder {
            buffer,
            position: 0,
            halted: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn end(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.end()
    }

    /// Decodes the instruction under the cursor and moves past it.
    ///
    /// Returns `Ok(None)` at the end of the buffer. On error the cursor stays
    /// on the offending opcode, so calling again reports the same error. The
    /// `halted` flag it sets only fuses [`Listings`].
    pub fn step(&mut self, table: &OpcodeTable) -> Result<Option<Listing>, DecodeError> {
        if self.is_finished() {
            return Ok(None);
        }
        let position = self.position;
        let opcode = self.buffer[position];
        let instr = &table[opcode];

        let length = instr.length();
        if instr.style() == OperandStyle::Vacant {
            self.halted = true;
            return Err(match length {
                0 => DecodeError::ZeroLengthInstruction { opcode, position },
                _ => DecodeError::UnsupportedLength {
                    opcode,
                    position,
                    length,
                },
            });
        }
        let available = self.end() - position;
        if length as usize > available {
            self.halted = true;
            return Err(DecodeError::TruncatedInstruction {
                opcode,
                position,
                length,
                available,
            });
        }

        let tail = &self.buffer[position + 1..position + length as usize];
        let operand = instr.style().operand(tail);
        self.position += length as usize;
        Ok(Some(Listing::new(
            position,
            opcode,
            length,
            instr.mnemonic(),
            operand,
        )))
    }

    /// Iterates over the remaining instructions. Stops after the first error.
    pub fn listings<'a>(&'a mut self, table: &'a OpcodeTable) -> Listings<'a> {
        Listings {
            decoder: self,
            table,
        }
    }

    /// Decodes until the end of the buffer, sending every line to `sink`.
    /// Returns the number of lines emitted.
    pub fn run<S: ListingSink>(
        &mut self,
        table: &OpcodeTable,
        sink: &mut S,
    ) -> Result<usize, DecodeError> {
        let mut count = 0;
        while let Some(listing) = self.step(table)? {
            sink.emit(&listing).map_err(|source| DecodeError::Sink {
                position: listing.address,
                source,
            })?;
            debug!("{}", listing);
            count += 1;
        }
        sink.flush().map_err(|source| DecodeError::Sink {
            position: self.position,
            source,
        })?;
        Ok(count)
    }
}

pub struct Listings<'a> {
    decoder: &'a mut Decoder,
    table: &'a OpcodeTable,
}

impl<'a> Iterator for Listings<'a> {
    type Item = Result<Listing, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.decoder.halted {
            return None;
        }
        self.decoder.step(self.table).transpose()
    }
}

/// Disassembles `buffer` from offset 0 into listing lines.
pub fn disassemble(buffer: &[u8], table: &OpcodeTable) -> Result<Vec<String>, DecodeError> {
    let mut lines: Vec<String> = Vec::new();
    Decoder::new(buffer.to_vec()).run(table, &mut lines)?;
    Ok(lines)
}
