//! Linear disassembler for Intel 8080 machine code.
//!
//! An [`OpcodeTable`] maps every opcode byte to a mnemonic and a size. A
//! [`Decoder`] walks a buffer from offset 0 and yields one [`Listing`] per
//! instruction:
//!
//! ```text
//! 0000 lxi    h,#1234
//! 0003 in$01
//! ```

mod config;
mod decoder;
mod listing;
mod operand;
mod sink;
mod table;

pub use config::Config;
pub use decoder::{disassemble, DecodeError, Decoder, Listings};
pub use listing::Listing;
pub use operand::{Operand, OperandStyle, Sigil};
pub use sink::{ListingSink, Tee, WriteSink};
pub use table::{ConfigError, ConfigWarning, InstructionDescriptor, OpcodeTable, TABLE_SIZE};

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot read input '{}': {source}", .path.display())]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Reads the whole binary to disassemble.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Error> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}
