use crate::operand::OperandStyle;
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of opcodes an 8080 byte can encode.
pub const TABLE_SIZE: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read opcode table '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("opcode table is not a list of [mnemonic, length] records: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("opcode table has {0} records, expected 256")]
    RecordCount(usize),
    #[error("record {index:#04x} has neither a mnemonic nor a length")]
    EmptyRecord { index: usize },
    #[error("record {index:#04x} has length {value}, expected 0..=3")]
    BadLength { index: usize, value: String },
    #[error("cannot load settings '{}': {reason}", .path.display())]
    Settings { path: PathBuf, reason: String },
}

/// A record field that was neither text nor a number. The field is dropped.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("record {index:#04x}: ignoring field {field} of unexpected type")]
pub struct ConfigWarning {
    pub index: usize,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDescriptor {
    mnemonic: String,
    length: u8,
    style: OperandStyle,
}

impl InstructionDescriptor {
    pub fn new(mnemonic: impl Into<String>, length: u8) -> Self {
        let mnemonic = mnemonic.into();
        let style = OperandStyle::classify(&mnemonic, length);
        InstructionDescriptor {
            mnemonic,
            length,
            style,
        }
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Size in bytes, opcode included.
    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn style(&self) -> OperandStyle {
        self.style
    }

    pub fn is_vacant(&self) -> bool {
        self.style == OperandStyle::Vacant
    }
}

impl Default for InstructionDescriptor {
    fn default() -> Self {
        InstructionDescriptor::new("", 0)
    }
}

/// Opcode byte to instruction mapping. Always holds [`TABLE_SIZE`] entries.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    entries: Vec<InstructionDescriptor>,
    warnings: Vec<ConfigWarning>,
}

impl OpcodeTable {
    /// Reads a JSON table like
    /// ```json
    /// [["nop", 1], ["lxi    b,", 3], ...]
    /// ```
    /// where record `i` describes opcode `i`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&text)?;
        info!(
            "loaded opcode table from {} ({} warnings)",
            path.display(),
            table.warnings.len()
        );
        Ok(table)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let records: Vec<Vec<Value>> = serde_json::from_str(text)?;
        if records.len() != TABLE_SIZE {
            return Err(ConfigError::RecordCount(records.len()));
        }

        let mut warnings = Vec::new();
        let mut entries = Vec::with_capacity(TABLE_SIZE);
        for (index, record) in records.iter().enumerate() {
            entries.push(parse_record(index, record, &mut warnings)?);
        }
        for w in &warnings {
            warn!("{}", w);
        }
        for (opcode, _) in entries.iter().enumerate().filter(|(_, e)| e.is_vacant()) {
            warn!("opcode {:#04x} has length 0 and cannot be decoded", opcode);
        }

        Ok(OpcodeTable { entries, warnings })
    }

    /// Builds a table from descriptors in opcode order. Slots past the end of
    /// `descriptors` are vacant, extra descriptors are ignored.
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = InstructionDescriptor>,
    {
        let mut entries: Vec<_> = descriptors.into_iter().take(TABLE_SIZE).collect();
        entries.resize_with(TABLE_SIZE, Default::default);
        OpcodeTable {
            entries,
            warnings: Vec::new(),
        }
    }

    pub fn get(&self, opcode: u8) -> &InstructionDescriptor {
        &self.entries[opcode as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &InstructionDescriptor)> {
        (0..=u8::MAX).zip(self.entries.iter())
    }

    /// Problems found while loading that did not stop the load.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}

impl Index<u8> for OpcodeTable {
    type Output = InstructionDescriptor;

    fn index(&self, opcode: u8) -> &Self::Output {
        self.get(opcode)
    }
}

fn parse_record(
    index: usize,
    record: &[Value],
    warnings: &mut Vec<ConfigWarning>,
) -> Result<InstructionDescriptor, ConfigError> {
    let mut mnemonic = None;
    let mut length = None;
    for field in record {
        match field {
            Value::String(s) => mnemonic = Some(s.clone()),
            Value::Number(n) => length = Some(parse_length(index, n)?),
            other => warnings.push(ConfigWarning {
                index,
                field: other.to_string(),
            }),
        }
    }
    if mnemonic.is_none() && length.is_none() {
        return Err(ConfigError::EmptyRecord { index });
    }
    Ok(InstructionDescriptor::new(
        mnemonic.unwrap_or_default(),
        length.unwrap_or(0),
    ))
}

fn parse_length(index: usize, n: &serde_json::Number) -> Result<u8, ConfigError> {
    let whole = n
        .as_u64()
        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64));
    match whole {
        Some(len @ 0..=3) => Ok(len as u8),
        _ => Err(ConfigError::BadLength {
            index,
            value: n.to_string(),
        }),
    }
}
