use crate::ConfigError;
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Settings for the `disassembler` binary, read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Opcode table, see [`crate::OpcodeTable::load`].
    pub instructions: PathBuf,
    /// Append-only copy of every listing line.
    pub record: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions: PathBuf::from("instructions.json"),
            record: None,
        }
    }
}

impl Config {
    /// Loads settings from `path`. A missing file gives the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let settings_err = |reason: String| ConfigError::Settings {
            path: path.to_path_buf(),
            reason,
        };

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(settings_err(e.to_string())),
        };
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| settings_err(e.to_string()))?;
        toml::from_str(&contents).map_err(|e| settings_err(e.to_string()))
    }
}
