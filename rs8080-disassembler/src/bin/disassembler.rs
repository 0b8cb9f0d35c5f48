use anyhow::{Context, Result};
use clap::Parser;
use rs8080_disassembler::*;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Prints a linear listing of an Intel 8080 binary.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File to be disassembled
    #[arg(short, long, default_value = "roms/invaders.rom")]
    filename: PathBuf,
}

const CONFIG_ENV: &str = "RS8080_DISASM_CONFIG";

fn open_record(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create record directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open record file {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config_path =
        std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from("disassembler.toml"), PathBuf::from);
    let config = Config::load(&config_path)?;
    let table = OpcodeTable::load(&config.instructions)?;
    let rom = read_input(&args.filename)?;

    let stdout = io::stdout();
    let mut out = WriteSink::new(BufWriter::new(stdout.lock()));
    let mut decoder = Decoder::new(rom);
    let result = match &config.record {
        Some(path) => {
            let record = WriteSink::new(BufWriter::new(open_record(path)?));
            decoder.run(&table, &mut Tee::new(&mut out, record))
        }
        None => decoder.run(&table, &mut out),
    };
    let lines = result
        .with_context(|| format!("disassembly of {} stopped", args.filename.display()))?;
    log::info!("{} instructions listed", lines);
    Ok(())
}
