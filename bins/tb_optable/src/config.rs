use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tb_opcodes::{BuildOptions, Completeness, CycleConvention};

#[derive(Parser, Debug)]
#[command(
    name = "tb-optable",
    version,
    about = "Build, list and disassemble with the SM83 instruction table"
)]
pub struct Cli {
    /// Read the opcode data sheet from a JSON file instead of the bundled one
    #[arg(long, global = true, value_name = "FILE")]
    pub opcodes: Option<PathBuf>,

    /// Configuration file, defaults to <config dir>/tomboy/optable.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do when an opcode space is incomplete (warn, fail)
    #[arg(long, global = true)]
    pub completeness: Option<Completeness>,

    /// How conditional cycle counts are read (difference, verbatim)
    #[arg(long, global = true)]
    pub cycles: Option<CycleConvention>,

    /// Log more, can be repeated
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the instruction table
    List {
        /// Only list the 0xCB prefixed opcodes
        #[arg(long, conflicts_with = "unprefixed")]
        prefixed: bool,

        /// Only list the unprefixed opcodes
        #[arg(long)]
        unprefixed: bool,
    },

    /// Disassemble a raw binary
    Dis {
        /// The binary file to disassemble
        binary: PathBuf,

        /// Address of the first byte, in hex. Addresses are file offsets from here and are not
        /// mapped into ROM banks
        #[arg(long, default_value = "0000", value_parser = parse_address)]
        origin: u32,
    },
}

fn parse_address(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16).map_err(|err| format!("invalid address \"{}\" ({})", s, err))
}

/// Settings read from the configuration file.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub opcodes: Option<PathBuf>,
    pub build: BuildOptions,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `path`, or the default configuration file when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(Self::default()),
            },
        };

        tracing::debug!("Loading configuration from \"{}\"", path.display());

        let text = std::fs::read_to_string(&path)
            .map_err(|err| format!("Could not read config \"{}\" ({})", path.display(), err))?;

        Ok(Self::from_toml(&text)?)
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tomboy").join("optable.toml"))
}

/// The file configuration with command line overrides applied.
#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub opcodes: Option<PathBuf>,
    pub build: BuildOptions,
}

impl Config {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        Self {
            opcodes: cli.opcodes.clone().or(file.opcodes),
            build: BuildOptions {
                completeness: cli.completeness.unwrap_or(file.build.completeness),
                cycles: cli.cycles.unwrap_or(file.build.cycles),
            },
        }
    }
}
