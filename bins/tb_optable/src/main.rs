mod config;

use clap::Parser;
use config::{Cli, Command, Config, FileConfig};
use std::error::Error;
use std::path::Path;
use tb_decoder::{decode_instruction, Instruction};
use tb_opcodes::{InstructionTable, Listing, OpcodeSpace};
use tracing::Level;

/// Longest SM83 instruction, in bytes.
const MAX_INSTRUCTION_LEN: usize = 3;

struct Section<'a> {
    origin: u32,
    data: &'a [u8],
}

struct SectionIterator<'a> {
    section: &'a Section<'a>,
    position: usize,
}

impl Iterator for SectionIterator<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = self.section.data.get(self.position).copied()?;
        self.position += 1;
        Some(byte)
    }
}

fn format_instruction(address: u32, bytes: &[u8], instruction: &Instruction) -> String {
    let mut b: String = bytes.iter().map(|b| format!("{:02X} ", b)).collect();
    for _ in bytes.len()..MAX_INSTRUCTION_LEN {
        b.push_str("   ");
    }

    format!("{:04X}  {} {}", address, b, instruction)
}

fn format_data_byte(address: u32, byte: u8) -> String {
    format!("{:04X}  {:02X}        db ${:02X}", address, byte, byte)
}

fn disassemble_section(section: &Section, table: &InstructionTable) -> Vec<String> {
    let mut lines = vec![];
    let mut it = SectionIterator {
        section,
        position: 0,
    };

    while it.position < section.data.len() {
        let start = it.position;
        let address = section.origin + start as u32;

        match decode_instruction(&mut it, table) {
            Ok(instruction) => {
                let bytes = &section.data[start..it.position];
                lines.push(format_instruction(address, bytes, &instruction));
            }
            Err(err) => {
                tracing::debug!("Could not decode at {:04X} ({})", address, err);
                lines.push(format_data_byte(address, section.data[start]));
                it.position = start + 1;
            }
        }
    }

    lines
}

fn load_table(config: &Config) -> Result<InstructionTable, Box<dyn Error>> {
    let sheet = match &config.opcodes {
        Some(path) => {
            tracing::info!("Loading opcodes from \"{}\"", path.display());
            data_sheet::from_path(path)?
        }
        None => data_sheet::get_data_sheet()?,
    };

    Ok(InstructionTable::build(&sheet, config.build)?)
}

fn list(table: &InstructionTable, prefixed: bool, unprefixed: bool) {
    let spaces: &[OpcodeSpace] = match (prefixed, unprefixed) {
        (true, false) => &[OpcodeSpace::Prefixed],
        (false, true) => &[OpcodeSpace::Unprefixed],
        _ => &[OpcodeSpace::Unprefixed, OpcodeSpace::Prefixed],
    };

    for space in spaces {
        print!("{}", Listing::new(table.space(*space)));
    }
}

fn disassemble(table: &InstructionTable, binary: &Path, origin: u32) -> Result<(), Box<dyn Error>> {
    let data = std::fs::read(binary)
        .map_err(|err| format!("Could not read \"{}\" ({})", binary.display(), err))?;

    if u32::try_from(data.len())
        .ok()
        .and_then(|len| origin.checked_add(len))
        .is_none()
    {
        return Err(format!("\"{}\" does not fit above {:04X}", binary.display(), origin).into());
    }

    let section = Section {
        origin,
        data: data.as_slice(),
    };

    for line in disassemble_section(&section, table) {
        println!("{}", line);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let file = FileConfig::load(cli.config.as_deref())?;
    let config = Config::resolve(&cli, file);
    let table = load_table(&config)?;

    match &cli.command {
        Command::List {
            prefixed,
            unprefixed,
        } => list(&table, *prefixed, *unprefixed),
        Command::Dis { binary, origin } => disassemble(&table, binary, *origin)?,
    }

    Ok(())
}
