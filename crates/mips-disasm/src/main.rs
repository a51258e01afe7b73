use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use mips_asm::ImageLayout;
use mips_disasm::{list, load_layout};

#[derive(Parser, Debug)]
#[command(author, version, about = "List the instructions in a mips-asm program image", long_about = None)]
struct Cli {
    /// Program image produced by mips-asm
    #[arg(value_name = "IMAGE")]
    input: PathBuf,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Include fill slots
    #[arg(long)]
    all: bool,
    /// JSON image layout (defaults to the 64-slot, 4-line layout)
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let file = File::open(&cli.input).with_context(|| format!("opening {}", cli.input.display()))?;
    let layout = match &cli.layout {
        Some(path) => load_layout(path)?,
        None => ImageLayout::default(),
    };
    let entries = list(BufReader::new(file), &layout, cli.all)?;

    match cli.format {
        OutputFormat::Text => {
            for e in &entries {
                let word = e.word.as_deref().unwrap_or("--------");
                println!("{:>3}: {word}  {}", e.slot, e.text);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}
