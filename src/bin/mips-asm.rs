use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mips_asm::{assemble_source, write_image, AsmError, ImageLayout};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble a MIPS subset program into a fixed-size image")]
struct Opts {
    /// Input assembly file (one instruction per line)
    #[arg(value_name = "INPUT", default_value = "MIPSProgram.txt")]
    input: PathBuf,
    /// Output image file
    #[arg(value_name = "OUTPUT", default_value = "Program.txt")]
    output: PathBuf,
}

fn run(opts: &Opts) -> Result<()> {
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    info!("compiling {} into machine code", opts.input.display());

    // Nothing is written unless the whole program assembles.
    let asm = assemble_source(&text)?;

    let file = File::create(&opts.output)
        .with_context(|| format!("creating {}", opts.output.display()))?;
    write_image(&mut BufWriter::new(file), &asm.words, &ImageLayout::default())?;
    info!(
        words = asm.words.len(),
        diagnostics = asm.diagnostics.len(),
        "compiled to {}",
        opts.output.display()
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    if let Err(err) = run(&opts) {
        eprintln!("ERROR: {err:#}");
        let code = err.downcast_ref::<AsmError>().map_or(1, AsmError::exit_code);
        std::process::exit(code);
    }
}
