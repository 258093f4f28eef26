//! Prints the section listing and the defined/undefined symbol listings
//! of an ELF binary.
//!
//! All the decoding lives in `symscan`; this binary only opens the file,
//! hands the bytes over, and adds titles around the three result strings.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use symscan::ElfBinary;

/// Examine an ELF binary's symbol tables.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The ELF binary to examine
    #[arg(default_value = "a.out")]
    filename: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("symdump: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&args.filename)?;
    let name = args.filename.display().to_string();
    let image = ElfBinary::new(&name, &bytes).parse()?;

    println!("\nSection Header Symbols:\n\n{}", image.sections());
    println!("\n\nDefined-only Symbols:\n\n{}", image.defined_only());
    println!("\n\nUndefined-only symbols:\n\n{}\n", image.undefined_only());
    Ok(())
}
