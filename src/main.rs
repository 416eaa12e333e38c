use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use crt::processor::Processor;
use crt::program::Program;
use crt::raster::RasterRenderer;
use crt::signal::SignalAccumulator;
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Input read when no path is given
const DEFAULT_INPUT: &str = "real_input.txt";

/// Runs a `noop`/`addx` program, draws the screen and prints the sum of the
/// sampled signal strengths
#[derive(Parser)]
#[command(name = "crt")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the program, one instruction per line
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?; // rust error handling
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .init()
        .map_err(|err| eyre!("Failed to initialize logging: {}", err))?; // logging

    let cli = Cli::parse();

    let program = Program::from_file(&cli.input)
        .wrap_err_with(|| format!("Failed to load program from `{}`", cli.input.display()))?;

    let mut cpu = Processor::new();
    let mut signal = SignalAccumulator::new();
    let mut crt = RasterRenderer::new(io::stdout());

    cpu.execute_program(&program, &mut (&mut signal, &mut crt));
    // the cycle after the last instruction is sampled but never drawn
    cpu.settle(&mut signal);

    log::info!("Drew {} rows", crt.rows());
    crt.finish().wrap_err("Failed to draw the screen")?;

    println!("result: {}", signal.sum());

    Ok(())
}
