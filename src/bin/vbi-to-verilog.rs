//! Visiboole to Verilog converter
//!
//! Reads a `.vbi` file, rewrites it line by line into Verilog and saves it
//! next to the input (or wherever `--v-file` points).

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vbi_transpiler::config::TranspileConfig;
use vbi_transpiler::driver::{run, RunOutcome};
use vbi_transpiler::utils::{CLIConsole, SimpleConsole};

#[derive(Parser)]
#[command(name = "vbi-to-verilog")]
#[command(about = "Convert Visiboole to Verilog")]
#[command(version)]
struct Args {
    /// Path to input Visiboole file
    vbi_file: PathBuf,

    /// Optional output Verilog file. Otherwise uses same name with .v extension.
    #[arg(short = 'v', long = "v-file")]
    v_file: Option<PathBuf>,

    /// Print input Visiboole code to console after categorizing lines.
    #[arg(short, long)]
    input: bool,

    /// Print output Verilog code to console instead of saving to .v file.
    #[arg(short, long)]
    output: bool,

    /// Replace the output file if it already exists.
    #[arg(short, long)]
    force: bool,

    /// Clock signal driving register assignments.
    #[arg(long)]
    clock: Option<String>,

    /// Treat `+` on wire lines without `[]` as OR.
    #[arg(long)]
    plus_as_or: bool,

    /// JSON config file; command-line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<TranspileConfig> {
        let mut config = match &self.config {
            Some(path) => TranspileConfig::from_file(path)?,
            None => TranspileConfig::default(),
        };

        config.input_path = self.vbi_file;
        if self.v_file.is_some() {
            config.output_path = self.v_file;
        }
        if let Some(clock) = self.clock {
            config.clock_signal = clock;
        }
        config.echo_input |= self.input;
        config.echo_output |= self.output;
        config.force_overwrite |= self.force;
        config.plus_as_or |= self.plus_as_or;
        Ok(config)
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Convert Visiboole to Verilog");

    let console = SimpleConsole::new();
    let result = args.into_config().and_then(|config| run(&config, &console));

    match result {
        Ok(RunOutcome::Written(path)) => {
            console.print_success(&format!("Verilog written to {}", path.display()));
        }
        Ok(RunOutcome::Printed) => {}
        Err(e) => {
            console.print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
