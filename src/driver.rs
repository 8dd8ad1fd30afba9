use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::TranspileConfig;
use crate::error::TranspileError;
use crate::ir::{Category, VerilogGenerator};
use crate::transpiler::{TranspileOutput, Transpiler};
use crate::utils::{report_source, report_symbols, CLIConsole};

/// Where a run's Verilog ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Written(PathBuf),
    Printed,
}

/// Write `text` to `path`. Refuses to replace an existing file unless `force`.
pub fn write_output(
    path: &Path,
    text: &str,
    force: bool,
) -> std::result::Result<(), TranspileError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let io_error = |source| TranspileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => TranspileError::OutputConflict(path.to_path_buf()),
        _ => io_error(e),
    })?;
    file.write_all(text.as_bytes()).map_err(io_error)
}

pub fn transpiler_for(config: &TranspileConfig) -> Transpiler {
    Transpiler::new(
        VerilogGenerator::new()
            .with_clock(config.clock_signal.clone())
            .with_plus_as_or(config.plus_as_or),
    )
}

/// Read the Visiboole file named by `config`, convert it and deliver the
/// result to a `.v` file or the console.
pub fn run(config: &TranspileConfig, console: &dyn CLIConsole) -> Result<RunOutcome> {
    let input_path = &config.input_path;
    let output_path = config.resolved_output_path();

    tracing::info!("Visiboole file: {}", input_path.display());
    tracing::info!("Verilog   file: {}", output_path.display());

    tracing::info!("Reading Visiboole file");
    let source = std::fs::read_to_string(input_path)
        .map_err(|source| TranspileError::Io {
            path: input_path.clone(),
            source,
        })
        .context(format!("Failed to read Visiboole file: {:?}", input_path))?;

    let output: TranspileOutput = transpiler_for(config)
        .transpile(&source)
        .context(format!("Failed to transpile: {:?}", input_path))?;

    for line in output.source_lines.iter().filter(|l| l.category == Category::Unknown) {
        if !line.tokens.is_empty() {
            tracing::warn!(
                "Line {} not recognized, passing through: {}",
                line.number,
                line.raw.trim()
            );
        }
    }

    if config.echo_input {
        report_source(console, &output.source_lines);
        report_symbols(console, &output.symbols);
    }

    if config.echo_output {
        for line in &output.lines {
            console.print_output_line(line);
        }
        return Ok(RunOutcome::Printed);
    }

    tracing::info!("Saving Verilog file");
    write_output(&output_path, &output.to_text(), config.force_overwrite)
        .context(format!("Failed to write Verilog to: {:?}", output_path))?;

    tracing::info!("Verilog written to: {}", output_path.display());
    Ok(RunOutcome::Written(output_path))
}
