//! cellcalc CLI - feeds cell edits into a sheet and prints what changed

use anyhow::{Context, Result};
use cellcalc::{CalculationOptions, CellId, Sheet};
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "cellcalc")]
#[command(
    author,
    version,
    about = "Apply cell edits (`ADDRESS EXPRESSION` per line) and print recalculated cells"
)]
struct Cli {
    /// File with one edit per line (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Largest absolute exponent accepted by pow
    #[arg(long, default_value_t = CalculationOptions::default().max_exponent)]
    max_exponent: u32,

    /// Allow pow with negative exponents
    #[arg(long)]
    allow_negative_exponents: bool,

    /// Only report failed lines, without the summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Counters for a run over all input lines
#[derive(Debug, Default, PartialEq, Eq)]
struct RunStats {
    applied: usize,
    failed: usize,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cellcalc=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut sheet = Sheet::with_options(CalculationOptions {
        max_exponent: cli.max_exponent,
        allow_negative_exponents: cli.allow_negative_exponents,
    });

    let reader = open_input(cli.input.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let stats = run(&mut sheet, reader, &mut out, cli.format, cli.quiet)?;

    if !cli.quiet {
        eprintln!("Applied {} edits ({} errors)", stats.applied, stats.failed);
    }

    Ok(if stats.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Apply every edit from `reader` to `sheet`, reporting to `out`
fn run(
    sheet: &mut Sheet,
    reader: impl BufRead,
    out: &mut impl Write,
    format: Format,
    quiet: bool,
) -> Result<RunStats> {
    let mut stats = RunStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        let Some((address, expression)) = split_edit(&line) else {
            continue;
        };
        debug!(line = index + 1, address, expression, "applying edit");

        match sheet.set(address, expression) {
            Ok(updated) => {
                stats.applied += 1;
                if !quiet {
                    report_updated(sheet, &updated, out, format)?;
                }
            }
            Err(e) => {
                stats.failed += 1;
                report_error(address, &e.message(), out, format)?;
            }
        }
    }

    out.flush().context("Failed to flush output")?;
    Ok(stats)
}

/// Split a line into address and expression; `None` for blank and comment lines
fn split_edit(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    match line.split_once(char::is_whitespace) {
        Some((address, expression)) => Some((address, expression.trim_start())),
        None => Some((line, "")),
    }
}

fn report_updated(
    sheet: &Sheet,
    updated: &BTreeSet<CellId>,
    out: &mut impl Write,
    format: Format,
) -> Result<()> {
    match format {
        Format::Text => {
            for cell in updated {
                match sheet.lookup(cell) {
                    Some(value) => writeln!(out, "{} = {}", cell, value)?,
                    None => writeln!(out, "{} = <empty>", cell)?,
                }
            }
        }
        Format::Json => {
            let cells: serde_json::Map<String, serde_json::Value> = updated
                .iter()
                .map(|cell| {
                    let value = sheet.lookup(cell).map(|v| v.to_string());
                    (cell.to_string(), json!(value))
                })
                .collect();
            writeln!(out, "{}", json!({ "updated": cells }))?;
        }
    }
    Ok(())
}

fn report_error(address: &str, message: &str, out: &mut impl Write, format: Format) -> Result<()> {
    match format {
        Format::Text => writeln!(out, "{}: error: {}", address, message)?,
        Format::Json => writeln!(
            out,
            "{}",
            json!({ "cell": address, "error": message })
        )?,
    }
    Ok(())
}
