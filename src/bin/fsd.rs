//! fsd - Form Structure Diff CLI tool
//!
//! Compares exported form definitions between two environments and reports
//! customization drift to the console, CSV, or JSON lines.

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use form_structure_diff::{
    compare_forms, ConsoleReport, CsvReport, DiffEvent, JsonLinesReport, ReportSink,
};

#[derive(Debug, Parser)]
#[command(name = "fsd", version, about = "Compare form definitions between environments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare two form documents
    Compare {
        /// Form document from the origin environment
        #[arg(long)]
        lhs: PathBuf,

        /// Form document from the destination environment
        #[arg(long)]
        rhs: PathBuf,

        #[arg(long, value_enum, default_value = "console")]
        format: Format,

        /// Output location. Use '-' for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
    },

    /// Compare every form pair listed in a JSON manifest
    Batch {
        /// Manifest file: a JSON array of {"name", "lhs", "rhs"} entries
        #[arg(long)]
        manifest: PathBuf,

        #[arg(long, value_enum, default_value = "console")]
        format: Format,

        /// Output location. Use '-' for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One human-readable line per change
    Console,
    /// Sectioned CSV in the audit spreadsheet layout
    Csv,
    /// One JSON object per change
    Json,
}

/// One form pair in a batch manifest.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    lhs: PathBuf,
    rhs: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Compare {
            lhs,
            rhs,
            format,
            output,
        } => {
            let mut out = open_output(&output)?;
            match compare_pair(&lhs, &rhs)? {
                None => writeln!(out, "The forms are identical. No changes detected.")?,
                Some(events) => render(&events, format, &mut *out)?,
            }
            Ok(())
        }
        Command::Batch {
            manifest,
            format,
            output,
        } => {
            let content = fs::read_to_string(&manifest)
                .map_err(|e| format!("failed to read manifest {:?}: {}", manifest, e))?;
            let entries: Vec<ManifestEntry> = serde_json::from_str(&content)
                .map_err(|e| format!("invalid manifest {:?}: {}", manifest, e))?;

            let mut out = open_output(&output)?;
            for entry in entries {
                // One bad pair must not stop the rest of the batch.
                let events = match compare_pair(&entry.lhs, &entry.rhs) {
                    Ok(events) => events,
                    Err(e) => {
                        log::warn!("skipping form '{}': {}", entry.name, e);
                        continue;
                    }
                };
                emit_batch_entry(&entry.name, events, format, &mut *out)?;
            }
            Ok(())
        }
    }
}

fn compare_pair(lhs: &Path, rhs: &Path) -> Result<Option<Vec<DiffEvent>>, Box<dyn Error>> {
    let left = fs::read_to_string(lhs).map_err(|e| format!("failed to read {:?}: {}", lhs, e))?;
    let right = fs::read_to_string(rhs).map_err(|e| format!("failed to read {:?}: {}", rhs, e))?;

    if left == right {
        return Ok(None);
    }
    let events = compare_forms(&left, &right)?;
    log::debug!("{:?} vs {:?}: {} events", lhs, rhs, events.len());
    Ok(Some(events))
}

fn emit_batch_entry(
    name: &str,
    events: Option<Vec<DiffEvent>>,
    format: Format,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    match format {
        Format::Json => {
            // Headers would corrupt the JSON stream; wrap each pair instead.
            let line = serde_json::to_string(&serde_json::json!({
                "form": name,
                "events": events.unwrap_or_default(),
            }))?;
            writeln!(out, "{}", line)?;
        }
        Format::Csv => {
            writeln!(out, "## {}", name)?;
            render(&events.unwrap_or_default(), format, out)?;
        }
        Format::Console => {
            writeln!(out, "\n==================================================")?;
            writeln!(out, "Comparing form '{}':", name)?;
            writeln!(out, "==================================================")?;
            match events {
                None => writeln!(out, "The forms are identical. No changes detected.")?,
                Some(events) => render(&events, format, out)?,
            }
        }
    }
    Ok(())
}

fn render(events: &[DiffEvent], format: Format, out: &mut dyn Write) -> io::Result<()> {
    match format {
        Format::Console => {
            if events.is_empty() {
                writeln!(out, "No changes detected.")?;
                return Ok(());
            }
            let mut report = ConsoleReport::new(&mut *out);
            for event in events {
                report.accept(event.clone());
            }
        }
        Format::Csv => {
            let mut report = CsvReport::new();
            for event in events {
                report.accept(event.clone());
            }
            report.write_to(&mut *out)?;
        }
        Format::Json => {
            let mut report = JsonLinesReport::new(&mut *out);
            for event in events {
                report.accept(event.clone());
            }
        }
    }
    Ok(())
}

fn open_output(output: &str) -> Result<Box<dyn Write>, Box<dyn Error>> {
    if output == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        let file = fs::File::create(output)
            .map_err(|e| format!("failed to create output file {:?}: {}", output, e))?;
        Ok(Box::new(file))
    }
}
