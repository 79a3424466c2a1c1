//! `spd`: command-line decoder for DDR4 SPD EEPROM captures.
//!
//! ```text
//! USAGE:
//!   spd decode [FILE] [--channel X]... [--format text|json]
//!                                    Decode every channel in a capture
//!   spd compare [FILE]               Check configured channels are identical
//!   spd layout                       Print the SPD field layout table
//!   spd sample-config                Print a sample configuration file
//! ```
//!
//! `FILE` is console output from the dumping firmware; omit it or pass `-`
//! to read stdin.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use spd_decode::dump;
use spd_decode::layout::fields::LAYOUT;
use spd_decode::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spd", about = "DDR4 SPD EEPROM dump decoder", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Decode every channel in a capture and check they match.
    Decode {
        /// Capture file (stdin if omitted or `-`).
        input: Option<PathBuf>,
        /// Only decode these channels (e.g. DDR4_B or B). Repeatable.
        #[arg(short, long = "channel")]
        channels: Vec<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Check that the configured channels carry identical SPD bytes.
    Compare {
        /// Capture file (stdin if omitted or `-`).
        input: Option<PathBuf>,
    },
    /// Print the SPD field layout table.
    Layout,
    /// Print a sample configuration file.
    SampleConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::init()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Cmd::Decode {
            input,
            channels,
            format,
        } => cmd_decode(config, input.as_deref(), &channels, format)?,
        Cmd::Compare { input } => cmd_compare(config, input.as_deref())?,
        Cmd::Layout => cmd_layout(),
        Cmd::SampleConfig => print!("{}", Config::sample_config()),
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn load_channels(config: &Config, input: Option<&Path>) -> Result<ChannelSet> {
    let text = read_input(input)?;
    let set = dump::read_capture(&text, &config.markers())?;
    tracing::info!("Capture holds {} channel(s)", set.len());
    Ok(set)
}

fn cmd_decode(
    config: &Config,
    input: Option<&Path>,
    only: &[String],
    format: Format,
) -> Result<()> {
    let mut set = load_channels(config, input)?;
    if !only.is_empty() {
        let wanted = only
            .iter()
            .map(|key| key.parse::<ChannelId>())
            .collect::<spd_decode::Result<Vec<_>>>()?;
        set = set.select(&wanted)?;
    }

    let results: Vec<_> = set.iter().map(|(id, buf)| (id, decode(buf, id))).collect();
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    let verdict = (set.len() > 1).then(|| compare(&set));

    match format {
        Format::Text => {
            for (id, result) in &results {
                println!("── {id} ──");
                match result {
                    Ok(module) => print!("{module}"),
                    Err(e) => println!("{e}"),
                }
                println!();
            }
            match &verdict {
                Some(Ok(comparison)) => print!("{comparison}"),
                Some(Err(e)) => println!("{e}"),
                None => {}
            }
        }
        Format::Json => {
            let channels: Vec<_> = results
                .iter()
                .map(|(id, result)| match result {
                    Ok(module) => serde_json::json!({ "channel": id, "module": module }),
                    Err(e) => serde_json::json!({ "channel": id, "error": e.to_string() }),
                })
                .collect();
            let comparison = match &verdict {
                Some(Ok(comparison)) => serde_json::to_value(comparison)?,
                Some(Err(e)) => serde_json::json!({ "error": e.to_string() }),
                None => serde_json::Value::Null,
            };
            let report = serde_json::json!({ "channels": channels, "comparison": comparison });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if failed > 0 {
        bail!("{failed} of {} channel(s) failed to decode", set.len());
    }
    Ok(())
}

fn cmd_compare(config: &Config, input: Option<&Path>) -> Result<()> {
    let expected = config.expected_channels()?;
    let set = load_channels(config, input)?.select(&expected)?;

    let verdict = compare(&set)?;
    print!("{verdict}");
    if !verdict.is_identical() {
        bail!(
            "{} byte(s) differ across {} channel(s)",
            verdict.discrepancies().len(),
            set.len()
        );
    }
    Ok(())
}

fn cmd_layout() {
    println!("{:<8} {:<7} {:<22} scaling", "offset", "bits", "field");
    for field in LAYOUT {
        println!(
            "0x{:03x}    {:<7} {:<22} {}",
            field.offset,
            field.bits.to_string(),
            field.name,
            field.scaling
        );
    }
}
