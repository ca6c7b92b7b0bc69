mod config;
mod literal;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coerce_core::Value;
use config::{OutputFormat, load_config};
use literal::parse_literal;
use report::{CompareReport, ConvertReport, TABLE_OPERANDS, TableReport};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(
    name = "coerce",
    version,
    about = "Explore JavaScript value coercion and equality"
)]
struct Cli {
    /// Path to coerce.toml (searched upward from the current directory by default)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report format, overriding the config file
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every conversion of one value literal
    Convert { literal: String },
    /// Compare two value literals with ==, ===, Object.is and friends
    Compare {
        left: String,
        right: Option<String>,
        /// Print the loose equality steps
        #[arg(long)]
        trace: bool,
        /// Compare the single literal with itself (same object identity)
        #[arg(long, conflicts_with = "right")]
        same: bool,
    },
    /// Print the classic == table
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = load_config(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(config.logging.level.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &config_path {
        debug!(path = %path.display(), "loaded config");
    }

    let format = cli.format.unwrap_or(config.output.format);

    match cli.command {
        Commands::Convert { literal } => {
            let value = parse_operand(&literal)?;
            emit(format, &ConvertReport::new(&value), ConvertReport::render_text)?;
        }
        Commands::Compare {
            left,
            right,
            trace,
            same,
        } => {
            let left_value = parse_operand(&left)?;
            let right_value = match (right, same) {
                (_, true) => left_value.clone(),
                (Some(right), false) => parse_operand(&right)?,
                (None, false) => anyhow::bail!("compare needs two literals, or --same"),
            };
            let report = CompareReport::new(&left_value, &right_value, trace || config.output.trace);
            emit(format, &report, CompareReport::render_text)?;
        }
        Commands::Table => {
            let values = TABLE_OPERANDS
                .iter()
                .map(|src| parse_operand(src))
                .collect::<Result<Vec<_>>>()?;
            let table = TableReport::new(TABLE_OPERANDS, &values);
            emit(format, &table, TableReport::render_text)?;
        }
    }

    Ok(())
}

fn parse_operand(src: &str) -> Result<Value> {
    let value = parse_literal(src).with_context(|| format!("invalid literal `{}`", src))?;
    debug!(input = src, parsed = ?value, "parsed operand");
    Ok(value)
}

fn emit<R: Serialize>(format: OutputFormat, report: &R, render: fn(&R) -> String) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
