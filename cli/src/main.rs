//! cashsplit: split an amount into natural-looking cash parts.

mod config;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use cashsplit_currency::{is_reasonable_amount, parse_amount, validate_input_text, CurrencyError};
use cashsplit_engine::Splitter;
use cashsplit_utils::{init_logging, LogFormat, SplitStats};
use clap::Parser;

use crate::config::{CliConfig, OutputFormat};

#[derive(Parser)]
#[command(
    name = "cashsplit",
    version,
    about = "Split an amount into a few natural-looking cash parts"
)]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "CASHSPLIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "CASHSPLIT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, global = true, env = "CASHSPLIT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Split an amount, e.g. `cashsplit split Rp 1.500.000 --parts 4`.
    Split {
        /// Amount text; several words are joined with spaces.
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        amount: Vec<String>,

        /// Number of parts (2 to 6). Picks 5 or 6 when omitted.
        #[arg(long, short, env = "CASHSPLIT_PARTS")]
        parts: Option<usize>,

        /// Seed for a reproducible split.
        #[arg(long, env = "CASHSPLIT_SEED")]
        seed: Option<u64>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Split the same amount N times and print statistics.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        repeat: Option<u32>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CliConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    init_logging(config.log_format, &config.log_level).context("initialising logging")?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Split {
            amount,
            parts,
            seed,
            json,
            repeat,
        } => {
            if parts.is_some() {
                config.parts = parts;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if json {
                config.output = OutputFormat::Json;
            }
            run_split(&config, &amount.join(" "), repeat)
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Validate and parse user text, then apply the sanity bound.
///
/// Non-positive amounts pass through so the splitter reports them.
fn read_amount(text: &str, max_amount: i64) -> Result<i64, CurrencyError> {
    validate_input_text(text)?;
    let amount = parse_amount(text)?;
    if amount > 0 && !is_reasonable_amount(amount, max_amount) {
        return Err(CurrencyError::OutOfRange {
            amount,
            max: max_amount,
        });
    }
    Ok(amount)
}

fn run_split(config: &CliConfig, text: &str, repeat: Option<u32>) -> anyhow::Result<()> {
    config.validate()?;
    let amount = read_amount(text, config.max_amount)?;

    let splitter = match config.seed {
        Some(seed) => Splitter::seeded(seed),
        None => Splitter::new(),
    };
    let mut splitter = splitter.with_params(config.params.clone())?;

    match repeat {
        Some(runs) => {
            let mut stats = SplitStats::new();
            for _ in 0..runs {
                stats.record(&splitter.split(amount, config.parts)?);
            }
            let summary = stats.summary();
            match config.output {
                OutputFormat::Table => print!("{}", render::render_stats_table(&summary)),
                OutputFormat::Json => println!("{}", render::render_stats_json(&summary)?),
            }
        }
        None => {
            let result = splitter.split(amount, config.parts)?;
            match config.output {
                OutputFormat::Table => {
                    print!("{}", render::render_table(&result, &config.currency_prefix))
                }
                OutputFormat::Json => println!("{}", render::render_json(&result)?),
            }
        }
    }
    Ok(())
}
