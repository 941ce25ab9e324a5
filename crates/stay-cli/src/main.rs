//! `stay` CLI — evaluate booking requests and resolve blocked-date lists
//! from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Evaluate a request (stdin → stdout), trusted policy
//! echo '{"selectedDate":"2025-12-15",...}' | stay check
//!
//! # Evaluate from file, pinned reference date, restricted policy
//! stay check -i request.json --policy restricted --today 2025-12-01
//!
//! # Resolve a host's block declarations into display lists
//! stay blocked -i calendar.json
//!
//! # Resolve for one space, or require every listed space blocked
//! stay blocked -i calendar.json --space 2
//! stay blocked -i calendar.json --require-all
//! ```
//!
//! `stay check` exits 0 when the request is accepted and 1 otherwise, so the
//! verdict can drive shell pipelines without parsing JSON.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use stay_engine::resolver::query_space_keys;
use stay_engine::{dates, evaluate_json, EnginePolicy, ResolverRequest, SpaceFilter};
use std::io::{self, Read, Write};
use std::process;

#[derive(Parser)]
#[command(name = "stay", version, about = "Booking-eligibility engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a booking request and print the verdict
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Policy variant to evaluate under ("trusted" or "restricted")
        #[arg(long, default_value = "trusted")]
        policy: String,
        /// Reference date, YYYY-MM-DD (defaults to the current UTC date)
        #[arg(long)]
        today: Option<String>,
    },
    /// Resolve block declarations into the calendar display lists
    Blocked {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Resolve for a single space key
        #[arg(long)]
        space: Option<String>,
        /// Select only dates blocked for every listed space, not just one
        #[arg(long)]
        require_all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            input,
            output,
            policy,
            today,
        } => {
            let policy = parse_policy(&policy)?;
            let today = parse_today(today.as_deref())?;
            let json = read_input(input.as_deref())?;

            let verdict = evaluate_json(&json, &policy, today);
            let pretty = serde_json::to_string_pretty(&verdict)?;
            write_output(output.as_deref(), &pretty)?;

            if !verdict.status {
                // exit() skips the runtime's stdout flush
                io::stdout().flush().ok();
                process::exit(1);
            }
        }
        Commands::Blocked {
            input,
            output,
            space,
            require_all,
        } => {
            let json = read_input(input.as_deref())?;
            let request: ResolverRequest =
                serde_json::from_str(&json).context("Failed to parse block declarations")?;

            let filter = match space {
                Some(key) => SpaceFilter::Unit(key),
                None if require_all => SpaceFilter::AllOf(query_space_keys(&request.spaces)),
                None => request.filter(),
            };

            let lists = stay_engine::resolve_blocked_dates(&request.blocked, &filter);
            let pretty = serde_json::to_string_pretty(&lists)?;
            write_output(output.as_deref(), &pretty)?;
        }
    }

    Ok(())
}

/// Map the --policy argument onto an engine preset.
fn parse_policy(name: &str) -> Result<EnginePolicy> {
    match name {
        "trusted" => Ok(EnginePolicy::trusted()),
        "restricted" => Ok(EnginePolicy::restricted()),
        other => {
            anyhow::bail!(
                "Unknown policy: '{}'. Available policies: trusted, restricted",
                other
            );
        }
    }
}

/// Resolve the --today argument, defaulting to the current UTC date.
fn parse_today(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(text) => dates::parse_date(text)
            .with_context(|| format!("Invalid --today date: '{}'. Expected YYYY-MM-DD", text)),
        None => Ok(Utc::now().date_naive()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
