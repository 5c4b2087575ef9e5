//! max-bitrate — maximum achievable bitrate over a free-space radio link
//!
//! ```text
//! max-bitrate [OPTIONS] tx_w tx_gain_db freq_hz dist_km rx_gain_db n0_j bw_hz
//! ```
//!
//! Prints the floored Shannon capacity in bits per second. With the wrong
//! number of values it prints a usage line and exits successfully.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use linkrate_core::observe::{init_logging, LogConfig, LogFormat, LogLevel};
use linkrate_core::{GainMode, LinkBudgetCalculator, LinkParams};

const USAGE: &str = "Usage: max-bitrate tx_w tx_gain_db freq_hz dist_km rx_gain_db n0_j bw_hz";

/// Maximum achievable bitrate over a free-space radio link
#[derive(Parser, Debug)]
#[command(name = "max-bitrate")]
#[command(version)]
#[command(about = "Friis link budget followed by the Shannon-Hartley limit", long_about = None)]
struct Args {
    /// tx_w tx_gain_db freq_hz dist_km rx_gain_db n0_j bw_hz
    ///
    /// Unknown dash-leading tokens are kept as values so the float parser
    /// and the count check see every token.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    values: Vec<String>,

    /// Print every intermediate quantity as one line of JSON
    #[arg(long)]
    json: bool,

    /// Convert the antenna gains from dB before multiplying
    #[arg(long)]
    db_gains: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,

    /// Log format (pretty, compact, json)
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,
}

impl Args {
    fn gain_mode(&self) -> GainMode {
        if self.db_gains {
            GainMode::Decibel
        } else {
            GainMode::RawFactor
        }
    }
}

fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let params = match LinkParams::parse_args(args.values.as_slice()) {
        Ok(params) => params,
        Err(e) if e.is_usage() => {
            tracing::debug!(error = %e, "printing usage");
            writeln!(out, "{USAGE}")?;
            return Ok(());
        }
        Err(e) => return Err(e).context("invalid argument"),
    };

    let calculator = LinkBudgetCalculator::new().with_gain_mode(args.gain_mode());
    tracing::debug!(?params, gain_mode = ?calculator.gain_mode(), "evaluating link");

    if args.json {
        let report = calculator
            .report(&params)
            .context("link evaluation failed")?;
        let line = serde_json::to_string(&report).context("failed to encode report")?;
        writeln!(out, "{line}")?;
    } else {
        let rate = calculator
            .compute(&params)
            .context("link evaluation failed")?;
        writeln!(out, "{rate}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&LogConfig {
        level: args.log_level,
        format: args.log_format,
        ..Default::default()
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)?;
    out.flush()?;
    Ok(())
}
