//! ldrsim CLI: evaluate, sweep and chart an LDR + pull-down divider.

mod config;
mod ohms;
mod report;
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ldrsim_engine::model::prelude::*;
use ldrsim_engine::{render_ascii, Bench, LogAxis, Snapshot};
use log::{debug, info};

use crate::config::CONFIG_ENV;
use crate::ohms::parse_ohms;
use crate::report::{sweep_output, EvalReport, OutputFormat};

/// LDR + pull-down voltage divider simulator
#[derive(Parser, Debug)]
#[command(name = "ldrsim", version, about, long_about = None)]
struct Args {
    /// TOML config file with start values and sweep range
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Supply voltage in volts (overrides the config file)
    #[arg(long, global = true)]
    supply: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pin voltage, logic state and threshold resistances for one circuit
    Eval {
        /// Pull-down resistance (e.g. 30k, 47000, 4k7)
        #[arg(short = 'd', long, value_parser = parse_ohms)]
        pull_down: Option<f64>,

        /// LDR resistance (e.g. 20k, 1M)
        #[arg(short, long, value_parser = parse_ohms)]
        ldr: Option<f64>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Vpin across a log-spaced LDR sweep
    Sweep {
        /// Pull-down resistance
        #[arg(short = 'd', long, value_parser = parse_ohms)]
        pull_down: Option<f64>,

        /// Lowest LDR resistance of the sweep
        #[arg(long, value_parser = parse_ohms)]
        min: Option<f64>,

        /// Highest LDR resistance of the sweep
        #[arg(long, value_parser = parse_ohms)]
        max: Option<f64>,

        /// Number of samples (>= 2)
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Plain-text chart of the curve with band edges and the current LDR value
    Chart {
        #[arg(short = 'd', long, value_parser = parse_ohms)]
        pull_down: Option<f64>,

        #[arg(short, long, value_parser = parse_ohms)]
        ldr: Option<f64>,

        /// Plot width in columns
        #[arg(long, default_value_t = 72)]
        width: usize,

        /// Plot height in rows
        #[arg(long, default_value_t = 20)]
        height: usize,
    },

    /// Interactive dashboard with sliders for both resistances
    Tui,
}

fn init_logging(args: &Args) {
    // The dashboard owns the terminal; log lines would tear the frame.
    if matches!(args.command, Command::Tui) {
        return;
    }
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_env("RUST_LOG")
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let mut cfg = config::load(args.config.as_deref())?;
    if let Some(v) = args.supply {
        cfg.supply_voltage = v;
    }
    debug!("effective config: {cfg:?}");

    match args.command {
        Command::Eval { pull_down, ldr, format } => {
            let inputs = CircuitInputs::new(
                pull_down.unwrap_or(cfg.pull_down_ohms),
                ldr.unwrap_or(cfg.ldr_ohms),
            );
            let report = EvalReport::compute(cfg.supply_voltage, inputs).context("invalid circuit")?;
            print!("{}", report.render(format)?);
        }

        Command::Sweep { pull_down, min, max, samples, format } => {
            let range = SweepRange::new(
                min.unwrap_or(cfg.sweep.min_ohms),
                max.unwrap_or(cfg.sweep.max_ohms),
                samples.unwrap_or(cfg.sweep.samples),
            );
            let rd = pull_down.unwrap_or(cfg.pull_down_ohms);
            info!(
                "sweeping {} .. {} in {} samples at Rd = {}",
                Ohms(range.min_ohms),
                Ohms(range.max_ohms),
                range.samples,
                Ohms(rd)
            );
            let samples: Vec<CurveSample> = sweep_range(cfg.supply_voltage, rd, &range)
                .context("invalid sweep")?
                .collect();
            print!("{}", sweep_output(&samples, format)?);
        }

        Command::Chart { pull_down, ldr, width, height } => {
            let inputs = CircuitInputs::new(
                pull_down.unwrap_or(cfg.pull_down_ohms),
                ldr.unwrap_or(cfg.ldr_ohms),
            );
            let snapshot = Snapshot::compute(cfg.supply_voltage, inputs, &cfg.sweep).context("invalid circuit")?;
            println!(
                "Rd = {}  R_LDR = {}  Vpin = {}  {}\n",
                Ohms(inputs.pull_down_ohms),
                Ohms(inputs.ldr_ohms),
                Volts(snapshot.result.pin_voltage),
                snapshot.result.digital_state,
            );
            print!("{}", render_ascii(&snapshot, &LogAxis::for_sweep(&cfg.sweep), width, height));
        }

        Command::Tui => {
            let bench = Bench::new(cfg).context("invalid start configuration")?;
            tui::run(bench)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_suffixed_resistances() {
        let args = Args::try_parse_from(["ldrsim", "eval", "-d", "4k7", "--ldr", "1M"]).unwrap();
        match args.command {
            Command::Eval { pull_down, ldr, format } => {
                assert_eq!(pull_down, Some(4_700.0));
                assert_eq!(ldr, Some(1_000_000.0));
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from(["ldrsim", "sweep", "-n", "10", "--supply", "3.3", "-f", "csv"]).unwrap();
        assert_eq!(args.supply, Some(3.3));
        assert!(matches!(args.command, Command::Sweep { samples: Some(10), format: OutputFormat::Csv, .. }));
    }

    #[test]
    fn rejects_bad_resistance() {
        assert!(Args::try_parse_from(["ldrsim", "eval", "--ldr", "banana"]).is_err());
    }
}
