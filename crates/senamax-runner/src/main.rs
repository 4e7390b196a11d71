//! Senamax CLI runner.
//!
//! Drives the selection engine against a JSONL draw history. Engine state
//! (weight configuration and outstanding predictions) lives in a JSON state
//! file next to the history so calibration and the reinforcement audit
//! survive across invocations.

mod history;
mod state;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use senamax_engine::{
    anchor_ranking, calibrate, compute_selection, confidence, fuse, rebuild_affinity,
    record_prediction, reinforce, simulate, EngineConfig,
};
use senamax_models::DRAW_SIZE;
use senamax_store::MemoryStore;
use state::EngineState;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "senamax", about = "Adaptive weighted-scoring selection engine")]
struct Cli {
    /// JSONL file with the historical draws.
    #[arg(long, default_value = "draws.jsonl")]
    history: PathBuf,

    /// JSON file holding weight config and prediction state.
    #[arg(long, default_value = "senamax_state.json")]
    state: PathBuf,

    /// Optional TOML engine configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the full selection report.
    Select,

    /// Run the grid-search calibration and persist the winning weights.
    Calibrate {
        /// Backtest window in draws; defaults to the engine config value.
        #[arg(long)]
        window: Option<usize>,
    },

    /// Replay a fixed selection against recent history.
    Simulate {
        /// Comma-separated 6-number selection, e.g. "4,18,29,33,47,60".
        #[arg(long)]
        numbers: String,
        #[arg(long, default_value_t = 50)]
        window: usize,
    },

    /// Audit the latest draw against its stored prediction.
    Reinforce,

    /// Rank a draw's numbers by popular appeal.
    Anchors {
        #[arg(long)]
        draw_id: u32,
    },

    /// Fuse an external model selection with the engine's selection.
    Fuse {
        /// Comma-separated 6-number model selection.
        #[arg(long)]
        model: String,
    },

    /// Full maintenance cycle: audit, rebuild affinity, recalibrate,
    /// select, and record the next prediction.
    Sync,
}

fn parse_selection(raw: &str) -> Result<Vec<u8>> {
    let numbers: Vec<u8> = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .with_context(|| format!("invalid number '{}'", part.trim()))
        })
        .collect::<Result<_>>()?;
    if numbers.len() != DRAW_SIZE {
        bail!("expected {} numbers, got {}", DRAW_SIZE, numbers.len());
    }
    Ok(numbers)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let draws = history::load_draws(&cli.history)?;
    let mut store = MemoryStore::with_draws(draws);
    let engine_state = EngineState::load(&cli.state)?;
    engine_state.apply(&mut store)?;

    match cli.command {
        Command::Select => {
            rebuild_affinity(&mut store, &cfg)?;
            let report = compute_selection(&store, &cfg, &mut rng)?;
            print_json(&report)?;
        }

        Command::Calibrate { window } => {
            rebuild_affinity(&mut store, &cfg)?;
            let window = window.unwrap_or(cfg.backtest_window);
            let config = calibrate(&mut store, &cfg, window)?;
            EngineState::capture(&store)?.save(&cli.state)?;
            print_json(&config)?;
        }

        Command::Simulate { numbers, window } => {
            let selection = parse_selection(&numbers)?;
            let report = simulate(&store, &selection, window)?;
            print_json(&report)?;
        }

        Command::Reinforce => {
            rebuild_affinity(&mut store, &cfg)?;
            match reinforce(&mut store, &cfg)? {
                Some(outcome) => {
                    EngineState::capture(&store)?.save(&cli.state)?;
                    info!(
                        draw_id = outcome.target_draw_id,
                        hits = outcome.hits,
                        recalibrated = outcome.recalibrated,
                        "audit complete"
                    );
                    print_json(&outcome)?;
                }
                None => info!("nothing to audit"),
            }
        }

        Command::Anchors { draw_id } => {
            let ranking = anchor_ranking(&store, draw_id)?;
            if ranking.is_empty() {
                bail!("draw {} not found in history", draw_id);
            }
            print_json(&ranking)?;
        }

        Command::Fuse { model } => {
            let model = parse_selection(&model)?;
            rebuild_affinity(&mut store, &cfg)?;
            let report = compute_selection(&store, &cfg, &mut rng)?;
            let fused = fuse(&model, &report.meta.filtered);
            let grade = confidence(&model, &report.meta.filtered);
            print_json(&serde_json::json!({
                "statistical": report.meta.filtered,
                "model": model,
                "fused": fused,
                "confidence": grade,
            }))?;
        }

        Command::Sync => {
            // 1. Learn from the draw that just arrived.
            let audit = reinforce(&mut store, &cfg)?;
            // 2. Refresh the support statistics.
            rebuild_affinity(&mut store, &cfg)?;
            // 3. Recalibrate over the routine window.
            let config = calibrate(&mut store, &cfg, cfg.backtest_window)?;
            // 4. Project the next draw and record it for the next audit.
            let report = compute_selection(&store, &cfg, &mut rng)?;
            let target = record_prediction(&mut store, &report.meta.filtered, config)?;
            EngineState::capture(&store)?.save(&cli.state)?;

            info!(target, "sync cycle complete");
            print_json(&serde_json::json!({
                "audit": audit,
                "config": config,
                "next_target": target,
                "prediction": report.meta.filtered.clone(),
                "report": report,
            }))?;
        }
    }

    Ok(())
}
