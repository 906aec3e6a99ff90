//! Table simulator CLI - runs all-CPU Bhabhi games in memory.
//!
//! Useful for comparing CPU policies: who ends up as the loser, how many
//! tricks a game takes, how often each seat picks up.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::Instant;

use bhabhi::domain::TochooTiming;
use bhabhi::{SetupConfig, TableConfig};
use clap::Parser;
use metrics::{build_game_metrics, Summary};
use output::OutputWriter;
use simulator::Simulator;
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "table-simulator")]
#[command(about = "Fast in-memory Bhabhi simulator for CPU policies")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Seat layout, one letter per seat: C heuristic CPU, R random CPU
    #[arg(long, default_value = "CCCC")]
    seats: String,

    /// Seed of the first game; game n uses seed + n - 1
    #[arg(long)]
    seed: Option<u64>,

    /// When an off-suit play ends the trick
    #[arg(long, default_value = "immediate")]
    tochoo_timing: TochooTiming,

    /// Steps (card plays plus trick changes) before a game is abandoned
    #[arg(long, default_value = "100000")]
    step_cap: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the run summary
    #[arg(long)]
    show_output: bool,

    /// Write per-game metrics into this directory
    #[arg(long)]
    output_dir: Option<String>,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let setup: SetupConfig = args.seats.parse()?;
    let mut config = TableConfig::default();
    config.rules.tochoo_timing = args.tochoo_timing;
    let simulator = Simulator::new(config, setup, args.step_cap)?;

    let layout = simulator.setup().to_string();
    let policies: Vec<String> = simulator
        .setup()
        .seats
        .iter()
        .map(|s| s.policy_name().to_string())
        .collect();
    info!(games = args.games, %layout, ?policies, timing = %args.tochoo_timing, "starting simulation");

    let mut writer = args
        .output_dir
        .as_deref()
        .map(|dir| OutputWriter::new(dir, &args.output_format))
        .transpose()?;
    if let Some(writer) = writer.as_ref() {
        info!("Writing results to: {}", writer.path().display());
    }

    let start = Instant::now();
    let mut summary = Summary::new(policies.len());
    let mut errors = 0u32;
    let base_seed = args.seed.unwrap_or_else(rand::random::<u64>);

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let seed = base_seed.wrapping_add(u64::from(game_num - 1));

        match simulator.simulate_game(seed) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                if let Some(writer) = writer.as_mut() {
                    let metrics = build_game_metrics(game_num, &layout, &policies, &result, duration_ms);
                    if let Err(e) = writer.write_game(&metrics) {
                        warn!(game = game_num, error = %e, "failed to write metrics");
                    }
                }
                if result.loser().is_none() {
                    warn!(game = game_num, seed, steps = result.steps, "game hit the step cap");
                }
                info!(game = game_num, seed, loser = ?result.loser(), tricks = result.tricks_played, "game completed");
                summary.record(&result);
            }
            Err(e) => {
                errors += 1;
                warn!(game = game_num, seed, error = %e, "game failed");
            }
        }
    }

    let elapsed = start.elapsed();

    if let Some(writer) = writer {
        let path = writer.finish()?;
        info!("Results written to: {}", path.display());
    }

    if args.show_output {
        print_summary(&summary, &policies, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(
    summary: &Summary,
    policies: &[String],
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", summary.games, total);
    println!("Finished: {}, capped: {}", summary.finished(), summary.capped);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if summary.games == 0 {
        return;
    }
    println!("Average time per game: {:?}", elapsed / summary.games as u32);
    println!("Average tricks per game: {:.1}", summary.mean_tricks());

    println!("\n=== Results by Seat ===");
    for (seat, policy) in policies.iter().enumerate() {
        println!(
            "Seat {} ({}): lost={} ({:.1}%), avg rank={:.2}, avg pickups={:.1}",
            seat,
            policy,
            summary.losses[seat],
            summary.loss_rate(seat) * 100.0,
            summary.mean_rank(seat),
            summary.mean_pickups(seat),
        );
    }
}
