//! Flappy Bot entry point
//!
//! Headless CLI: run a batch of bot-piloted sessions and export the results
//! as CSV, or replay a single seed and dump the outcome.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use flappy_bot::records::{BatchSummary, RunRecord, write_csv};
use flappy_bot::session::{SessionOptions, run_session};
use flappy_bot::sim::{BotPolicy, GameConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BotKind {
    /// One-tick lookahead
    Single,
    /// Two-tick lookahead
    Two,
}

impl From<BotKind> for BotPolicy {
    fn from(kind: BotKind) -> Self {
        match kind {
            BotKind::Single => BotPolicy::SingleStep,
            BotKind::Two => BotPolicy::TwoStep,
        }
    }
}

#[derive(Parser)]
#[command(name = "flappy-bot", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a batch of sessions and write one CSV row per run
    Batch {
        /// Number of sessions to run
        #[arg(long, default_value_t = 10)]
        games: u32,
        /// Bot variant piloting every session
        #[arg(long, value_enum, default_value = "two")]
        bot: BotKind,
        /// Seed of the first session; later sessions increment from it.
        /// Defaults to the current time, printed so the batch can be rerun.
        #[arg(long)]
        base_seed: Option<u64>,
        /// Output CSV path
        #[arg(long, default_value = "runs.csv")]
        output: PathBuf,
        /// Per-session tick cap
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,
    },
    /// Replay one seed and print the outcome
    Replay {
        #[arg(long)]
        seed: u64,
        #[arg(long, value_enum, default_value = "two")]
        bot: BotKind,
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Batch {
            games,
            bot,
            base_seed,
            output,
            max_ticks,
        } => batch(games, bot.into(), base_seed, &output, max_ticks),
        Command::Replay {
            seed,
            bot,
            max_ticks,
        } => replay(seed, bot.into(), max_ticks),
    }
}

fn session_options(max_ticks: u64) -> SessionOptions {
    SessionOptions {
        max_ticks: Some(max_ticks),
        ..SessionOptions::default()
    }
}

fn batch(
    games: u32,
    bot: BotPolicy,
    base_seed: Option<u64>,
    output: &Path,
    max_ticks: u64,
) -> anyhow::Result<()> {
    let base_seed = match base_seed {
        Some(seed) => seed,
        None => time_seed()?,
    };
    println!("base seed: {base_seed}");

    let mut records = Vec::with_capacity(games as usize);
    for i in 0..games {
        let seed = base_seed.wrapping_add(u64::from(i));
        let outcome = run_session(
            GameConfig::default(),
            seed,
            session_options(max_ticks),
            |state| bot.decide(state),
            || false,
        )?;
        log::info!(
            "game {}/{games}: seed={seed} score={} ticks={}",
            i + 1,
            outcome.score,
            outcome.ticks
        );
        records.push(RunRecord::from_outcome(i + 1, &outcome));
    }

    write_csv(output, &records)
        .with_context(|| format!("writing {}", output.display()))?;

    let summary = BatchSummary::summarize(&records);
    println!("games:      {}", summary.games);
    println!("high score: {}", summary.high_score);
    println!("mean score: {:.2}", summary.mean_score);
    println!("records:    {}", output.display());
    Ok(())
}

fn replay(seed: u64, bot: BotPolicy, max_ticks: u64) -> anyhow::Result<()> {
    let outcome = run_session(
        GameConfig::default(),
        seed,
        session_options(max_ticks),
        |state| bot.decide(state),
        || false,
    )?;
    println!("seed:     {seed}");
    println!("status:   {}", outcome.status.as_str());
    println!("score:    {}", outcome.score);
    println!("ticks:    {}", outcome.ticks);
    println!("duration: {:.3}s", outcome.duration_seconds);
    println!("final bird y: {:.1}", outcome.state.bird.body.y);
    Ok(())
}

fn time_seed() -> anyhow::Result<u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?;
    Ok(now.as_millis() as u64)
}
