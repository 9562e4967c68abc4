//! ff - Match Engine CLI
//!
//! JSON 픽스처 또는 내장 데모 경기로 엔진을 실행한다.
//! - simulate: 픽스처 파일 → 분 단위 tick 스트림
//! - demo: 내장 데모 경기
//! - batch: 시드 여러 개 병렬 실행 후 평균 통계
//! - lineup: 선발 라인업 출력
//! - fixture: 데모 픽스처를 JSON으로 저장

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::prelude::*;

use ff_core::demo::demo_match;
use ff_core::{
    simulate_batch, BatchSummary, EngineConfig, LineupData, MatchEngine, MatchInput, MatchOptions,
    MatchTick, Side,
};

#[derive(Parser)]
#[command(name = "ff")]
#[command(version, about = "Minute-by-minute football match simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a match from a JSON fixture
    Simulate {
        /// Match input JSON (home/away team sheets)
        #[arg(long)]
        input: PathBuf,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[command(flatten)]
        tuning: Tuning,

        #[command(flatten)]
        output: Output,
    },

    /// Simulate the built-in demo match
    Demo {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[command(flatten)]
        tuning: Tuning,

        #[command(flatten)]
        output: Output,
    },

    /// Run many seeds in parallel and print aggregate statistics
    Batch {
        /// Match input JSON; the demo match when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        #[arg(long, default_value_t = 100)]
        runs: u64,

        #[arg(long, default_value_t = 0)]
        first_seed: u64,

        #[command(flatten)]
        tuning: Tuning,

        /// Print per-seed results as JSON lines
        #[arg(long, default_value = "false")]
        verbose: bool,
    },

    /// Print the resolved starting XIs
    Lineup {
        /// Match input JSON; the demo match when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Write the demo fixture as JSON
    Fixture {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(clap::Args)]
struct Tuning {
    /// Tuning file (.yaml / .yml / .json)
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Named tuning preset (realistic, arcade, cautious)
    #[arg(long)]
    preset: Option<String>,
}

impl Tuning {
    fn load(&self) -> Result<EngineConfig> {
        if let Some(path) = &self.config {
            return EngineConfig::from_path(path)
                .with_context(|| format!("failed to load tuning file {}", path.display()));
        }
        match &self.preset {
            Some(name) => EngineConfig::preset(name)
                .with_context(|| format!("unknown tuning preset: {name}")),
            None => Ok(EngineConfig::default()),
        }
    }
}

#[derive(clap::Args)]
struct Output {
    #[arg(long, value_enum, default_value_t = Speed::Instant)]
    speed: Speed,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Speed {
    Instant,
    Fast,
    Realtime,
    Slow,
}

impl Speed {
    fn delay(self) -> Duration {
        Duration::from_millis(match self {
            Speed::Instant => 0,
            Speed::Fast => 500,
            Speed::Realtime => 2500,
            Speed::Slow => 5000,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { input, seed, tuning, output } => {
            let input = load_input(&input)?;
            stream_match(&input, seed, tuning.load()?, &output)?;
        }

        Commands::Demo { seed, tuning, output } => {
            stream_match(&demo_match(), seed, tuning.load()?, &output)?;
        }

        Commands::Batch { input, runs, first_seed, tuning, verbose } => {
            let input = load_optional_input(input.as_deref())?;
            let config = tuning.load()?;
            let seeds: Vec<u64> = (first_seed..first_seed.saturating_add(runs)).collect();

            let summaries = simulate_batch(&input, &seeds, &config).context("batch simulation failed")?;
            if verbose {
                for summary in &summaries {
                    println!("{}", serde_json::to_string(summary)?);
                }
            }
            print_batch(&input, &BatchSummary::from_summaries(&summaries));
        }

        Commands::Lineup { input } => {
            let input = load_optional_input(input.as_deref())?;
            let engine = MatchEngine::new(&input, 0).context("invalid match input")?;
            print_lineup(&input, &engine.lineup());
        }

        Commands::Fixture { out } => {
            let json = serde_json::to_string_pretty(&demo_match())?;
            std::fs::write(&out, json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "demo fixture written");
        }
    }

    Ok(())
}

fn load_input(path: &Path) -> Result<MatchInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse fixture {}", path.display()))
}

fn load_optional_input(path: Option<&Path>) -> Result<MatchInput> {
    match path {
        Some(path) => load_input(path),
        None => Ok(demo_match()),
    }
}

/// Print ticks as they are produced, pausing `speed` between them.
fn stream_match(input: &MatchInput, seed: u64, config: EngineConfig, output: &Output) -> Result<()> {
    let options = MatchOptions { config, injury_time: None };
    let mut engine = MatchEngine::with_options(input, seed, options).context("invalid match input")?;
    let delay = output.speed.delay();

    info!(seed, injury_time = ?engine.injury_time(), "kick off");

    match output.format {
        Format::Json => println!("{}", serde_json::to_string(&engine.lineup())?),
        Format::Text => print_lineup(input, &engine.lineup()),
    }

    let mut last: Option<MatchTick> = None;
    for tick in engine.by_ref() {
        match output.format {
            Format::Json => println!("{}", serde_json::to_string(&tick)?),
            Format::Text => println!("{}", tick.commentary),
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        last = Some(tick);
    }

    if output.format == Format::Text {
        if let Some(tick) = last {
            print_final(input, &tick);
        }
    }
    Ok(())
}

fn print_lineup(input: &MatchInput, lineup: &LineupData) {
    for side in Side::BOTH {
        println!("{} ({})", input.sheet(side).team.name, input.sheet(side).formation.name);
        for p in lineup.side(side) {
            println!("  {:>2}  {:<4} {}", p.shirt_number, p.position, p.name);
        }
    }
    println!();
}

fn print_final(input: &MatchInput, tick: &MatchTick) {
    let (home, away) = (&tick.stats.home, &tick.stats.away);
    println!();
    println!(
        "{} {} - {} {}",
        input.home.team.name, tick.score.home, tick.score.away, input.away.team.name
    );
    println!("  Possession   {:>5.1}% {:>5.1}%", home.possession, away.possession);
    println!("  Shots        {:>6} {:>6}", home.shots, away.shots);
    println!("  On target    {:>6} {:>6}", home.shots_on_target, away.shots_on_target);
    println!("  Corners      {:>6} {:>6}", home.corners, away.corners);
    println!("  Fouls        {:>6} {:>6}", home.fouls, away.fouls);
    println!("  Yellow cards {:>6} {:>6}", home.yellow_cards, away.yellow_cards);
    println!("  Red cards    {:>6} {:>6}", home.red_cards, away.red_cards);
}

fn print_batch(input: &MatchInput, agg: &BatchSummary) {
    println!("=== {} vs {} ({} matches) ===", input.home.team.name, input.away.team.name, agg.matches);
    println!("Avg goals:           {:.2}", agg.avg_goals);
    println!("Avg shots:           {:.1}", agg.avg_shots);
    println!("Avg shots on target: {:.1}", agg.avg_shots_on_target);
    println!("Avg cards:           {:.2}", agg.avg_cards);
    println!("Avg corners:         {:.1}", agg.avg_corners);
    println!(
        "Home / draw / away:  {:.1}% / {:.1}% / {:.1}%",
        agg.home_win_rate * 100.0,
        agg.draw_rate * 100.0,
        agg.away_win_rate * 100.0
    );
}
