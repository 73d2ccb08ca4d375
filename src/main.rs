//! Disguise - headless runner
//!
//! Loads an enemy roster, plays a scripted player against it and reports
//! when (and for how long) the player was disguised.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use disguise::core::error::{DisguiseError, Result};
use disguise::core::MatchConfig;
use disguise::game::{DisguiseSession, EnemyRoster, MimicScript};
use disguise::matching::MatchReport;

/// Headless Disguise runner - scripted player vs enemy roster
#[derive(Parser, Debug)]
#[command(name = "disguise")]
#[command(about = "Run a scripted player against an enemy roster and report matches")]
struct Args {
    /// Enemy roster file
    #[arg(long, default_value = "data/roster.toml")]
    roster: PathBuf,

    /// Matching config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enemy to imitate; omit to play a decoy pattern no enemy uses
    #[arg(long)]
    mimic: Option<String>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 1200)]
    frames: u64,

    /// Frames the player holds each pose (defaults to the config's frames_per_pose)
    #[arg(long)]
    hold: Option<usize>,

    /// Maximum frames each pose change lands early or late
    #[arg(long, default_value_t = 0)]
    jitter: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Enable per-frame debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    mimic: Option<String>,
    frames: u64,
    seed: u64,
    first_confirmed_frame: Option<u64>,
    confirmed_frames: u64,
    previewing_frames: u64,
    disguised_as: Option<String>,
    final_report: MatchReport,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let directive = if args.verbose { "disguise=debug" } else { "disguise=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)))
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    let roster = EnemyRoster::load(&args.roster, &config)?;
    if roster.is_empty() {
        tracing::warn!("Roster {} has no enemies - nothing can match", args.roster.display());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let hold = args.hold.unwrap_or(config.frames_per_pose);
    let mut script = match &args.mimic {
        Some(name) => {
            let enemy = roster
                .by_name(name)
                .ok_or_else(|| DisguiseError::UnknownEnemy(name.clone()))?;
            MimicScript::imitate(enemy, hold, args.jitter, seed)
        }
        None => MimicScript::decoy(&roster, hold, seed),
    };

    tracing::info!(
        "Running {} frames against {} enemies (seed {})",
        args.frames,
        roster.len(),
        seed
    );

    let mut session = DisguiseSession::new(config, roster)?;
    let mut first_confirmed_frame = None;
    let mut confirmed_frames = 0;
    let mut previewing_frames = 0;
    let mut final_report = MatchReport::unmatched(0, false);

    for _ in 0..args.frames {
        let report = session.tick_pose(script.next_pose());
        if report.confirmed {
            confirmed_frames += 1;
            first_confirmed_frame.get_or_insert(report.frame);
        } else if report.candidate.is_some() {
            previewing_frames += 1;
        }
        final_report = report;
    }

    let disguised_as = final_report
        .candidate
        .filter(|_| final_report.confirmed)
        .and_then(|id| session.roster().get(id))
        .map(|e| e.name.clone());

    let summary = RunSummary {
        mimic: args.mimic.clone(),
        frames: args.frames,
        seed,
        first_confirmed_frame,
        confirmed_frames,
        previewing_frames,
        disguised_as,
        final_report,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_text(&summary);
    }

    Ok(())
}

fn print_text(summary: &RunSummary) {
    println!("=== DISGUISE RUN ===");
    println!("Mimic:        {}", summary.mimic.as_deref().unwrap_or("(decoy)"));
    println!("Frames:       {} (seed {})", summary.frames, summary.seed);
    match summary.first_confirmed_frame {
        Some(frame) => println!("Confirmed at: frame {}", frame),
        None => println!("Confirmed at: never"),
    }
    println!("Confirmed:    {} frames", summary.confirmed_frames);
    println!("Previewing:   {} frames", summary.previewing_frames);
    println!(
        "Final state:  {} (quality {:.2}, cycle {}, position {})",
        summary.disguised_as.as_deref().unwrap_or("undisguised"),
        summary.final_report.quality,
        summary.final_report.cycles,
        summary.final_report.position
    );
}
