use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use posecheck::core::config::ScoringConfig;
use posecheck::core::score_engine;
use posecheck::core::session::ScoringSession;
use posecheck::models::pose::{PoseError, PoseLandmarks, PoseResult, RawLandmark};

#[derive(Parser)]
#[command(
    name = "posecheck",
    about = "Shoulder facing and levelness scoring from body-pose landmark dumps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a single landmark frame (JSON array of raw landmarks)
    Still {
        /// Path to the landmark dump
        file: PathBuf,
    },
    /// Score a capture-order sequence of frames (JSON array; null entries
    /// are frames with no detection)
    Stream {
        /// Path to the landmark dump
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> PoseResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Still { file } => run_still(&file),
        Command::Stream { file } => run_stream(&file),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PoseResult<T> {
    let contents = std::fs::read_to_string(path).map_err(|e| PoseError::Io(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| PoseError::InvalidPayload(e.to_string()))
}

fn run_still(file: &Path) -> PoseResult<()> {
    let raw: Vec<RawLandmark> = read_json(file)?;
    let landmarks = PoseLandmarks::from_raw(&raw);

    let scores = ScoringSession::score_still(&landmarks);
    println!("horizontal_score:    {:.3}", scores.horizontal_score);
    println!("shoulder_tilt_score: {:.3}", scores.shoulder_tilt_score);
    println!(
        "shoulder_squareness: {:.3}",
        score_engine::shoulder_squareness(&landmarks)
    );
    Ok(())
}

fn run_stream(file: &Path) -> PoseResult<()> {
    let frames: Vec<Option<Vec<RawLandmark>>> = read_json(file)?;
    let config = ScoringConfig::load()?;
    let mut session = ScoringSession::new(&config);

    for (i, raw) in frames.iter().enumerate() {
        let landmarks = raw.as_deref().map(PoseLandmarks::from_raw);
        match session.process_frame(i as i64, landmarks.as_ref()) {
            Some(frame) => println!(
                "frame {:4}  horizontal {:.3} (mean {:.3})  tilt {:.3} (mean {:.3})",
                frame.timestamp,
                frame.scores.horizontal_score,
                frame.horizontal_mean,
                frame.scores.shoulder_tilt_score,
                frame.shoulder_tilt_mean,
            ),
            None => println!("frame {i:4}  no detection"),
        }
    }

    let stats = session.statistics();
    println!();
    println!("session:          {}", stats.session_id);
    println!("frames seen:      {}", stats.frames_seen);
    println!("frames with pose: {}", stats.frames_with_pose);
    if let Some(mean) = stats.horizontal_mean {
        println!("horizontal mean:  {mean:.3}");
    }
    if let Some(mean) = stats.shoulder_tilt_mean {
        println!("tilt mean:        {mean:.3}");
    }
    Ok(())
}
