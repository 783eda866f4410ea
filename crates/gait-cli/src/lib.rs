//! Gait CLI
//!
//! Command-line front end for the gait feature extraction pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Extract features from a directory of frames recorded at 30 fps
//! gait analyze ./frames --fps 30 --pretty
//!
//! # Same, with tuned thresholds
//! gait analyze ./frames --fps 25 --config gait.toml
//!
//! # Print the default configuration as a starting point
//! gait defaults
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod analyze;

/// Gait feature extraction
#[derive(Parser, Debug)]
#[command(name = "gait")]
#[command(author, version, about = "Gait cycle segmentation and feature extraction")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Segment a frame sequence and print its feature vector as JSON
    Analyze(AnalyzeArgs),

    /// Print the default configuration as JSON
    Defaults,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory of frame images (png, jpg, bmp), processed in filename order
    pub frames_dir: PathBuf,

    /// Clip frame rate; `aggregation.frame_rate` in the config wins if set
    #[arg(long)]
    pub fps: f64,

    /// Configuration file (toml, json or yaml); `GAIT__*` variables override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "gait", "analyze", "clip/", "--fps", "29.97", "--config", "gait.toml", "--pretty",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.frames_dir, PathBuf::from("clip/"));
                assert_eq!(args.fps, 29.97);
                assert_eq!(args.config, Some(PathBuf::from("gait.toml")));
                assert!(args.pretty);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_fps_is_required() {
        assert!(Cli::try_parse_from(["gait", "analyze", "clip/"]).is_err());
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["gait", "defaults"]).unwrap();
        assert!(matches!(cli.command, Commands::Defaults));
    }
}
