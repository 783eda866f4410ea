//! `analyze` and `defaults` command implementations.

use anyhow::Context;

use gait_analysis::GaitAnalyzer;
use gait_core::GaitConfig;
use gait_vision::ImageSequenceSource;

use crate::AnalyzeArgs;

/// Config file plus `GAIT__*` overrides, or environment and defaults alone
pub fn load_config(args: &AnalyzeArgs) -> anyhow::Result<GaitConfig> {
    let config = match &args.config {
        Some(path) => GaitConfig::from_file(&path.to_string_lossy())
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GaitConfig::from_env().context("invalid GAIT__* environment configuration")?,
    };
    Ok(config)
}

/// Run the pipeline over `args.frames_dir`, returning the feature vector JSON
pub fn execute(args: &AnalyzeArgs) -> anyhow::Result<String> {
    let config = load_config(args)?;

    let mut source = ImageSequenceSource::open(&args.frames_dir, args.fps)
        .with_context(|| format!("cannot read frames from {}", args.frames_dir.display()))?;
    tracing::info!(
        dir = %args.frames_dir.display(),
        frames = source.remaining(),
        "analyzing frame sequence"
    );

    let analyzer = GaitAnalyzer::new(config)?;
    let report = match analyzer.run(&mut source) {
        Ok(report) => report,
        Err(e) if e.is_empty_source() => {
            anyhow::bail!("no frames found in {}", args.frames_dir.display())
        }
        Err(e) if e.is_insufficient_data() => {
            return Err(e).context("clip too short or feet never separated past the threshold");
        }
        Err(e) => return Err(e.into()),
    };

    Ok(report.features.to_json(args.pretty)?)
}

/// Default configuration as pretty JSON
pub fn defaults() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&GaitConfig::default())?)
}
