use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::{info, Level};

use viture_hand_stabilizer::replay::replay;
use viture_hand_stabilizer::{FilterProfile, HandTrackingSettings, JointStabilizer};

#[derive(Parser, Debug)]
#[command(name = "viture-hand-replay")]
#[command(version)]
#[command(about = "Stabilize recorded VITURE hand joint samples", long_about = None)]
struct Args {
    /// JSON-lines file of joint samples
    input: PathBuf,

    /// Filter profile, overriding the one in the settings file
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,

    /// Settings file (defaults to the per-user hand tracking settings)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    Disabled,
    Responsive,
    Stable,
}

impl From<ProfileArg> for FilterProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Disabled => FilterProfile::Disabled,
            ProfileArg::Responsive => FilterProfile::Responsive,
            ProfileArg::Stable => FilterProfile::Stable,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .init();

    let config_path = args.config.unwrap_or_else(HandTrackingSettings::default_path);
    let settings = HandTrackingSettings::load_or_default(&config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    let profile = args.profile.map(FilterProfile::from).unwrap_or(settings.filter_profile);

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let mut stabilizer = JointStabilizer::new(profile);
    let stdout = io::stdout();
    let summary = replay(BufReader::new(file), stdout.lock(), &mut stabilizer)?;

    info!(
        "✅ Replayed {} samples with {:?} profile ({} joints tracked)",
        summary.samples,
        profile,
        stabilizer.tracked_joint_count()
    );
    Ok(())
}
