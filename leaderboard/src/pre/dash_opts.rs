use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "leaderboard",
    about = "Live race leaderboard driven by a recorded telemetry feed"
)]
pub struct DashOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug logging (RUST_LOG takes precedence)
    #[clap(short, long)]
    pub debug: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set path to the feed file (one JSON message per line)
    #[clap(short, long = "feed")]
    pub feed_path: PathBuf,

    /// Set path to the dashboard preferences file (OPTIONAL: defaults are used if not set)
    #[clap(short, long = "prefs")]
    pub prefs_path: Option<PathBuf>,

    /// Set number of cars shown on either side of the reference driver (overrides preferences)
    #[clap(short, long)]
    pub adjacent_cars: Option<u32>,

    /// Set delay between two replayed snapshots in milliseconds, 0 replays as fast as possible
    #[clap(short, long, default_value = "50")]
    pub interval_ms: u64,

    /// Set path of a CSV file the final standings are written to
    #[clap(short, long = "export")]
    pub export_path: Option<PathBuf>,
}
