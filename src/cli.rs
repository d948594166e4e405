use clap::Parser;
use std::path::PathBuf;

/// Pre-build step for the incubator controller firmware.
/// Bumps the build number in src/include/build_info.h and seeds default
/// configuration files under data/ when they are missing.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Project root directory. All generated and seeded paths are relative to it.
    /// PlatformIO exports it as PROJECT_DIR.
    #[arg(env = "PROJECT_DIR", value_name = "PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Enable verbose logging (debug level by default, log targets included).
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Log filter directive, in `tracing_subscriber::EnvFilter` format.
    /// Overrides the level implied by --verbose.
    #[arg(long, env = "RUST_LOG", value_name = "FILTER")]
    pub log_filter: Option<String>,
}

/// Parses command line arguments using clap.
pub fn parse_args() -> Args {
    Args::parse()
}
