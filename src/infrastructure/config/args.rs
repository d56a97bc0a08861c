use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "chanlist",
    version,
    about = "A grouped channel sidebar with incremental select mode",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// TOML snapshot fixture to display.
    #[arg(short, long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Number of users in the generated demo snapshot.
    #[arg(long, value_name = "COUNT")]
    pub demo_users: Option<usize>,

    /// Label users by nickname where available.
    #[arg(long)]
    pub use_nicknames: Option<bool>,

    /// Sidebar width in columns.
    #[arg(long, value_name = "COLUMNS")]
    pub sidebar_width: Option<u16>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,
}
