//! Application configuration.

use crate::application::services::SidebarOptions;
use crate::domain::keybinding::Action;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub(super) const APP_NAME: &str = "chanlist";
pub(super) const APP_QUALIFIER: &str = "org";
pub(super) const APP_ORGANIZATION: &str = "chanlist";

/// Minimum severity written to the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_directive())
    }
}

/// Application configuration, loaded from file and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Snapshot fixture to display instead of generated data.
    #[serde(skip)]
    pub snapshot: Option<PathBuf>,

    /// Number of users in the generated demo snapshot.
    #[serde(default = "default_demo_users")]
    pub demo_users: usize,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Custom keybindings.
    #[serde(default)]
    pub keybindings: HashMap<String, Action>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Label users by nickname where available.
    #[serde(default)]
    pub use_nicknames: bool,

    /// Sidebar width in columns.
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,

    /// Show the `<` marker next to the most recently visited channel.
    #[serde(default = "default_true")]
    pub show_recent_marker: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            use_nicknames: false,
            sidebar_width: default_sidebar_width(),
            show_recent_marker: true,
        }
    }
}

impl UiConfig {
    /// Options handed to the sidebar engine.
    #[must_use]
    pub const fn sidebar_options(&self) -> SidebarOptions {
        SidebarOptions {
            use_nicknames: self.use_nicknames,
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,

    /// Mention highlight color (name or hex code).
    #[serde(default)]
    pub mention_color: Option<String>,
}

fn default_accent_color() -> String {
    "Yellow".to_string()
}

const fn default_sidebar_width() -> u16 {
    32
}

const fn default_demo_users() -> usize {
    2_000
}

const fn default_true() -> bool {
    true
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
            mention_color: None,
        }
    }
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(snapshot) = args.snapshot {
            self.snapshot = Some(snapshot);
        }
        if let Some(demo_users) = args.demo_users {
            self.demo_users = demo_users;
        }
        if let Some(use_nicknames) = args.use_nicknames {
            self.ui.use_nicknames = use_nicknames;
        }
        if let Some(sidebar_width) = args.sidebar_width {
            self.ui.sidebar_width = sidebar_width;
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("chanlist.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            snapshot: None,
            demo_users: default_demo_users(),
            log_level: LogLevel::Info,
            keybindings: HashMap::new(),
            ui: UiConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config() {
        let toml_content = r##"
            log_level = "debug"

            [ui]
            use_nicknames = true
            sidebar_width = 40

            [theme]
            accent_color = "#ff8800"

            [keybindings]
            "Ctrl+n" = "NextChannel"
            "Alt+u" = "NextUnreadChannel"
        "##;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.ui.use_nicknames);
        assert_eq!(config.ui.sidebar_width, 40);
        assert!(config.ui.show_recent_marker);
        assert_eq!(config.theme.accent_color, "#ff8800");
        assert_eq!(config.keybindings.len(), 2);
        assert_eq!(config.keybindings.get("Ctrl+n"), Some(&Action::NextChannel));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.keybindings.is_empty());
        assert!(!config.ui.use_nicknames);
        assert_eq!(config.ui.sidebar_width, 32);
        assert_eq!(config.demo_users, 2_000);
        assert_eq!(config.theme.accent_color, "Yellow");
    }

    #[test]
    fn test_cli_args_override_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "chanlist",
            "--use-nicknames",
            "true",
            "--demo-users",
            "10000",
            "--accent-color",
            "Cyan",
        ]);

        config.merge_with_args(args);

        assert!(config.ui.use_nicknames);
        assert!(config.ui.sidebar_options().use_nicknames);
        assert_eq!(config.demo_users, 10_000);
        assert_eq!(config.theme.accent_color, "Cyan");
        assert!(config.snapshot.is_none());
    }
}
