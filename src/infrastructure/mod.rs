//! Infrastructure layer with configuration and chat-state adapters.

/// Application configuration.
pub mod config;
/// In-memory chat state and fixture loading.
pub mod fixture;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use fixture::{FixtureError, MemorySnapshot, SnapshotFixture};
