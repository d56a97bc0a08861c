use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chanlist::infrastructure::{AppConfig, CliArgs, MemorySnapshot, StorageManager};
use chanlist::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let Some(log_path) = config.effective_log_path() else {
        tracing_subscriber::registry().with(filter).init();
        return Ok(());
    };

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    info!(path = %log_path.display(), "Logging initialized");
    Ok(())
}

fn load_config(args: CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn load_snapshot(config: &AppConfig) -> Result<MemorySnapshot> {
    match &config.snapshot {
        Some(path) => MemorySnapshot::load(path)
            .wrap_err_with(|| format!("failed to load snapshot {}", path.display())),
        None => {
            info!(users = config.demo_users, "Generating demo snapshot");
            Ok(MemorySnapshot::demo(config.demo_users))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_config(CliArgs::parse())?;
    init_logging(&config)?;

    info!(version = chanlist::VERSION, "Starting {}", chanlist::NAME);

    let snapshot = load_snapshot(&config)?;
    let app = App::new(snapshot, &config);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    result
}
