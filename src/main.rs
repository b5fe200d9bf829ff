use std::process::ExitCode;

use fireworks::config::ShowConfig;
use fireworks::error::AppError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match launch() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fireworks exited with an error");
            ExitCode::FAILURE
        }
    }
}

/// Usage: `fireworks [config.json]`
fn launch() -> Result<(), AppError> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => {
            info!(path = %path.to_string_lossy(), "loading config");
            ShowConfig::load(path)?
        }
        None => ShowConfig::default(),
    };
    fireworks::app::run(config)
}
