// SCA Editor Library Entry Point
// This file exposes all modules so they can be imported by main.rs
// and tested independently.

// Core modules
pub mod error;
pub mod settings;

// Shared state
pub mod state;

// Pure logic modules (no I/O)
pub mod modules;

// Command script driver
pub mod replay;

pub use error::{ReplayError, Result, SettingsError, TabError};
pub use modules::tabs::{apply, TabCommand, TabStore};
pub use settings::{ActivatePolicy, Settings};
pub use replay::{replay, ReplayStats};
pub use state::{AppState, PathEntry, Tab, TabListState};

use tracing_subscriber::EnvFilter;

/// Installs the global logger. `RUST_LOG` wins over `level` when set.
/// Records from the `log` facade are routed through the subscriber.
/// An unrecognised `level` falls back to info with a warning.
pub fn init_logging(level: &str) {
    let settings = Settings { log_level: level.to_string(), ..Settings::default() };
    let directive = settings.log_directive();

    let fallback = directive.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Failed to install logger: {}", e);
        return;
    }

    if directive.is_none() {
        log::warn!("Unknown log level '{}', falling back to info", level);
    }
}
