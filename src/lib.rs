// BMI Tracker - Core Library
// Exposes all modules for use in the CLI, the web server, and tests

pub mod bmi;
pub mod config;
pub mod record;
pub mod store;

#[cfg(feature = "server")]
pub mod presentation;
#[cfg(feature = "server")]
pub mod web;

// Re-export commonly used types
pub use bmi::{classify, compute_bmi, BmiCategory};
pub use config::Config;
pub use record::{parse_measurement, InvalidInput, Record};
pub use store::RecordStore;

#[cfg(feature = "server")]
pub use presentation::{Presenter, ViewModel};
#[cfg(feature = "server")]
pub use web::{router, AppState, WebError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialise env_logger, defaulting to `info` when RUST_LOG is unset
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
