#![forbid(unsafe_code)]

//! Headless driver for chatviz: renders a tool invocation to text and
//! replays scripted keyboard and mouse input against it.

pub mod cli;
pub mod config;
pub mod error;
pub mod keys;
pub mod session;

pub use cli::{run, run_from_env};
pub use error::{DemoError, Result};

/// Install the stderr log subscriber.
pub fn init_logging(filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::DEFAULT_LOG));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
