#![forbid(unsafe_code)]

//! Demo settings: command-line values win over `CVIZ_*` environment
//! variables, which win over defaults.

use std::env;

use crate::error::{DemoError, Result};

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_LOG: &str = "warn";
/// Rows given to an open overlay when no height is configured.
pub const OVERLAY_HEIGHT: u16 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub width: u16,
    /// Fixed frame height; `None` sizes the frame to the card.
    pub height: Option<u16>,
    pub log_filter: String,
}

impl DemoConfig {
    pub fn resolve(width: Option<u16>, height: Option<u16>) -> Result<Self> {
        resolve_with(width, height, &env_get)
    }
}

/// Log filter directive from `CVIZ_LOG`, or [`DEFAULT_LOG`].
pub fn log_filter() -> String {
    log_filter_with(&env_get)
}

fn env_get(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn env_u16_with<F: Fn(&str) -> Option<String>>(name: &str, get: &F) -> Result<Option<u16>> {
    match get(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|v| *v > 0)
            .map(Some)
            .ok_or_else(|| DemoError::invalid(format!("{name} must be a positive integer, got {raw:?}"))),
    }
}

fn log_filter_with<F: Fn(&str) -> Option<String>>(get: &F) -> String {
    get("CVIZ_LOG")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG.to_string())
}

fn resolve_with<F: Fn(&str) -> Option<String>>(
    width: Option<u16>,
    height: Option<u16>,
    get: &F,
) -> Result<DemoConfig> {
    let width = match width {
        Some(w) => w,
        None => env_u16_with("CVIZ_WIDTH", get)?.unwrap_or(DEFAULT_WIDTH),
    };
    if width == 0 {
        return Err(DemoError::invalid("width must be positive"));
    }
    let height = match height {
        Some(h) => Some(h),
        None => env_u16_with("CVIZ_HEIGHT", get)?,
    };
    Ok(DemoConfig {
        width,
        height,
        log_filter: log_filter_with(get),
    })
}
