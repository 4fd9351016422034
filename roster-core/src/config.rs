//! Configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which cache technology backs the read cache, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheMode {
    /// Caching is switched off process-wide; strategies fall through to
    /// the store on every call.
    Disabled,
    /// In-process memory cache.
    Memory,
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CacheMode::Disabled => "disabled",
            CacheMode::Memory => "memory",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disabled" | "none" | "off" => Ok(CacheMode::Disabled),
            "memory" => Ok(CacheMode::Memory),
            other => Err(format!("unknown cache mode: {}", other)),
        }
    }
}

/// Process-wide cache configuration, fixed at startup and injected by
/// value into each strategy. Never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub mode: CacheMode,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            mode: CacheMode::Memory,
        }
    }
}

impl CacheSettings {
    /// Create settings with an explicit mode.
    pub fn new(mode: CacheMode) -> Self {
        Self { mode }
    }

    /// Read settings from the environment.
    ///
    /// # Environment Variables
    /// - `ROSTER_CACHE_MODE`: "memory" (default) | "disabled"
    pub fn from_env() -> Self {
        Self {
            mode: std::env::var("ROSTER_CACHE_MODE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CacheMode::Memory),
        }
    }

    /// Whether the cache layer participates in reads and writes.
    pub fn is_enabled(&self) -> bool {
        self.mode != CacheMode::Disabled
    }
}
