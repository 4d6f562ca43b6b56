//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`AvaraSettings::default()`]
//! 2. If `~/.avara/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::{AvaraSettings, PaymentEnv};

/// Resolve the path to the settings file (`~/.avara/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".avara").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<AvaraSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<AvaraSettings> {
    let defaults = serde_json::to_value(AvaraSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: AvaraSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Integer vars must parse and fall inside the documented range; invalid
/// values are ignored with a warning (falling back to file/default).
pub fn apply_env_overrides(settings: &mut AvaraSettings) {
    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = read_env_string("AVARA_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read_env_u16("AVARA_PORT", 1, 65535) {
        settings.server.port = v;
    }
    if let Some(v) = read_env_string("AVARA_DB_PATH") {
        settings.server.db_path = Some(v);
    }

    // ── Payment provider ────────────────────────────────────────────
    if let Some(v) = read_env_string("INTASEND_PUBLIC_KEY") {
        settings.payment.public_key = Some(v);
    }
    if let Some(v) = read_env_string("INTASEND_SECRET_KEY") {
        settings.payment.secret_key = Some(v);
    }
    if let Some(v) = read_env_string("INTASEND_ENV") {
        // Anything other than "live" targets the sandbox.
        settings.payment.env = if v.eq_ignore_ascii_case("live") {
            PaymentEnv::Live
        } else {
            PaymentEnv::Sandbox
        };
    }
    if let Some(v) = read_env_string("INTASEND_BASE_URL") {
        settings.payment.base_url = Some(v);
    }
    if let Some(v) = read_env_u64("AVARA_PROVIDER_TIMEOUT_MS", 100, 600_000) {
        settings.payment.timeout_ms = v;
        settings.sms.timeout_ms = v;
    }

    // ── SMS gateway ─────────────────────────────────────────────────
    if let Some(v) = read_env_string("AFRICASTALKING_API_KEY") {
        settings.sms.api_key = Some(v);
    }
    if let Some(v) = read_env_string("AFRICASTALKING_USERNAME") {
        settings.sms.username = Some(v);
    }
    if let Some(v) = read_env_string("AFRICASTALKING_BASE_URL") {
        settings.sms.base_url = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    let val = std::env::var(name).ok()?;
    let result = parse_u16_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u16 env var, ignoring");
    }
    result
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
