// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lifedebug.toml` > `~/.config/lifedebug/lifedebug.toml`
//! > `/etc/lifedebug/lifedebug.toml`, with environment variable overrides via
//! the `LIFEDEBUG_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LifeDebugConfig;

/// Local config file name, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "lifedebug.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/lifedebug/lifedebug.toml";

/// The per-user config file under the XDG config directory.
pub fn user_config_file() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("lifedebug").join(LOCAL_CONFIG_FILE))
        .unwrap_or_default()
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lifedebug/lifedebug.toml`
/// 3. `~/.config/lifedebug/lifedebug.toml`
/// 4. `./lifedebug.toml`
/// 5. `LIFEDEBUG_*` environment variables
pub fn load_config() -> Result<LifeDebugConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LifeDebugConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LifeDebugConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LifeDebugConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LifeDebugConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LifeDebugConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_file()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// keys survive: `LIFEDEBUG_GEMINI_API_KEY` must map to `gemini.api_key`,
/// not `gemini.api.key`. Figment hands `map` the key in its original case.
fn env_provider() -> Env {
    Env::prefixed("LIFEDEBUG_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("agent_", "agent.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("ui_", "ui.", 1);
        mapped.into()
    })
}
