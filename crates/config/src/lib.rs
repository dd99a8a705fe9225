//! Layered configuration for the `shelf` binary.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. `shelf.toml` in the platform configuration directory,
//! 3. an explicit file passed on the command line (TOML, YAML or JSON,
//!    chosen by extension),
//! 4. `SHELF_*` environment variables (`SHELF_ROOT`, `SHELF_HASH_NAMES`).
//!
//! Command-line flags are applied on top by the binary itself.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "shelf.toml";
pub const ENV_PREFIX: &str = "SHELF_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage root handed to the library.
    pub root: PathBuf,
    /// Store files under their content digest rather than their original name.
    pub hash_names: bool,
}
impl Default for Config {
    fn default() -> Self {
        Self { root: PathBuf::from("uploads"), hash_names: false }
    }
}
impl Config {
    /// Loads every layer, with `explicit` (if given) above the user file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user = user_file();
        if let Some(user) = &user {
            tracing::debug!(path = %user.display(), "user configuration location");
        }
        Self::from_figment(layered(user.as_deref(), explicit)?)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().or_raise(|| ErrorKind::Load)
    }
}

/// The platform location of `shelf.toml`, if the platform has one.
pub fn user_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "shelf").map(|dirs| dirs.config_dir().join(FILE_NAME))
}

/// Builds the provider stack without extracting it.
///
/// A missing user file is skipped; a missing explicit file is an error.
pub fn layered(user: Option<&Path>, explicit: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(user) = user {
        figment = figment.merge(Toml::file(user));
    }
    if let Some(explicit) = explicit {
        if !explicit.is_file() {
            exn::bail!(ErrorKind::Missing(explicit.to_path_buf()));
        }
        figment = match explicit.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => figment.merge(Toml::file(explicit)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(explicit)),
            Some("json") => figment.merge(Json::file(explicit)),
            _ => exn::bail!(ErrorKind::Format(explicit.to_path_buf())),
        };
    }
    Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
}
