//! Registrar configuration stored in `registrar.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::course::{DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY};
use crate::core::student::{DEFAULT_MAX_CREDITS, MAX_CREDIT_LIMIT, MIN_CREDIT_LIMIT};
use crate::io::write_atomic;

pub const CONFIG_FILE: &str = "registrar.toml";

/// Registrar configuration (TOML).
///
/// Missing fields default to the values the console has always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistrarConfig {
    /// Capacity for `add-course` when `--capacity` is omitted.
    pub default_capacity: u32,

    /// Credit limit for `add-student` when `--max-credits` is omitted.
    pub default_max_credits: u32,

    /// Seed catalog loaded before any command runs.
    ///
    /// Relative paths resolve against the directory holding the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Stop script execution at the first failed command.
    pub strict: bool,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
            default_max_credits: DEFAULT_MAX_CREDITS,
            catalog: None,
            strict: false,
        }
    }
}

impl RegistrarConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.default_capacity) {
            return Err(anyhow!(
                "default_capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}"
            ));
        }
        if !(MIN_CREDIT_LIMIT..=MAX_CREDIT_LIMIT).contains(&self.default_max_credits) {
            return Err(anyhow!(
                "default_max_credits must be between {MIN_CREDIT_LIMIT} and {MAX_CREDIT_LIMIT}"
            ));
        }
        if self
            .catalog
            .as_ref()
            .is_some_and(|catalog| catalog.as_os_str().is_empty())
        {
            return Err(anyhow!("catalog must be a non-empty path"));
        }
        Ok(())
    }

    /// Resolve `catalog` against `base` when it is relative.
    pub fn catalog_path(&self, base: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                base.join(path)
            }
        })
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RegistrarConfig::default()`.
pub fn load_config(path: &Path) -> Result<RegistrarConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = RegistrarConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RegistrarConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RegistrarConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}
