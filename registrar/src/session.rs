//! Loading config and seed catalog into a ready-to-use directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::directory::Directory;
use crate::io::catalog::{CatalogStats, load_catalog};
use crate::io::config::{RegistrarConfig, load_config};

/// Config plus the directory built from the seed catalog (if any).
#[derive(Debug, Clone)]
pub struct Session {
    pub config: RegistrarConfig,
    pub directory: Directory,
    /// Catalog that seeded `directory`, if one was configured.
    pub catalog_path: Option<PathBuf>,
    pub stats: CatalogStats,
}

/// Load `config_path` (defaults if missing) and seed a directory.
///
/// `catalog_override` wins over the config's `catalog` entry. A configured
/// catalog that does not exist is an error.
pub fn open_session(config_path: &Path, catalog_override: Option<&Path>) -> Result<Session> {
    let config = load_config(config_path).context("load config")?;
    let base = config_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let catalog_path = catalog_override
        .map(Path::to_path_buf)
        .or_else(|| config.catalog_path(base));

    let mut directory = Directory::new();
    let mut stats = CatalogStats::default();
    if let Some(path) = &catalog_path {
        let catalog = load_catalog(path)?;
        stats = catalog
            .apply(&mut directory, &config)
            .with_context(|| format!("seed from {}", path.display()))?;
    } else {
        debug!("no catalog configured, starting empty");
    }

    Ok(Session {
        config,
        directory,
        catalog_path,
        stats,
    })
}
