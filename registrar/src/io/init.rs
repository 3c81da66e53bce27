//! Scaffolding for a registrar working directory.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tracing::info;

use crate::io::catalog::{CATALOG_FILE, Catalog, write_catalog};
use crate::io::config::{CONFIG_FILE, RegistrarConfig, write_config};

/// Canonical file locations for a working directory.
#[derive(Debug, Clone)]
pub struct RegistrarPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub catalog_path: PathBuf,
}

impl RegistrarPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_path: root.join(CONFIG_FILE),
            catalog_path: root.join(CATALOG_FILE),
            root,
        }
    }
}

/// Options for `init_registrar`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing files.
    pub force: bool,
}

/// Write `registrar.toml` (pointing at the catalog) and a sample `catalog.toml`.
///
/// Fails if either file already exists unless `options.force` is set.
pub fn init_registrar(root: &Path, options: &InitOptions) -> Result<RegistrarPaths> {
    let paths = RegistrarPaths::new(root);
    for path in [&paths.config_path, &paths.catalog_path] {
        if path.exists() && !options.force {
            return Err(anyhow!(
                "registrar init: {} already exists (use --force to overwrite)",
                path.display()
            ));
        }
    }

    let cfg = RegistrarConfig {
        catalog: Some(PathBuf::from(CATALOG_FILE)),
        ..RegistrarConfig::default()
    };
    write_config(&paths.config_path, &cfg)?;
    write_catalog(&paths.catalog_path, &Catalog::sample())?;

    info!(root = %paths.root.display(), "registrar initialized");
    Ok(paths)
}
