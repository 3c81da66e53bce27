//! Validation of a registrar setup: config, seed catalog and invariants.

use std::path::Path;

use anyhow::{Result, anyhow};

use crate::core::invariants::validate_invariants;
use crate::io::catalog::CatalogStats;
use crate::session::open_session;

/// High-level validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOutcome {
    pub stats: CatalogStats,
    pub has_catalog: bool,
}

/// Load config and catalog, then check cross-record invariants.
pub fn validate_setup(config_path: &Path, catalog_override: Option<&Path>) -> Result<ValidateOutcome> {
    let session = open_session(config_path, catalog_override)?;
    let errors = validate_invariants(&session.directory);
    if !errors.is_empty() {
        return Err(anyhow!("invariant violations:\n- {}", errors.join("\n- ")));
    }
    Ok(ValidateOutcome {
        stats: session.stats,
        has_catalog: session.catalog_path.is_some(),
    })
}
