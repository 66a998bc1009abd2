// ABOUTME: Instance discovery - rebuilds the instance list from the unit-file namespace.
// ABOUTME: Pattern match, blacklist exclusion, suffix extraction, and the sort contract.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ServiceInstance;
use crate::types::UnitPattern;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot read unit directory {dir}: {source}")]
    UnitDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid unit match pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Discover every instance of `I` present in `unit_dir`, sorted.
///
/// The result is derived from the directory listing alone: no state is
/// kept between calls, so a unit file created after this call returns will
/// appear in the next call's result. Entries whose names contain a
/// blacklisted fragment are excluded even when the pattern matches.
///
/// Sort order: the default instance first, numeric suffixes ascending by
/// value, then named suffixes lexically. The sort is stable and total.
pub fn find_instances<I: ServiceInstance>(unit_dir: &Path) -> Result<Vec<I>, DiscoveryError> {
    let base = I::base_name();
    let pattern = UnitPattern::for_base(&base)?;

    let entries = fs::read_dir(unit_dir).map_err(|source| DiscoveryError::UnitDir {
        dir: unit_dir.to_path_buf(),
        source,
    })?;

    let mut instances = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::UnitDir {
            dir: unit_dir.to_path_buf(),
            source,
        })?;

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };

        if !pattern.matches(name) {
            continue;
        }
        if I::BLACKLIST.iter().any(|fragment| name.contains(fragment)) {
            tracing::debug!("excluding blacklisted unit {name}");
            continue;
        }

        if let Some(suffix) = pattern.extract(name) {
            instances.push(I::from_suffix(suffix));
        }
    }

    instances.sort_by_key(|instance| instance.suffix().sort_key());
    Ok(instances)
}
