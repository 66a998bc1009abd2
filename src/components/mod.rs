// ABOUTME: Concrete service components managed by flotilla.
// ABOUTME: The Component trait wires ServiceInstance implementations to configuration.

mod klipper;
mod moonraker;

pub use klipper::Klipper;
pub use moonraker::Moonraker;

use std::path::PathBuf;

use crate::config::{ComponentConfig, Config};
use crate::instance::{InstanceError, ServiceInstance};
use crate::types::Suffix;

/// A [`ServiceInstance`] type the CLI knows how to configure.
pub trait Component: ServiceInstance {
    /// This component's table in the configuration file.
    fn settings(config: &Config) -> &ComponentConfig;

    /// Conventional checkout location when none is configured.
    fn default_checkout() -> Result<PathBuf, InstanceError>;

    /// Construct an instance with paths resolved from configuration.
    fn configure(config: &Config, suffix: Suffix) -> Self;

    /// Checkout directory used by update, rollback, and status.
    fn checkout_path(config: &Config) -> Result<PathBuf, InstanceError> {
        match &Self::settings(config).repo {
            Some(repo) => Ok(repo.clone()),
            None => Self::default_checkout(),
        }
    }
}

pub(crate) fn home_dir() -> Result<PathBuf, InstanceError> {
    dirs::home_dir().ok_or(InstanceError::HomeDirUnavailable)
}

/// Per-instance data directory name: `printer_data` for the default
/// instance, `printer_<suffix>_data` otherwise.
pub(crate) fn data_dir_name(suffix: &Suffix) -> String {
    if suffix.is_default() {
        "printer_data".to_string()
    } else {
        format!("printer_{suffix}_data")
    }
}
