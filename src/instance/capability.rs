// ABOUTME: Capability contract implemented by each concrete service type.
// ABOUTME: Identity, derived unit naming, and create/delete behavior behind one trait.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{Suffix, UnitName, kebab};

/// Errors from an instance's own create/delete behavior.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("cannot resolve the user home directory")]
    HomeDirUnavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One deployable service type, instantiable multiple times on a host.
///
/// An implementation is ephemeral: values are reconstructed from the
/// unit-file namespace on every discovery call and never cached across
/// calls. Identity within a type is the suffix alone: two instances are
/// the same instance iff their suffixes are equal.
pub trait ServiceInstance: Sized {
    /// Camel-case type identifier; the unit base name is derived from it
    /// via [`kebab`].
    const TYPE_NAME: &'static str;

    /// Name fragments that disqualify an otherwise-matching unit file.
    ///
    /// Guards against companion services whose unit names embed this
    /// type's base name (e.g. a `-mcu` firmware unit next to the host
    /// service).
    const BLACKLIST: &'static [&'static str];

    /// Construct the instance identified by `suffix`.
    fn from_suffix(suffix: Suffix) -> Self;

    fn suffix(&self) -> &Suffix;

    /// Materialize the instance on disk: unit file, data directories,
    /// whatever the concrete type needs to be startable.
    fn create(&self, unit_dir: &Path) -> Result<(), InstanceError>;

    /// Remove what `create` materialized.
    fn delete(&self, unit_dir: &Path) -> Result<(), InstanceError>;

    /// Kebab-case unit base name shared by every instance of the type.
    fn base_name() -> String {
        kebab(Self::TYPE_NAME)
    }

    /// Derived service unit name for this instance.
    fn service_name(&self) -> UnitName {
        UnitName::new(&Self::base_name(), self.suffix())
    }

    /// Derived unit file path inside `unit_dir`.
    fn unit_path(&self, unit_dir: &Path) -> PathBuf {
        unit_dir.join(self.service_name().file_name())
    }
}
