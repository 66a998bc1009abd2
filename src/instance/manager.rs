// ABOUTME: Lifecycle orchestration over one service type and its discovered instances.
// ABOUTME: Selection handling, single-instance operations, and bulk variants with their abort semantics.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::capability::{InstanceError, ServiceInstance};
use super::discovery::{DiscoveryError, find_instances};
use crate::systemd::{self, CommandError, Systemctl, UnitAction, UnitRunner};
use crate::types::{Suffix, UnitName};

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("no instance selected")]
    NoSelection,

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Instance(#[from] InstanceError),
}

/// The currently targeted instance together with its derived unit
/// identity.
///
/// Recomputed as one value whenever the selection changes; the derived
/// fields cannot drift apart because they are never set independently.
#[derive(Debug)]
pub struct Selection<I> {
    instance: I,
    unit: UnitName,
    unit_file: String,
    unit_path: PathBuf,
}

impl<I: ServiceInstance> Selection<I> {
    fn new(instance: I, unit_dir: &Path) -> Self {
        let unit = instance.service_name();
        let unit_file = unit.file_name();
        let unit_path = unit_dir.join(&unit_file);
        Self {
            instance,
            unit,
            unit_file,
            unit_path,
        }
    }

    pub fn instance(&self) -> &I {
        &self.instance
    }

    pub fn suffix(&self) -> &Suffix {
        self.instance.suffix()
    }

    pub fn unit(&self) -> &UnitName {
        &self.unit
    }

    /// Fully-qualified unit file name passed to the service manager.
    pub fn unit_file(&self) -> &str {
        &self.unit_file
    }

    pub fn unit_path(&self) -> &Path {
        &self.unit_path
    }
}

/// Orchestrates lifecycle operations for one service type.
///
/// Single-instance operations target the current selection and fail with
/// [`ManagerError::NoSelection`] when nothing is selected; they never
/// silently no-op. Bulk operations re-discover the instance list on every
/// call and select each instance in sorted order.
///
/// Failure policy: `create`, `delete`, and `stop` log and re-raise. A
/// failed stop must abort a stop-then-mutate-then-start sequence before
/// the mutating step runs. `enable`, `disable`, `start`, and `restart`
/// log and swallow; they are best-effort per unit and must not abort a
/// batch.
pub struct InstanceManager<I: ServiceInstance, R: UnitRunner = Systemctl> {
    unit_dir: PathBuf,
    runner: R,
    current: Option<Selection<I>>,
}

impl<I: ServiceInstance> InstanceManager<I> {
    pub fn new() -> Self {
        Self::with_runner(Systemctl)
    }
}

impl<I: ServiceInstance> Default for InstanceManager<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ServiceInstance, R: UnitRunner> InstanceManager<I, R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            unit_dir: PathBuf::from(systemd::UNIT_DIR),
            runner,
            current: None,
        }
    }

    /// Override the unit directory (tests, user-level units).
    pub fn with_unit_dir(mut self, unit_dir: impl Into<PathBuf>) -> Self {
        self.unit_dir = unit_dir.into();
        self
    }

    pub fn unit_dir(&self) -> &Path {
        &self.unit_dir
    }

    /// Make `instance` the target of single-instance operations,
    /// recomputing the derived unit name and path atomically.
    pub fn select(&mut self, instance: I) {
        self.current = Some(Selection::new(instance, &self.unit_dir));
    }

    pub fn selection(&self) -> Option<&Selection<I>> {
        self.current.as_ref()
    }

    fn require_selection(&self) -> Result<&Selection<I>, ManagerError> {
        self.current.as_ref().ok_or(ManagerError::NoSelection)
    }

    /// Freshly discovered, sorted instances of the managed type.
    pub fn instances(&self) -> Result<Vec<I>, ManagerError> {
        Ok(find_instances::<I>(&self.unit_dir)?)
    }

    /// Create the selected instance. Failures are logged and re-raised so
    /// an enclosing installation workflow aborts.
    pub fn create(&self) -> Result<(), ManagerError> {
        let selection = self.require_selection()?;
        selection.instance.create(&self.unit_dir).map_err(|e| {
            tracing::error!("creating instance {} failed: {e}", selection.unit);
            ManagerError::from(e)
        })
    }

    /// Delete the selected instance. Same failure policy as [`create`].
    ///
    /// [`create`]: InstanceManager::create
    pub fn delete(&self) -> Result<(), ManagerError> {
        let selection = self.require_selection()?;
        selection.instance.delete(&self.unit_dir).map_err(|e| {
            tracing::error!("removing instance {} failed: {e}", selection.unit);
            ManagerError::from(e)
        })
    }

    pub fn enable(&self) -> Result<(), ManagerError> {
        self.run_swallowing(UnitAction::Enable)
    }

    pub fn disable(&self) -> Result<(), ManagerError> {
        self.run_swallowing(UnitAction::Disable)
    }

    pub fn start(&self) -> Result<(), ManagerError> {
        self.run_swallowing(UnitAction::Start)
    }

    pub fn restart(&self) -> Result<(), ManagerError> {
        self.run_swallowing(UnitAction::Restart)
    }

    /// Stop the selected instance. Unlike the other service commands, a
    /// failure is re-raised after logging: callers sequencing
    /// stop-then-mutate-then-start must not proceed past a unit that is
    /// still running.
    pub fn stop(&self) -> Result<(), ManagerError> {
        let selection = self.require_selection()?;
        self.runner
            .run(&selection.unit_file, UnitAction::Stop)
            .map_err(|e| {
                tracing::error!("error stopping {}: {e}", selection.unit_file);
                ManagerError::from(e)
            })
    }

    /// Run a best-effort service command: the invalid-state check still
    /// applies, but a runner failure is logged and swallowed.
    fn run_swallowing(&self, action: UnitAction) -> Result<(), ManagerError> {
        let selection = self.require_selection()?;
        if let Err(e) = self.runner.run(&selection.unit_file, action) {
            tracing::error!("error {} {}: {e}", action.label(), selection.unit_file);
        }
        Ok(())
    }

    /// Start every discovered instance in order. Individual start failures
    /// are swallowed, so every instance is attempted.
    pub fn start_all(&mut self) -> Result<(), ManagerError> {
        for instance in self.instances()? {
            self.select(instance);
            self.start()?;
        }
        Ok(())
    }

    /// Restart every discovered instance in order; failures are swallowed
    /// like [`start_all`].
    ///
    /// [`start_all`]: InstanceManager::start_all
    pub fn restart_all(&mut self) -> Result<(), ManagerError> {
        for instance in self.instances()? {
            self.select(instance);
            self.restart()?;
        }
        Ok(())
    }

    /// Stop every discovered instance in order, aborting on the first
    /// failing stop: later instances are left untouched and the caller
    /// sees that first failure.
    pub fn stop_all(&mut self) -> Result<(), ManagerError> {
        for instance in self.instances()? {
            self.select(instance);
            self.stop()?;
        }
        Ok(())
    }
}
