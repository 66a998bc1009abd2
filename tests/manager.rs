// ABOUTME: Integration tests for the instance manager.
// ABOUTME: Selection invariants, invalid-state errors, and bulk-operation abort semantics.

mod support;

use flotilla::instance::{InstanceManager, ManagerError, ServiceInstance};
use flotilla::systemd::UnitAction;
use flotilla::types::Suffix;
use support::{CallLog, EchoPilot, RecordingRunner, call_log, seed_units};

fn manager_with(
    log: CallLog,
    unit_dir: &std::path::Path,
) -> InstanceManager<EchoPilot, RecordingRunner> {
    InstanceManager::with_runner(RecordingRunner::new(log)).with_unit_dir(unit_dir)
}

#[test]
fn selection_recomputes_all_derived_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager_with(call_log(), dir.path());

    manager.select(EchoPilot::from_suffix(Suffix::new("2").unwrap()));
    let selection = manager.selection().unwrap();
    assert_eq!(selection.suffix().as_str(), "2");
    assert_eq!(selection.unit().as_str(), "echo-pilot-2");
    assert_eq!(selection.unit_file(), "echo-pilot-2.service");
    assert_eq!(
        selection.unit_path(),
        dir.path().join("echo-pilot-2.service")
    );

    // Re-selecting replaces the whole derived set at once.
    manager.select(EchoPilot::from_suffix(Suffix::default()));
    let selection = manager.selection().unwrap();
    assert_eq!(selection.unit_file(), "echo-pilot.service");
    assert_eq!(selection.unit_path(), dir.path().join("echo-pilot.service"));
}

#[test]
fn every_operation_requires_a_selection() {
    let dir = tempfile::tempdir().unwrap();
    let log = call_log();
    let manager = manager_with(log.clone(), dir.path());

    assert!(matches!(manager.create(), Err(ManagerError::NoSelection)));
    assert!(matches!(manager.delete(), Err(ManagerError::NoSelection)));
    assert!(matches!(manager.enable(), Err(ManagerError::NoSelection)));
    assert!(matches!(manager.disable(), Err(ManagerError::NoSelection)));
    assert!(matches!(manager.start(), Err(ManagerError::NoSelection)));
    assert!(matches!(manager.restart(), Err(ManagerError::NoSelection)));
    assert!(matches!(manager.stop(), Err(ManagerError::NoSelection)));

    // The runner was never touched.
    assert!(log.borrow().is_empty());
}

#[test]
fn swallowing_operations_return_ok_on_runner_failure() {
    let dir = tempfile::tempdir().unwrap();
    let log = call_log();
    let runner = RecordingRunner::failing_on(log.clone(), "echo-pilot.service", UnitAction::Start);
    let mut manager: InstanceManager<EchoPilot, _> =
        InstanceManager::with_runner(runner).with_unit_dir(dir.path());

    manager.select(EchoPilot::from_suffix(Suffix::default()));
    assert!(manager.start().is_ok());
    assert_eq!(log.borrow().as_slice(), ["start echo-pilot.service"]);
}

#[test]
fn stop_propagates_runner_failure() {
    let dir = tempfile::tempdir().unwrap();
    let log = call_log();
    let runner = RecordingRunner::failing_on(log.clone(), "echo-pilot.service", UnitAction::Stop);
    let mut manager: InstanceManager<EchoPilot, _> =
        InstanceManager::with_runner(runner).with_unit_dir(dir.path());

    manager.select(EchoPilot::from_suffix(Suffix::default()));
    assert!(matches!(manager.stop(), Err(ManagerError::Command(_))));
}

#[test]
fn bulk_operations_select_instances_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    seed_units(dir.path(), "echo-pilot", &["2", "", "1"], &[]);

    let log = call_log();
    let mut manager = manager_with(log.clone(), dir.path());
    manager.restart_all().unwrap();

    assert_eq!(
        log.borrow().as_slice(),
        [
            "restart echo-pilot.service",
            "restart echo-pilot-1.service",
            "restart echo-pilot-2.service",
        ]
    );
    // The last instance stays selected.
    assert_eq!(
        manager.selection().unwrap().unit_file(),
        "echo-pilot-2.service"
    );
}

#[test]
fn stop_all_aborts_on_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    seed_units(dir.path(), "echo-pilot", &["", "1", "2"], &[]);

    let log = call_log();
    let runner =
        RecordingRunner::failing_on(log.clone(), "echo-pilot-1.service", UnitAction::Stop);
    let mut manager: InstanceManager<EchoPilot, _> =
        InstanceManager::with_runner(runner).with_unit_dir(dir.path());

    assert!(manager.stop_all().is_err());

    // The first instance was stopped, the failing one was attempted, and
    // the third was never touched.
    assert_eq!(
        log.borrow().as_slice(),
        ["stop echo-pilot.service", "stop echo-pilot-1.service"]
    );
}

#[test]
fn start_all_attempts_every_instance_despite_failures() {
    let dir = tempfile::tempdir().unwrap();
    seed_units(dir.path(), "echo-pilot", &["", "1", "2"], &[]);

    let log = call_log();
    let runner =
        RecordingRunner::failing_on(log.clone(), "echo-pilot-1.service", UnitAction::Start);
    let mut manager: InstanceManager<EchoPilot, _> =
        InstanceManager::with_runner(runner).with_unit_dir(dir.path());

    assert!(manager.start_all().is_ok());
    assert_eq!(
        log.borrow().as_slice(),
        [
            "start echo-pilot.service",
            "start echo-pilot-1.service",
            "start echo-pilot-2.service",
        ]
    );
}

#[test]
fn create_and_delete_delegate_to_the_instance() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager_with(call_log(), dir.path());

    manager.select(EchoPilot::from_suffix(Suffix::new("7").unwrap()));
    manager.create().unwrap();
    assert!(dir.path().join("echo-pilot-7.service").is_file());

    manager.delete().unwrap();
    assert!(!dir.path().join("echo-pilot-7.service").exists());

    // Deleting again fails and the error is propagated, not swallowed.
    assert!(matches!(
        manager.delete(),
        Err(ManagerError::Instance(_))
    ));
}
