// ABOUTME: Shared test doubles for the instance engine.
// ABOUTME: A fake service type, a recording unit runner, and scripted workflow collaborators.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;

use flotilla::instance::{InstanceError, ServiceInstance};
use flotilla::repo::{RepoError, Rollback};
use flotilla::systemd::{CommandError, UnitAction, UnitRunner};
use flotilla::types::Suffix;
use flotilla::workflow::Prompt;

/// Shared call log collaborators append to, so tests can assert on the
/// order of operations across seams.
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// A fake service type for exercising discovery and the manager.
#[derive(Debug, Clone)]
pub struct EchoPilot {
    suffix: Suffix,
}

impl ServiceInstance for EchoPilot {
    const TYPE_NAME: &'static str = "EchoPilot";
    const BLACKLIST: &'static [&'static str] = &["probe"];

    fn from_suffix(suffix: Suffix) -> Self {
        Self { suffix }
    }

    fn suffix(&self) -> &Suffix {
        &self.suffix
    }

    fn create(&self, unit_dir: &Path) -> Result<(), InstanceError> {
        std::fs::write(self.unit_path(unit_dir), "[Unit]\n")?;
        Ok(())
    }

    fn delete(&self, unit_dir: &Path) -> Result<(), InstanceError> {
        std::fs::remove_file(self.unit_path(unit_dir))?;
        Ok(())
    }
}

/// Unit runner that records every invocation and optionally fails one
/// scripted (unit, action) pair.
pub struct RecordingRunner {
    log: CallLog,
    fail_on: Option<(String, UnitAction)>,
}

impl RecordingRunner {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail_on: None }
    }

    pub fn failing_on(log: CallLog, unit: &str, action: UnitAction) -> Self {
        Self {
            log,
            fail_on: Some((unit.to_string(), action)),
        }
    }
}

impl UnitRunner for RecordingRunner {
    fn run(&self, unit: &str, action: UnitAction) -> Result<(), CommandError> {
        self.log
            .borrow_mut()
            .push(format!("{} {unit}", action.as_arg()));

        if let Some((fail_unit, fail_action)) = &self.fail_on {
            if fail_unit == unit && *fail_action == action {
                return Err(CommandError::NonZero {
                    command: format!("systemctl {} {unit}", action.as_arg()),
                    code: 1,
                    stderr: "scripted failure".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Repository double for the rollback workflow.
pub struct MockRepo {
    log: CallLog,
    fail: bool,
}

impl MockRepo {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail: false }
    }

    pub fn failing(log: CallLog) -> Self {
        Self { log, fail: true }
    }
}

impl Rollback for MockRepo {
    fn rollback(&self, commits: u32) -> Result<(), RepoError> {
        self.log.borrow_mut().push(format!("rollback {commits}"));
        if self.fail {
            return Err(RepoError::Git {
                args: "reset --hard".to_string(),
                code: 128,
                stderr: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Prompt double answering with fixed values.
pub struct ScriptedPrompt {
    pub commits: u32,
    pub confirmed: bool,
}

impl Prompt for ScriptedPrompt {
    fn commit_count(&mut self) -> io::Result<u32> {
        Ok(self.commits)
    }

    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(self.confirmed)
    }
}

/// Populate a unit directory with service files for the given suffixes
/// ("" meaning the default instance) plus arbitrary extra file names.
pub fn seed_units(unit_dir: &Path, base: &str, suffixes: &[&str], extra: &[&str]) {
    for suffix in suffixes {
        let name = if suffix.is_empty() {
            format!("{base}.service")
        } else {
            format!("{base}-{suffix}.service")
        };
        std::fs::write(unit_dir.join(name), "[Unit]\n").unwrap();
    }
    for name in extra {
        std::fs::write(unit_dir.join(name), "[Unit]\n").unwrap();
    }
}
