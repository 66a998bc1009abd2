// ABOUTME: Service-command runner seam over systemctl.
// ABOUTME: Spawns the service manager synchronously and types non-zero exits as errors.

use std::path::Path;
use std::process::Command;

use snafu::{ResultExt, Snafu, ensure};

/// Default systemd unit directory scanned for instance unit files.
pub const UNIT_DIR: &str = "/etc/systemd/system";

/// Subcommands the runner may issue against a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitAction {
    Enable,
    Disable,
    Start,
    Stop,
    Restart,
}

impl UnitAction {
    /// The systemctl subcommand word.
    pub fn as_arg(&self) -> &'static str {
        match self {
            UnitAction::Enable => "enable",
            UnitAction::Disable => "disable",
            UnitAction::Start => "start",
            UnitAction::Stop => "stop",
            UnitAction::Restart => "restart",
        }
    }

    /// Present-participle form for log messages ("error stopping ...").
    pub fn label(&self) -> &'static str {
        match self {
            UnitAction::Enable => "enabling",
            UnitAction::Disable => "disabling",
            UnitAction::Start => "starting",
            UnitAction::Stop => "stopping",
            UnitAction::Restart => "restarting",
        }
    }
}

/// Failure of a spawned service-manager command.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CommandError {
    #[snafu(display("failed to spawn `{command}`: {source}"))]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[snafu(display("`{command}` failed with exit code {code}: {stderr}"))]
    NonZero {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Executes service-manager subcommands against named units.
///
/// The seam the instance manager drives; test doubles record invocations
/// and script failures.
pub trait UnitRunner {
    fn run(&self, unit: &str, action: UnitAction) -> Result<(), CommandError>;
}

/// The production runner: `systemctl <action> <unit>`, blocking until the
/// subprocess exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Systemctl;

impl UnitRunner for Systemctl {
    fn run(&self, unit: &str, action: UnitAction) -> Result<(), CommandError> {
        run_systemctl(&[action.as_arg(), unit])
    }
}

/// Ask systemd to reload unit definitions after a unit file was written
/// or removed.
pub fn daemon_reload() -> Result<(), CommandError> {
    run_systemctl(&["daemon-reload"])
}

fn run_systemctl(args: &[&str]) -> Result<(), CommandError> {
    let command = format!("systemctl {}", args.join(" "));
    tracing::debug!("running {command}");

    let output = Command::new("systemctl")
        .args(args)
        .output()
        .with_context(|_| SpawnSnafu {
            command: command.clone(),
        })?;

    ensure!(
        output.status.success(),
        NonZeroSnafu {
            command,
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    );

    Ok(())
}

/// True if a unit file with the given name exists in `unit_dir`.
pub fn unit_file_exists(unit_dir: &Path, file_name: &str) -> bool {
    unit_dir.join(file_name).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_args_match_systemctl_subcommands() {
        assert_eq!(UnitAction::Enable.as_arg(), "enable");
        assert_eq!(UnitAction::Disable.as_arg(), "disable");
        assert_eq!(UnitAction::Start.as_arg(), "start");
        assert_eq!(UnitAction::Stop.as_arg(), "stop");
        assert_eq!(UnitAction::Restart.as_arg(), "restart");
    }

    #[test]
    fn action_labels_are_present_participles() {
        assert_eq!(UnitAction::Stop.label(), "stopping");
        assert_eq!(UnitAction::Enable.label(), "enabling");
    }

    #[test]
    fn unit_file_exists_checks_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!unit_file_exists(dir.path(), "klipper.service"));
        std::fs::write(dir.path().join("klipper.service"), "[Unit]\n").unwrap();
        assert!(unit_file_exists(dir.path(), "klipper.service"));
    }
}
