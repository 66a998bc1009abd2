// ABOUTME: Klipper component - the 3D printer firmware host service.
// ABOUTME: Renders klipper unit files and owns the per-instance data directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ComponentConfig, Config};
use crate::instance::{InstanceError, ServiceInstance};
use crate::types::Suffix;

use super::{Component, data_dir_name, home_dir};

/// One Klipper host service instance.
///
/// Paths are resolved lazily at create/delete time, so values built by
/// discovery (which only knows the suffix) behave the same as configured
/// ones running against the conventional home layout.
#[derive(Debug, Clone)]
pub struct Klipper {
    suffix: Suffix,
    checkout: Option<PathBuf>,
    data_root: Option<PathBuf>,
}

impl Klipper {
    /// Override the checkout and data-root locations.
    pub fn with_paths(mut self, checkout: Option<PathBuf>, data_root: Option<PathBuf>) -> Self {
        self.checkout = checkout;
        self.data_root = data_root;
        self
    }

    pub fn data_dir(&self) -> Result<PathBuf, InstanceError> {
        let root = match &self.data_root {
            Some(root) => root.clone(),
            None => home_dir()?,
        };
        Ok(root.join(data_dir_name(&self.suffix)))
    }

    fn checkout_dir(&self) -> Result<PathBuf, InstanceError> {
        match &self.checkout {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_checkout(),
        }
    }

    fn env_dir(&self) -> Result<PathBuf, InstanceError> {
        Ok(home_dir()?.join("klippy-env"))
    }

    fn render_unit(&self) -> Result<String, InstanceError> {
        let checkout = self.checkout_dir()?;
        let env = self.env_dir()?;
        let data = self.data_dir()?;

        let description = if self.suffix.is_default() {
            "Klipper 3D printer firmware".to_string()
        } else {
            format!("Klipper 3D printer firmware (instance {})", self.suffix)
        };

        Ok(format!(
            r#"[Unit]
Description={description}
Documentation=https://www.klipper3d.org/
After=network-online.target

[Service]
Type=simple
ExecStart={env}/bin/python {checkout}/klippy/klippy.py {data}/config/printer.cfg -I {data}/comms/klippy.serial -l {data}/logs/klippy.log -a {data}/comms/klippy.sock
Restart=always
RestartSec=10

[Install]
WantedBy=multi-user.target
"#,
            env = env.display(),
            checkout = checkout.display(),
            data = data.display(),
        ))
    }
}

impl ServiceInstance for Klipper {
    const TYPE_NAME: &'static str = "Klipper";

    // klipper-mcu.service is the microcontroller flash unit, not a host
    // instance, and it matches the name pattern.
    const BLACKLIST: &'static [&'static str] = &["mcu"];

    fn from_suffix(suffix: Suffix) -> Self {
        Self {
            suffix,
            checkout: None,
            data_root: None,
        }
    }

    fn suffix(&self) -> &Suffix {
        &self.suffix
    }

    fn create(&self, unit_dir: &Path) -> Result<(), InstanceError> {
        let data_dir = self.data_dir()?;
        for sub in ["config", "logs", "comms", "systemd"] {
            fs::create_dir_all(data_dir.join(sub))?;
        }

        let unit_path = self.unit_path(unit_dir);
        fs::write(&unit_path, self.render_unit()?)?;
        tracing::info!("wrote unit file {}", unit_path.display());
        Ok(())
    }

    fn delete(&self, unit_dir: &Path) -> Result<(), InstanceError> {
        let unit_path = self.unit_path(unit_dir);
        fs::remove_file(&unit_path)?;
        tracing::info!("removed unit file {}", unit_path.display());
        Ok(())
    }
}

impl Component for Klipper {
    fn settings(config: &Config) -> &ComponentConfig {
        &config.klipper
    }

    fn default_checkout() -> Result<PathBuf, InstanceError> {
        Ok(home_dir()?.join("klipper"))
    }

    fn configure(config: &Config, suffix: Suffix) -> Self {
        Self::from_suffix(suffix)
            .with_paths(config.klipper.repo.clone(), config.klipper.data_root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_rendering_points_into_the_instance_data_dir() {
        let instance = Klipper::from_suffix(Suffix::new("2").unwrap())
            .with_paths(Some("/opt/klipper".into()), Some("/srv".into()));
        let unit = instance.render_unit().unwrap();
        assert!(unit.contains("/opt/klipper/klippy/klippy.py"));
        assert!(unit.contains("/srv/printer_2_data/config/printer.cfg"));
        assert!(unit.contains("instance 2"));
    }

    #[test]
    fn default_instance_uses_the_unsuffixed_data_dir() {
        let instance =
            Klipper::from_suffix(Suffix::default()).with_paths(None, Some("/srv".into()));
        let data = instance.data_dir().unwrap();
        assert_eq!(data, PathBuf::from("/srv/printer_data"));
    }
}
