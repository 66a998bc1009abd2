// ABOUTME: Moonraker component - the Klipper API server.
// ABOUTME: Renders moonraker unit files keyed by the same data-directory convention.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ComponentConfig, Config};
use crate::instance::{InstanceError, ServiceInstance};
use crate::types::Suffix;

use super::{Component, data_dir_name, home_dir};

/// One Moonraker API server instance.
#[derive(Debug, Clone)]
pub struct Moonraker {
    suffix: Suffix,
    checkout: Option<PathBuf>,
    data_root: Option<PathBuf>,
}

impl Moonraker {
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
        Ok(home_dir()?.join("moonraker-env"))
    }

    fn render_unit(&self) -> Result<String, InstanceError> {
        let checkout = self.checkout_dir()?;
        let env = self.env_dir()?;
        let data = self.data_dir()?;

        let description = if self.suffix.is_default() {
            "Moonraker API server".to_string()
        } else {
            format!("Moonraker API server (instance {})", self.suffix)
        };

        Ok(format!(
            r#"[Unit]
Description={description}
Documentation=https://moonraker.readthedocs.io/
Requires=network-online.target
After=network-online.target

[Service]
Type=simple
ExecStart={env}/bin/python {checkout}/moonraker/moonraker.py -d {data}
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

impl ServiceInstance for Moonraker {
    const TYPE_NAME: &'static str = "Moonraker";

    // Companion services (moonraker-obico, moonraker-telegram-bot) carry
    // unit names that embed the base name but are not instances.
    const BLACKLIST: &'static [&'static str] = &["obico", "telegram"];

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

impl Component for Moonraker {
    fn settings(config: &Config) -> &ComponentConfig {
        &config.moonraker
    }

    fn default_checkout() -> Result<PathBuf, InstanceError> {
        Ok(home_dir()?.join("moonraker"))
    }

    fn configure(config: &Config, suffix: Suffix) -> Self {
        Self::from_suffix(suffix).with_paths(
            config.moonraker.repo.clone(),
            config.moonraker.data_root.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_rendering_uses_the_data_dir_flag() {
        let instance = Moonraker::from_suffix(Suffix::new("1").unwrap())
            .with_paths(Some("/opt/moonraker".into()), Some("/srv".into()));
        let unit = instance.render_unit().unwrap();
        assert!(unit.contains("/opt/moonraker/moonraker/moonraker.py -d /srv/printer_1_data"));
    }
}
