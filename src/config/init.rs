// ABOUTME: Config scaffolding for new setups.
// ABOUTME: Creates flotilla.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::CONFIG_FILENAME;

const TEMPLATE: &str = r#"# flotilla configuration. Anything omitted here falls back to the
# conventional home-directory layout (~/klipper, ~/moonraker,
# ~/printer_data).

unit_dir: /etc/systemd/system

# klipper:
#   repo: /home/pi/klipper
#   data_root: /home/pi
#
# moonraker:
#   repo: /home/pi/moonraker
#   data_root: /home/pi
"#;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, TEMPLATE)?;
    Ok(())
}
