// ABOUTME: Instance CRUD command handlers.
// ABOUTME: list, create, and delete over a configured component.

use flotilla::components::Component;
use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::instance::InstanceManager;
use flotilla::output::Output;
use flotilla::systemd;

use super::parse_suffix;

pub fn list<C: Component>(config: &Config, output: &Output) -> Result<()> {
    let manager = InstanceManager::<C>::new().with_unit_dir(config.unit_dir_or_default());
    let instances = manager.instances()?;

    if instances.is_empty() {
        output.progress(&format!("no {} instances found", C::base_name()));
        return Ok(());
    }

    for instance in &instances {
        println!(
            "{}  {}",
            instance.service_name(),
            instance.unit_path(manager.unit_dir()).display()
        );
    }
    Ok(())
}

pub fn create<C: Component>(
    config: &Config,
    suffix: Option<&str>,
    output: &Output,
) -> Result<()> {
    let suffix = parse_suffix(suffix)?;
    let instance = C::configure(config, suffix);
    let unit = instance.service_name();

    let mut manager = InstanceManager::<C>::new().with_unit_dir(config.unit_dir_or_default());
    if systemd::unit_file_exists(manager.unit_dir(), &unit.file_name()) {
        output.warning(&format!("unit file {} already exists; overwriting", unit.file_name()));
    }
    manager.select(instance);
    manager.create()?;
    systemd::daemon_reload()?;

    output.success(&format!("created instance {unit}"));
    Ok(())
}

pub fn delete<C: Component>(
    config: &Config,
    suffix: Option<&str>,
    output: &Output,
) -> Result<()> {
    let suffix = parse_suffix(suffix)?;
    let instance = C::configure(config, suffix);
    let unit = instance.service_name();

    let mut manager = InstanceManager::<C>::new().with_unit_dir(config.unit_dir_or_default());
    manager.select(instance);
    manager.delete()?;
    systemd::daemon_reload()?;

    output.success(&format!("deleted instance {unit}"));
    Ok(())
}
