// ABOUTME: Service lifecycle command handlers.
// ABOUTME: enable/disable for single instances, start/stop/restart with --all variants.

use flotilla::components::Component;
use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::instance::InstanceManager;
use flotilla::output::Output;

use super::parse_suffix;

fn manager_for<C: Component>(config: &Config) -> InstanceManager<C> {
    InstanceManager::new().with_unit_dir(config.unit_dir_or_default())
}

pub fn enable<C: Component>(config: &Config, suffix: Option<&str>, output: &Output) -> Result<()> {
    let mut manager = manager_for::<C>(config);
    manager.select(C::configure(config, parse_suffix(suffix)?));
    manager.enable()?;
    output.success("enable requested");
    Ok(())
}

pub fn disable<C: Component>(config: &Config, suffix: Option<&str>, output: &Output) -> Result<()> {
    let mut manager = manager_for::<C>(config);
    manager.select(C::configure(config, parse_suffix(suffix)?));
    manager.disable()?;
    output.success("disable requested");
    Ok(())
}

pub fn start<C: Component>(
    config: &Config,
    suffix: Option<&str>,
    all: bool,
    output: &Output,
) -> Result<()> {
    let mut manager = manager_for::<C>(config);
    if all {
        manager.start_all()?;
        output.success(&format!("started all {} instances", C::base_name()));
    } else {
        manager.select(C::configure(config, parse_suffix(suffix)?));
        manager.start()?;
        output.success("start requested");
    }
    Ok(())
}

pub fn stop<C: Component>(
    config: &Config,
    suffix: Option<&str>,
    all: bool,
    output: &Output,
) -> Result<()> {
    let mut manager = manager_for::<C>(config);
    if all {
        manager.stop_all()?;
        output.success(&format!("stopped all {} instances", C::base_name()));
    } else {
        manager.select(C::configure(config, parse_suffix(suffix)?));
        manager.stop()?;
        output.success("stopped");
    }
    Ok(())
}

pub fn restart<C: Component>(
    config: &Config,
    suffix: Option<&str>,
    all: bool,
    output: &Output,
) -> Result<()> {
    let mut manager = manager_for::<C>(config);
    if all {
        manager.restart_all()?;
        output.success(&format!("restarted all {} instances", C::base_name()));
    } else {
        manager.select(C::configure(config, parse_suffix(suffix)?));
        manager.restart()?;
        output.success("restart requested");
    }
    Ok(())
}
