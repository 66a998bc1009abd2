// ABOUTME: Update command implementation.
// ABOUTME: Pulls the service checkout and restarts every instance.

use flotilla::components::Component;
use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::instance::InstanceManager;
use flotilla::output::Output;
use flotilla::repo::GitRepo;

pub fn update<C: Component>(config: &Config, output: &mut Output) -> Result<()> {
    output.start_timer();

    let repo = GitRepo::new(C::checkout_path(config)?);
    output.progress(&format!("updating checkout {}", repo.dir().display()));
    repo.pull()?;

    output.progress("restarting instances");
    let mut manager = InstanceManager::<C>::new().with_unit_dir(config.unit_dir_or_default());
    manager.restart_all()?;

    output.success("update complete");
    Ok(())
}
