// ABOUTME: Status command implementation.
// ABOUTME: Shows checkout versions and the discovered instance list.

use flotilla::components::Component;
use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::instance::InstanceManager;
use flotilla::repo::GitRepo;

pub fn status<C: Component>(config: &Config) -> Result<()> {
    let repo = GitRepo::new(C::checkout_path(config)?);
    let manager = InstanceManager::<C>::new().with_unit_dir(config.unit_dir_or_default());
    let instances = manager.instances()?;

    println!("Service:   {}", C::base_name());
    println!("Checkout:  {} ({})", repo.dir().display(), repo.remote_name());
    println!("Local:     {}", repo.describe_local());
    println!("Remote:    {}", repo.describe_remote());
    println!("Instances: {}", instances.len());
    for instance in &instances {
        println!("  - {}", instance.service_name());
    }
    Ok(())
}
