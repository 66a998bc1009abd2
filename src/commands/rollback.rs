// ABOUTME: Rollback command implementation.
// ABOUTME: Drives the stop-all / repository-rewind / start-all workflow.

use flotilla::components::Component;
use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::instance::InstanceManager;
use flotilla::output::Output;
use flotilla::repo::GitRepo;
use flotilla::workflow::{ConsolePrompt, RollbackOutcome, rollback_checkout};

pub fn rollback<C: Component>(
    config: &Config,
    commits: Option<u32>,
    yes: bool,
    output: &mut Output,
) -> Result<()> {
    output.start_timer();

    let repo = GitRepo::new(C::checkout_path(config)?);
    let mut manager = InstanceManager::<C>::new().with_unit_dir(config.unit_dir_or_default());
    let mut prompt = ConsolePrompt::new().with_commits(commits).assume_yes(yes);

    match rollback_checkout(&mut manager, &repo, &mut prompt)? {
        RollbackOutcome::Completed { commits } => {
            output.success(&format!(
                "rollback of {commits} commit(s) finished; instances restarted"
            ));
        }
        RollbackOutcome::Aborted => {
            output.progress("rollback aborted");
        }
    }
    Ok(())
}
