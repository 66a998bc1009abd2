// ABOUTME: Rollback workflow - stop everything, rewind the checkout, start everything.
// ABOUTME: Collaborator-facing procedure over the manager, a Rollback repo, and a Prompt.

use std::io::{self, Write};

use crate::error::Result;
use crate::instance::{InstanceManager, ServiceInstance};
use crate::repo::Rollback;
use crate::systemd::UnitRunner;

/// Collects the rollback parameters from the user.
pub trait Prompt {
    /// A positive number of commits to roll back.
    fn commit_count(&mut self) -> io::Result<u32>;

    /// Yes/no confirmation; `false` aborts the workflow.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Interactive prompt on stdin/stdout, with optional presets from CLI
/// flags.
#[derive(Debug, Default)]
pub struct ConsolePrompt {
    commits: Option<u32>,
    assume_yes: bool,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the commit-count question when a count was given up front.
    pub fn with_commits(mut self, commits: Option<u32>) -> Self {
        self.commits = commits;
        self
    }

    /// Skip the confirmation question.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }
}

impl Prompt for ConsolePrompt {
    fn commit_count(&mut self) -> io::Result<u32> {
        if let Some(n) = self.commits {
            return Ok(n);
        }

        loop {
            print!("How many commits do you want to roll back? ");
            io::stdout().flush()?;

            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stdin closed while prompting for a commit count",
                ));
            }

            match line.trim().parse::<u32>() {
                Ok(n) if n > 0 => return Ok(n),
                _ => println!("Please enter a positive number."),
            }
        }
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        print!("{question} [y/N] ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let answer = line.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// How a rollback invocation ended.
#[derive(Debug, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// The workflow ran to completion (the repository step may still have
    /// failed; that failure is logged, not fatal).
    Completed { commits: u32 },
    /// The user declined the confirmation; nothing was touched.
    Aborted,
}

/// Roll back a service's checkout, cycling its instances around the
/// repository operation.
///
/// Order is load-bearing: every instance is stopped first, and a failing
/// stop aborts the whole workflow before the repository is touched. The
/// repository rollback itself is non-fatal: whatever happened, the final
/// step starts all instances again so a failed rewind does not leave the
/// host with everything stopped.
pub fn rollback_checkout<I, R, G, P>(
    manager: &mut InstanceManager<I, R>,
    repo: &G,
    prompt: &mut P,
) -> Result<RollbackOutcome>
where
    I: ServiceInstance,
    R: UnitRunner,
    G: Rollback,
    P: Prompt,
{
    let commits = prompt.commit_count()?;

    let plural = if commits == 1 { "" } else { "s" };
    let question = format!(
        "Roll back {commits} commit{plural}? All running {} services will be stopped",
        I::base_name()
    );
    if !prompt.confirm(&question)? {
        tracing::info!("rollback aborted");
        return Ok(RollbackOutcome::Aborted);
    }

    manager.stop_all()?;

    match repo.rollback(commits) {
        Ok(()) => tracing::info!("rolled back {commits} commit{plural}"),
        Err(e) => tracing::error!("repository rollback failed: {e}"),
    }

    manager.start_all()?;

    Ok(RollbackOutcome::Completed { commits })
}
