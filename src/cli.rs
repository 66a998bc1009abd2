// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "flotilla")]
#[command(about = "Manage multi-instance systemd services backed by git checkouts")]
#[command(version)]
pub struct Cli {
    /// Enable verbose diagnostic logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// The service types flotilla knows how to manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceKind {
    Klipper,
    Moonraker,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a flotilla.yml template to the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// List discovered instances of a service
    List { service: ServiceKind },

    /// Create an instance: unit file plus data directories
    Create {
        service: ServiceKind,
        /// Instance suffix; omit for the default instance
        #[arg(short, long)]
        suffix: Option<String>,
    },

    /// Delete an instance's unit file
    Delete {
        service: ServiceKind,
        /// Instance suffix; omit for the default instance
        #[arg(short, long)]
        suffix: Option<String>,
    },

    /// Enable an instance at boot
    Enable {
        service: ServiceKind,
        #[arg(short, long)]
        suffix: Option<String>,
    },

    /// Disable an instance at boot
    Disable {
        service: ServiceKind,
        #[arg(short, long)]
        suffix: Option<String>,
    },

    /// Start one or all instances
    Start {
        service: ServiceKind,
        #[arg(short, long, conflicts_with = "all")]
        suffix: Option<String>,
        /// Apply to every discovered instance
        #[arg(long)]
        all: bool,
    },

    /// Stop one or all instances
    Stop {
        service: ServiceKind,
        #[arg(short, long, conflicts_with = "all")]
        suffix: Option<String>,
        /// Apply to every discovered instance
        #[arg(long)]
        all: bool,
    },

    /// Restart one or all instances
    Restart {
        service: ServiceKind,
        #[arg(short, long, conflicts_with = "all")]
        suffix: Option<String>,
        /// Apply to every discovered instance
        #[arg(long)]
        all: bool,
    },

    /// Pull the checkout and restart all instances
    Update { service: ServiceKind },

    /// Roll back the checkout, cycling services around the operation
    Rollback {
        service: ServiceKind,
        /// Number of commits to roll back (prompted for when omitted)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        commits: Option<u32>,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show checkout versions and discovered instances
    Status { service: ServiceKind },
}
