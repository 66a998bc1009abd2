// ABOUTME: Entry point for the flotilla CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, ServiceKind};
use flotilla::components::{Klipper, Moonraker};
use flotilla::config::{self, Config};
use flotilla::error::Result;
use flotilla::output::{Output, OutputMode};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    if let Err(e) = run(cli, &mut output) {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let cwd = std::env::current_dir()?;

    if let Commands::Init { force } = &cli.command {
        config::init_config(&cwd, *force)?;
        output.success(&format!("wrote {}", config::CONFIG_FILENAME));
        return Ok(());
    }

    let config = Config::discover(&cwd)?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::List { service } => match service {
            ServiceKind::Klipper => commands::list::<Klipper>(&config, output),
            ServiceKind::Moonraker => commands::list::<Moonraker>(&config, output),
        },
        Commands::Create { service, suffix } => match service {
            ServiceKind::Klipper => commands::create::<Klipper>(&config, suffix.as_deref(), output),
            ServiceKind::Moonraker => {
                commands::create::<Moonraker>(&config, suffix.as_deref(), output)
            }
        },
        Commands::Delete { service, suffix } => match service {
            ServiceKind::Klipper => commands::delete::<Klipper>(&config, suffix.as_deref(), output),
            ServiceKind::Moonraker => {
                commands::delete::<Moonraker>(&config, suffix.as_deref(), output)
            }
        },
        Commands::Enable { service, suffix } => match service {
            ServiceKind::Klipper => commands::enable::<Klipper>(&config, suffix.as_deref(), output),
            ServiceKind::Moonraker => {
                commands::enable::<Moonraker>(&config, suffix.as_deref(), output)
            }
        },
        Commands::Disable { service, suffix } => match service {
            ServiceKind::Klipper => {
                commands::disable::<Klipper>(&config, suffix.as_deref(), output)
            }
            ServiceKind::Moonraker => {
                commands::disable::<Moonraker>(&config, suffix.as_deref(), output)
            }
        },
        Commands::Start {
            service,
            suffix,
            all,
        } => match service {
            ServiceKind::Klipper => {
                commands::start::<Klipper>(&config, suffix.as_deref(), all, output)
            }
            ServiceKind::Moonraker => {
                commands::start::<Moonraker>(&config, suffix.as_deref(), all, output)
            }
        },
        Commands::Stop {
            service,
            suffix,
            all,
        } => match service {
            ServiceKind::Klipper => {
                commands::stop::<Klipper>(&config, suffix.as_deref(), all, output)
            }
            ServiceKind::Moonraker => {
                commands::stop::<Moonraker>(&config, suffix.as_deref(), all, output)
            }
        },
        Commands::Restart {
            service,
            suffix,
            all,
        } => match service {
            ServiceKind::Klipper => {
                commands::restart::<Klipper>(&config, suffix.as_deref(), all, output)
            }
            ServiceKind::Moonraker => {
                commands::restart::<Moonraker>(&config, suffix.as_deref(), all, output)
            }
        },
        Commands::Update { service } => match service {
            ServiceKind::Klipper => commands::update::<Klipper>(&config, output),
            ServiceKind::Moonraker => commands::update::<Moonraker>(&config, output),
        },
        Commands::Rollback {
            service,
            commits,
            yes,
        } => match service {
            ServiceKind::Klipper => commands::rollback::<Klipper>(&config, commits, yes, output),
            ServiceKind::Moonraker => {
                commands::rollback::<Moonraker>(&config, commits, yes, output)
            }
        },
        Commands::Status { service } => match service {
            ServiceKind::Klipper => commands::status::<Klipper>(&config),
            ServiceKind::Moonraker => commands::status::<Moonraker>(&config),
        },
    }
}
