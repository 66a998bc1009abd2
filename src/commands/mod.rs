// ABOUTME: Command module aggregator for the flotilla CLI.
// ABOUTME: Re-exports instance, lifecycle, update, rollback, and status handlers.

mod instances;
mod lifecycle;
mod rollback;
mod status;
mod update;

pub use instances::{create, delete, list};
pub use lifecycle::{disable, enable, restart, start, stop};
pub use rollback::rollback;
pub use status::status;
pub use update::update;

use flotilla::error::Result;
use flotilla::types::Suffix;

/// An omitted suffix targets the default instance.
fn parse_suffix(suffix: Option<&str>) -> Result<Suffix> {
    match suffix {
        None => Ok(Suffix::default()),
        Some(s) => Ok(Suffix::new(s)?),
    }
}
