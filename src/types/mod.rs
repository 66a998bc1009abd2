// ABOUTME: Validated domain types for instance identity.
// ABOUTME: Suffixes, derived unit names, and the unit-file naming convention.

mod suffix;
mod unit_name;

pub use suffix::{Suffix, SuffixError, SuffixKey};
pub use unit_name::{UNIT_FILE_EXT, UnitName, UnitPattern, kebab};
