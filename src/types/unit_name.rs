// ABOUTME: The unit-file naming convention shared by derivation and discovery.
// ABOUTME: Kebab-case conversion, derived unit names, and the match pattern with suffix extraction.

use std::fmt;

use regex::Regex;

use super::Suffix;

/// Extension carried by every systemd service unit file.
pub const UNIT_FILE_EXT: &str = ".service";

/// Convert a camel-case type identifier to the kebab-case base name used
/// in unit-file names, e.g. `MoonrakerService` -> `moonraker-service`.
///
/// Total for ASCII-alphanumeric identifiers and idempotent on its own
/// output (lowercase input passes through unchanged).
pub fn kebab(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len() + 4);
    for (i, c) in type_name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// A derived service unit name: the kebab-case base name plus, for a
/// non-default instance, `-<suffix>`.
///
/// Never constructed from raw strings: always derived from a base name
/// and a [`Suffix`], so the round trip through [`UnitPattern::extract`]
/// is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitName(String);

impl UnitName {
    pub fn new(base: &str, suffix: &Suffix) -> Self {
        if suffix.is_default() {
            Self(base.to_string())
        } else {
            Self(format!("{base}-{suffix}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fully-qualified unit file name, e.g. `moonraker-1.service`.
    pub fn file_name(&self) -> String {
        format!("{}{UNIT_FILE_EXT}", self.0)
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compiled match pattern for one service type's unit files.
///
/// A file belongs to the type iff its name matches
/// `^<base>(-[0-9a-zA-Z]+)?\.service$`. The literal hyphen anchor means a
/// base name that happens to prefix a longer, unrelated base never
/// cross-matches (`moon` does not claim `moonraker.service`).
#[derive(Debug)]
pub struct UnitPattern {
    base: String,
    regex: Regex,
}

impl UnitPattern {
    pub fn for_base(base: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^{base}(-[0-9a-zA-Z]+)?\\.service$"))?;
        Ok(Self {
            base: base.to_string(),
            regex,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    /// Extract the suffix from a matching unit file name.
    ///
    /// Returns `None` for non-matching names. A match without the optional
    /// suffix group is the default instance.
    pub fn extract(&self, file_name: &str) -> Option<Suffix> {
        let captures = self.regex.captures(file_name)?;
        match captures.get(1) {
            // The group includes the leading hyphen separator.
            Some(m) => Suffix::new(&m.as_str()[1..]).ok(),
            None => Some(Suffix::default()),
        }
    }
}
