// ABOUTME: Instance suffix newtype with validation and ordering.
// ABOUTME: The suffix is the identity key distinguishing instances of one service type.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuffixError {
    #[error("suffix cannot be empty; use Suffix::default() for the default instance")]
    Empty,

    #[error("invalid character in suffix: '{0}'")]
    InvalidChar(char),
}

/// The token appended to a service type's base unit name to distinguish
/// one instance from another.
///
/// The default (unsuffixed) instance is `Suffix::default()`. Validated
/// suffixes are one or more ASCII letters or digits, the same grammar the
/// unit-file match pattern accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Suffix(String);

impl Suffix {
    pub fn new(value: &str) -> Result<Self, SuffixError> {
        if value.is_empty() {
            return Err(SuffixError::Empty);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(SuffixError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    /// True for the default (unsuffixed) instance.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Comparison key for the discovery sort order: the default instance
    /// first, then numeric suffixes in ascending numeric order, then named
    /// suffixes lexically.
    ///
    /// Digit-only suffixes compare by value, not lexically, so "10" sorts
    /// after "2". A digit string too large for u64 is treated as a named
    /// suffix.
    pub fn sort_key(&self) -> SuffixKey {
        if self.0.is_empty() {
            return SuffixKey::Default;
        }

        if self.0.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = self.0.parse::<u64>() {
                return SuffixKey::Numeric(n);
            }
        }

        SuffixKey::Named(self.0.clone())
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordering key derived from a suffix. Variant order is the sort contract.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuffixKey {
    Default,
    Numeric(u64),
    Named(String),
}
