//! Dotted numeric version numbers

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::VersionError;

/// A version parsed from dot-separated non-negative integers (e.g. "3.11.4").
///
/// Ordering is lexicographic over the components, with missing trailing
/// components treated as zero. "3.11" and "3.11.0" are therefore equal,
/// while [`Display`](fmt::Display) still renders the components as parsed.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parse a version string.
    ///
    /// Every dot-separated component must be a non-empty run of ASCII digits
    /// that fits in a `u64`.
    ///
    /// Examples:
    /// - "3" -> [3]
    /// - "3.11.4" -> [3, 11, 4]
    /// - "3.11.0rc1" -> error
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if input.is_empty() {
            return Err(VersionError::parse(input, "empty version"));
        }

        let components = input
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    return Err(VersionError::parse(input, "empty component"));
                }
                if !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::parse(input, "non-numeric component"));
                }
                part.parse::<u64>()
                    .map_err(|_| VersionError::parse(input, "component out of range"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }

    /// The sentinel version "0", used as the starting point of a scan.
    pub fn zero() -> Self {
        Self {
            components: vec![0],
        }
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Whether this version is equal to the sentinel (all components zero).
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == 0)
    }

    pub fn less_than(&self, other: &Version) -> bool {
        self < other
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let a = self.components.get(i).copied().unwrap_or(0);
                let b = other.components.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.components.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for part in parts {
            write!(f, ".{part}")?;
        }
        Ok(())
    }
}
