//! Size tokens and their display form
//!
//! All sizes inside the simulator are whole kilobytes. This module converts
//! user-facing tokens such as `"100 KB"` or `"2 mb"` into that base unit and
//! back into a short human-readable string for reports.

use crate::core::error::{MemfitError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Kilobytes per megabyte
pub const KB_PER_MB: u64 = 1024;

/// A unit accepted in size tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Kb,
    Mb,
}

impl Unit {
    /// Number of kilobytes in one of this unit
    pub fn multiplier(self) -> u64 {
        match self {
            Unit::Kb => 1,
            Unit::Mb => KB_PER_MB,
        }
    }
}

impl FromStr for Unit {
    type Err = MemfitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "KB" => Ok(Unit::Kb),
            "MB" => Ok(Unit::Mb),
            _ => Err(MemfitError::UnknownUnit(s.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Kb => write!(f, "KB"),
            Unit::Mb => write!(f, "MB"),
        }
    }
}

fn size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*(?P<size>\S+)\s+(?P<unit>\S+)\s*$").unwrap())
}

/// Parse a single `<size> <unit>` token into kilobytes
///
/// # Errors
///
/// - `MalformedSize` if the token does not have exactly two parts, the size is
///   not a non-negative integer, or the converted value overflows `u64`
/// - `UnknownUnit` if the unit is not KB or MB (case-insensitive)
///
/// # Examples
///
/// ```
/// use memfit::units::parse_size;
///
/// assert_eq!(parse_size("100 KB").unwrap(), 100);
/// assert_eq!(parse_size("2 mb").unwrap(), 2048);
/// assert!(parse_size("5 GB").is_err());
/// ```
pub fn parse_size(token: &str) -> Result<u64> {
    let caps = size_pattern()
        .captures(token)
        .ok_or_else(|| MemfitError::MalformedSize(token.trim().to_string()))?;

    let amount: u64 = caps["size"]
        .parse()
        .map_err(|_| MemfitError::MalformedSize(token.trim().to_string()))?;
    let unit: Unit = caps["unit"].parse()?;

    amount
        .checked_mul(unit.multiplier())
        .ok_or_else(|| MemfitError::MalformedSize(token.trim().to_string()))
}

/// Parse a comma-separated list of size tokens, preserving order
///
/// An empty entry (`"100 KB,,50 KB"`) is a `MalformedSize` error.
pub fn parse_size_list(list: &str) -> Result<Vec<u64>> {
    list.split(',').map(parse_size).collect()
}

/// Format a kilobyte count for display
///
/// Values of at least one megabyte are shown in whole megabytes; the
/// remainder is dropped.
pub fn format_size(kb: u64) -> String {
    if kb >= KB_PER_MB {
        format!("{} MB", kb / KB_PER_MB)
    } else {
        format!("{} KB", kb)
    }
}
