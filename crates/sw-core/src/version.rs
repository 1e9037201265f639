//! Version strings of the form `major.minor.patch[-tag]`
//!
//! A [`Version`] keeps the exact string it was parsed from. Two versions are
//! `==` only when those strings match; ordering goes through
//! [`Version::precedence`], which compares the integer core and then the tag.

use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const FORM: &str = "version must be in the form major.minor.patch[-tag]";

/// Pre-release/build label following the `-` of a version string.
///
/// The label is split on `.`; every part is purely numeric, purely
/// alphabetic, or empty. A version without a label carries a single empty
/// part, so `1.0.0` and `1.0.0-` have the same precedence.
#[derive(Debug, Clone)]
pub struct Tag {
    raw: String,
    parts: Vec<String>,
}

impl Tag {
    /// Parse a tag label, rejecting parts that mix digits and letters.
    pub fn parse(label: &str) -> CoreResult<Self> {
        let parts: Vec<String> = label.split('.').map(String::from).collect();
        if let Some(bad) = parts.iter().find(|p| !is_valid_tag_part(p)) {
            return Err(CoreError::InvalidVersion {
                input: label.to_string(),
                reason: format!(
                    "tag part '{bad}' must be purely numeric, purely alphabetic, or empty"
                ),
            });
        }
        Ok(Self {
            raw: label.to_string(),
            parts,
        })
    }

    /// The label as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Dot-separated parts of the label.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Compare part by part, numeric parts by value and everything else by
    /// ordinal string order. A shorter list wins when the shared prefix ties.
    pub fn precedence(&self, other: &Self) -> Ordering {
        for (a, b) in self.parts.iter().zip(&other.parts) {
            let ord = if is_numeric(a) && is_numeric(b) {
                cmp_numeric(a, b)
            } else {
                a.as_str().cmp(b.as_str())
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.parts.len().cmp(&other.parts.len())
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Tag {}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A parsed `major.minor.patch[-tag]` version.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    major: u64,
    minor: u64,
    patch: u64,
    tag: Tag,
}

impl Version {
    /// Parse a version string.
    ///
    /// Fails with [`CoreError::InvalidVersion`] unless the string is three
    /// dot-separated non-negative integers, optionally followed by a single
    /// `-<tag>`.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidVersion {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (core, label) = match input.split_once('-') {
            Some((_, rest)) if rest.contains('-') => return Err(invalid(FORM)),
            Some((core, label)) => (core, label),
            None => (input, ""),
        };

        let numbers: Vec<&str> = core.split('.').collect();
        if numbers.len() != 3 {
            return Err(invalid(FORM));
        }

        let mut triple = [0u64; 3];
        for (slot, text) in triple.iter_mut().zip(&numbers) {
            if !is_numeric(text) {
                return Err(invalid(
                    "major, minor and patch must be non-negative integers",
                ));
            }
            *slot = text
                .parse()
                .map_err(|_| invalid("version component is out of range"))?;
        }

        let tag = Tag::parse(label).map_err(|e| match e {
            CoreError::InvalidVersion { reason, .. } => invalid(reason.as_str()),
            other => other,
        })?;

        Ok(Self {
            raw: input.to_string(),
            major: triple[0],
            minor: triple[1],
            patch: triple[2],
            tag,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The `(major, minor, patch)` triple.
    pub fn core(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether two versions share the integer core, ignoring tags.
    pub fn same_core(&self, other: &Self) -> bool {
        self.core() == other.core()
    }

    /// Migration ordering: integer core first, then tag precedence.
    ///
    /// Unlike [`Ord`], differently spelled but numerically equal versions
    /// (`1.0.0` and `01.0.0`) compare `Equal` here.
    pub fn precedence(&self, other: &Self) -> Ordering {
        self.core()
            .cmp(&other.core())
            .then_with(|| self.tag.precedence(&other.tag))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Ord for Version {
    /// Precedence, with the raw string breaking ties so that `Ord`
    /// agrees with `==`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence(other).then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_valid_tag_part(s: &str) -> bool {
    s.is_empty() || is_numeric(s) || s.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Compare two digit strings by value without parsing, so arbitrarily long
/// numeric tag parts never overflow.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
