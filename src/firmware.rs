//! # Firmware Version Gate
//!
//! Zebra firmware reports versions like `V45.11.7ZA`: a major family, a
//! minor revision, and an alphanumeric patch tag. Several ZPL commands grew
//! extra parameters over time, so the builder needs to know whether the
//! target firmware is "new enough" before choosing an encoding.
//!
//! ## Restriction Patterns
//!
//! Restrictions use the same shape as firmware strings, with `x` as a
//! wildcard in any position:
//!
//! | Restriction | Meaning |
//! |-------------|---------|
//! | `V60.14.x`  | major ≥ 60 and minor ≥ 14, any patch |
//! | `Vx.16.x`   | any major, minor ≥ 16 |
//! | `V45.11.7ZA`| major ≥ 45, minor ≥ 11, patch exactly `7ZA` |
//!
//! Major and minor are compared numerically (minimum version). The patch
//! tag is only ever matched exactly or by wildcard.
//!
//! A list of restrictions is satisfied when any member is. An empty list is
//! always satisfied.
//!
//! ```
//! use cebra::firmware::VersionGate;
//!
//! let gate = VersionGate::new("V45.11.7ZA")?;
//! assert!(!gate.permits("V60.14.x")?);
//! assert!(gate.permits(&["V60.14.x", "V45.10.x"])?);
//! # Ok::<(), cebra::CebraError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{CebraError, Result};

/// Numeric version component (major or minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// `x`
    Any,
    At(u32),
}

/// Alphanumeric patch component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// `x`
    Any,
    Tag(String),
}

/// A parsed firmware version or restriction pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: Level,
    pub minor: Level,
    pub patch: Revision,
}

impl FirmwareVersion {
    /// Check whether this (running) firmware satisfies a single restriction.
    pub fn satisfies(&self, restriction: &FirmwareVersion) -> bool {
        level_ok(restriction.major, self.major)
            && level_ok(restriction.minor, self.minor)
            && match (&restriction.patch, &self.patch) {
                (Revision::Any, _) => true,
                (Revision::Tag(wanted), Revision::Tag(have)) => wanted == have,
                (Revision::Tag(_), Revision::Any) => false,
            }
    }
}

fn level_ok(wanted: Level, have: Level) -> bool {
    match (wanted, have) {
        (Level::Any, _) => true,
        (Level::At(wanted), Level::At(have)) => wanted <= have,
        // A wildcard firmware component cannot prove it is new enough
        (Level::At(_), Level::Any) => false,
    }
}

fn parse_level(part: &str) -> Option<Level> {
    if part == "x" {
        return Some(Level::Any);
    }
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok().map(Level::At)
}

fn parse_revision(part: &str) -> Option<Revision> {
    if part == "x" {
        return Some(Revision::Any);
    }
    if part.is_empty()
        || !part
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    {
        return None;
    }
    Some(Revision::Tag(part.to_string()))
}

impl FromStr for FirmwareVersion {
    type Err = CebraError;

    fn from_str(s: &str) -> Result<Self> {
        let parse_error = || CebraError::Parse(s.to_string());

        let body = s.strip_prefix('V').ok_or_else(parse_error)?;
        let mut parts = body.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(parse_error());
        };

        Ok(Self {
            major: parse_level(major).ok_or_else(parse_error)?,
            minor: parse_level(minor).ok_or_else(parse_error)?,
            patch: parse_revision(patch).ok_or_else(parse_error)?,
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("x"),
            Self::At(n) => write!(f, "{}", n),
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patch = match &self.patch {
            Revision::Any => "x",
            Revision::Tag(tag) => tag.as_str(),
        };
        write!(f, "V{}.{}.{}", self.major, self.minor, patch)
    }
}

// ============================================================================
// RESTRICTIONS
// ============================================================================

/// One restriction pattern, or a list where any member may match.
#[derive(Debug, Clone, Copy)]
pub enum Restriction<'a> {
    One(&'a str),
    AnyOf(&'a [&'a str]),
}

impl Restriction<'static> {
    /// No restriction at all.
    pub const NONE: Restriction<'static> = Restriction::AnyOf(&[]);
}

impl<'a> Restriction<'a> {
    /// The restriction as a list of patterns.
    pub fn patterns(&self) -> &[&'a str] {
        match self {
            Self::One(pattern) => std::slice::from_ref(pattern),
            Self::AnyOf(patterns) => patterns,
        }
    }
}

impl<'a> From<&'a str> for Restriction<'a> {
    fn from(pattern: &'a str) -> Self {
        Self::One(pattern)
    }
}

impl<'a> From<&'a [&'a str]> for Restriction<'a> {
    fn from(patterns: &'a [&'a str]) -> Self {
        Self::AnyOf(patterns)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Restriction<'a> {
    fn from(patterns: &'a [&'a str; N]) -> Self {
        Self::AnyOf(patterns)
    }
}

impl fmt::Display for Restriction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patterns() {
            [] => f.write_str("any firmware"),
            patterns => f.write_str(&patterns.join(" or ")),
        }
    }
}

/// A row in a firmware compatibility table: `form` is used when the
/// running firmware satisfies `requires`.
#[derive(Debug, Clone, Copy)]
pub struct Variant<T: 'static> {
    pub requires: &'static [&'static str],
    pub form: T,
}

// ============================================================================
// VERSION GATE
// ============================================================================

/// Answers "does the target firmware support this?" for the builder.
#[derive(Debug, Clone)]
pub struct VersionGate {
    firmware: FirmwareVersion,
}

impl VersionGate {
    /// Parse the firmware string of the target printer.
    pub fn new(firmware: &str) -> Result<Self> {
        Ok(Self {
            firmware: firmware.parse()?,
        })
    }

    /// The parsed firmware version.
    pub fn firmware(&self) -> &FirmwareVersion {
        &self.firmware
    }

    /// Check a restriction (or list of restrictions) against the firmware.
    ///
    /// Returns `Err(Parse)` if any restriction pattern is malformed.
    pub fn permits<'a>(&self, restriction: impl Into<Restriction<'a>>) -> Result<bool> {
        let restriction = restriction.into();
        for pattern in restriction.patterns() {
            let required: FirmwareVersion = pattern.parse()?;
            if self.firmware.satisfies(&required) {
                return Ok(true);
            }
        }
        Ok(restriction.patterns().is_empty())
    }

    /// Pick the first variant whose restrictions the firmware satisfies.
    pub fn select<'t, T>(&self, variants: &'t [Variant<T>], fallback: &'t T) -> Result<&'t T> {
        for variant in variants {
            if self.permits(variant.requires)? {
                return Ok(&variant.form);
            }
        }
        Ok(fallback)
    }
}

/// Check a restriction against a firmware string without building a gate.
pub fn is_satisfied<'a>(restriction: impl Into<Restriction<'a>>, firmware: &str) -> Result<bool> {
    VersionGate::new(firmware)?.permits(restriction)
}

// ============================================================================
// TESTS
// ============================================================================
