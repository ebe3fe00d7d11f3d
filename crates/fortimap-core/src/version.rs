//! Firmware version ranges.
//!
//! A [`VersionRange`] is an operator plus an ordered list of versions,
//! evaluated against the single firmware version negotiated with the
//! device. Versions compare as dotted numeric tuples: a leading `v` is
//! ignored and missing components count as zero, so `"7.4"` equals
//! `"7.4.0"`.

use std::fmt;

use semver::Version;

use crate::error::CoreError;

/// Comparison applied by a [`VersionRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOp {
    /// Equal to any listed version.
    Eq,
    Ge,
    Gt,
    Le,
    Lt,
    /// Inclusive `[versions[0], versions[1]]`.
    Between,
}

/// A declarative version predicate attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    pub op: VersionOp,
    pub versions: &'static [&'static str],
}

impl VersionRange {
    pub const fn new(op: VersionOp, versions: &'static [&'static str]) -> Self {
        Self { op, versions }
    }

    /// Evaluate the predicate against `target`.
    pub fn matches(&self, target: &str) -> Result<bool, CoreError> {
        let target = parse_version(target)?;
        let bounds = self
            .versions
            .iter()
            .map(|v| parse_version(v))
            .collect::<Result<Vec<_>, _>>()?;

        let result = match (self.op, bounds.as_slice()) {
            (VersionOp::Eq, list) => list.iter().any(|v| *v == target),
            (VersionOp::Ge, [v, ..]) => target >= *v,
            (VersionOp::Gt, [v, ..]) => target > *v,
            (VersionOp::Le, [v, ..]) => target <= *v,
            (VersionOp::Lt, [v, ..]) => target < *v,
            (VersionOp::Between, [lo, hi]) => target >= *lo && target <= *hi,
            _ => {
                return Err(CoreError::InvalidVersion {
                    version: self.to_string(),
                });
            }
        };
        Ok(result)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            VersionOp::Eq => "=",
            VersionOp::Ge => ">=",
            VersionOp::Gt => ">",
            VersionOp::Le => "<=",
            VersionOp::Lt => "<",
            VersionOp::Between => {
                return write!(f, "{}", self.versions.join(" - "));
            }
        };
        write!(f, "{op} {}", self.versions.join(", "))
    }
}

/// Parse a dotted firmware version (`"v7.4.1"`, `"7.2"`) into a comparable form.
///
/// Each component is a plain decimal number, so `7.04` reads as `7.4`.
pub fn parse_version(raw: &str) -> Result<Version, CoreError> {
    let invalid = || CoreError::InvalidVersion {
        version: raw.to_owned(),
    };

    let trimmed = raw.trim().trim_start_matches(['v', 'V']);
    let mut numbers = [0_u64; 3];
    let mut count = 0;
    for part in trimmed.split('.') {
        if count == numbers.len() || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        numbers[count] = part.parse().map_err(|_| invalid())?;
        count += 1;
    }

    let [major, minor, patch] = numbers;
    Ok(Version::new(major, minor, patch))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SINCE_741: VersionRange = VersionRange::new(VersionOp::Ge, &["7.4.1"]);
    const BEFORE_740: VersionRange = VersionRange::new(VersionOp::Lt, &["7.4.0"]);

    #[test]
    fn ge_compares_numerically_not_lexically() {
        assert!(SINCE_741.matches("7.10.0").unwrap());
        assert!(SINCE_741.matches("7.4.1").unwrap());
        assert!(!SINCE_741.matches("7.4.0").unwrap());
        assert!(!SINCE_741.matches("7.0.12").unwrap());
    }

    #[test]
    fn missing_components_are_zero() {
        assert!(!BEFORE_740.matches("7.4").unwrap());
        assert!(BEFORE_740.matches("v7.2").unwrap());
    }

    #[test]
    fn between_is_inclusive() {
        let range = VersionRange::new(VersionOp::Between, &["6.4.0", "7.0.15"]);
        assert!(range.matches("6.4.0").unwrap());
        assert!(range.matches("7.0.15").unwrap());
        assert!(!range.matches("7.2.0").unwrap());
    }

    #[test]
    fn eq_matches_any_listed() {
        let range = VersionRange::new(VersionOp::Eq, &["6.2.0", "6.4.2"]);
        assert!(range.matches("6.4.2").unwrap());
        assert!(!range.matches("6.4.3").unwrap());
    }

    #[test]
    fn leading_zeros_are_plain_numbers() {
        assert_eq!(parse_version("7.04.1").unwrap(), Version::new(7, 4, 1));
        assert!(SINCE_741.matches("v07.04.01").unwrap());
        assert!(SINCE_741.matches("7.4.+1").is_err());
    }

    #[test]
    fn malformed_versions_are_rejected() {
        assert!(SINCE_741.matches("latest").is_err());
        assert!(SINCE_741.matches("7..1").is_err());
        assert!(SINCE_741.matches("7.4.1.2").is_err());
        assert!(VersionRange::new(VersionOp::Between, &["7.0.0"]).matches("7.0.0").is_err());
    }

    #[test]
    fn display_forms() {
        assert_eq!(SINCE_741.to_string(), ">= 7.4.1");
        assert_eq!(
            VersionRange::new(VersionOp::Between, &["6.4.0", "7.0.15"]).to_string(),
            "6.4.0 - 7.0.15"
        );
    }
}
