//! Lifecycle primitives shared by the catalog and the result rows.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Literal used on the wire for a date that cannot be determined.
pub const UNKNOWN_DATE: &str = "Unknown";

/// A lifecycle milestone date, or the "Unknown" sentinel.
///
/// Both `null` and `"Unknown"` deserialize to [`LifecycleDate::Unknown`];
/// serialization always writes `"Unknown"` for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LifecycleDate {
    /// A known calendar date
    Date(NaiveDate),
    /// No date is known
    #[default]
    Unknown,
}

impl LifecycleDate {
    /// The date, if known.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Parse a wire value. Accepts ISO dates (`2025-01-01`), the basic form
    /// (`20250101`) and the `Unknown` sentinel.
    pub fn parse(value: &str) -> Result<Self, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNKNOWN_DATE) {
            return Ok(Self::Unknown);
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y%m%d"))
            .map(Self::Date)
            .map_err(|_| format!("Date must be in ISO 8601 format, got '{value}'"))
    }
}

impl From<NaiveDate> for LifecycleDate {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<Option<NaiveDate>> for LifecycleDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(Self::Unknown, Self::Date)
    }
}

impl fmt::Display for LifecycleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Unknown => f.write_str(UNKNOWN_DATE),
        }
    }
}

impl Serialize for LifecycleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LifecycleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // YAML catalogs may carry bare dates, which serde_yaml hands over as strings.
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(Self::Unknown),
            Some(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Support program a host is enrolled in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum LifecycleType {
    #[default]
    #[serde(rename = "mainline")]
    Mainline,
    /// Extended Update Support
    #[serde(rename = "EUS")]
    Eus,
    /// Extended Life-cycle Support
    #[serde(rename = "ELS")]
    Els,
    /// Update Services for SAP Solutions
    #[serde(rename = "E4S")]
    E4s,
}

impl LifecycleType {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mainline => "mainline",
            Self::Eus => "EUS",
            Self::Els => "ELS",
            Self::E4s => "E4S",
        }
    }
}

impl fmt::Display for LifecycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Support status derived from a lifecycle window and the current date.
///
/// Variants are declared in lifecycle order, so `Ord` follows the
/// progression `Upcoming < Supported < NearRetirement < Retired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportStatus {
    Unknown,
    Upcoming,
    Supported,
    NearRetirement,
    Retired,
}

impl SupportStatus {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Upcoming => "upcoming",
            Self::Supported => "supported",
            Self::NearRetirement => "near_retirement",
            Self::Retired => "retired",
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_date_parse() {
        let expected = LifecycleDate::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(LifecycleDate::parse("2025-01-01").unwrap(), expected);
        assert_eq!(LifecycleDate::parse("20250101").unwrap(), expected);
        assert_eq!(LifecycleDate::parse("Unknown").unwrap(), LifecycleDate::Unknown);
        assert!(LifecycleDate::parse("101").is_err());
    }

    #[test]
    fn test_lifecycle_date_serde() {
        let unknown: LifecycleDate = serde_json::from_str("null").unwrap();
        assert_eq!(unknown, LifecycleDate::Unknown);
        let unknown: LifecycleDate = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(unknown, LifecycleDate::Unknown);

        assert_eq!(serde_json::to_string(&LifecycleDate::Unknown).unwrap(), "\"Unknown\"");
        let date = LifecycleDate::from(NaiveDate::from_ymd_opt(2029, 5, 31).unwrap());
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2029-05-31\"");
    }

    #[test]
    fn test_lifecycle_type_wire_names() {
        assert_eq!(serde_json::to_string(&LifecycleType::Eus).unwrap(), "\"EUS\"");
        assert_eq!(serde_json::to_string(&LifecycleType::Mainline).unwrap(), "\"mainline\"");
        assert_eq!(
            serde_json::to_string(&SupportStatus::NearRetirement).unwrap(),
            "\"near_retirement\""
        );
    }
}
