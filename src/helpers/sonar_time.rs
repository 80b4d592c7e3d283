use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use crate::config::constants::SONAR_TIME_FORMAT;

/// Parses a Sonar API timestamp. The API emits `+0100` style offsets;
/// RFC 3339 (`+01:00`, `Z`) is accepted as well.
pub fn parse_sonar_time(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, SONAR_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse_sonar_time(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid Sonar timestamp '{}'", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_offset() {
        let parsed = parse_sonar_time("2024-03-01T10:15:30+0100").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T10:15:30+01:00");
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_sonar_time("2024-03-01T10:15:30Z").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_sonar_time("yesterday").is_none());
    }
}
