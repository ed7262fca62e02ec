//! Date handling for the aggregation API's mixed formats.
//!
//! The API emits both date-only values (`2018-01-28`) and full date-times
//! (`2020-10-16T14:31:21Z`), sometimes for the same logical field across
//! endpoints. Decoding tries the date-only format first, then RFC 3339;
//! encoding always emits UTC date-times with seconds precision.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Wire format for date-only values.
pub const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Wire format used when serializing date-time values.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Prefix of the serde error message produced for unparseable date strings.
/// The response decoder keys off this to classify date failures separately
/// from generic shape mismatches.
pub const MALFORMED_DATE_MARKER: &str = "cannot decode date string";

/// Parse a date literal, trying the date-only format first and RFC 3339
/// second. Date-only values resolve to midnight UTC.
pub fn parse_flexible(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_ONLY_FORMAT) {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Render a date-time in the wire format.
pub fn format_date_time(value: &DateTime<Utc>) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Serde adapter for required date fields, e.g.
/// `#[serde(with = "dates::flexible")]`.
pub mod flexible {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::MALFORMED_DATE_MARKER;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date_time(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let literal = String::deserialize(deserializer)?;
        super::parse_flexible(&literal)
            .ok_or_else(|| D::Error::custom(format!("{MALFORMED_DATE_MARKER} `{literal}`")))
    }
}

/// Serde adapter for optional date fields; pair with `#[serde(default)]`.
pub mod flexible_opt {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::MALFORMED_DATE_MARKER;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&super::format_date_time(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(literal) => super::parse_flexible(&literal).map(Some).ok_or_else(|| {
                D::Error::custom(format!("{MALFORMED_DATE_MARKER} `{literal}`"))
            }),
        }
    }
}
