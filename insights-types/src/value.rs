//! Typed attribute values and their wire encodings.
//!
//! The Insights API assigns values to attribute types through a closed set
//! of six kinds: boolean, date, date-time, number, string and time. Server
//! generations disagree on how those values look on the wire (older ones
//! expect every value wrapped in a string, newer ones expect natural JSON
//! with structured calendar objects), so the encoding is an explicit
//! [`EncodingConvention`] chosen once per client, never a property of the
//! value itself.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// A typed value assignable to an entity or relationship attribute.
///
/// Exactly one of the six kinds is active. Values are immutable after
/// construction and carry no identity beyond equality; construct one with
/// the kind-specific constructor, encode it once, discard it.
#[derive(Debug, Clone, PartialEq)]
pub struct Value(ValueData);

#[derive(Debug, Clone, PartialEq)]
enum ValueData {
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Number(f64),
    String(String),
    Time(NaiveTime),
}

impl Value {
    /// Creates a boolean value.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self(ValueData::Boolean(value))
    }

    /// Creates a date value from the UTC calendar date of the given instant.
    ///
    /// Time-of-day is discarded here, so two instants on the same UTC day
    /// produce equal values.
    #[must_use]
    pub fn date(timestamp: DateTime<Utc>) -> Self {
        Self(ValueData::Date(timestamp.date_naive()))
    }

    /// Creates a date-time value holding the full absolute instant.
    #[must_use]
    pub fn date_time(timestamp: DateTime<Utc>) -> Self {
        Self(ValueData::DateTime(timestamp))
    }

    /// Creates a number value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is `NaN` or infinite; non-finite numbers have no
    /// JSON representation.
    #[must_use]
    pub fn number(value: f64) -> Self {
        assert!(
            value.is_finite(),
            "attribute number values must be finite, got {value}"
        );
        Self(ValueData::Number(value))
    }

    /// Creates a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self(ValueData::String(value.into()))
    }

    /// Creates a time value from the UTC wall-clock reading of the given
    /// instant.
    ///
    /// The calendar date and sub-second precision are discarded here.
    /// Callers must supply an instant already expressed in the intended
    /// zone; no zone conversion happens beyond reading the UTC fields.
    #[must_use]
    pub fn time(timestamp: DateTime<Utc>) -> Self {
        let time = timestamp
            .time()
            .with_nanosecond(0)
            .expect("zeroing the nanosecond field of a valid time cannot fail");
        Self(ValueData::Time(time))
    }

    /// Returns the kind tag of the active variant.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self.0 {
            ValueData::Boolean(_) => ValueKind::Boolean,
            ValueData::Date(_) => ValueKind::Date,
            ValueData::DateTime(_) => ValueKind::DateTime,
            ValueData::Number(_) => ValueKind::Number,
            ValueData::String(_) => ValueKind::String,
            ValueData::Time(_) => ValueKind::Time,
        }
    }
}

/// One of the six data types supported by Insights servers.
///
/// Doubles as the wire tag of an encoded [`Value`] and as the declared
/// type of an attribute-type schema declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    Boolean,
    Date,
    DateTime,
    Number,
    String,
    Time,
}

impl ValueKind {
    /// Returns the wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Number => "number",
            Self::String => "string",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The wire shape a target server generation expects for typed values.
///
/// Injected into the encoder at client construction and applied uniformly
/// to all six kinds; both conventions stay testable side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingConvention {
    /// Every encoded value is a string: booleans as `"true"`/`"false"`,
    /// numbers as decimal text, dates as `"YYYY-MM-DD"`, times as
    /// `"HH:MM:SSZ"`, date-times as RFC 3339.
    Stringified,
    /// Encoded values keep their natural JSON shape; dates, times and
    /// date-times become structured calendar objects.
    Structured,
}

impl EncodingConvention {
    /// Encodes a value into its `{type, value}` wire form.
    ///
    /// Total and deterministic: encoding a well-formed value never fails,
    /// and encoding the same value twice yields identical output.
    #[must_use]
    pub fn encode(self, value: &Value) -> WireValue {
        let kind = value.kind();
        let value = match (&value.0, self) {
            (ValueData::Boolean(b), Self::Stringified) => json!(b.to_string()),
            (ValueData::Boolean(b), Self::Structured) => json!(b),
            (ValueData::Date(d), Self::Stringified) => {
                json!(d.format("%Y-%m-%d").to_string())
            }
            (ValueData::Date(d), Self::Structured) => json!({
                "day": d.day(),
                "month": d.month(),
                "year": d.year(),
            }),
            (ValueData::DateTime(t), Self::Stringified) => {
                json!(t.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            (ValueData::DateTime(t), Self::Structured) => utc_parts(t),
            (ValueData::Number(n), Self::Stringified) => json!(decimal_text(*n)),
            (ValueData::Number(n), Self::Structured) => {
                json!(finite_number(*n))
            }
            (ValueData::String(s), _) => json!(s),
            (ValueData::Time(t), Self::Stringified) => {
                json!(format!("{:02}:{:02}:{:02}Z", t.hour(), t.minute(), t.second()))
            }
            (ValueData::Time(t), Self::Structured) => json!({
                "hour": t.hour(),
                "minute": t.minute(),
                "second": t.second(),
            }),
        };
        WireValue { kind, value }
    }
}

/// The `{type, value}` pair a [`Value`] encodes to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireValue {
    /// Wire tag matching the source value's kind.
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Generation-specific JSON shape of the value.
    pub value: serde_json::Value,
}

/// Canonical decimal text for a finite double; round-trips exactly.
fn decimal_text(value: f64) -> String {
    finite_number(value).to_string()
}

fn finite_number(value: f64) -> serde_json::Number {
    // Constructors reject non-finite input, so this cannot fail.
    serde_json::Number::from_f64(value).expect("number values are finite by construction")
}

/// Structured `{day, hour, minute, month, second, year}` object for an
/// absolute UTC instant.
pub(crate) fn utc_parts(timestamp: &DateTime<Utc>) -> serde_json::Value {
    json!({
        "day": timestamp.day(),
        "hour": timestamp.hour(),
        "minute": timestamp.minute(),
        "month": timestamp.month(),
        "second": timestamp.second(),
        "year": timestamp.year(),
    })
}
