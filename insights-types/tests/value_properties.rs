//! Property-based tests for the typed value model.
//!
//! These verify the encoder's core contracts over the whole input domain:
//! - Tag consistency: the wire tag always matches the constructor's kind
//! - Idempotence: encoding the same value twice is byte-identical
//! - Field discarding: dates ignore time-of-day, times ignore the calendar
//! - Number round-trip: the encoded form recovers the exact double

use chrono::{DateTime, TimeZone, Utc};
use insights_types::{EncodingConvention, Value, ValueKind};
use proptest::prelude::*;

// Seconds range covering 1970..2100; wide enough to exercise month and
// day boundaries without leaving chrono's valid range.
const MAX_EPOCH_SECS: i64 = 4_102_444_800;

fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0..MAX_EPOCH_SECS).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn convention_strategy() -> impl Strategy<Value = EncodingConvention> {
    prop_oneof![
        Just(EncodingConvention::Stringified),
        Just(EncodingConvention::Structured),
    ]
}

fn finite_number_strategy() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |x| x.is_finite())
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::boolean),
        finite_number_strategy().prop_map(Value::number),
        prop::string::string_regex("[a-zA-Z0-9 ]{0,40}")
            .unwrap()
            .prop_map(|s| Value::string(s)),
        timestamp_strategy().prop_map(Value::date),
        timestamp_strategy().prop_map(Value::time),
        timestamp_strategy().prop_map(Value::date_time),
    ]
}

proptest! {
    /// The wire tag always matches the active variant's kind.
    #[test]
    fn tag_matches_kind(value in value_strategy(), convention in convention_strategy()) {
        let encoded = convention.encode(&value);
        prop_assert_eq!(encoded.kind, value.kind());
    }

    /// Encoding is pure: two encodings of one value are byte-identical.
    #[test]
    fn encoding_is_idempotent(value in value_strategy(), convention in convention_strategy()) {
        let first = serde_json::to_string(&convention.encode(&value)).unwrap();
        let second = serde_json::to_string(&convention.encode(&value)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Any two instants on the same UTC day encode to the same date.
    #[test]
    fn date_ignores_time_of_day(
        day in 0..(MAX_EPOCH_SECS / 86_400),
        first_second in 0i64..86_400,
        second_second in 0i64..86_400,
        convention in convention_strategy(),
    ) {
        let first = Utc.timestamp_opt(day * 86_400 + first_second, 0).unwrap();
        let second = Utc.timestamp_opt(day * 86_400 + second_second, 0).unwrap();
        prop_assert_eq!(
            convention.encode(&Value::date(first)),
            convention.encode(&Value::date(second))
        );
    }

    /// Any two instants with the same UTC wall-clock reading encode to the
    /// same time, whatever their calendar dates.
    #[test]
    fn time_ignores_calendar_date(
        first_day in 0..(MAX_EPOCH_SECS / 86_400),
        second_day in 0..(MAX_EPOCH_SECS / 86_400),
        second_of_day in 0i64..86_400,
        convention in convention_strategy(),
    ) {
        let first = Utc.timestamp_opt(first_day * 86_400 + second_of_day, 0).unwrap();
        let second = Utc.timestamp_opt(second_day * 86_400 + second_of_day, 0).unwrap();
        prop_assert_eq!(
            convention.encode(&Value::time(first)),
            convention.encode(&Value::time(second))
        );
    }

    /// The stringified decimal text recovers the exact double.
    #[test]
    fn number_text_round_trips(number in finite_number_strategy()) {
        let encoded = EncodingConvention::Stringified.encode(&Value::number(number));
        let text = encoded.value.as_str().unwrap();
        prop_assert_eq!(text.parse::<f64>().unwrap(), number);
    }

    /// The structured JSON number recovers the exact double.
    #[test]
    fn number_json_round_trips(number in finite_number_strategy()) {
        let encoded = EncodingConvention::Structured.encode(&Value::number(number));
        prop_assert_eq!(encoded.value.as_f64().unwrap(), number);
    }

    /// All six tags stay within the closed kind set.
    #[test]
    fn tags_are_closed(value in value_strategy(), convention in convention_strategy()) {
        let tag = convention.encode(&value).kind;
        prop_assert!(matches!(
            tag,
            ValueKind::Boolean
                | ValueKind::Date
                | ValueKind::DateTime
                | ValueKind::Number
                | ValueKind::String
                | ValueKind::Time
        ));
    }
}
