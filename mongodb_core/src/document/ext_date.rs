//! Serde helpers for BSON datetimes in extended JSON.
//!
//! Use with `#[serde(with = "ext_date")]` on a `DateTime<Utc>` field. Writes
//! `{"$date": "<RFC 3339>"}` and reads the relaxed, canonical and legacy
//! spellings:
//! `{"$date": "2019-01-01T00:00:00Z"}`, `{"$date": {"$numberLong": "1546300800000"}}`
//! and `{"$date": 1546300800000}`.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
struct DateOut {
    #[serde(rename = "$date")]
    date: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DateRepr {
    Rfc3339(DateTime<Utc>),
    Millis(i64),
    NumberLong {
        #[serde(rename = "$numberLong")]
        number_long: String,
    },
}

#[derive(Deserialize)]
struct DateIn {
    #[serde(rename = "$date")]
    date: DateRepr,
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    DateOut {
        date: value.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
    .serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let millis = match DateIn::deserialize(deserializer)?.date {
        DateRepr::Rfc3339(date) => return Ok(date),
        DateRepr::Millis(millis) => millis,
        DateRepr::NumberLong { number_long } => number_long
            .parse::<i64>()
            .map_err(|e| de::Error::custom(format!("invalid $numberLong: {}", e)))?,
    };
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| de::Error::custom(format!("datetime out of range: {}", millis)))
}
