use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// `timestamp` columns carry no zone and are written in UTC, so they are
/// rendered as UTC with millisecond precision, e.g. `2024-01-02T03:04:05.678Z`.
pub struct IsoTimestampSerde;

impl IsoTimestampSerde {
  pub fn serialize<S>(val: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    String::serialize(&val.format(FORMAT).to_string(), serializer)
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
  where
    D: Deserializer<'de>,
  {
    NaiveDateTime::parse_from_str(&String::deserialize(deserializer)?, PARSE_FORMAT)
      .map_err(|e| de::Error::custom(format!("timestamp from string error: {}", e)))
  }
}
