mod iso_timestamp_serde;

pub use self::iso_timestamp_serde::IsoTimestampSerde;
