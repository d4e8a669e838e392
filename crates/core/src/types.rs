/// Entity ids are opaque strings issued by the identity provider or the seed data.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (report dates) carry no time zone.
pub type Date = chrono::NaiveDate;
