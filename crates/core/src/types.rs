/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date of a campaign day (no time-of-day, no zone).
pub type CampaignDate = chrono::NaiveDate;
