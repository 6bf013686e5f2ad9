use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ISO-8601 with millisecond precision, as used at every API boundary.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Author identity attached to snapshots and tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Author name (audit event user, or a service principal).
    pub name: String,
    /// Author email.
    pub email: String,
    /// When the signature was made.
    pub when: DateTime<Utc>,
}

impl Signature {
    /// Create a signature stamped with the current time.
    pub fn now(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when: Utc::now(),
        }
    }

    /// Format the timestamp in the API's ISO-8601 millisecond form.
    pub fn when_iso(&self) -> String {
        self.when.format(TIMESTAMP_FORMAT).to_string()
    }
}
