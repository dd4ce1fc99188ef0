//! Team member entity - one row of the team roster

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::PresenceStatus;

/// Team member as reported by the roster endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub full_name: String,
    /// Label of the member's current status (see [`PresenceStatus::label`])
    pub status: String,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    /// Create a new TeamMember
    pub fn new(id: i64, full_name: impl Into<String>, status: PresenceStatus) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            status: status.label().to_string(),
            updated_at: Utc::now(),
        }
    }

    /// Resolve the status label to a known status, if it is one
    pub fn presence_status(&self) -> Option<PresenceStatus> {
        PresenceStatus::from_label(&self.status)
    }

    /// Check whether the member reports the given status
    #[inline]
    pub fn has_status(&self, status: PresenceStatus) -> bool {
        self.status == status.label()
    }

    /// First letter of each space separated part of the name
    pub fn initials(&self) -> String {
        self.full_name
            .split(' ')
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Format how long ago `updated_at` was, relative to `now`
pub fn relative_time(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(updated_at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        updated_at.format("%Y-%m-%d").to_string()
    }
}

/// The roster endpoint may emit timestamps without an offset; those are UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}
