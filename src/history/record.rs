use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::amount::GbAmount;
use crate::cleanup::CleanupSessionResult;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of cleanup history: when it ran and the free memory around it,
/// in gigabytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Timestamp", with = "timestamp_text")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Free Memory Before")]
    pub free_before: GbAmount,
    #[serde(rename = "Free Memory After")]
    pub free_after: GbAmount,
    /// Magnitude of the change; the sign is not kept.
    #[serde(rename = "Freed Memory")]
    pub freed: GbAmount,
}

impl HistoryRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        free_before: GbAmount,
        free_after: GbAmount,
        freed: GbAmount,
    ) -> Self {
        // Stored text has whole seconds only.
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self {
            timestamp,
            free_before,
            free_after,
            freed: freed.abs(),
        }
    }

    /// Project a successful session into a history row stamped with the
    /// session's finish time. Failed sessions have nothing to record.
    pub fn from_session(session: &CleanupSessionResult) -> Option<Self> {
        if !session.success() {
            return None;
        }
        let before = session.memory_before()?;
        let after = session.memory_after()?;
        let freed = session.freed_gb()?;

        Some(Self::new(
            session.finished_at().naive_local(),
            GbAmount::from_gb(before.free_gb()),
            GbAmount::from_gb(after.free_gb()),
            GbAmount::from_gb(freed),
        ))
    }

    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

mod timestamp_text {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
