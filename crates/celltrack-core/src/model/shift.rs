use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bounded window during which a user records production
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub user_id: String,
    /// Cell the operator is stationed at, when known
    pub cell_id: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl Shift {
    /// Open a new active shift
    pub fn start(
        id: String,
        user_id: String,
        cell_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            cell_id,
            started_at: now,
            ended_at: None,
            active: true,
        }
    }

    /// Close the shift at `now`
    pub fn end(&mut self, now: DateTime<Utc>) {
        self.ended_at = Some(now);
        self.active = false;
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Elapsed minutes, up to `now` while the shift is still open
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        let until = self.ended_at.unwrap_or(now);
        (until - self.started_at).num_minutes()
    }
}
