use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ConfirmationToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_on: NaiveDate,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
}

impl ConfirmationToken {
    /// A token issued on day D (expires_on = D + 1) is accepted on D and D + 1
    /// only. The comparison is by calendar date, so the window is narrower
    /// than 24 hours of wall-clock time at its edges.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        self.expires_on == today || self.expires_on == today + chrono::Days::new(1)
    }
}
