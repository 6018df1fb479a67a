use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// How long an alert stays on screen unless a caller picks another timeout
pub const DEFAULT_ALERT_TIMEOUT_MS: i64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Danger,
}

/// Ephemeral notice. Removal happens through `Store::expire_alerts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub msg: String,
    pub alert_type: AlertType,
    pub expires_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(msg: impl Into<String>, alert_type: AlertType, now: DateTime<Utc>) -> Self {
        Self::with_timeout(msg, alert_type, now, Duration::milliseconds(DEFAULT_ALERT_TIMEOUT_MS))
    }

    pub fn with_timeout(
        msg: impl Into<String>,
        alert_type: AlertType,
        now: DateTime<Utc>,
        timeout: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            msg: msg.into(),
            alert_type,
            expires_at: now + timeout,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_expiry() {
        let now = Utc::now();
        let alert = Alert::new("Post Created", AlertType::Success, now);

        assert!(!alert.is_expired(now));
        assert!(alert.is_expired(now + Duration::milliseconds(DEFAULT_ALERT_TIMEOUT_MS)));
    }

    #[test]
    fn test_ids_are_unique() {
        let now = Utc::now();
        let a = Alert::new("a", AlertType::Danger, now);
        let b = Alert::new("a", AlertType::Danger, now);

        assert_ne!(a.id, b.id);
    }
}
