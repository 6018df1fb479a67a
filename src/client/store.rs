use chrono::{DateTime, Utc};

use super::actions::Action;
use super::alert::{Alert, AlertType};
use super::reducers::{self, AppState};

/// Owns the client state. Passed explicitly to whatever renders it;
/// there is no process-wide instance.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {:?}", action);
        self.state = reducers::reduce(&self.state, &action);
    }

    /// Back to the initial snapshot, e.g. when the session ends.
    pub fn reset(&mut self) {
        self.state = AppState::default();
    }

    pub fn set_alert(&mut self, msg: impl Into<String>, alert_type: AlertType) {
        self.dispatch(Action::SetAlert(Alert::new(msg, alert_type, Utc::now())));
    }

    /// Drops every alert whose deadline has passed. Returns how many went away.
    pub fn expire_alerts(&mut self, now: DateTime<Utc>) -> usize {
        let expired: Vec<_> = self
            .state
            .alerts
            .iter()
            .filter(|a| a.is_expired(now))
            .map(|a| a.id)
            .collect();

        for id in &expired {
            self.dispatch(Action::RemoveAlert(*id));
        }
        expired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expire_alerts() {
        let now = Utc::now();
        let mut store = Store::new();
        store.dispatch(Action::SetAlert(Alert::with_timeout(
            "short",
            AlertType::Success,
            now,
            Duration::seconds(1),
        )));
        store.dispatch(Action::SetAlert(Alert::with_timeout(
            "long",
            AlertType::Danger,
            now,
            Duration::seconds(60),
        )));

        assert_eq!(store.expire_alerts(now), 0);
        assert_eq!(store.expire_alerts(now + Duration::seconds(2)), 1);
        assert_eq!(store.state().alerts.len(), 1);
        assert_eq!(store.state().alerts[0].msg, "long");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut store = Store::new();
        store.dispatch(Action::LoginSuccess { token: "t".to_string() });
        store.set_alert("Welcome", AlertType::Success);

        store.reset();

        assert_eq!(store.state(), &AppState::default());
    }
}
