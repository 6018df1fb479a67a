use crate::client::actions::Action;
use crate::client::alert::Alert;

pub type AlertState = Vec<Alert>;

pub fn reduce(state: &AlertState, action: &Action) -> AlertState {
    match action {
        Action::SetAlert(alert) => {
            let mut next = state.clone();
            next.push(alert.clone());
            next
        }
        Action::RemoveAlert(id) => state.iter().filter(|a| a.id != *id).cloned().collect(),
        _ => state.clone(),
    }
}
