pub mod alert;
pub mod auth;
pub mod post;
pub mod profile;

pub use alert::AlertState;
pub use auth::AuthState;
pub use post::PostState;
pub use profile::ProfileState;

use super::actions::Action;

/// Whole client state; one slice per resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub alerts: AlertState,
    pub post: PostState,
    pub profile: ProfileState,
}

pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        auth: auth::reduce(&state.auth, action),
        alerts: alert::reduce(&state.alerts, action),
        post: post::reduce(&state.post, action),
        profile: profile::reduce(&state.profile, action),
    }
}
