use crate::client::actions::{Action, ErrorPayload};
use crate::models::UserResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    /// `None` until the first auth check resolves
    pub is_authenticated: Option<bool>,
    pub loading: bool,
    pub user: Option<UserResponse>,
    /// Last failed auth request; cleared by any success or sign-out
    pub error: Option<ErrorPayload>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            is_authenticated: None,
            loading: true,
            user: None,
            error: None,
        }
    }
}

fn signed_out() -> AuthState {
    AuthState {
        token: None,
        is_authenticated: Some(false),
        loading: false,
        user: None,
        error: None,
    }
}

pub fn reduce(state: &AuthState, action: &Action) -> AuthState {
    match action {
        Action::UserLoaded(user) => AuthState {
            is_authenticated: Some(true),
            loading: false,
            user: Some(user.clone()),
            error: None,
            ..state.clone()
        },
        Action::RegisterSuccess { token } | Action::LoginSuccess { token } => AuthState {
            token: Some(token.clone()),
            is_authenticated: Some(true),
            loading: false,
            error: None,
            ..state.clone()
        },
        Action::RegisterFail(error) | Action::AuthError(error) | Action::LoginFail(error) => {
            AuthState {
                error: Some(error.clone()),
                ..signed_out()
            }
        }
        Action::Logout | Action::AccountDeleted => signed_out(),
        _ => state.clone(),
    }
}
