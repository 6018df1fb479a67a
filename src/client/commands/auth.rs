use super::alert_failure;
use crate::client::actions::{Action, ErrorPayload};
use crate::client::api_client::ApiClient;
use crate::client::store::Store;
use crate::models::UserResponse;
use crate::services::auth_service::{LoginRequest, RegisterRequest, TokenResponse};

/// Resolves the current session from the token held by `api`.
pub async fn load_user(store: &mut Store, api: &ApiClient) {
    if api.token().is_none() {
        store.dispatch(Action::AuthError(ErrorPayload {
            msg: "No token, authorization denied".to_string(),
            status: 401,
        }));
        return;
    }

    match api.get::<UserResponse>("/api/auth").await {
        Ok(user) => store.dispatch(Action::UserLoaded(user)),
        Err(err) => {
            log::debug!("Session check failed: {}", err);
            store.dispatch(Action::AuthError(ErrorPayload::from(&err)));
        }
    }
}

pub async fn register(store: &mut Store, api: &mut ApiClient, request: RegisterRequest) {
    match api.post::<_, TokenResponse>("/api/users", &request).await {
        Ok(TokenResponse { token }) => {
            api.set_token(Some(token.clone()));
            store.dispatch(Action::RegisterSuccess { token });
            load_user(store, api).await;
        }
        Err(err) => {
            alert_failure(store, &err);
            store.dispatch(Action::RegisterFail(ErrorPayload::from(&err)));
        }
    }
}

pub async fn login(store: &mut Store, api: &mut ApiClient, email: &str, password: &str) {
    let request = LoginRequest {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
    };

    match api.post::<_, TokenResponse>("/api/auth", &request).await {
        Ok(TokenResponse { token }) => {
            api.set_token(Some(token.clone()));
            store.dispatch(Action::LoginSuccess { token });
            load_user(store, api).await;
        }
        Err(err) => {
            alert_failure(store, &err);
            store.dispatch(Action::LoginFail(ErrorPayload::from(&err)));
        }
    }
}

pub fn logout(store: &mut Store, api: &mut ApiClient) {
    api.set_token(None);
    store.dispatch(Action::ClearProfile);
    store.dispatch(Action::Logout);
}
