use serde_json::Value;

use super::alert_failure;
use crate::client::actions::{Action, ErrorPayload};
use crate::client::alert::AlertType;
use crate::client::api_client::{ApiClient, ApiError};
use crate::client::store::Store;
use crate::models::{EducationInput, ExperienceInput, ProfileInput, ProfileResponse};
use crate::services::github_service::GithubRepo;

fn fail(store: &mut Store, err: ApiError) {
    alert_failure(store, &err);
    store.dispatch(Action::ProfileError(ErrorPayload::from(&err)));
}

/// Loads the caller's own profile. A missing profile is an expected state,
/// so no alert is raised for it.
pub async fn get_current_profile(store: &mut Store, api: &ApiClient) {
    match api.get::<ProfileResponse>("/api/profile/me").await {
        Ok(profile) => store.dispatch(Action::GetProfile(profile)),
        Err(err) => store.dispatch(Action::ProfileError(ErrorPayload::from(&err))),
    }
}

pub async fn get_profiles(store: &mut Store, api: &ApiClient) {
    store.dispatch(Action::ClearProfile);
    match api.get::<Vec<ProfileResponse>>("/api/profile").await {
        Ok(profiles) => store.dispatch(Action::GetProfiles(profiles)),
        Err(err) => fail(store, err),
    }
}

pub async fn get_profile_by_id(store: &mut Store, api: &ApiClient, user_id: &str) {
    let path = format!("/api/profile/user/{}", user_id);
    match api.get::<ProfileResponse>(&path).await {
        Ok(profile) => store.dispatch(Action::GetProfile(profile)),
        Err(err) => fail(store, err),
    }
}

pub async fn get_github_repos(store: &mut Store, api: &ApiClient, username: &str) {
    let path = format!("/api/profile/github/{}", urlencoding::encode(username));
    match api.get::<Vec<GithubRepo>>(&path).await {
        Ok(repos) => store.dispatch(Action::GetRepos(repos)),
        Err(err) => fail(store, err),
    }
}

/// `edit` only changes the wording of the success alert.
pub async fn create_profile(store: &mut Store, api: &ApiClient, input: &ProfileInput, edit: bool) {
    match api.post::<_, ProfileResponse>("/api/profile", input).await {
        Ok(profile) => {
            store.dispatch(Action::GetProfile(profile));
            let msg = if edit { "Profile Updated" } else { "Profile Created" };
            store.set_alert(msg, AlertType::Success);
        }
        Err(err) => fail(store, err),
    }
}

pub async fn add_experience(store: &mut Store, api: &ApiClient, input: &ExperienceInput) {
    update(store, api.put("/api/profile/experience", input).await, "Experience Added");
}

pub async fn add_education(store: &mut Store, api: &ApiClient, input: &EducationInput) {
    update(store, api.put("/api/profile/education", input).await, "Education Added");
}

pub async fn delete_experience(store: &mut Store, api: &ApiClient, exp_id: &str) {
    let path = format!("/api/profile/experience/{}", exp_id);
    update(store, api.delete(&path).await, "Experience Removed");
}

pub async fn delete_education(store: &mut Store, api: &ApiClient, edu_id: &str) {
    let path = format!("/api/profile/education/{}", edu_id);
    update(store, api.delete(&path).await, "Education Removed");
}

fn update(store: &mut Store, result: Result<ProfileResponse, ApiError>, success: &str) {
    match result {
        Ok(profile) => {
            store.dispatch(Action::UpdateProfile(profile));
            store.set_alert(success, AlertType::Success);
        }
        Err(err) => fail(store, err),
    }
}

/// Removes the caller's profile and account, then ends the session.
pub async fn delete_account(store: &mut Store, api: &mut ApiClient) {
    match api.delete::<Value>("/api/profile").await {
        Ok(_) => {
            api.set_token(None);
            store.dispatch(Action::ClearProfile);
            store.dispatch(Action::AccountDeleted);
            store.set_alert("Your account has been permanently deleted", AlertType::Success);
        }
        Err(err) => fail(store, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile_json(experience: Value) -> Value {
        json!({
            "_id": "p1",
            "user": { "_id": "u1", "name": "Alice", "avatar": null },
            "company": null,
            "website": null,
            "location": null,
            "status": "Developer",
            "skills": ["rust"],
            "bio": null,
            "githubusername": null,
            "social": {},
            "experience": experience,
            "education": [],
            "date": "2024-01-01T00:00:00+00:00"
        })
    }

    #[tokio::test]
    async fn test_missing_profile_is_silent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/profile/me"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": "There is no profile for this user"
            })))
            .mount(&server)
            .await;

        let mut store = Store::new();
        get_current_profile(&mut store, &ApiClient::new(server.uri())).await;

        let state = store.state();
        assert!(state.alerts.is_empty());
        assert_eq!(state.profile.error.as_ref().map(|e| e.status), Some(400));
    }

    #[tokio::test]
    async fn test_add_experience_updates_profile() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/profile/experience"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(json!([{
                "_id": "e1",
                "title": "Engineer",
                "company": "Acme",
                "location": null,
                "from": "2020-01-01",
                "to": null,
                "current": true,
                "description": null
            }]))))
            .mount(&server)
            .await;

        let mut store = Store::new();
        let input = ExperienceInput {
            title: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            from: Some("2020-01-01".to_string()),
            current: Some(true),
            ..Default::default()
        };
        add_experience(&mut store, &ApiClient::new(server.uri()), &input).await;

        let state = store.state();
        let profile = state.profile.profile.as_ref().unwrap();
        assert_eq!(profile.experience[0].company, "Acme");
        assert_eq!(state.alerts[0].msg, "Experience Added");
    }

    #[tokio::test]
    async fn test_github_failure_alerts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/profile/github/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": "No Github profile found"
            })))
            .mount(&server)
            .await;

        let mut store = Store::new();
        get_github_repos(&mut store, &ApiClient::new(server.uri()), "ghost").await;

        let state = store.state();
        assert_eq!(state.alerts[0].msg, "No Github profile found");
        assert_eq!(state.alerts[0].alert_type, AlertType::Danger);
        assert!(state.profile.repos.is_empty());
    }

    #[tokio::test]
    async fn test_delete_account_ends_session() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/profile"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "msg": "User deleted" })),
            )
            .mount(&server)
            .await;

        let mut store = Store::new();
        store.dispatch(Action::LoginSuccess { token: "tok".to_string() });
        let mut api = ApiClient::new(server.uri());
        api.set_token(Some("tok".to_string()));

        delete_account(&mut store, &mut api).await;

        assert!(api.token().is_none());
        assert_eq!(store.state().auth.is_authenticated, Some(false));
        assert_eq!(store.state().alerts.len(), 1);
    }
}
