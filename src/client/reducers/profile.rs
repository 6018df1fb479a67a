use crate::client::actions::{Action, ErrorPayload};
use crate::models::ProfileResponse;
use crate::services::github_service::GithubRepo;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub profile: Option<ProfileResponse>,
    pub profiles: Vec<ProfileResponse>,
    pub repos: Vec<GithubRepo>,
    pub loading: bool,
    pub error: Option<ErrorPayload>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            profile: None,
            profiles: Vec::new(),
            repos: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

pub fn reduce(state: &ProfileState, action: &Action) -> ProfileState {
    match action {
        Action::GetProfile(profile) | Action::UpdateProfile(profile) => ProfileState {
            profile: Some(profile.clone()),
            loading: false,
            ..state.clone()
        },
        Action::GetProfiles(profiles) => ProfileState {
            profiles: profiles.clone(),
            loading: false,
            ..state.clone()
        },
        Action::GetRepos(repos) => ProfileState {
            repos: repos.clone(),
            loading: false,
            ..state.clone()
        },
        Action::ProfileError(error) => ProfileState {
            error: Some(error.clone()),
            profile: None,
            loading: false,
            ..state.clone()
        },
        Action::ClearProfile => ProfileState {
            profile: None,
            repos: Vec::new(),
            loading: false,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Social;

    fn profile(status: &str) -> ProfileResponse {
        ProfileResponse {
            id: "p1".to_string(),
            user: None,
            company: None,
            website: None,
            location: None,
            status: status.to_string(),
            skills: vec!["rust".to_string()],
            bio: None,
            githubusername: Some("octocat".to_string()),
            social: Social::default(),
            experience: Vec::new(),
            education: Vec::new(),
            date: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn repo() -> GithubRepo {
        GithubRepo {
            id: 1,
            name: "hello".to_string(),
            html_url: "https://github.com/octocat/hello".to_string(),
            description: None,
            stargazers_count: 0,
            watchers_count: 0,
            forks_count: 0,
        }
    }

    #[test]
    fn test_update_replaces_profile() {
        let state = reduce(&ProfileState::default(), &Action::GetProfile(profile("Developer")));
        let next = reduce(&state, &Action::UpdateProfile(profile("Senior Developer")));

        assert_eq!(next.profile.map(|p| p.status), Some("Senior Developer".to_string()));
        assert_eq!(state.profile.map(|p| p.status), Some("Developer".to_string()));
    }

    #[test]
    fn test_clear_drops_profile_and_repos() {
        let state = reduce(&ProfileState::default(), &Action::GetProfile(profile("Developer")));
        let state = reduce(&state, &Action::GetRepos(vec![repo()]));
        let state = reduce(&state, &Action::GetProfiles(vec![profile("Developer")]));

        let cleared = reduce(&state, &Action::ClearProfile);
        assert!(cleared.profile.is_none());
        assert!(cleared.repos.is_empty());
        assert_eq!(cleared.profiles.len(), 1);
    }

    #[test]
    fn test_error_clears_profile() {
        let state = reduce(&ProfileState::default(), &Action::GetProfile(profile("Developer")));
        let next = reduce(
            &state,
            &Action::ProfileError(ErrorPayload {
                msg: "There is no profile for this user".to_string(),
                status: 400,
            }),
        );

        assert!(next.profile.is_none());
        assert_eq!(next.error.map(|e| e.status), Some(400));
    }
}
