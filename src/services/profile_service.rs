use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::database::DocumentStore;
use crate::models::{
    EducationInput, ExperienceInput, Profile, ProfileInput, ProfileResponse, ProfileUpdate,
    UserSummary,
};
use crate::utils::{parse_object_id, AppError};

async fn with_owner(
    store: &dyn DocumentStore,
    profile: Profile,
) -> Result<ProfileResponse, AppError> {
    let owner = store.find_user(&profile.user).await?;
    Ok(ProfileResponse::new(profile, owner.as_ref().map(UserSummary::from)))
}

async fn own_profile(store: &dyn DocumentStore, user_id: &ObjectId) -> Result<Profile, AppError> {
    store
        .find_profile_by_user(user_id)
        .await?
        .ok_or(AppError::NoProfile)
}

async fn save_profile(store: &dyn DocumentStore, profile: &Profile) -> Result<(), AppError> {
    if store.replace_profile(profile).await? {
        Ok(())
    } else {
        log::warn!("⚠️ Profile of {} changed between read and write", profile.user);
        Err(AppError::ConcurrentModification)
    }
}

/// Inserts a first profile. When a concurrent request inserted one in the
/// meantime, the update is merged into that profile instead.
async fn create_profile(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    update: ProfileUpdate,
) -> Result<Profile, AppError> {
    let mut created = Profile::new(*user_id);
    created.apply(update.clone());

    match store.insert_profile(&created).await {
        Ok(id) => {
            created.id = Some(id);
            Ok(created)
        }
        Err(AppError::DuplicateKey(_)) => {
            log::warn!("⚠️ Profile of {} was created concurrently, merging", user_id);
            let mut existing = store
                .find_profile_by_user(user_id)
                .await?
                .ok_or(AppError::ConcurrentModification)?;
            existing.apply(update);
            save_profile(store, &existing).await?;
            Ok(existing)
        }
        Err(e) => Err(e),
    }
}

/// Creates the caller's profile, or merges the supplied fields into it.
pub async fn upsert_profile(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    input: ProfileInput,
) -> Result<ProfileResponse, AppError> {
    input.validate()?;
    let update = input.normalize();

    let profile = match store.find_profile_by_user(user_id).await? {
        Some(mut existing) => {
            existing.apply(update);
            save_profile(store, &existing).await?;
            existing
        }
        None => create_profile(store, user_id, update).await?,
    };

    with_owner(store, profile).await
}

pub async fn get_my_profile(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
) -> Result<ProfileResponse, AppError> {
    let profile = own_profile(store, user_id).await?;
    with_owner(store, profile).await
}

pub async fn list_profiles(store: &dyn DocumentStore) -> Result<Vec<ProfileResponse>, AppError> {
    let profiles = store.list_profiles().await?;
    let owner_ids: Vec<ObjectId> = profiles.iter().map(|p| p.user).collect();

    let owners: HashMap<ObjectId, UserSummary> = store
        .find_users(&owner_ids)
        .await?
        .iter()
        .map(|user| (user.object_id(), UserSummary::from(user)))
        .collect();

    Ok(profiles
        .into_iter()
        .map(|profile| {
            let owner = owners.get(&profile.user).cloned();
            ProfileResponse::new(profile, owner)
        })
        .collect())
}

pub async fn get_profile_by_user(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<ProfileResponse, AppError> {
    let user_id = parse_object_id(user_id, AppError::ProfileNotFound)?;
    let profile = store
        .find_profile_by_user(&user_id)
        .await?
        .ok_or(AppError::ProfileNotFound)?;
    with_owner(store, profile).await
}

/// Removes the caller's profile and account. Their posts and comments stay.
pub async fn delete_account(store: &dyn DocumentStore, user_id: &ObjectId) -> Result<(), AppError> {
    let removed_profile = store.delete_profile_by_user(user_id).await?;
    let removed_user = store.delete_user(user_id).await?;
    log::info!(
        "🗑️  Account {} removed (profile: {}, user: {})",
        user_id,
        removed_profile,
        removed_user
    );
    Ok(())
}

pub async fn add_experience(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    input: ExperienceInput,
) -> Result<ProfileResponse, AppError> {
    let experience = input.into_experience()?;
    let mut profile = own_profile(store, user_id).await?;

    profile.add_experience(experience);
    save_profile(store, &profile).await?;

    with_owner(store, profile).await
}

/// Unknown ids leave the profile untouched and still succeed.
pub async fn remove_experience(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    exp_id: &str,
) -> Result<ProfileResponse, AppError> {
    let mut profile = own_profile(store, user_id).await?;

    let removed = match ObjectId::parse_str(exp_id) {
        Ok(id) => profile.remove_experience(&id),
        Err(_) => false,
    };

    if removed {
        save_profile(store, &profile).await?;
    } else {
        log::debug!("No experience {} on profile of {}", exp_id, user_id);
    }

    with_owner(store, profile).await
}

pub async fn add_education(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    input: EducationInput,
) -> Result<ProfileResponse, AppError> {
    let education = input.into_education()?;
    let mut profile = own_profile(store, user_id).await?;

    profile.add_education(education);
    save_profile(store, &profile).await?;

    with_owner(store, profile).await
}

pub async fn remove_education(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    edu_id: &str,
) -> Result<ProfileResponse, AppError> {
    let mut profile = own_profile(store, user_id).await?;

    let removed = match ObjectId::parse_str(edu_id) {
        Ok(id) => profile.remove_education(&id),
        Err(_) => false,
    };

    if removed {
        save_profile(store, &profile).await?;
    } else {
        log::debug!("No education {} on profile of {}", edu_id, user_id);
    }

    with_owner(store, profile).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::{SkillsInput, User};

    async fn seed_user(store: &MemoryStore, name: &str) -> ObjectId {
        let user = User {
            id: None,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "hash".to_string(),
            avatar: Some("https://avatars.example.com/a".to_string()),
            date: 0,
        };
        store.insert_user(&user).await.unwrap()
    }

    fn basic_input() -> ProfileInput {
        ProfileInput {
            status: Some("Developer".to_string()),
            skills: Some(SkillsInput::Csv("rust, mongodb".to_string())),
            ..Default::default()
        }
    }

    fn experience(title: &str) -> ExperienceInput {
        ExperienceInput {
            title: Some(title.to_string()),
            company: Some("Acme".to_string()),
            from: Some("2021-03-01".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates_single_profile() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice").await;

        let mut first = basic_input();
        first.twitter = Some("x.com/a".to_string());
        let created = upsert_profile(&store, &alice, first).await.unwrap();
        assert_eq!(created.social.twitter.as_deref(), Some("http://x.com/a"));
        assert_eq!(created.user.as_ref().map(|u| u.name.as_str()), Some("Alice"));

        let mut second = basic_input();
        second.twitter = Some("https://x.com/a".to_string());
        second.status = Some("Lead".to_string());
        let updated = upsert_profile(&store, &alice, second).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, "Lead");
        assert_eq!(updated.social.twitter.as_deref(), Some("https://x.com/a"));
        assert_eq!(store.list_profiles().await.unwrap().len(), 1);

        let mine = get_my_profile(&store, &alice).await.unwrap();
        assert_eq!(mine.skills, vec!["rust", "mongodb"]);
    }

    #[tokio::test]
    async fn test_blank_status_creates_nothing() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice").await;

        let input = ProfileInput {
            status: Some("   ".to_string()),
            skills: Some(SkillsInput::Csv("rust".to_string())),
            ..Default::default()
        };
        let err = upsert_profile(&store, &alice, input).await.unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors[0].param, "status");
                assert_eq!(errors[0].msg, "Status is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(store.find_profile_by_user(&alice).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_first_insert_merges() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice").await;
        let existing = upsert_profile(&store, &alice, basic_input()).await.unwrap();

        let mut late = basic_input();
        late.status = Some("Lead".to_string());
        late.company = Some("Acme".to_string());
        let merged = create_profile(&store, &alice, late.normalize()).await.unwrap();

        assert_eq!(merged.id.map(|id| id.to_hex()), Some(existing.id.clone()));
        assert_eq!(merged.status, "Lead");
        assert_eq!(merged.company.as_deref(), Some("Acme"));
        assert_eq!(store.list_profiles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_profile_errors() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice").await;

        assert!(matches!(get_my_profile(&store, &alice).await, Err(AppError::NoProfile)));
        assert!(matches!(
            get_profile_by_user(&store, &alice.to_hex()).await,
            Err(AppError::ProfileNotFound)
        ));
        assert!(matches!(
            get_profile_by_user(&store, "not-an-id").await,
            Err(AppError::ProfileNotFound)
        ));
        assert!(matches!(
            add_experience(&store, &alice, experience("Engineer")).await,
            Err(AppError::NoProfile)
        ));
    }

    #[tokio::test]
    async fn test_list_joins_owner_summaries() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        upsert_profile(&store, &alice, basic_input()).await.unwrap();
        upsert_profile(&store, &bob, basic_input()).await.unwrap();

        let mut names: Vec<String> = list_profiles(&store)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|p| p.user.map(|u| u.name))
            .collect();
        names.sort();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_experience_add_and_remove() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice").await;
        upsert_profile(&store, &alice, basic_input()).await.unwrap();

        add_experience(&store, &alice, experience("Intern")).await.unwrap();
        let profile = add_experience(&store, &alice, experience("Engineer")).await.unwrap();
        assert_eq!(profile.experience[0].title, "Engineer");

        let unchanged = remove_experience(&store, &alice, &ObjectId::new().to_hex())
            .await
            .unwrap();
        assert_eq!(unchanged, profile);

        let intern_id = profile.experience[1].id.clone();
        let after = remove_experience(&store, &alice, &intern_id).await.unwrap();
        assert_eq!(after.experience.len(), 1);
        assert_eq!(after.experience[0].title, "Engineer");
    }

    #[tokio::test]
    async fn test_education_add_and_remove() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice").await;
        upsert_profile(&store, &alice, basic_input()).await.unwrap();

        let profile = add_education(
            &store,
            &alice,
            EducationInput {
                school: Some("MIT".to_string()),
                degree: Some("BSc".to_string()),
                fieldofstudy: Some("CS".to_string()),
                from: Some("2015-09-01".to_string()),
                to: Some("2019-06-01".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(profile.education.len(), 1);

        let edu_id = profile.education[0].id.clone();
        let after = remove_education(&store, &alice, &edu_id).await.unwrap();
        assert!(after.education.is_empty());
    }

    #[tokio::test]
    async fn test_delete_account_removes_profile_and_user() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice").await;
        upsert_profile(&store, &alice, basic_input()).await.unwrap();

        delete_account(&store, &alice).await.unwrap();

        assert!(store.find_user(&alice).await.unwrap().is_none());
        assert!(store.find_profile_by_user(&alice).await.unwrap().is_none());
    }
}
