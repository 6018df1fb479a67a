//! In-process `DocumentStore` used by handler and service tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::DocumentStore;
use crate::models::{Post, Profile, User};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<ObjectId, User>>,
    posts: RwLock<HashMap<ObjectId, Post>>,
    profiles: RwLock<HashMap<ObjectId, Profile>>,
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal("store lock poisoned".to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts
    pub fn post_count(&self) -> usize {
        self.posts.read().map(|posts| posts.len()).unwrap_or(0)
    }

    /// Simulates a concurrent writer bumping a post's version.
    pub fn touch_post(&self, id: &ObjectId) {
        if let Ok(mut posts) = self.posts.write() {
            if let Some(post) = posts.get_mut(id) {
                post.version += 1;
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users.read().map_err(poisoned)?.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .map_err(poisoned)?
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn insert_user(&self, user: &User) -> Result<ObjectId, AppError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::DuplicateKey("email".to_string()));
        }
        let id = user.id.unwrap_or_else(ObjectId::new);
        let mut stored = user.clone();
        stored.id = Some(id);
        users.insert(id, stored);
        Ok(id)
    }

    async fn delete_user(&self, id: &ObjectId) -> Result<bool, AppError> {
        Ok(self.users.write().map_err(poisoned)?.remove(id).is_some())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let mut posts: Vec<Post> = self.posts.read().map_err(poisoned)?.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_post(&self, id: &ObjectId) -> Result<Option<Post>, AppError> {
        Ok(self.posts.read().map_err(poisoned)?.get(id).cloned())
    }

    async fn insert_post(&self, post: &Post) -> Result<ObjectId, AppError> {
        let id = post.id.unwrap_or_else(ObjectId::new);
        let mut stored = post.clone();
        stored.id = Some(id);
        self.posts.write().map_err(poisoned)?.insert(id, stored);
        Ok(id)
    }

    async fn replace_post(&self, post: &Post) -> Result<bool, AppError> {
        let id = post
            .id
            .ok_or_else(|| AppError::Internal("Cannot replace a post without _id".to_string()))?;
        let mut posts = self.posts.write().map_err(poisoned)?;
        match posts.get(&id) {
            Some(current) if current.version == post.version => {
                let mut next = post.clone();
                next.version += 1;
                posts.insert(id, next);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_post(&self, id: &ObjectId) -> Result<bool, AppError> {
        Ok(self.posts.write().map_err(poisoned)?.remove(id).is_some())
    }

    async fn find_profile_by_user(&self, user: &ObjectId) -> Result<Option<Profile>, AppError> {
        Ok(self
            .profiles
            .read()
            .map_err(poisoned)?
            .values()
            .find(|profile| &profile.user == user)
            .cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        Ok(self.profiles.read().map_err(poisoned)?.values().cloned().collect())
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<ObjectId, AppError> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        if profiles.values().any(|existing| existing.user == profile.user) {
            return Err(AppError::DuplicateKey("user".to_string()));
        }
        let id = profile.id.unwrap_or_else(ObjectId::new);
        let mut stored = profile.clone();
        stored.id = Some(id);
        profiles.insert(id, stored);
        Ok(id)
    }

    async fn replace_profile(&self, profile: &Profile) -> Result<bool, AppError> {
        let id = profile
            .id
            .ok_or_else(|| AppError::Internal("Cannot replace a profile without _id".to_string()))?;
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        match profiles.get(&id) {
            Some(current) if current.version == profile.version => {
                let mut next = profile.clone();
                next.version += 1;
                profiles.insert(id, next);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_profile_by_user(&self, user: &ObjectId) -> Result<bool, AppError> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        let before = profiles.len();
        profiles.retain(|_, profile| &profile.user != user);
        Ok(profiles.len() < before)
    }
}
