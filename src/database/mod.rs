#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::models::{Post, Profile, User};
use crate::utils::AppError;

const USERS: &str = "users";
const PROFILES: &str = "profiles";
const POSTS: &str = "posts";

/// Persistence seam used by every service.
///
/// `replace_*` writes are guarded by the document's `version`: the write only
/// lands when the stored version still equals the one that was read, and the
/// stored copy gets `version + 1`. A `false` return means someone else won.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError>;
    async fn insert_user(&self, user: &User) -> Result<ObjectId, AppError>;
    async fn delete_user(&self, id: &ObjectId) -> Result<bool, AppError>;

    /// Newest first
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;
    async fn find_post(&self, id: &ObjectId) -> Result<Option<Post>, AppError>;
    async fn insert_post(&self, post: &Post) -> Result<ObjectId, AppError>;
    async fn replace_post(&self, post: &Post) -> Result<bool, AppError>;
    async fn delete_post(&self, id: &ObjectId) -> Result<bool, AppError>;

    async fn find_profile_by_user(&self, user: &ObjectId) -> Result<Option<Profile>, AppError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError>;
    async fn insert_profile(&self, profile: &Profile) -> Result<ObjectId, AppError>;
    async fn replace_profile(&self, profile: &Profile) -> Result<bool, AppError>;
    async fn delete_profile_by_user(&self, user: &ObjectId) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> mongodb::error::Result<Self> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .rsplit('/')
            .next()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains(':'))
            .unwrap_or("devconnector");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Unique owner per profile, unique email per user, feed ordering.
    async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        log::info!("🔧 Creating database indexes...");

        let unique = || IndexOptions::builder().unique(true).build();

        let indexes: [(&str, IndexModel); 3] = [
            (
                USERS,
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique())
                    .build(),
            ),
            (
                PROFILES,
                IndexModel::builder()
                    .keys(doc! { "user": 1 })
                    .options(unique())
                    .build(),
            ),
            (POSTS, IndexModel::builder().keys(doc! { "date": -1 }).build()),
        ];

        for (collection, index) in indexes {
            match self.collection::<Document>(collection).create_index(index).await {
                Ok(created) => {
                    log::info!("   ✅ Index ready: {}({})", collection, created.index_name)
                }
                Err(e) => log::warn!("   ⚠️  Index on {} not created: {}", collection, e),
            }
        }

        log::info!("✅ Database indexes ready");
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// Filter matching `_id` at the version that was read. Documents written
/// before versioning existed have no `version` field and count as 0.
fn versioned_filter(id: ObjectId, version: i64) -> Document {
    if version == 0 {
        doc! {
            "_id": id,
            "$or": [ { "version": 0_i64 }, { "version": { "$exists": false } } ]
        }
    } else {
        doc! { "_id": id, "version": version }
    }
}

fn inserted_id(result: mongodb::results::InsertOneResult) -> Result<ObjectId, AppError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::Internal("Inserted id is not an ObjectId".to_string()))
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "_id": id }).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "email": email })
            .await?)
    }

    async fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let cursor = self
            .collection::<User>(USERS)
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_user(&self, user: &User) -> Result<ObjectId, AppError> {
        inserted_id(self.collection::<User>(USERS).insert_one(user).await?)
    }

    async fn delete_user(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection::<User>(USERS)
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let cursor = self
            .collection::<Post>(POSTS)
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_post(&self, id: &ObjectId) -> Result<Option<Post>, AppError> {
        Ok(self.collection::<Post>(POSTS).find_one(doc! { "_id": id }).await?)
    }

    async fn insert_post(&self, post: &Post) -> Result<ObjectId, AppError> {
        inserted_id(self.collection::<Post>(POSTS).insert_one(post).await?)
    }

    async fn replace_post(&self, post: &Post) -> Result<bool, AppError> {
        let id = post
            .id
            .ok_or_else(|| AppError::Internal("Cannot replace a post without _id".to_string()))?;
        let mut next = post.clone();
        next.version += 1;

        let result = self
            .collection::<Post>(POSTS)
            .replace_one(versioned_filter(id, post.version), &next)
            .await?;
        Ok(result.matched_count == 1)
    }

    async fn delete_post(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection::<Post>(POSTS)
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_profile_by_user(&self, user: &ObjectId) -> Result<Option<Profile>, AppError> {
        Ok(self
            .collection::<Profile>(PROFILES)
            .find_one(doc! { "user": user })
            .await?)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let cursor = self.collection::<Profile>(PROFILES).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<ObjectId, AppError> {
        inserted_id(self.collection::<Profile>(PROFILES).insert_one(profile).await?)
    }

    async fn replace_profile(&self, profile: &Profile) -> Result<bool, AppError> {
        let id = profile
            .id
            .ok_or_else(|| AppError::Internal("Cannot replace a profile without _id".to_string()))?;
        let mut next = profile.clone();
        next.version += 1;

        let result = self
            .collection::<Profile>(PROFILES)
            .replace_one(versioned_filter(id, profile.version), &next)
            .await?;
        Ok(result.matched_count == 1)
    }

    async fn delete_profile_by_user(&self, user: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection::<Profile>(PROFILES)
            .delete_one(doc! { "user": user })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
