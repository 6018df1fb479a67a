use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::millis_to_rfc3339;

/// Documento da collection "users"
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub date: i64,
}

impl User {
    pub fn object_id(&self) -> ObjectId {
        self.id.unwrap_or_default()
    }
}

/// Public view of a user (no credential)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub date: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.object_id().to_hex(),
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            date: millis_to_rfc3339(user.date),
        }
    }
}

/// The `{_id, name, avatar}` projection joined onto profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.object_id().to_hex(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}
