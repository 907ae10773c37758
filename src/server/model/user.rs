//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::user::UserDto;

/// Platform user, identified by the identity provider subject.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Subject claim from the identity provider.
    pub subject: String,
    /// Display name of the user.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    ///
    /// The provider subject stays server-side.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            subject: entity.subject,
            name: entity.name,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for upserting a user after login.
///
/// Existing users matched by `subject` get their name refreshed.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub subject: String,
    pub name: String,
}
