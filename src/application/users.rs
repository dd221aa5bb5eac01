//! User account service.
//!
//! Usernames key the per-user cache entries, so the charset is validated here
//! before anything is persisted: letters, digits, and `@`, `.`, `+`, `-`,
//! `_`. A colon can never appear, which keeps user cache keys unambiguous.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::cache::{CacheKey, CacheReader, EntityEvent, Invalidator};
use crate::domain::entities::UserRecord;
use crate::domain::error::DomainError;

use super::error::AppError;
use super::repos::UsersRepo;

const DUPLICATE_USERNAME: &str = "a user with that username already exists";
const INVALID_USERNAME: &str =
    "usernames may only contain letters, digits and @/./+/-/_ characters";

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

fn validate_username(username: &str) -> Result<(), DomainError> {
    let valid = !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(DomainError::validation(INVALID_USERNAME))
    }
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UsersRepo>,
    cache: CacheReader,
    invalidator: Invalidator,
}

impl UserService {
    pub fn new(users: Arc<dyn UsersRepo>, cache: CacheReader, invalidator: Invalidator) -> Self {
        Self {
            users,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        self.cache
            .get_or_compute_collection(&CacheKey::Users, || async {
                self.users.list().await.map_err(AppError::from)
            })
            .await
    }

    pub async fn get(&self, username: &str) -> Result<UserRecord, AppError> {
        self.cache
            .get_or_compute_single(&CacheKey::User(username.to_string()), || async {
                self.users
                    .get_by_username(username)
                    .await
                    .map_err(AppError::from)
            })
            .await
    }

    pub async fn create(&self, command: CreateUserCommand) -> Result<UserRecord, AppError> {
        validate_username(&command.username)?;

        let user = UserRecord {
            id: Uuid::new_v4(),
            username: command.username,
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            is_staff: command.is_staff,
            created_at: OffsetDateTime::now_utc(),
        };

        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(err) if err.is_duplicate() => {
                return Err(DomainError::validation(DUPLICATE_USERNAME).into());
            }
            Err(err) => return Err(err.into()),
        }

        self.invalidator.apply(&[EntityEvent::UserSaved {
            username: user.username.clone(),
        }])?;
        Ok(user)
    }

    pub async fn update(
        &self,
        username: &str,
        command: UpdateUserCommand,
    ) -> Result<UserRecord, AppError> {
        let stored = self.users.get_by_username(username).await?;

        let user = UserRecord {
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            is_staff: command.is_staff,
            ..stored
        };

        self.users.update(&user).await?;
        self.invalidator.apply(&[EntityEvent::UserSaved {
            username: user.username.clone(),
        }])?;
        Ok(user)
    }

    pub async fn delete(&self, username: &str) -> Result<(), AppError> {
        let stored = self.users.get_by_username(username).await?;
        self.users.delete_by_username(&stored.username).await?;
        self.invalidator.apply(&[EntityEvent::UserDeleted {
            username: stored.username,
        }])?;
        Ok(())
    }
}
