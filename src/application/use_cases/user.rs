use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::validators::{MAX_NAME_LEN, is_valid_email, is_valid_name},
    domain::entities::user::User,
};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, name: &str, email: &str) -> AppResult<User>;
    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn list(&self) -> AppResult<Vec<User>>;
    async fn update_name(&self, user_id: Uuid, name: &str) -> AppResult<User>;
    /// Removes the user together with all of their queue tickets.
    async fn delete(&self, user_id: Uuid) -> AppResult<()>;
}

#[derive(Clone)]
pub struct UserUseCases {
    repo: Arc<dyn UserRepo>,
}

impl UserUseCases {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn signup(&self, name: &str, email: &str) -> AppResult<User> {
        let name = normalize_name(name)?;
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::InvalidInput("Invalid email address".into()));
        }

        if self.repo.get_by_email(&email).await?.is_some() {
            return Err(AppError::InvalidInput("Email already registered".into()));
        }

        let user = self.repo.create(&name, &email).await?;
        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        self.repo.get_by_id(user_id).await?.ok_or(AppError::NotFound)
    }

    /// Name is the only field that may change after signup.
    #[instrument(skip(self))]
    pub async fn rename_user(&self, user_id: Uuid, name: &str) -> AppResult<User> {
        let name = normalize_name(name)?;
        self.repo.update_name(user_id, &name).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        self.repo.delete(user_id).await?;
        tracing::info!(user_id = %user_id, "User deleted with their tickets");
        Ok(())
    }
}

fn normalize_name(name: &str) -> AppResult<String> {
    if !is_valid_name(name) {
        return Err(AppError::InvalidInput(format!(
            "Name must be between 1 and {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.trim().to_string())
}
