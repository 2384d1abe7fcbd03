use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::user::User,
    use_cases::user::UserRepo,
};

// User struct as stored in the db.
#[derive(sqlx::FromRow, Debug)]
pub struct UserDb {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<UserDb> for User {
    fn from(row: UserDb) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn create(&self, name: &str, email: &str) -> AppResult<User> {
        let rec = sqlx::query_as::<_, UserDb>(
            r#"
                INSERT INTO users (id, name, email)
                VALUES ($1, $2, $3)
                RETURNING id, name, email, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.into())
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>(
            "SELECT id, name, email, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserDb>(
            "SELECT id, name, email, created_at FROM users ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update_name(&self, user_id: Uuid, name: &str) -> AppResult<User> {
        let rec = sqlx::query_as::<_, UserDb>(
            r#"
                UPDATE users SET name = $2 WHERE id = $1
                RETURNING id, name, email, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        rec.map(User::from).ok_or(AppError::NotFound)
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        // queue_tickets.user_id is ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
