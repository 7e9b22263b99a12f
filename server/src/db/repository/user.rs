//! User Repository

use chrono::{DateTime, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{Role, User, UserCreate, UserId};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(user)
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE googleId = $google_id LIMIT 1")
            .bind(("google_id", google_id.to_string()))
            .await?
            .take(0)?;
        Ok(user)
    }

    /// All admin accounts; recipients of the admin notification channel
    pub async fn find_admins(&self) -> RepoResult<Vec<User>> {
        let admins: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE role = 'admin'")
            .await?
            .take(0)?;
        Ok(admins)
    }

    pub async fn count_admins(&self) -> RepoResult<i64> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM user WHERE role = 'admin' GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let created: Option<User> = self.base.db().create("user").content(data).await?;
        created.ok_or_else(|| RepoError::Database("user insert returned nothing".into()))
    }

    pub async fn update_role(&self, id: &UserId, role: Role) -> RepoResult<Option<User>> {
        let updated: Option<User> = self
            .base
            .db()
            .update(id.clone())
            .merge(serde_json::json!({ "role": role.label() }))
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &UserId) -> RepoResult<Option<User>> {
        let deleted: Option<User> = self.base.db().delete(id.clone()).await?;
        Ok(deleted)
    }

    /// Replace the password hash and clear any outstanding reset token.
    pub async fn set_password(&self, id: &UserId, hash: &str) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $user SET password = $hash, \
                 resetPasswordToken = NONE, resetPasswordExpires = NONE",
            )
            .bind(("user", id.clone()))
            .bind(("hash", hash.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn set_reset_token(
        &self,
        id: &UserId,
        token: &str,
        expires: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $user SET resetPasswordToken = $reset_token, \
                 resetPasswordExpires = $expires",
            )
            .bind(("user", id.clone()))
            // `$token` is a protected SurrealDB session variable and cannot be bound
            .bind(("reset_token", token.to_string()))
            .bind(("expires", expires))
            .await?
            .check()?;
        Ok(())
    }

    /// Look up a user by a reset token that has not expired yet.
    pub async fn find_by_valid_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<User>> {
        let user: Option<User> = self
            .base
            .db()
            .query(
                "SELECT * FROM user WHERE resetPasswordToken = $reset_token \
                 AND resetPasswordExpires > $now LIMIT 1",
            )
            .bind(("reset_token", token.to_string()))
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(user)
    }

    /// Link a Google identity to an existing account.
    pub async fn set_google_id(&self, id: &UserId, google_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET googleId = $google_id")
            .bind(("user", id.clone()))
            .bind(("google_id", google_id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
