//! Feedback Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Feedback, FeedbackCreate};

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: FeedbackCreate) -> RepoResult<Feedback> {
        let created: Option<Feedback> = self.base.db().create("feedback").content(data).await?;
        created.ok_or_else(|| RepoError::Database("feedback insert returned nothing".into()))
    }

    /// Storefront testimonials: approved entries only, latest first
    pub async fn find_approved(&self, limit: usize) -> RepoResult<Vec<Feedback>> {
        let feedback: Vec<Feedback> = self
            .base
            .db()
            .query(
                "SELECT * FROM feedback WHERE approved = true \
                 ORDER BY createdAt DESC LIMIT $limit",
            )
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(feedback)
    }
}
