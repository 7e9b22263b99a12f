//! Newsletter Subscriber Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{NewsletterSubscriber, SubscriberCreate};

#[derive(Clone)]
pub struct NewsletterRepository {
    base: BaseRepository,
}

impl NewsletterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<NewsletterSubscriber>> {
        let subscriber: Option<NewsletterSubscriber> = self
            .base
            .db()
            .query("SELECT * FROM newsletter_subscriber WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(subscriber)
    }

    pub async fn create(&self, data: SubscriberCreate) -> RepoResult<NewsletterSubscriber> {
        let created: Option<NewsletterSubscriber> = self
            .base
            .db()
            .create("newsletter_subscriber")
            .content(data)
            .await?;
        created.ok_or_else(|| RepoError::Database("subscriber insert returned nothing".into()))
    }

    pub async fn set_unsubscribe_token(&self, email: &str, token: &str) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE newsletter_subscriber SET unsubscribeToken = $unsub_token \
                 WHERE email = $email",
            )
            // `$token` is a protected SurrealDB session variable and cannot be bound
            .bind(("unsub_token", token.to_string()))
            .bind(("email", email.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn find_by_unsubscribe_token(
        &self,
        token: &str,
    ) -> RepoResult<Option<NewsletterSubscriber>> {
        let subscriber: Option<NewsletterSubscriber> = self
            .base
            .db()
            .query("SELECT * FROM newsletter_subscriber WHERE unsubscribeToken = $unsub_token LIMIT 1")
            .bind(("unsub_token", token.to_string()))
            .await?
            .take(0)?;
        Ok(subscriber)
    }

    pub async fn deactivate(&self, email: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE newsletter_subscriber SET isActive = false WHERE email = $email")
            .bind(("email", email.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
