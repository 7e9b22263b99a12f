//! Product Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::pricing::PricingCommit;

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Catalog listing with optional category/subcategory filters
    pub async fn find_filtered(
        &self,
        category: Option<&str>,
        subcategory: Option<&str>,
    ) -> RepoResult<Vec<Product>> {
        let mut clauses: Vec<&str> = Vec::new();
        if category.is_some() {
            clauses.push("category = $category");
        }
        if subcategory.is_some() {
            clauses.push("subcategory = $subcategory");
        }
        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let mut query = self
            .base
            .db()
            .query(format!("SELECT * FROM product{where_clause}"));
        if let Some(category) = category {
            query = query.bind(("category", category.to_string()));
        }
        if let Some(subcategory) = subcategory {
            query = query.bind(("subcategory", subcategory.to_string()));
        }

        let products: Vec<Product> = query.await?.take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &ProductId) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(id.clone()).await?;
        Ok(product)
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let created: Option<Product> = self.base.db().create("product").content(data).await?;
        created.ok_or_else(|| RepoError::Database("product insert returned nothing".into()))
    }

    pub async fn update(&self, id: &ProductId, data: ProductUpdate) -> RepoResult<Option<Product>> {
        let updated: Option<Product> = self.base.db().update(id.clone()).merge(data).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &ProductId) -> RepoResult<Option<Product>> {
        let deleted: Option<Product> = self.base.db().delete(id.clone()).await?;
        Ok(deleted)
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM product GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// Write a resolved discount back onto the stored product (targeted
    /// field update). Subsequent listings take the idempotent path.
    pub async fn commit_pricing(&self, id: &ProductId, commit: &PricingCommit) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $product SET price = $price, \
                 originalPrice = $original_price, discount = $discount",
            )
            .bind(("product", id.clone()))
            .bind(("price", commit.price))
            .bind(("original_price", commit.original_price))
            .bind(("discount", commit.discount))
            .await?
            .check()?;
        Ok(())
    }
}
