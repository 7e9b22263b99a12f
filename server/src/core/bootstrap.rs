//! Startup data
//!
//! Synchronizes the bootstrap admin account on every start (so a changed
//! ADMIN_PASSWORD takes effect) and seeds the sample catalog into an
//! empty store.

use chrono::Utc;

use crate::auth;
use crate::core::Config;
use crate::db::models::{ProductCreate, Role, UserCreate};
use crate::db::repository::{ProductRepository, UserRepository};
use crate::utils::{AppError, AppResult};

/// Create the admin account, or re-sync its password and role if the
/// email already exists.
pub async fn ensure_admin(users: &UserRepository, config: &Config) -> AppResult<()> {
    let hash = auth::hash_password(&config.admin_password)
        .map_err(|e| AppError::internal(format!("failed to hash admin password: {e}")))?;

    match users.find_by_email(&config.admin_email).await? {
        Some(admin) => {
            let id = admin
                .id
                .as_ref()
                .ok_or_else(|| AppError::internal("admin record without id"))?;
            users.set_password(id, &hash).await?;
            if !admin.role.is_admin() {
                users.update_role(id, Role::Admin).await?;
            }
            tracing::info!(email = %config.admin_email, "admin credentials synchronized");
        }
        None => {
            users
                .create(UserCreate {
                    name: "Admin".to_string(),
                    email: config.admin_email.clone(),
                    password: Some(hash),
                    google_id: None,
                    role: Role::Admin,
                    created_at: Utc::now(),
                })
                .await?;
            tracing::info!(email = %config.admin_email, "admin user created");
        }
    }

    Ok(())
}

/// Insert the sample catalog when the product table is empty.
pub async fn seed_products(products: &ProductRepository) -> AppResult<()> {
    if products.count().await? > 0 {
        return Ok(());
    }

    for (name, description, price, category, subcategory, icon, rating) in SAMPLE_PRODUCTS {
        products
            .create(ProductCreate {
                name: name.to_string(),
                description: description.to_string(),
                price: *price,
                admin_discount: 0,
                category: category.to_string(),
                subcategory: subcategory.to_string(),
                image: String::new(),
                icon: icon.to_string(),
                in_stock: true,
                rating: *rating,
            })
            .await?;
    }
    tracing::info!(count = SAMPLE_PRODUCTS.len(), "sample products inserted");

    Ok(())
}

type SampleProduct = (&'static str, &'static str, f64, &'static str, &'static str, &'static str, f64);

const SAMPLE_PRODUCTS: &[SampleProduct] = &[
    (
        "Nebula Noir",
        "A mysterious blend inspired by dark matter and cosmic mysteries. Notes of bergamot, black pepper, and sandalwood create an enigmatic fragrance.",
        125.0,
        "men",
        "trending",
        "fas fa-meteor",
        4.8,
    ),
    (
        "Stellar Rose",
        "Feminine and elegant, like roses blooming in a cosmic garden. Delicate notes of rose, jasmine, and white musk.",
        95.0,
        "women",
        "trending",
        "fas fa-star",
        4.7,
    ),
    (
        "Cosmic Bloom",
        "Delicate and enchanting, like flowers blooming in zero gravity. Fresh florals with hints of citrus and cedar.",
        120.0,
        "women",
        "trending",
        "fas fa-seedling",
        4.9,
    ),
    (
        "Galaxy Storm",
        "Bold and powerful, capturing the energy of cosmic storms. Intense blend of leather, tobacco, and vanilla.",
        140.0,
        "men",
        "bestselling",
        "fas fa-bolt",
        4.9,
    ),
    (
        "Moonlight Serenade",
        "Soft and dreamy, like moonbeams dancing on celestial waters. Aquatic notes with white florals and soft woods.",
        110.0,
        "women",
        "bestselling",
        "fas fa-moon",
        4.8,
    ),
    (
        "Solar Flare",
        "Intense and fiery, inspired by the raw power of the sun. Spicy notes of cardamom, cinnamon, and amber.",
        155.0,
        "men",
        "bestselling",
        "fas fa-sun",
        4.7,
    ),
    (
        "Andromeda Dreams",
        "Journey through the Andromeda galaxy with this celestial blend. Ethereal notes of iris, violet, and soft woods.",
        135.0,
        "women",
        "new",
        "fas fa-space-shuttle",
        4.6,
    ),
    (
        "Orion's Belt",
        "Strong and masculine like the constellation itself. Bold notes of oud, patchouli, and dark chocolate.",
        180.0,
        "men",
        "new",
        "fas fa-satellite",
        4.8,
    ),
    (
        "Milky Way Mist",
        "Light and airy like cosmic dust floating through space. Powdery notes of vanilla, musk, and soft florals.",
        115.0,
        "women",
        "new",
        "fas fa-cloud",
        4.5,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_config() -> Config {
        Config {
            port: 0,
            db_path: String::new(),
            environment: "test".to_string(),
            jwt: crate::auth::JwtConfig {
                secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
                expiration_minutes: 60,
            },
            admin_email: "admin@falakperfumes.com".to_string(),
            admin_password: "admin123".to_string(),
            email_user: None,
            email_pass: None,
            mail_api_url: None,
            whatsapp_api_key: None,
            whatsapp_phone_id: None,
            frontend_url: "http://localhost:5000".to_string(),
            log_dir: None,
        }
    }

    #[tokio::test]
    async fn admin_is_created_then_synchronized() {
        let database = db::connect_memory().await.unwrap();
        let users = UserRepository::new(database);
        let config = test_config();

        ensure_admin(&users, &config).await.unwrap();
        let admin = users
            .find_by_email(&config.admin_email)
            .await
            .unwrap()
            .unwrap();
        assert!(admin.role.is_admin());

        // Second run must not duplicate the account
        ensure_admin(&users, &config).await.unwrap();
        assert_eq!(users.count_admins().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let database = db::connect_memory().await.unwrap();
        let products = ProductRepository::new(database);

        seed_products(&products).await.unwrap();
        let first = products.count().await.unwrap();
        assert_eq!(first, SAMPLE_PRODUCTS.len() as i64);

        seed_products(&products).await.unwrap();
        assert_eq!(products.count().await.unwrap(), first);
    }
}
