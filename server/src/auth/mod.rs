//! Authentication Module
//!
//! JWT issuance/validation, Argon2 password hashing, and the axum
//! extractors that gate customer and admin endpoints.

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::{AdminUser, AuthUser, OptionalAuthUser};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use password::{generate_temp_password, generate_token, hash_password, verify_password};
