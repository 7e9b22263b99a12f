use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | PORT | 5000 | HTTP listen port |
/// | DB_PATH | data/falak.db | Embedded database directory |
/// | ENVIRONMENT | development | development \| production |
/// | JWT_SECRET | generated | Token signing secret (>= 32 chars) |
/// | ADMIN_EMAIL | admin@falakperfumes.com | Bootstrap admin account |
/// | ADMIN_PASSWORD | admin123 | Bootstrap admin password |
/// | EMAIL_USER / EMAIL_PASS | unset | Mail relay credentials |
/// | MAIL_API_URL | unset | Mail relay endpoint |
/// | WHATSAPP_API_KEY / WHATSAPP_PHONE_ID | unset | WhatsApp provider credentials |
/// | FRONTEND_URL | http://localhost:5000 | Base URL for links in email |
/// | LOG_DIR | unset | Daily-rolling log directory (stdout only if unset) |
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: String,
    pub environment: String,
    pub jwt: JwtConfig,

    pub admin_email: String,
    pub admin_password: String,

    pub email_user: Option<String>,
    pub email_pass: Option<String>,
    pub mail_api_url: Option<String>,

    pub whatsapp_api_key: Option<String>,
    pub whatsapp_phone_id: Option<String>,

    pub frontend_url: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults suitable for local development.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "data/falak.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),

            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@falakperfumes.com".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),

            email_user: std::env::var("EMAIL_USER").ok(),
            email_pass: std::env::var("EMAIL_PASS").ok(),
            mail_api_url: std::env::var("MAIL_API_URL").ok(),

            whatsapp_api_key: std::env::var("WHATSAPP_API_KEY").ok(),
            whatsapp_phone_id: std::env::var("WHATSAPP_PHONE_ID").ok(),

            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Mail sending requires the relay endpoint and both credentials.
    pub fn mail_configured(&self) -> bool {
        self.email_user.is_some() && self.email_pass.is_some() && self.mail_api_url.is_some()
    }

    pub fn whatsapp_configured(&self) -> bool {
        self.whatsapp_api_key.is_some() && self.whatsapp_phone_id.is_some()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
