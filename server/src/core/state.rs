//! Server state
//!
//! Shared handle passed to every handler. Cloning is shallow; services
//! sit behind `Arc` and the database handle is itself reference-counted.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, bootstrap};
use crate::db;
use crate::db::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::notify::{HttpMailer, LoggingWhatsApp, NotificationDispatcher};
use crate::orders::OrderService;
use crate::stats::AdminStatsAggregator;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt: Arc<JwtService>,
    pub notifier: Arc<NotificationDispatcher>,
    pub orders: OrderService,
    pub stats: AdminStatsAggregator,
}

impl ServerState {
    /// Open the database, build the notification channels from config,
    /// and run startup data synchronization.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let database = db::connect(&config.db_path).await?;

        let users = UserRepository::new(database.clone());
        let products = ProductRepository::new(database.clone());
        let order_repo = OrderRepository::new(database.clone());

        bootstrap::ensure_admin(&users, config).await?;
        bootstrap::seed_products(&products).await?;

        let mailer = if config.mail_configured() {
            let mailer = HttpMailer::new(
                config.mail_api_url.clone().unwrap_or_default(),
                config.email_user.clone().unwrap_or_default(),
                config.email_user.clone().unwrap_or_default(),
                config.email_pass.clone().unwrap_or_default(),
            );
            Some(Arc::new(mailer) as Arc<dyn crate::notify::MailTransport>)
        } else {
            tracing::warn!(
                "email credentials not configured; order and account email disabled \
                 (set EMAIL_USER, EMAIL_PASS and MAIL_API_URL to enable)"
            );
            None
        };

        let whatsapp = if config.whatsapp_configured() {
            tracing::info!("WhatsApp notifications enabled");
            Some(Arc::new(LoggingWhatsApp) as Arc<dyn crate::notify::WhatsAppTransport>)
        } else {
            tracing::warn!(
                "WhatsApp credentials not configured; WhatsApp notifications disabled \
                 (set WHATSAPP_API_KEY and WHATSAPP_PHONE_ID to enable)"
            );
            None
        };

        let notifier = Arc::new(NotificationDispatcher::new(
            mailer,
            whatsapp,
            config.frontend_url.clone(),
            order_repo.clone(),
            users,
        ));

        let orders = OrderService::new(order_repo, products, notifier.clone());
        let stats = AdminStatsAggregator::new(database.clone());

        Ok(Self {
            config: config.clone(),
            db: database,
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            notifier,
            orders,
            stats,
        })
    }
}
