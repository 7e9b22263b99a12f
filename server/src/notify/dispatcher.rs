//! Notification dispatcher
//!
//! Fans an order event out to the customer mailbox, WhatsApp, and the
//! admin team. Every channel is best effort: a failure is logged and the
//! remaining channels still run, and nothing here ever bubbles back into
//! the order transaction. Creation-time deliveries are recorded on the
//! order's notification flags; status-change mail is not tracked.

use std::sync::Arc;

use crate::db::models::{Order, OrderStatus};
use crate::db::repository::{NotificationChannel, OrderRepository, UserRepository};
use crate::notify::templates;
use crate::notify::transport::{MailMessage, MailTransport, TransportError, WhatsAppTransport};

pub struct NotificationDispatcher {
    mailer: Option<Arc<dyn MailTransport>>,
    whatsapp: Option<Arc<dyn WhatsAppTransport>>,
    frontend_url: String,
    orders: OrderRepository,
    users: UserRepository,
}

impl NotificationDispatcher {
    pub fn new(
        mailer: Option<Arc<dyn MailTransport>>,
        whatsapp: Option<Arc<dyn WhatsAppTransport>>,
        frontend_url: String,
        orders: OrderRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            mailer,
            whatsapp,
            frontend_url,
            orders,
            users,
        }
    }

    pub fn mail_available(&self) -> bool {
        self.mailer.is_some()
    }

    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    /// Send one email if mail is configured. Unconfigured mail is a
    /// quiet no-op so the storefront keeps working without credentials.
    pub async fn send_mail(&self, message: MailMessage) -> Result<(), TransportError> {
        match &self.mailer {
            Some(mailer) => mailer.send(message).await,
            None => {
                tracing::debug!("email service not configured, skipping send");
                Ok(())
            }
        }
    }

    /// All creation-time channels for a new order, in sequence. Each
    /// successful delivery flips its flag on the stored order.
    pub async fn notify_order_created(&self, order: &Order) {
        self.send_customer_confirmation(order).await;
        self.send_whatsapp_confirmation(order).await;
        self.send_admin_alert(order).await;
    }

    /// Customer and admin mail for a status change. No flags to update;
    /// these can fire once per transition.
    pub async fn notify_status_changed(&self, order: &Order, previous: OrderStatus) {
        if !self.mail_available() {
            tracing::debug!("email service not configured, skipping status notifications");
            return;
        }

        if order.shipping_address.email.is_empty() {
            tracing::debug!(order = %order.order_number, "no customer email, skipping status update email");
        } else {
            let customer = MailMessage {
                to: vec![order.shipping_address.email.clone()],
                subject: templates::status_update_subject(order),
                html: templates::status_update(order),
            };
            if let Err(e) = self.send_mail(customer).await {
                tracing::error!(error = %e, order = %order.order_number, "status update email failed");
            }
        }

        match self.admin_emails().await {
            Some(to) => {
                let mail = MailMessage {
                    to,
                    subject: templates::admin_status_update_subject(order),
                    html: templates::admin_status_update(order, previous),
                };
                if let Err(e) = self.send_mail(mail).await {
                    tracing::error!(error = %e, order = %order.order_number, "admin status email failed");
                }
            }
            None => tracing::warn!("no admin users found, skipping admin status email"),
        }
    }

    async fn send_customer_confirmation(&self, order: &Order) {
        if !self.mail_available() {
            tracing::debug!("email service not configured, skipping order confirmation");
            return;
        }
        if order.shipping_address.email.is_empty() {
            tracing::debug!(order = %order.order_number, "no customer email, skipping order confirmation");
            return;
        }

        let message = MailMessage {
            to: vec![order.shipping_address.email.clone()],
            subject: templates::order_confirmation_subject(order),
            html: templates::order_confirmation(order),
        };

        match self.send_mail(message).await {
            Ok(()) => {
                tracing::info!(order = %order.order_number, "order confirmation email sent");
                self.mark(order, NotificationChannel::Email).await;
            }
            Err(e) => {
                tracing::error!(error = %e, order = %order.order_number, "order confirmation email failed");
            }
        }
    }

    async fn send_whatsapp_confirmation(&self, order: &Order) {
        let phone = &order.shipping_address.phone;
        let Some(whatsapp) = &self.whatsapp else {
            tracing::debug!("WhatsApp service not configured, skipping notification");
            return;
        };
        if phone.is_empty() {
            tracing::debug!(order = %order.order_number, "no phone number, skipping WhatsApp notification");
            return;
        }

        let message = templates::whatsapp_order_message(order);
        match whatsapp.send(phone, &message).await {
            Ok(()) => {
                tracing::info!(order = %order.order_number, "WhatsApp notification sent");
                self.mark(order, NotificationChannel::WhatsApp).await;
            }
            Err(e) => {
                tracing::error!(error = %e, order = %order.order_number, "WhatsApp notification failed");
            }
        }
    }

    async fn send_admin_alert(&self, order: &Order) {
        if !self.mail_available() {
            tracing::debug!("email service not configured, skipping admin notification");
            return;
        }

        let Some(to) = self.admin_emails().await else {
            tracing::warn!("no admin users found, skipping admin notification");
            return;
        };

        let message = MailMessage {
            to,
            subject: templates::admin_new_order_subject(order),
            html: templates::admin_new_order(order, &self.frontend_url),
        };

        match self.send_mail(message).await {
            Ok(()) => {
                tracing::info!(order = %order.order_number, "admin notification sent");
                self.mark(order, NotificationChannel::Admin).await;
            }
            Err(e) => {
                tracing::error!(error = %e, order = %order.order_number, "admin notification failed");
            }
        }
    }

    async fn admin_emails(&self) -> Option<Vec<String>> {
        match self.users.find_admins().await {
            Ok(admins) if admins.is_empty() => None,
            Ok(admins) => Some(admins.into_iter().map(|a| a.email).collect()),
            Err(e) => {
                tracing::error!(error = %e, "failed to load admin users");
                None
            }
        }
    }

    async fn mark(&self, order: &Order, channel: NotificationChannel) {
        let Some(id) = &order.id else { return };
        if let Err(e) = self.orders.mark_notified(id, channel).await {
            tracing::error!(error = %e, order = %order.order_number, ?channel, "failed to record notification flag");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::db::models::{
        NotificationFlags, OrderCreate, OrderItem, Role, ShippingAddress, UserCreate,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingMailer {
        sent: Mutex<Vec<MailMessage>>,
        fail: bool,
    }

    impl RecordingMailer {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl MailTransport for RecordingMailer {
        async fn send(&self, message: MailMessage) -> Result<(), TransportError> {
            if self.fail {
                return Err(TransportError::Rejected("mailbox on fire".to_string()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    struct RecordingWhatsApp {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl WhatsAppTransport for RecordingWhatsApp {
        async fn send(&self, phone: &str, message: &str) -> Result<(), TransportError> {
            self.sent
                .lock()
                .unwrap()
                .push((phone.to_string(), message.to_string()));
            Ok(())
        }
    }

    async fn setup(
        mailer: Option<Arc<dyn MailTransport>>,
        whatsapp: Option<Arc<dyn WhatsAppTransport>>,
    ) -> (NotificationDispatcher, OrderRepository) {
        let database = db::connect_memory().await.unwrap();
        let orders = OrderRepository::new(database.clone());
        let users = UserRepository::new(database.clone());

        users
            .create(UserCreate {
                name: "Admin".to_string(),
                email: "admin@falakperfumes.com".to_string(),
                password: Some("hash".to_string()),
                google_id: None,
                role: Role::Admin,
                created_at: chrono::Utc::now(),
            })
            .await
            .unwrap();

        let dispatcher = NotificationDispatcher::new(
            mailer,
            whatsapp,
            "http://localhost:5000".to_string(),
            orders.clone(),
            users,
        );
        (dispatcher, orders)
    }

    fn order_create(phone: &str) -> OrderCreate {
        OrderCreate {
            user: None,
            items: vec![OrderItem {
                product: None,
                name: "Stellar Rose".to_string(),
                quantity: 1,
                price: 120.0,
            }],
            total: 120.0,
            status: OrderStatus::Pending,
            order_number: "FP260829001".to_string(),
            shipping_address: ShippingAddress {
                name: "Zahraa".to_string(),
                email: "zahraa@example.com".to_string(),
                phone: phone.to_string(),
                address: "1 Nile St".to_string(),
                city: "Cairo".to_string(),
                country: "Egypt".to_string(),
                zip_code: "11511".to_string(),
            },
            billing_address: Default::default(),
            notifications: NotificationFlags::default(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn successful_delivery_sets_flags() {
        let mailer = RecordingMailer::new(false);
        let (dispatcher, orders) = setup(Some(mailer.clone()), None).await;

        let order = orders.create(order_create("")).await.unwrap();
        dispatcher.notify_order_created(&order).await;

        let stored = orders
            .find_by_id(order.id.as_ref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.notifications.email_sent);
        assert!(stored.notifications.admin_notified);
        assert!(!stored.notifications.whatsapp_sent);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, vec!["zahraa@example.com".to_string()]);
        assert_eq!(sent[1].to, vec!["admin@falakperfumes.com".to_string()]);
    }

    #[tokio::test]
    async fn mail_failure_leaves_flags_clear_and_whatsapp_still_runs() {
        let mailer = RecordingMailer::new(true);
        let whatsapp = Arc::new(RecordingWhatsApp {
            sent: Mutex::new(Vec::new()),
        });
        let (dispatcher, orders) = setup(Some(mailer), Some(whatsapp.clone())).await;

        let order = orders.create(order_create("+201234567890")).await.unwrap();
        dispatcher.notify_order_created(&order).await;

        let stored = orders
            .find_by_id(order.id.as_ref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.notifications.email_sent);
        assert!(!stored.notifications.admin_notified);
        assert!(stored.notifications.whatsapp_sent);
        assert_eq!(whatsapp.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_customer_email_skips_confirmation() {
        let mailer = RecordingMailer::new(false);
        let (dispatcher, orders) = setup(Some(mailer.clone()), None).await;

        let mut create = order_create("");
        create.shipping_address.email = String::new();
        let order = orders.create(create).await.unwrap();
        dispatcher.notify_order_created(&order).await;

        let stored = orders
            .find_by_id(order.id.as_ref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.notifications.email_sent);
        assert!(stored.notifications.admin_notified);

        // Only the admin alert went out
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["admin@falakperfumes.com".to_string()]);
    }

    #[tokio::test]
    async fn status_change_mails_customer_and_admin_per_transition() {
        let mailer = RecordingMailer::new(false);
        let (dispatcher, orders) = setup(Some(mailer.clone()), None).await;

        let order = orders.create(order_create("")).await.unwrap();

        let mut in_process = order.clone();
        in_process.status = OrderStatus::InProcess;
        dispatcher
            .notify_status_changed(&in_process, OrderStatus::Pending)
            .await;

        let mut completed = order.clone();
        completed.status = OrderStatus::Completed;
        dispatcher
            .notify_status_changed(&completed, OrderStatus::InProcess)
            .await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0].to, vec!["zahraa@example.com".to_string()]);
        assert!(sent[1].html.contains("<strong>Previous Status:</strong> Pending"));
        assert!(sent[1].html.contains("<strong>New Status:</strong> In Process"));
        assert!(sent[3].html.contains("<strong>Previous Status:</strong> In Process"));
        assert!(sent[3].html.contains("<strong>New Status:</strong> Completed"));
        drop(sent);

        // Status mail never touches the creation-time delivery flags
        let stored = orders
            .find_by_id(order.id.as_ref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.notifications.email_sent);
        assert!(!stored.notifications.admin_notified);
    }

    #[tokio::test]
    async fn unconfigured_channels_send_nothing() {
        let (dispatcher, orders) = setup(None, None).await;

        let order = orders.create(order_create("+201234567890")).await.unwrap();
        dispatcher.notify_order_created(&order).await;

        let stored = orders
            .find_by_id(order.id.as_ref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.notifications.email_sent);
        assert!(!stored.notifications.whatsapp_sent);
        assert!(!stored.notifications.admin_notified);
    }
}
