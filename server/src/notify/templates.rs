//! Email and WhatsApp message bodies
//!
//! All amounts render as `EGP {:.2}`. Customer mail carries the
//! storefront header ("Falak Perfumes / Cosmic Fragrances"), admin mail
//! the back-office one.

use crate::db::models::{Order, OrderStatus};

const SUPPORT_EMAIL: &str = "support@falakperfumes.com";

fn order_date(order: &Order) -> String {
    order.created_at.format("%d/%m/%Y").to_string()
}

fn items_table(order: &Order) -> String {
    let mut rows = String::new();
    for item in &order.items {
        rows.push_str(&format!(
            "<tr><td style=\"padding: 10px; border-bottom: 1px solid #eee;\">{}</td>\
             <td style=\"padding: 10px; border-bottom: 1px solid #eee; text-align: center;\">{}</td>\
             <td style=\"padding: 10px; border-bottom: 1px solid #eee; text-align: right;\">EGP {:.2}</td></tr>",
            item.name, item.quantity, item.price
        ));
    }
    format!(
        "<table style=\"width: 100%; border-collapse: collapse; margin-bottom: 20px;\">\
         <thead><tr style=\"background: #f8f9fa;\">\
         <th style=\"padding: 10px; text-align: left;\">Product</th>\
         <th style=\"padding: 10px; text-align: center;\">Qty</th>\
         <th style=\"padding: 10px; text-align: right;\">Price</th>\
         </tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn customer_header() -> &'static str {
    "<div style=\"background: linear-gradient(45deg, #ffd700, #ff6b6b); padding: 20px; text-align: center; border-radius: 10px 10px 0 0;\">\
     <h1 style=\"color: white; margin: 0; font-size: 28px;\">Falak Perfumes</h1>\
     <p style=\"color: white; margin: 5px 0 0 0; font-size: 16px;\">Cosmic Fragrances</p></div>"
}

fn admin_header(title: &str) -> String {
    format!(
        "<div style=\"background: linear-gradient(45deg, #4ecdc4, #44a08d); padding: 20px; text-align: center; border-radius: 10px 10px 0 0;\">\
         <h1 style=\"color: white; margin: 0; font-size: 28px;\">{title}</h1>\
         <p style=\"color: white; margin: 5px 0 0 0; font-size: 16px;\">Falak Perfumes Admin</p></div>"
    )
}

fn wrap(header: &str, body: String) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; background-color: #f9f9f9; padding: 20px;\">\
         {header}<div style=\"background: white; padding: 30px; border-radius: 0 0 10px 10px;\">{body}</div></div>"
    )
}

fn shipping_block(order: &Order) -> String {
    let addr = &order.shipping_address;
    let phone = if addr.phone.is_empty() {
        "Not provided"
    } else {
        &addr.phone
    };
    format!(
        "<div style=\"background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px;\">\
         <h4 style=\"color: #333; margin-top: 0;\">Shipping Address</h4>\
         <p style=\"margin: 5px 0;\">{}</p><p style=\"margin: 5px 0;\">{}</p>\
         <p style=\"margin: 5px 0;\">{}, {} {}</p>\
         <p style=\"margin: 5px 0;\">Phone: {}</p></div>",
        addr.name, addr.address, addr.city, addr.country, addr.zip_code, phone
    )
}

pub fn order_confirmation_subject(order: &Order) -> String {
    format!("Order Confirmation - {} | Falak Perfumes", order.order_number)
}

pub fn order_confirmation(order: &Order) -> String {
    let body = format!(
        "<h2 style=\"color: #333; margin-bottom: 20px;\">Order Confirmation</h2>\
         <div style=\"background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px;\">\
         <p style=\"margin: 5px 0;\"><strong>Order Number:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Date:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Status:</strong> <span style=\"color: #ff6b6b; font-weight: bold;\">{}</span></p></div>\
         <h3 style=\"color: #333; margin-bottom: 15px;\">Order Summary</h3>{}\
         <div style=\"text-align: right; margin-bottom: 20px;\">\
         <h3 style=\"color: #333; margin: 0;\">Total: EGP {:.2}</h3></div>{}\
         <p style=\"color: #666; font-size: 14px; text-align: center;\">\
         Thank you for choosing Falak Perfumes! We'll send you another email when your order ships.</p>\
         <p style=\"color: #999; font-size: 12px; text-align: center;\">\
         If you have any questions, please contact us at {SUPPORT_EMAIL}</p>",
        order.order_number,
        order_date(order),
        order.status.label(),
        items_table(order),
        order.total,
        shipping_block(order),
    );
    wrap(customer_header(), body)
}

pub fn admin_new_order_subject(order: &Order) -> String {
    format!("🆕 New Order Received - {} | Falak Perfumes", order.order_number)
}

pub fn admin_new_order(order: &Order, admin_panel_url: &str) -> String {
    let addr = &order.shipping_address;
    let phone = if addr.phone.is_empty() {
        "Not provided"
    } else {
        &addr.phone
    };
    let body = format!(
        "<h2 style=\"color: #333; margin-bottom: 20px;\">New Order Details</h2>\
         <div style=\"background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px;\">\
         <p style=\"margin: 5px 0;\"><strong>Order Number:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Date:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Customer:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Email:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Phone:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Total:</strong> EGP {:.2}</p></div>\
         <h3 style=\"color: #333; margin-bottom: 15px;\">Order Items</h3>{}{}\
         <div style=\"text-align: center; margin-top: 30px;\">\
         <a href=\"{}/admin.html#orders\" style=\"background: #4ecdc4; color: white; padding: 12px 24px; text-decoration: none; border-radius: 5px; display: inline-block;\">\
         View Order in Admin Panel</a></div>",
        order.order_number,
        order_date(order),
        addr.name,
        addr.email,
        phone,
        order.total,
        items_table(order),
        shipping_block(order),
        admin_panel_url,
    );
    wrap(&admin_header("🆕 New Order Alert"), body)
}

fn status_copy(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Your order is being reviewed and will be processed soon.",
        OrderStatus::InProcess => "Your order is now being prepared and will be shipped shortly.",
        OrderStatus::Completed => {
            "Your order has been completed and delivered. Thank you for choosing Falak Perfumes!"
        }
    }
}

pub fn status_update_subject(order: &Order) -> String {
    format!("Order Status Updated - {} | Falak Perfumes", order.order_number)
}

pub fn status_update(order: &Order) -> String {
    let body = format!(
        "<h2 style=\"color: #333; margin-bottom: 20px;\">Order Status Update</h2>\
         <div style=\"background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px;\">\
         <p style=\"margin: 5px 0;\"><strong>Order Number:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>New Status:</strong> <span style=\"color: #ff6b6b; font-weight: bold;\">{}</span></p></div>\
         <p>{}</p>\
         <p style=\"color: #999; font-size: 12px; text-align: center;\">\
         If you have any questions about your order, please contact us at {SUPPORT_EMAIL}</p>",
        order.order_number,
        order.status.label(),
        status_copy(order.status),
    );
    wrap(customer_header(), body)
}

pub fn admin_status_update_subject(order: &Order) -> String {
    format!("📊 Order Status Updated - {} | Falak Perfumes", order.order_number)
}

pub fn admin_status_update(order: &Order, previous: OrderStatus) -> String {
    let body = format!(
        "<h2 style=\"color: #333; margin-bottom: 20px;\">Order Status Changed</h2>\
         <div style=\"background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px;\">\
         <p style=\"margin: 5px 0;\"><strong>Order Number:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Customer:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Previous Status:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>New Status:</strong> {}</p>\
         <p style=\"margin: 5px 0;\"><strong>Total:</strong> EGP {:.2}</p></div>",
        order.order_number,
        order.shipping_address.name,
        previous.label(),
        order.status.label(),
        order.total,
    );
    wrap(&admin_header("📊 Status Update"), body)
}

pub fn whatsapp_order_message(order: &Order) -> String {
    let mut items = String::new();
    for item in &order.items {
        items.push_str(&format!(
            "• {} (Qty: {}) - EGP {:.2}\n",
            item.name, item.quantity, item.price
        ));
    }
    let addr = &order.shipping_address;
    format!(
        "🎉 *Order Confirmation - Falak Perfumes*\n\n\
         *Order Number:* {}\n*Date:* {}\n*Status:* {}\n\n\
         *Order Summary:*\n{}\n*Total:* EGP {:.2}\n\n\
         *Shipping Address:*\n{}\n{}\n{}, {}\n\n\
         Thank you for choosing Falak Perfumes! 🌟\n\
         We'll notify you when your order ships.\n\n\
         For support: {SUPPORT_EMAIL}",
        order.order_number,
        order_date(order),
        order.status.label(),
        items,
        order.total,
        addr.name,
        addr.address,
        addr.city,
        addr.country,
    )
}

pub fn password_reset_subject() -> String {
    "Falak Perfumes Password Reset".to_string()
}

pub fn password_reset(reset_url: &str) -> String {
    let body = format!(
        "<h2 style=\"color: #333; margin-bottom: 20px;\">Password Reset Request</h2>\
         <p>We received a request to reset your password. Click the button below to choose a new one. \
         This link expires in one hour.</p>\
         <div style=\"text-align: center; margin: 30px 0;\">\
         <a href=\"{reset_url}\" style=\"background: #ff6b6b; color: white; padding: 12px 24px; text-decoration: none; border-radius: 5px; display: inline-block;\">\
         Reset Password</a></div>\
         <p style=\"color: #999; font-size: 12px;\">If you did not request a reset, you can safely ignore this email.</p>"
    );
    wrap(customer_header(), body)
}

pub fn admin_welcome_subject() -> String {
    "Welcome to Falak Perfumes Admin Team".to_string()
}

pub fn admin_welcome(name: &str, email: &str, temp_password: &str, admin_url: &str) -> String {
    let body = format!(
        "<h2 style=\"color: #333; margin-bottom: 20px;\">Welcome, {name}!</h2>\
         <p>You have been added as an administrator to the Falak Perfumes admin panel.</p>\
         <div style=\"background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px;\">\
         <p style=\"margin: 5px 0;\"><strong>Email:</strong> {email}</p>\
         <p style=\"margin: 5px 0;\"><strong>Temporary Password:</strong> {temp_password}</p></div>\
         <p>Please log in and change your password as soon as possible.</p>\
         <div style=\"text-align: center; margin-top: 30px;\">\
         <a href=\"{admin_url}/admin.html\" style=\"background: #4ecdc4; color: white; padding: 12px 24px; text-decoration: none; border-radius: 5px; display: inline-block;\">\
         Open Admin Panel</a></div>"
    );
    wrap(&admin_header("Welcome Aboard"), body)
}

pub fn newsletter_welcome_subject() -> String {
    "🌟 Welcome to the Falak Universe! Your Cosmic Journey Begins".to_string()
}

pub fn newsletter_welcome(unsubscribe_url: &str) -> String {
    let body = format!(
        "<h2 style=\"color: #333; margin-bottom: 20px;\">Welcome to the Falak Universe!</h2>\
         <p>Thank you for subscribing. You'll be the first to hear about new cosmic fragrances, \
         exclusive offers, and everything happening at Falak Perfumes.</p>\
         <p style=\"color: #999; font-size: 12px; margin-top: 30px;\">\
         No longer interested? <a href=\"{unsubscribe_url}\">Unsubscribe here</a>.</p>"
    );
    wrap(customer_header(), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{NotificationFlags, OrderItem, ShippingAddress};

    fn sample_order() -> Order {
        Order {
            id: None,
            user: None,
            items: vec![OrderItem {
                product: None,
                name: "Nebula Noir".to_string(),
                quantity: 2,
                price: 135.0,
            }],
            total: 270.0,
            status: OrderStatus::Pending,
            order_number: "FP260829001".to_string(),
            shipping_address: ShippingAddress {
                name: "Zahraa".to_string(),
                email: "zahraa@example.com".to_string(),
                phone: String::new(),
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

    #[test]
    fn confirmation_includes_order_number_and_total() {
        let order = sample_order();
        assert_eq!(
            order_confirmation_subject(&order),
            "Order Confirmation - FP260829001 | Falak Perfumes"
        );
        let html = order_confirmation(&order);
        assert!(html.contains("FP260829001"));
        assert!(html.contains("Total: EGP 270.00"));
        assert!(html.contains("Nebula Noir"));
    }

    #[test]
    fn missing_phone_renders_placeholder() {
        let order = sample_order();
        assert!(order_confirmation(&order).contains("Phone: Not provided"));
    }

    #[test]
    fn status_copy_varies_by_status() {
        let mut order = sample_order();
        order.status = OrderStatus::InProcess;
        assert!(status_update(&order).contains("being prepared"));
        order.status = OrderStatus::Completed;
        assert!(status_update(&order).contains("completed and delivered"));
    }

    #[test]
    fn whatsapp_message_lists_items() {
        let text = whatsapp_order_message(&sample_order());
        assert!(text.contains("• Nebula Noir (Qty: 2) - EGP 135.00"));
        assert!(text.contains("*Total:* EGP 270.00"));
    }
}
