//! End-to-end API tests against an in-memory database.
//!
//! Each test assembles a full `ServerState` (no mail/WhatsApp transports
//! unless stated) and drives the real router with `tower::ServiceExt`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use falak_server::auth::{JwtConfig, JwtService};
use falak_server::core::{Config, ServerState, bootstrap};
use falak_server::db;
use falak_server::db::repository::{OrderRepository, ProductRepository, UserRepository};
use falak_server::notify::NotificationDispatcher;
use falak_server::orders::OrderService;
use falak_server::stats::AdminStatsAggregator;
use falak_server::{api, pricing};

const ADMIN_EMAIL: &str = "admin@falakperfumes.com";
const ADMIN_PASSWORD: &str = "admin123";

fn test_config() -> Config {
    Config {
        port: 0,
        db_path: String::new(),
        environment: "test".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-length".to_string(),
            expiration_minutes: 60,
        },
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        email_user: None,
        email_pass: None,
        mail_api_url: None,
        whatsapp_api_key: None,
        whatsapp_phone_id: None,
        frontend_url: "http://localhost:5000".to_string(),
        log_dir: None,
    }
}

async fn test_state() -> ServerState {
    let config = test_config();
    let database = db::connect_memory().await.unwrap();

    let users = UserRepository::new(database.clone());
    let products = ProductRepository::new(database.clone());
    let order_repo = OrderRepository::new(database.clone());

    bootstrap::ensure_admin(&users, &config).await.unwrap();

    let notifier = Arc::new(NotificationDispatcher::new(
        None,
        None,
        config.frontend_url.clone(),
        order_repo.clone(),
        users,
    ));
    let orders = OrderService::new(order_repo, products, notifier.clone());
    let stats = AdminStatsAggregator::new(database.clone());

    ServerState {
        jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
        config,
        db: database,
        notifier,
        orders,
        stats,
    }
}

fn app(state: &ServerState) -> axum::Router {
    api::router().with_state(state.clone())
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(state: &ServerState, email: &str, password: &str) -> String {
    let response = app(state)
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

fn checkout_payload() -> Value {
    json!({
        "items": [
            { "quantity": 2, "price": 100.0 }
        ],
        "total": 270.0,
        "shippingAddress": {
            "name": "Zahraa",
            "email": "zahraa@example.com",
            "phone": "",
            "address": "1 Nile St",
            "city": "Cairo",
            "country": "Egypt",
            "zipCode": "11511"
        },
        "billingAddress": {}
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let state = test_state().await;
    let response = app(&state)
        .oneshot(json_request("GET", "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["emailConfigured"], false);
}

#[tokio::test]
async fn register_login_and_duplicate_email() {
    let state = test_state().await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Zahraa",
                "email": "zahraa@example.com",
                "password": "hunter22"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["role"], "customer");

    // Same email again is rejected with the front-end's expected shape
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Zahraa",
                "email": "zahraa@example.com",
                "password": "hunter22"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "User already exists");

    let token = login(&state, "zahraa@example.com", "hunter22").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let state = test_state().await;
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "wrong" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn guest_checkout_creates_pending_order() {
    let state = test_state().await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/orders",
            None,
            Some(checkout_payload()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;

    let prefix = format!("FP{}", chrono::Utc::now().format("%y%m%d"));
    assert_eq!(
        order["orderNumber"].as_str().unwrap(),
        format!("{prefix}001")
    );
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["total"], 270.0);
    assert_eq!(order["notifications"]["emailSent"], false);
    assert!(order.get("user").is_none() || order["user"].is_null());
}

#[tokio::test]
async fn invalid_token_downgrades_checkout_to_guest() {
    let state = test_state().await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/orders",
            Some("not.a.real.token"),
            Some(checkout_payload()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;
    assert!(order.get("user").is_none() || order["user"].is_null());
}

#[tokio::test]
async fn authenticated_checkout_links_order_to_user() {
    let state = test_state().await;

    app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Zahraa",
                "email": "zahraa@example.com",
                "password": "hunter22"
            })),
        ))
        .await
        .unwrap();
    let token = login(&state, "zahraa@example.com", "hunter22").await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/orders",
            Some(&token),
            Some(checkout_payload()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The order shows up in the caller's own list
    let response = app(&state)
        .oneshot(json_request("GET", "/api/orders", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let orders = body_json(response).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);

    // And not without a token
    let response = app(&state)
        .oneshot(json_request("GET", "/api/orders", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_cart_is_rejected() {
    let state = test_state().await;
    let mut payload = checkout_payload();
    payload["items"] = json!([]);

    let response = app(&state)
        .oneshot(json_request("POST", "/api/orders", None, Some(payload)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Order must contain at least one item.");
}

#[tokio::test]
async fn status_updates_are_admin_only_and_validated() {
    let state = test_state().await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/orders",
            None,
            Some(checkout_payload()),
        ))
        .await
        .unwrap();
    let order = body_json(response).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    // Customers cannot change status
    app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Zahraa",
                "email": "zahraa@example.com",
                "password": "hunter22"
            })),
        ))
        .await
        .unwrap();
    let customer_token = login(&state, "zahraa@example.com", "hunter22").await;
    let response = app(&state)
        .oneshot(json_request(
            "PATCH",
            &format!("/api/orders/{order_id}/status"),
            Some(&customer_token),
            Some(json!({ "status": "In Process" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = login(&state, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    // Unknown label is a 400 with the contract error shape
    let response = app(&state)
        .oneshot(json_request(
            "PATCH",
            &format!("/api/orders/{order_id}/status"),
            Some(&admin_token),
            Some(json!({ "status": "Shipped" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid status value.");

    // Pending -> In Process -> Completed
    for status in ["In Process", "Completed"] {
        let response = app(&state)
            .oneshot(json_request(
                "PATCH",
                &format!("/api/orders/{order_id}/status"),
                Some(&admin_token),
                Some(json!({ "status": status })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], status);
    }
}

#[tokio::test]
async fn admin_stats_track_orders_and_revenue() {
    let state = test_state().await;
    let admin_token = login(&state, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app(&state)
        .oneshot(json_request(
            "GET",
            "/api/admin/stats",
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;
    assert_eq!(stats["totalOrders"], 0);
    assert_eq!(stats["totalRevenue"], 0.0);
    assert_eq!(stats["averageOrderValue"], 0.0);

    for _ in 0..2 {
        app(&state)
            .oneshot(json_request(
                "POST",
                "/api/orders",
                None,
                Some(checkout_payload()),
            ))
            .await
            .unwrap();
    }

    let response = app(&state)
        .oneshot(json_request(
            "GET",
            "/api/admin/stats",
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["totalOrders"], 2);
    assert_eq!(stats["totalRevenue"], 540.0);
    assert_eq!(stats["averageOrderValue"], 270.0);
}

#[tokio::test]
async fn last_admin_cannot_be_deleted() {
    let state = test_state().await;
    let admin_token = login(&state, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let users = UserRepository::new(state.db.clone());
    let admin = users.find_by_email(ADMIN_EMAIL).await.unwrap().unwrap();
    let admin_id = admin.id.as_ref().unwrap().key().to_string();

    let response = app(&state)
        .oneshot(json_request(
            "DELETE",
            &format!("/api/admin/users/{admin_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Cannot delete the last admin user");

    // With a second admin in place, deletion succeeds
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/admin/users",
            Some(&admin_token),
            Some(json!({ "name": "Backup", "email": "backup@falakperfumes.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created["tempPassword"].as_str().is_some());

    let backup = users
        .find_by_email("backup@falakperfumes.com")
        .await
        .unwrap()
        .unwrap();
    let backup_id = backup.id.as_ref().unwrap().key().to_string();

    let response = app(&state)
        .oneshot(json_request(
            "DELETE",
            &format!("/api/admin/users/{backup_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_listing_commits_discount_once() {
    let state = test_state().await;

    let products = ProductRepository::new(state.db.clone());
    products
        .create(falak_server::db::models::ProductCreate {
            name: "Galaxy Storm".to_string(),
            description: "Bold and powerful".to_string(),
            price: 200.0,
            admin_discount: 15,
            category: "men".to_string(),
            subcategory: "bestselling".to_string(),
            image: String::new(),
            icon: "fas fa-bolt".to_string(),
            in_stock: true,
            rating: 4.9,
        })
        .await
        .unwrap();

    let response = app(&state)
        .oneshot(json_request("GET", "/api/products", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    let row = &listing.as_array().unwrap()[0];
    assert_eq!(row["discountPercentage"], 15);
    assert_eq!(row["price"], 170.0);
    assert_eq!(row["originalPrice"], 200.0);

    // Second listing returns the stored figures unchanged
    let response = app(&state)
        .oneshot(json_request("GET", "/api/products", None, None))
        .await
        .unwrap();
    let listing = body_json(response).await;
    let row = &listing.as_array().unwrap()[0];
    assert_eq!(row["discountPercentage"], 15);
    assert_eq!(row["price"], 170.0);
    assert_eq!(row["originalPrice"], 200.0);
}

#[tokio::test]
async fn category_filter_narrows_listing() {
    let state = test_state().await;

    let products = ProductRepository::new(state.db.clone());
    for (name, category) in [("Galaxy Storm", "men"), ("Stellar Rose", "women")] {
        products
            .create(falak_server::db::models::ProductCreate {
                name: name.to_string(),
                description: "test".to_string(),
                price: 100.0,
                admin_discount: 10,
                category: category.to_string(),
                subcategory: "trending".to_string(),
                image: String::new(),
                icon: "fas fa-star".to_string(),
                in_stock: true,
                rating: 4.5,
            })
            .await
            .unwrap();
    }

    let response = app(&state)
        .oneshot(json_request("GET", "/api/products?category=women", None, None))
        .await
        .unwrap();
    let listing = body_json(response).await;
    let rows = listing.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Stellar Rose");
}

#[tokio::test]
async fn newsletter_subscribe_rejects_duplicates() {
    let state = test_state().await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/newsletter/subscribe",
            None,
            Some(json!({ "email": "zahraa@example.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/newsletter/subscribe",
            None,
            Some(json!({ "email": "zahraa@example.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Email is already subscribed to our newsletter");
}

#[tokio::test]
async fn newsletter_emails_are_stored_lowercased() {
    let state = test_state().await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/newsletter/subscribe",
            None,
            Some(json!({ "email": "  Zahraa@Example.COM " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "zahraa@example.com");

    // A differently-cased spelling is the same subscriber
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/newsletter/subscribe",
            None,
            Some(json!({ "email": "zahraa@example.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pricing_resolution_is_pure_until_committed() {
    // Sanity check on the two-phase contract at the library level
    let state = test_state().await;
    let products = ProductRepository::new(state.db.clone());
    let product = products
        .create(falak_server::db::models::ProductCreate {
            name: "Milky Way Mist".to_string(),
            description: "Light and airy".to_string(),
            price: 115.0,
            admin_discount: 0,
            category: "women".to_string(),
            subcategory: "new".to_string(),
            image: String::new(),
            icon: "fas fa-cloud".to_string(),
            in_stock: true,
            rating: 4.5,
        })
        .await
        .unwrap();

    let resolution = pricing::resolve(&product);
    assert!(resolution.commit.is_some());

    // Nothing written until the commit is applied
    let stored = products
        .find_by_id(product.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.discount, 0);
    assert!(stored.original_price.is_none());
}
