#![allow(dead_code)]

pub mod memory;

use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::HashingCost;
use auth::PasswordHasher;
use marketplace_service::domain::product::service::ProductService;
use marketplace_service::domain::user::models::EmailAddress;
use marketplace_service::domain::user::models::RolePolicy;
use marketplace_service::domain::user::service::UserService;
use marketplace_service::inbound::http::router::create_router;
use memory::InMemoryProductRepository;
use memory::InMemoryUserRepository;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@b2bmarketplace.com";
pub const STRONG_PASSWORD: &str = "Abcdef12";

/// Test application that spawns a real server
///
/// Repositories are in memory, so each app starts from an empty store.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap work factor keeps the suite fast
        let hasher = PasswordHasher::with_cost(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, chrono::Duration::hours(24))
                .with_password_hasher(hasher),
        );

        let role_policy = RolePolicy::new(Some(
            EmailAddress::new(ADMIN_EMAIL.to_string()).expect("Invalid admin email"),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::clone(&authenticator),
            role_policy,
        ));
        let product_service = Arc::new(ProductService::new(Arc::new(
            InMemoryProductRepository::default(),
        )));

        let router = create_router(user_service, product_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Register an account and return the response.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account and return its bearer token.
    pub async fn register_token(&self, name: &str, email: &str) -> String {
        let response = self.register(name, email, STRONG_PASSWORD).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Register the bootstrap admin and return its token. Call once per app.
    pub async fn admin_token(&self) -> String {
        self.register_token("Admin", ADMIN_EMAIL).await
    }

    /// Sign arbitrary claims with the server's key.
    pub fn sign(&self, claims: &Claims) -> String {
        self.authenticator
            .generate_token(claims)
            .expect("Failed to sign token")
    }

    /// Create a product as admin and return its id.
    pub async fn create_product(&self, admin_token: &str, body: Value) -> i64 {
        let response = self
            .post("/api/products")
            .bearer_auth(admin_token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["product"]["id"].as_i64().expect("Missing product id")
    }
}
