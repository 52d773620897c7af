use std::sync::Arc;

use auth::Authenticator;
use auth::Secret;
use rental_service::config::UploadsConfig;
use rental_service::inbound::http::create_router;
use rental_service::inbound::http::Adapters;
use rental_service::inbound::http::AppState;
use rental_service::outbound::repositories::InMemoryStore;
use rental_service::outbound::telemetry::TracingStaleAggregateReporter;
use rental_service::outbound::uploads::LocalAvatarStorage;
use serde_json::json;
use serde_json::Value;
use tempfile::TempDir;

const TEST_PEPPER: &str = "test-pepper";
const TEST_SIGNING_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub uploads: TempDir,
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

        let uploads = tempfile::tempdir().expect("Failed to create uploads directory");
        let uploads_config = UploadsConfig {
            directory: uploads.path().to_string_lossy().to_string(),
            public_path: "/upload".to_string(),
        };

        let authenticator = Arc::new(
            Authenticator::new(
                Secret::new("security.salt", TEST_PEPPER).unwrap(),
                &Secret::new("jwt.secret", TEST_SIGNING_SECRET).unwrap(),
                chrono::Duration::hours(24),
            )
            .expect("Failed to create authenticator"),
        );

        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(
            Adapters {
                users: Arc::clone(&store),
                offers: Arc::clone(&store),
                comments: Arc::clone(&store),
                favorites: store,
                avatars: Arc::new(LocalAvatarStorage::new(
                    &uploads_config.directory,
                    &uploads_config.public_path,
                )),
                stale_reporter: Arc::new(TracingStaleAggregateReporter),
            },
            authenticator,
        );

        let router = create_router(state, &uploads_config);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            uploads,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Register a user and return the response body
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().unwrap().to_string()
    }

    /// Register and log in, returning the session token
    pub async fn register_and_login(&self, name: &str, email: &str) -> String {
        self.register(name, email, "secret1").await;
        self.login(email, "secret1").await
    }

    /// Publish an offer as the token's owner and return its id
    pub async fn create_offer(&self, token: &str) -> String {
        let response = self
            .post("/api/offers")
            .bearer_auth(token)
            .json(&offer_body())
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().unwrap().to_string()
    }
}

/// Valid body for publishing an offer
pub fn offer_body() -> Value {
    json!({
        "title": "Sunny flat near the Dom",
        "description": "Two bright rooms five minutes from the cathedral.",
        "city": "Cologne",
        "previewImage": "preview.jpg",
        "images": ["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg"],
        "isPremium": true,
        "housingType": "apartment",
        "rooms": 2,
        "maxGuests": 4,
        "price": 140,
        "comforts": ["Washer", "Towels"],
        "location": { "latitude": 50.94, "longitude": 6.96 }
    })
}
