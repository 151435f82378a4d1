use tatu_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::{
        CheckoutSession, CheckoutSessionParams, CheckoutSessionStatus, PaymentService,
    },
    domain::services::auth_service::AuthService,
    error::AppError,
    infra::repositories::{
        sqlite_artist_repo::SqliteArtistRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_catalog_repo::SqliteCatalogRepo,
        sqlite_engagement_repo::{SqliteFavoriteRepo, SqliteSavedArRepo},
        sqlite_review_repo::SqliteReviewRepo,
        sqlite_slot_repo::SqliteSlotRepo,
        sqlite_tattoo_repo::SqliteTattooRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::{json, Value};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockPaymentService {
    pub payment_status: String,
}

#[async_trait]
impl PaymentService for MockPaymentService {
    async fn create_checkout_session(
        &self,
        _params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, AppError> {
        Ok(CheckoutSession {
            id: "cs_test_123".to_string(),
            url: "https://checkout.stripe.test/c/pay/cs_test_123".to_string(),
        })
    }

    async fn retrieve_session(
        &self,
        _session_id: &str,
    ) -> Result<CheckoutSessionStatus, AppError> {
        let mut metadata = HashMap::new();
        metadata.insert("artistDescription".to_string(), "Paid-up artist".to_string());
        metadata.insert("cityId".to_string(), "1".to_string());
        metadata.insert("styleIds".to_string(), "1,2".to_string());
        Ok(CheckoutSessionStatus {
            payment_status: self.payment_status.clone(),
            metadata,
        })
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_payment_status("paid").await
    }

    pub async fn with_payment_status(payment_status: &str) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            stripe_secret_key: "sk_test_placeholder".to_string(),
            checkout_success_url: "http://localhost/success?session_id={CHECKOUT_SESSION_ID}"
                .to_string(),
            checkout_cancel_url: "http://localhost/cancelled".to_string(),
        };

        let auth_service = Arc::new(AuthService::new(&config));

        let state = Arc::new(AppState {
            config,
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            artist_repo: Arc::new(SqliteArtistRepo::new(pool.clone())),
            catalog_repo: Arc::new(SqliteCatalogRepo::new(pool.clone())),
            tattoo_repo: Arc::new(SqliteTattooRepo::new(pool.clone())),
            slot_repo: Arc::new(SqliteSlotRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            review_repo: Arc::new(SqliteReviewRepo::new(pool.clone())),
            favorite_repo: Arc::new(SqliteFavoriteRepo::new(pool.clone())),
            saved_ar_repo: Arc::new(SqliteSavedArRepo::new(pool.clone())),
            payment_service: Arc::new(MockPaymentService {
                payment_status: payment_status.to_string(),
            }),
            auth_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Registers a client account and returns its bearer token.
    pub async fn register_user(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/register/user",
                None,
                Some(json!({
                    "email": email,
                    "password": "s3cret-pass",
                    "firstName": "Test",
                    "lastName": "User",
                    "birthDate": "1995-04-12"
                })),
            )
            .await;
        assert_eq!(response.status(), 201, "user registration failed in helper");

        let body = parse_body(response).await;
        body["token"].as_str().expect("no token in response").to_string()
    }

    /// Upgrades a registered user to an artist; returns the fresh artist
    /// token and the artist id.
    pub async fn register_artist(&self, token: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/register/artist",
                Some(token),
                Some(json!({
                    "artistDescription": "Blackwork specialist",
                    "cityId": 1,
                    "styleIds": [1, 3]
                })),
            )
            .await;
        assert_eq!(response.status(), 201, "artist registration failed in helper");

        let body = parse_body(response).await;
        (
            body["token"].as_str().expect("no token").to_string(),
            body["artistId"].as_str().expect("no artistId").to_string(),
        )
    }

    /// Creates a future slot for the artist token and returns the slot id.
    pub async fn create_slot(&self, token: &str, date_time: &str, duration: i32) -> String {
        let response = self
            .request(
                "POST",
                "/appointments",
                Some(token),
                Some(json!({ "dateTime": date_time, "duration": duration })),
            )
            .await;
        assert_eq!(response.status(), 201, "slot creation failed in helper");

        let body = parse_body(response).await;
        body["slot"]["id"].as_str().expect("no slot id").to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

pub async fn parse_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
