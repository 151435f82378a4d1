use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::auth_service::AuthService;
use crate::infra::payment::stripe_service::StripeCheckoutService;
use crate::infra::repositories::{
    postgres_artist_repo::PostgresArtistRepo,
    postgres_booking_repo::PostgresBookingRepo,
    postgres_catalog_repo::PostgresCatalogRepo,
    postgres_engagement_repo::{PostgresFavoriteRepo, PostgresSavedArRepo},
    postgres_review_repo::PostgresReviewRepo,
    postgres_slot_repo::PostgresSlotRepo,
    postgres_tattoo_repo::PostgresTattooRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_artist_repo::SqliteArtistRepo,
    sqlite_booking_repo::SqliteBookingRepo,
    sqlite_catalog_repo::SqliteCatalogRepo,
    sqlite_engagement_repo::{SqliteFavoriteRepo, SqliteSavedArRepo},
    sqlite_review_repo::SqliteReviewRepo,
    sqlite_slot_repo::SqliteSlotRepo,
    sqlite_tattoo_repo::SqliteTattooRepo,
    sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let payment_service = Arc::new(StripeCheckoutService::new(config.stripe_secret_key.clone()));
    let auth_service = Arc::new(AuthService::new(config));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            artist_repo: Arc::new(PostgresArtistRepo::new(pool.clone())),
            catalog_repo: Arc::new(PostgresCatalogRepo::new(pool.clone())),
            tattoo_repo: Arc::new(PostgresTattooRepo::new(pool.clone())),
            slot_repo: Arc::new(PostgresSlotRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            review_repo: Arc::new(PostgresReviewRepo::new(pool.clone())),
            favorite_repo: Arc::new(PostgresFavoriteRepo::new(pool.clone())),
            saved_ar_repo: Arc::new(PostgresSavedArRepo::new(pool.clone())),
            payment_service,
            auth_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            artist_repo: Arc::new(SqliteArtistRepo::new(pool.clone())),
            catalog_repo: Arc::new(SqliteCatalogRepo::new(pool.clone())),
            tattoo_repo: Arc::new(SqliteTattooRepo::new(pool.clone())),
            slot_repo: Arc::new(SqliteSlotRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            review_repo: Arc::new(SqliteReviewRepo::new(pool.clone())),
            favorite_repo: Arc::new(SqliteFavoriteRepo::new(pool.clone())),
            saved_ar_repo: Arc::new(SqliteSavedArRepo::new(pool.clone())),
            payment_service,
            auth_service,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
