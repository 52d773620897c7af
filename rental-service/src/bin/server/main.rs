use std::sync::Arc;

use auth::Authenticator;
use rental_service::config::Config;
use rental_service::inbound::http::create_router;
use rental_service::inbound::http::Adapters;
use rental_service::inbound::http::AppState;
use rental_service::outbound::repositories::InMemoryStore;
use rental_service::outbound::repositories::PostgresCommentRepository;
use rental_service::outbound::repositories::PostgresFavoriteRepository;
use rental_service::outbound::repositories::PostgresOfferRepository;
use rental_service::outbound::repositories::PostgresUserRepository;
use rental_service::outbound::telemetry::TracingStaleAggregateReporter;
use rental_service::outbound::uploads::LocalAvatarStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "rental-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        in_memory = config.database.is_memory(),
        uploads = %config.uploads.directory,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.pepper()?,
        &config.signing_secret()?,
        config.token_ttl(),
    )?);
    let avatars = Arc::new(LocalAvatarStorage::new(
        &config.uploads.directory,
        &config.uploads.public_path,
    ));
    let stale_reporter = Arc::new(TracingStaleAggregateReporter);

    let state = if config.database.is_memory() {
        tracing::warn!(database = "memory", "Using in-process store, data is not persisted");

        let store = Arc::new(InMemoryStore::new());
        AppState::new(
            Adapters {
                users: Arc::clone(&store),
                offers: Arc::clone(&store),
                comments: Arc::clone(&store),
                favorites: store,
                avatars,
                stale_reporter,
            },
            authenticator,
        )
    } else {
        let pg_pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;
        tracing::info!(
            max_connections = config.database.max_connections,
            database = "postgresql",
            "Database connection pool created"
        );

        sqlx::migrate!("./migrations").run(&pg_pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        AppState::new(
            Adapters {
                users: Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                offers: Arc::new(PostgresOfferRepository::new(pg_pool.clone())),
                comments: Arc::new(PostgresCommentRepository::new(pg_pool.clone())),
                favorites: Arc::new(PostgresFavoriteRepository::new(pg_pool)),
                avatars,
                stale_reporter,
            },
            authenticator,
        )
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(state, &config.uploads);
    if let Err(e) = axum::serve(http_listener, application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
