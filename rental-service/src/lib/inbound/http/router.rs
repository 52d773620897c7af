use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::check;
use super::handlers::auth::login;
use super::handlers::auth::register;
use super::handlers::comments::create_comment;
use super::handlers::comments::delete_comment;
use super::handlers::comments::list_comments;
use super::handlers::favorites::add_favorite;
use super::handlers::favorites::list_favorites;
use super::handlers::favorites::remove_favorite;
use super::handlers::offers::create_offer;
use super::handlers::offers::delete_offer;
use super::handlers::offers::get_offer;
use super::handlers::offers::list_offers;
use super::handlers::offers::list_premium_offers;
use super::handlers::offers::update_offer;
use super::handlers::users::update_profile;
use super::handlers::users::upload_avatar;
use crate::config::UploadsConfig;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::service::AuthService;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::comment::service::CommentService;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::favorite::ports::FavoriteServicePort;
use crate::domain::favorite::service::FavoriteService;
use crate::domain::offer::ports::OfferRepository;
use crate::domain::offer::ports::OfferServicePort;
use crate::domain::offer::service::OfferService;
use crate::domain::rating::ports::StaleAggregateReporter;
use crate::domain::user::ports::AvatarStorage;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

/// Services shared by every handler.
///
/// Held as trait objects so the same router runs over PostgreSQL or the
/// in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub offer_service: Arc<dyn OfferServicePort>,
    pub comment_service: Arc<dyn CommentServicePort>,
    pub favorite_service: Arc<dyn FavoriteServicePort>,
}

/// Storage adapters the services are built over.
pub struct Adapters<UR, OR, CR, FR, AS, SR> {
    pub users: Arc<UR>,
    pub offers: Arc<OR>,
    pub comments: Arc<CR>,
    pub favorites: Arc<FR>,
    pub avatars: Arc<AS>,
    pub stale_reporter: Arc<SR>,
}

impl AppState {
    /// Wire every domain service over the given adapters.
    pub fn new<UR, OR, CR, FR, AS, SR>(
        adapters: Adapters<UR, OR, CR, FR, AS, SR>,
        authenticator: Arc<Authenticator>,
    ) -> Self
    where
        UR: UserRepository,
        OR: OfferRepository,
        CR: CommentRepository,
        FR: FavoriteRepository,
        AS: AvatarStorage,
        SR: StaleAggregateReporter,
    {
        let Adapters {
            users,
            offers,
            comments,
            favorites,
            avatars,
            stale_reporter,
        } = adapters;

        Self {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&users),
                Arc::clone(&authenticator),
            )),
            user_service: Arc::new(UserService::new(
                Arc::clone(&users),
                avatars,
                authenticator,
            )),
            offer_service: Arc::new(OfferService::new(
                Arc::clone(&offers),
                Arc::clone(&comments),
                Arc::clone(&favorites),
                Arc::clone(&users),
            )),
            comment_service: Arc::new(CommentService::new(
                comments,
                Arc::clone(&offers),
                users,
                stale_reporter,
            )),
            favorite_service: Arc::new(FavoriteService::new(favorites, offers)),
        }
    }
}

pub fn create_router(state: AppState, uploads: &UploadsConfig) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/check", get(check));

    let user_routes = Router::new()
        .route("/api/users/me", patch(update_profile))
        .route("/api/users/avatar", post(upload_avatar));

    let offer_routes = Router::new()
        .route("/api/offers", get(list_offers).post(create_offer))
        .route("/api/offers/premium/:city", get(list_premium_offers))
        .route(
            "/api/offers/:offer_id",
            get(get_offer).patch(update_offer).delete(delete_offer),
        )
        .route(
            "/api/offers/:offer_id/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/api/offers/:offer_id/comments/:comment_id",
            delete(delete_comment),
        );

    let favorite_routes = Router::new()
        .route("/api/favorites", get(list_favorites))
        .route(
            "/api/favorites/:offer_id",
            post(add_favorite).delete(remove_favorite),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .merge(offer_routes)
        .merge(favorite_routes)
        .nest_service(&uploads.public_path, ServeDir::new(&uploads.directory))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
