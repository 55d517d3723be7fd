//! Application router: wires ports into handlers and mounts every endpoint
//! under `/api`.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::adapters::memory::{
    InMemoryDatabase, InMemoryReviewRepository, InMemorySessionStore, InMemorySongRepository,
    InMemoryUserRepository,
};
use crate::adapters::password::Argon2PasswordHasher;
use crate::adapters::postgres::{
    PostgresReviewRepository, PostgresSongRepository, PostgresUserRepository,
};
use crate::application::handlers::auth::{
    ChangePasswordHandler, GetProfileHandler, LoginHandler, LogoutHandler, RegisterUserHandler,
    SessionAuthenticator, UpdateProfileHandler,
};
use crate::application::handlers::review::{
    CreateReviewHandler, DeleteReviewHandler, GetReviewHandler, ListReviewsHandler,
    ListUserReviewsHandler, ModerateReviewHandler, UpdateReviewHandler,
};
use crate::application::handlers::song::{
    CreateSongHandler, DeleteSongHandler, GetSongHandler, ListSongsHandler, TopSongsHandler,
    UpdateSongHandler,
};
use crate::application::handlers::user::TopReviewersHandler;
use crate::application::RatingAggregator;
use crate::config::{AppConfig, ServerConfig};
use crate::ports::{
    PasswordHasher, ReviewReader, ReviewRepository, SessionStore, SongReader, SongRepository,
    UserReader, UserRepository,
};

use super::auth::{auth_routes, profile_routes, AuthHandlers};
use super::cookie::SessionCookie;
use super::middleware::AuthState;
use super::review::{admin_review_routes, review_routes, ReviewHandlers};
use super::song::{admin_song_routes, song_routes, SongHandlers};
use super::user::{user_routes, UserHandlers};

/// The adapters the application runs on.
#[derive(Clone)]
pub struct Adapters {
    pub users: Arc<dyn UserRepository>,
    pub user_reader: Arc<dyn UserReader>,
    pub songs: Arc<dyn SongRepository>,
    pub song_reader: Arc<dyn SongReader>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub review_reader: Arc<dyn ReviewReader>,
    pub sessions: Arc<dyn SessionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl Adapters {
    /// Everything in process memory; sessions live in their own store.
    pub fn in_memory(db: InMemoryDatabase) -> Self {
        let songs = Arc::new(InMemorySongRepository::new(db.clone()));
        let reviews = Arc::new(InMemoryReviewRepository::new(db.clone()));
        let users = Arc::new(InMemoryUserRepository::new(db));
        Self {
            users: users.clone(),
            user_reader: users,
            songs: songs.clone(),
            song_reader: songs,
            reviews: reviews.clone(),
            review_reader: reviews,
            sessions: Arc::new(InMemorySessionStore::new()),
            hasher: Arc::new(Argon2PasswordHasher::new()),
        }
    }

    /// Catalog and accounts in PostgreSQL; sessions stay in memory.
    pub fn postgres(pool: PgPool) -> Self {
        let songs = Arc::new(PostgresSongRepository::new(pool.clone()));
        let reviews = Arc::new(PostgresReviewRepository::new(pool.clone()));
        let users = Arc::new(PostgresUserRepository::new(pool));
        Self {
            users: users.clone(),
            user_reader: users,
            songs: songs.clone(),
            song_reader: songs,
            reviews: reviews.clone(),
            review_reader: reviews,
            sessions: Arc::new(InMemorySessionStore::new()),
            hasher: Arc::new(Argon2PasswordHasher::new()),
        }
    }
}

/// Handler groups plus the session gate, ready to be routed.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthHandlers,
    pub reviews: ReviewHandlers,
    pub songs: SongHandlers,
    pub users: UserHandlers,
    pub authenticator: AuthState,
}

impl AppState {
    pub fn new(adapters: Adapters, config: &AppConfig) -> Self {
        let aggregator = Arc::new(RatingAggregator::with_serialization(
            adapters.songs.clone(),
            config.reviews.serialize_recompute,
        ));
        let policy = config.reviews.policy();

        let auth = AuthHandlers::new(
            Arc::new(RegisterUserHandler::new(
                adapters.users.clone(),
                adapters.hasher.clone(),
            )),
            Arc::new(LoginHandler::new(
                adapters.users.clone(),
                adapters.hasher.clone(),
                adapters.sessions.clone(),
                config.auth.session_issuer(),
            )),
            Arc::new(LogoutHandler::new(adapters.sessions.clone())),
            Arc::new(GetProfileHandler::new(adapters.users.clone())),
            Arc::new(UpdateProfileHandler::new(adapters.users.clone())),
            Arc::new(ChangePasswordHandler::new(
                adapters.users.clone(),
                adapters.hasher.clone(),
            )),
            SessionCookie::new(config.auth.cookie_secure),
        );

        let reviews = ReviewHandlers {
            create_handler: Arc::new(CreateReviewHandler::new(
                adapters.reviews.clone(),
                adapters.songs.clone(),
                aggregator.clone(),
                policy,
            )),
            update_handler: Arc::new(UpdateReviewHandler::new(
                adapters.reviews.clone(),
                aggregator.clone(),
                policy,
            )),
            delete_handler: Arc::new(DeleteReviewHandler::new(
                adapters.reviews.clone(),
                aggregator.clone(),
                policy,
            )),
            moderate_handler: Arc::new(ModerateReviewHandler::new(
                adapters.reviews.clone(),
                aggregator,
                policy,
            )),
            get_handler: Arc::new(GetReviewHandler::new(adapters.review_reader.clone())),
            list_handler: Arc::new(ListReviewsHandler::new(adapters.review_reader.clone())),
            list_by_user_handler: Arc::new(ListUserReviewsHandler::new(adapters.review_reader)),
        };

        let songs = SongHandlers {
            create_handler: Arc::new(CreateSongHandler::new(adapters.songs.clone())),
            update_handler: Arc::new(UpdateSongHandler::new(adapters.songs.clone())),
            delete_handler: Arc::new(DeleteSongHandler::new(adapters.songs.clone())),
            get_handler: Arc::new(GetSongHandler::new(adapters.songs)),
            list_handler: Arc::new(ListSongsHandler::new(adapters.song_reader.clone())),
            top_handler: Arc::new(TopSongsHandler::new(adapters.song_reader)),
        };

        let users = UserHandlers {
            top_reviewers_handler: Arc::new(TopReviewersHandler::new(adapters.user_reader)),
        };

        let authenticator = Arc::new(SessionAuthenticator::new(
            adapters.sessions,
            config.auth.admin_role(),
        ));

        Self {
            auth,
            reviews,
            songs,
            users,
            authenticator,
        }
    }
}

/// All endpoints, without cross-cutting layers.
pub fn api_router(state: AppState) -> Router {
    let AppState {
        auth,
        reviews,
        songs,
        users,
        authenticator,
    } = state;

    let api = Router::new()
        .nest("/auth", auth_routes(auth.clone()))
        .nest("/profile", profile_routes(auth, authenticator.clone()))
        .nest(
            "/reviews",
            review_routes(reviews.clone(), authenticator.clone()),
        )
        .nest("/users", user_routes(users))
        .nest("/songs", song_routes(songs.clone()))
        .nest(
            "/admin/songs",
            admin_song_routes(songs, authenticator.clone()),
        )
        .nest(
            "/admin/reviews",
            admin_review_routes(reviews, authenticator),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

/// The full application: endpoints plus tracing, CORS and request timeout.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    api_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(server))
            .layer(TimeoutLayer::new(server.request_timeout())),
    )
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Credentialed CORS for the configured origins; none when unset.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
