use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, put},
    Router,
};
use tower::Layer;
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::auth::providers::ProviderRegistry;
use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers::{protected, public};
use crate::middleware::token_middleware;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub providers: Arc<ProviderRegistry>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>, providers: ProviderRegistry) -> Self {
        Self {
            config: Arc::new(config),
            store,
            providers: Arc::new(providers),
        }
    }
}

/// Full application: routes plus trailing-slash normalisation, so the
/// `href` values handed out (`/api/v1/modules/1/`) resolve.
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(provider_routes())
        // Modules, plates, colors, users
        .merge(module_routes())
        .merge(user_routes())
        // Global middleware
        .layer(middleware::from_fn_with_state(state.clone(), token_middleware))
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if let Some(cors) = cors_layer(&state.config) {
        router = router.layer(cors);
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn provider_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/providers", get(public::providers_list))
        .route("/auth/providers/:name", get(public::provider_get))
}

fn module_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/modules",
            get(public::modules_list).post(protected::module_post),
        )
        .route(
            "/api/v1/modules/:id",
            get(protected::module_get)
                .put(protected::module_put)
                .patch(protected::module_put)
                .delete(protected::module_delete),
        )
        .route(
            "/api/v1/modules/:id/plates",
            get(protected::plates_list).post(protected::plate_post),
        )
        .route(
            "/api/v1/modules/:id/plates/:plate_id",
            put(protected::plate_put)
                .patch(protected::plate_put)
                .delete(protected::plate_delete),
        )
        .route("/api/v1/colors", get(protected::colors_list))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/user",
            get(protected::user_self_get)
                .put(protected::user_self_put)
                .post(protected::user_self_put),
        )
        .route(
            "/api/v1/users/:id",
            get(protected::user_get)
                .put(protected::user_put)
                .post(protected::user_put),
        )
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }

    let origins = &config.security.cors_origins;
    let layer = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers(Any)
    };
    Some(layer)
}
