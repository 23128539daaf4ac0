//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{
    extract::Extension,
    middleware,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, Uri,
    },
    routing::{get, post},
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::error::{attach_debug_detail, ApiError};
use crate::server::routes::{
    complete_problem_handler, feedback_stats_handler, generate_feedback_handler,
    generate_hints_handler, get_preferences_handler, health_handler, hint_stats_handler,
    leaderboard_handler, platform_stats_handler, rate_feedback_handler, reveal_hint_handler,
    update_preferences_handler, user_progress_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
}

impl AxumAppState {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            deps: Arc::new(deps),
        }
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Not Found - {}", uri.path()))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the API router without rate limiting.
pub fn build_router(state: AxumAppState, config: &Config) -> Router {
    let api = Router::new()
        .route("/hints", post(generate_hints_handler))
        .route("/hints/stats", get(hint_stats_handler))
        .route("/feedback", post(generate_feedback_handler))
        .route("/feedback/stats", get(feedback_stats_handler))
        .route("/feedback/rate", post(rate_feedback_handler))
        .route("/progress/hint", post(reveal_hint_handler))
        .route("/progress/complete", post(complete_problem_handler))
        .route("/progress/platforms", get(platform_stats_handler))
        .route("/progress/leaderboard/:platform", get(leaderboard_handler))
        .route("/progress/:user_id", get(user_progress_handler))
        .route(
            "/users/:user_id/preferences",
            get(get_preferences_handler).put(update_preferences_handler),
        );

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .fallback(not_found)
        .layer(Extension(state));

    if config.development {
        router = router.layer(middleware::from_fn(attach_debug_detail));
    }

    router
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Build the full application: the API router behind a per-IP rate limit.
///
/// Serve with `into_make_service_with_connect_info::<SocketAddr>()` so the
/// limiter can fall back to the peer address.
pub fn build_app(state: AxumAppState, config: &Config) -> Result<Router> {
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .use_headers()
            .finish()
            .ok_or_else(|| anyhow!("Rate limit values must be greater than zero"))?,
    );

    Ok(build_router(state, config).layer(GovernorLayer {
        config: rate_limit_config,
    }))
}
