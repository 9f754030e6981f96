//! HTTP server implementation using Axum.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::{
    Router, middleware,
    extract::State,
    routing::{get, post, put},
};
use chronika_ai::AiService;
use chronika_core::config::ChronikaConfig;
use chronika_core::error::{ChronikaError, Result};
use chronika_db::LeadersDb;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the API server.
pub struct AppState {
    pub config: ChronikaConfig,
    pub db: Arc<LeadersDb>,
    /// Fact bank + ranker + lazily-loaded embedding model.
    pub ai: Arc<AiService>,
    pub start_time: Instant,
    /// Resolved once at startup; env override wins over the config file.
    pub jwt_secret: String,
    /// Login limiter: username/email → (attempt count, window start).
    pub login_attempts: Mutex<HashMap<String, (u32, Instant)>>,
    /// Registration limiter, same shape.
    pub register_attempts: Mutex<HashMap<String, (u32, Instant)>>,
}

/// JWT auth middleware — validates Authorization: Bearer <token>.
async fn require_auth(
    State(state): State<Arc<AppState>>,
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if let Some(token) = auth_header.strip_prefix("Bearer ") {
        if let Ok(claims) = chronika_auth::validate_token(token, &state.jwt_secret) {
            if claims.token_type == chronika_auth::TOKEN_ACCESS {
                let mut req = req;
                req.extensions_mut().insert(claims);
                return next.run(req).await;
            }
        }
    }

    axum::response::Response::builder()
        .status(axum::http::StatusCode::UNAUTHORIZED)
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({"success": false, "error": "Authentication required"}).to_string(),
        ))
        .unwrap()
}

/// Build the Axum router with all routes.
pub fn build_router(shared: Arc<AppState>) -> Router {
    // Protected routes — require a valid access token
    let protected = Router::new()
        .route("/api/auth/me", get(super::routes::current_user))
        .route("/api/leaders", post(super::routes::create_leader))
        .route("/api/leaders/{id}", put(super::routes::update_leader))
        .route(
            "/api/leaders/{id}",
            axum::routing::delete(super::routes::delete_leader),
        )
        .route(
            "/api/analytics/recent-activity",
            get(super::routes::recent_activity),
        )
        .route_layer(middleware::from_fn_with_state(shared.clone(), require_auth));

    // Public routes — no auth
    let public = Router::new()
        .route("/health", get(super::routes::health_check))
        .route("/api/leaders", get(super::routes::list_leaders))
        .route("/api/leaders/search", get(super::routes::search_leaders))
        .route("/api/leaders/{id}", get(super::routes::get_leader))
        .route("/api/leaders/{id}/facts", get(super::routes::leader_facts))
        .route(
            "/api/leaders/{id}/recommendations",
            get(super::routes::leader_recommendations),
        )
        .route("/api/analytics/popular", get(super::routes::popular_leaders))
        .route("/api/auth/register", post(super::routes::register))
        .route("/api/auth/login", post(super::routes::login))
        .route("/api/auth/refresh", post(super::routes::refresh));

    let cors = {
        let methods = [
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ];
        let origins = &shared.config.server.cors_origins;
        if origins.iter().any(|o| o == "*") {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers(Any)
                .max_age(std::time::Duration::from_secs(3600))
        } else {
            let allowed: Vec<axum::http::HeaderValue> = origins
                .iter()
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(methods)
                .allow_headers(Any)
                .max_age(std::time::Duration::from_secs(3600))
        }
    };

    protected
        .merge(public)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Create the default admin account on first start.
fn ensure_default_admin(db: &LeadersDb) -> Result<()> {
    if db.get_user_by_username("admin")?.is_some() {
        return Ok(());
    }
    let password = std::env::var("CHRONIKA_ADMIN_PASSWORD").unwrap_or_default();
    let (password, is_default) = if password.is_empty() {
        ("admin123".to_string(), true)
    } else {
        (password, false)
    };
    let hash = chronika_auth::hash_password(&password)?;
    db.create_user("admin", "admin@chronika.local", &hash, Some("System Administrator"), "admin")?;
    if is_default {
        tracing::warn!(
            "⚠️ Default admin created with a development password — set CHRONIKA_ADMIN_PASSWORD"
        );
    } else {
        tracing::info!("✅ Default admin user created");
    }
    Ok(())
}

/// Start the HTTP server. Expects `config.database.path` to be expanded.
pub async fn start(config: ChronikaConfig) -> Result<()> {
    let db = LeadersDb::open(Path::new(&config.database.path))?;
    let seeded = db.seed_leaders_if_empty()?;
    if seeded > 0 {
        tracing::info!("📚 Seeded {seeded} leaders");
    }
    ensure_default_admin(&db)?;

    let ai = Arc::new(AiService::new(config.ai.clone()));
    tracing::info!(
        "🧠 Semantic search {} (model: {})",
        if config.ai.enabled { "enabled" } else { "disabled" },
        config.ai.model
    );
    if config.ai.enabled {
        // prefetch the model so the first search doesn't pay the load
        let ai_warm = ai.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = ai_warm.warm_up() {
                tracing::warn!("{e}");
            }
        });
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        jwt_secret: config.auth.resolved_jwt_secret(),
        config,
        db: Arc::new(db),
        ai,
        start_time: Instant::now(),
        login_attempts: Mutex::new(HashMap::new()),
        register_attempts: Mutex::new(HashMap::new()),
    };
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ChronikaError::Gateway(format!("Bind error: {e}")))?;

    tracing::info!("🌐 Chronika API listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| ChronikaError::Gateway(format!("Server error: {e}")))?;
    Ok(())
}
