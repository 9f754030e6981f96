//! API route handlers for the Chronika gateway.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::http::{HeaderMap, StatusCode};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chronika_auth::Claims;
use chronika_core::error::ChronikaError;
use chronika_core::types::{LeaderDraft, LeaderPatch};
use chronika_db::User;
use serde::Deserialize;
use serde_json::{Value, json};

use super::server::AppState;

type ApiResult = (StatusCode, Json<Value>);

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct CountParam {
    pub count: Option<usize>,
}

#[derive(Deserialize)]
pub struct LimitParam {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn failure(status: StatusCode, error: &str) -> ApiResult {
    (status, Json(json!({"success": false, "error": error})))
}

/// Log the real error server-side, send a generic message to the client.
fn internal_error(context: &str, e: impl std::fmt::Display) -> ApiResult {
    tracing::error!("[{context}] {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "error": "An internal error occurred"})),
    )
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Claims from an optional bearer token. Anonymous requests are fine; this
/// only attributes activity when a valid access token happens to be present.
fn optional_claims(state: &AppState, headers: &HeaderMap) -> Option<Claims> {
    let token = bearer_token(headers)?;
    let claims = chronika_auth::validate_token(token, &state.jwt_secret).ok()?;
    (claims.token_type == chronika_auth::TOKEN_ACCESS).then_some(claims)
}

/// Client ip (first X-Forwarded-For hop) and user agent for activity logs.
fn client_meta(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let ua = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    (ip, ua)
}

/// Attempt limiter — max 5 attempts per key per 5 minutes.
fn too_many_attempts(map: &Mutex<HashMap<String, (u32, Instant)>>, key: &str) -> bool {
    let mut attempts = map.lock().unwrap();
    let now = Instant::now();
    if let Some((count, first_at)) = attempts.get(key) {
        if now.duration_since(*first_at).as_secs() < 300 && *count >= 5 {
            return true;
        }
        // reset if window expired
        if now.duration_since(*first_at).as_secs() >= 300 {
            attempts.remove(key);
        }
    }
    let entry = attempts.entry(key.to_string()).or_insert((0, now));
    entry.0 += 1;
    false
}

/// Sanitized user payload — no password hash.
fn user_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "full_name": user.full_name,
        "role": user.role,
        "is_active": user.is_active,
        "last_login": user.last_login,
        "created_at": user.created_at,
    })
}

fn issue_token_pair(state: &AppState, user: &User) -> chronika_core::error::Result<(String, String)> {
    let access = chronika_auth::create_token(
        &user.id,
        &user.username,
        &user.role,
        chronika_auth::TOKEN_ACCESS,
        state.config.auth.access_ttl_secs,
        &state.jwt_secret,
    )?;
    let refresh = chronika_auth::create_token(
        &user.id,
        &user.username,
        &user.role,
        chronika_auth::TOKEN_REFRESH,
        state.config.auth.refresh_ttl_secs,
        &state.jwt_secret,
    )?;
    Ok((access, refresh))
}

// ── Health ──────────────────────────────

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "chronika",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

// ── Leaders ──────────────────────────────

/// Get all published leaders.
pub async fn list_leaders(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.db.list_published() {
        Ok(leaders) => (
            StatusCode::OK,
            Json(json!({"success": true, "count": leaders.len(), "data": leaders})),
        ),
        Err(e) => internal_error("list_leaders", e),
    }
}

/// Get one leader; bumps the view counter and logs the view.
pub async fn get_leader(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult {
    match state.db.get_leader(id) {
        Ok(Some(leader)) if leader.is_published => {
            state.db.increment_view_count(id).ok();

            // activity logging must never fail the request
            let user_id = optional_claims(&state, &headers).map(|c| c.sub);
            let (ip, ua) = client_meta(&headers);
            state
                .db
                .log_activity(
                    "view_leader",
                    user_id.as_deref(),
                    Some(id),
                    Some(json!({"name": leader.name_primary})),
                    ip.as_deref(),
                    ua.as_deref(),
                )
                .ok();

            let leader = state.db.get_leader(id).ok().flatten().unwrap_or(leader);
            (StatusCode::OK, Json(json!({"success": true, "data": leader})))
        }
        Ok(_) => failure(StatusCode::NOT_FOUND, "Leader not found"),
        Err(e) => internal_error("get_leader", e),
    }
}

/// Facts about a leader, generated on first request and persisted.
pub async fn leader_facts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<CountParam>,
) -> ApiResult {
    let leader = match state.db.get_leader(id) {
        Ok(Some(l)) if l.is_published => l,
        Ok(_) => return failure(StatusCode::NOT_FOUND, "Leader not found"),
        Err(e) => return internal_error("leader_facts", e),
    };

    let cfg = state.ai.config();
    let count = params.count.unwrap_or(cfg.facts_count).clamp(1, cfg.facts_max);

    let existing = match state.db.facts_for(id) {
        Ok(f) => f,
        Err(e) => return internal_error("leader_facts", e),
    };
    let facts: Vec<String> = if existing.is_empty() {
        let generated = state.ai.facts_for(&leader, count);
        match state.db.insert_facts_if_absent(id, &generated) {
            Ok(rows) => rows.into_iter().map(|f| f.fact_text).collect(),
            Err(e) => return internal_error("leader_facts", e),
        }
    } else {
        existing.into_iter().map(|f| f.fact_text).collect()
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "leader_id": id,
                "leader_name": leader.name_primary,
                "facts": facts,
            }
        })),
    )
}

/// Search leaders using semantic search (keyword fallback without a model).
pub async fn search_leaders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> ApiResult {
    let query = params.q.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Query parameter required");
    }
    if query.chars().count() < 2 {
        return failure(StatusCode::BAD_REQUEST, "Query must be at least 2 characters");
    }

    let user_id = optional_claims(&state, &headers).map(|c| c.sub);
    let (ip, ua) = client_meta(&headers);
    state
        .db
        .log_activity(
            "search",
            user_id.as_deref(),
            None,
            Some(json!({"query": query})),
            ip.as_deref(),
            ua.as_deref(),
        )
        .ok();

    let candidates = match state.db.list_published() {
        Ok(l) => l,
        Err(e) => return internal_error("search_leaders", e),
    };

    // encoding is CPU-bound; keep it off the async runtime
    let ai = state.ai.clone();
    let q = query.clone();
    match tokio::task::spawn_blocking(move || ai.search(&q, &candidates)).await {
        Ok(Ok(results)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "query": query,
                "count": results.len(),
                "data": results,
            })),
        ),
        Ok(Err(ChronikaError::InvalidQuery(msg))) => failure(StatusCode::BAD_REQUEST, &msg),
        Ok(Err(e)) => internal_error("search_leaders", e),
        Err(e) => internal_error("search_leaders", e),
    }
}

/// Similar leaders for a given leader.
pub async fn leader_recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<CountParam>,
) -> ApiResult {
    let leader = match state.db.get_leader(id) {
        Ok(Some(l)) if l.is_published => l,
        Ok(_) => return failure(StatusCode::NOT_FOUND, "Leader not found"),
        Err(e) => return internal_error("leader_recommendations", e),
    };

    let cfg = state.ai.config();
    let count = params.count.unwrap_or(cfg.recommend_count).clamp(1, cfg.recommend_max);

    let all = match state.db.list_published() {
        Ok(l) => l,
        Err(e) => return internal_error("leader_recommendations", e),
    };

    let ai = state.ai.clone();
    match tokio::task::spawn_blocking(move || ai.recommend(&leader, &all, count)).await {
        Ok(Ok(recommendations)) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": recommendations})),
        ),
        Ok(Err(e)) => internal_error("leader_recommendations", e),
        Err(e) => internal_error("leader_recommendations", e),
    }
}

/// Create a new leader (requires the create_leaders permission).
pub async fn create_leader(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(draft): Json<LeaderDraft>,
) -> ApiResult {
    if !state.db.role_has_permission(&claims.role, "create_leaders") {
        return failure(
            StatusCode::FORBIDDEN,
            "You do not have permission to access this resource",
        );
    }
    if draft.name_primary.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Missing required field: name_primary");
    }
    if draft.name_secondary.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Missing required field: name_secondary");
    }

    match state.db.create_leader(&draft) {
        Ok(leader) => {
            tracing::info!("Leader created: {} by {}", leader.name_primary, claims.username);
            (StatusCode::CREATED, Json(json!({"success": true, "data": leader})))
        }
        Err(e) => internal_error("create_leader", e),
    }
}

/// Partially update a leader (requires the update_leaders permission).
pub async fn update_leader(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(patch): Json<LeaderPatch>,
) -> ApiResult {
    if !state.db.role_has_permission(&claims.role, "update_leaders") {
        return failure(
            StatusCode::FORBIDDEN,
            "You do not have permission to access this resource",
        );
    }

    match state.db.update_leader(id, patch) {
        Ok(Some(leader)) => {
            tracing::info!("Leader updated: {} by {}", leader.name_primary, claims.username);
            (StatusCode::OK, Json(json!({"success": true, "data": leader})))
        }
        Ok(None) => failure(StatusCode::NOT_FOUND, "Leader not found"),
        Err(e) => internal_error("update_leader", e),
    }
}

/// Delete a leader (requires the delete_leaders permission).
pub async fn delete_leader(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> ApiResult {
    if !state.db.role_has_permission(&claims.role, "delete_leaders") {
        return failure(
            StatusCode::FORBIDDEN,
            "You do not have permission to access this resource",
        );
    }

    match state.db.delete_leader(id) {
        Ok(true) => {
            tracing::info!("Leader {id} deleted by {}", claims.username);
            (StatusCode::OK, Json(json!({"success": true})))
        }
        Ok(false) => failure(StatusCode::NOT_FOUND, "Leader not found"),
        Err(e) => internal_error("delete_leader", e),
    }
}

// ── Auth ──────────────────────────────

/// Register a new user.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult {
    if too_many_attempts(&state.register_attempts, &req.email) {
        return failure(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many registration attempts. Please try again later.",
        );
    }

    for (field, value) in [
        ("username", &req.username),
        ("email", &req.email),
        ("password", &req.password),
    ] {
        if value.trim().is_empty() {
            return failure(
                StatusCode::BAD_REQUEST,
                &format!("Missing required field: {field}"),
            );
        }
    }

    match state.db.get_user_by_username(&req.username) {
        Ok(Some(_)) => return failure(StatusCode::BAD_REQUEST, "Username already exists"),
        Err(e) => return internal_error("register", e),
        _ => {}
    }
    match state.db.get_user_by_email(&req.email) {
        Ok(Some(_)) => return failure(StatusCode::BAD_REQUEST, "Email already exists"),
        Err(e) => return internal_error("register", e),
        _ => {}
    }

    // bcrypt in a blocking thread to avoid stalling the async runtime
    let password = req.password.clone();
    let hash = match tokio::task::spawn_blocking(move || chronika_auth::hash_password(&password)).await
    {
        Ok(Ok(h)) => h,
        Ok(Err(e)) => return internal_error("register", e),
        Err(e) => return internal_error("register", e),
    };

    let user = match state
        .db
        .create_user(&req.username, &req.email, &hash, req.full_name.as_deref(), "user")
    {
        Ok(u) => u,
        Err(e) => return internal_error("register", e),
    };
    tracing::info!("New user registered: {}", user.username);

    match issue_token_pair(&state, &user) {
        Ok((access_token, refresh_token)) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "data": {
                    "user": user_json(&user),
                    "access_token": access_token,
                    "refresh_token": refresh_token,
                }
            })),
        ),
        Err(e) => internal_error("register", e),
    }
}

/// Login with username (or email) and password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> ApiResult {
    if too_many_attempts(&state.login_attempts, &req.username) {
        return failure(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many login attempts. Please wait 5 minutes.",
        );
    }
    if req.username.trim().is_empty() || req.password.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Username and password required");
    }

    let user = match state.db.get_user_by_username(&req.username) {
        Ok(Some(u)) => Some(u),
        Ok(None) => state.db.get_user_by_email(&req.username).ok().flatten(),
        Err(e) => return internal_error("login", e),
    };
    let Some(user) = user else {
        return failure(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };

    let password = req.password.clone();
    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || chronika_auth::verify_password(&password, &hash))
        .await
        .unwrap_or(false);
    if !verified {
        tracing::warn!("Invalid credentials for {}", req.username);
        return failure(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    if !user.is_active {
        return failure(StatusCode::UNAUTHORIZED, "Account is deactivated");
    }

    state.db.update_last_login(&user.id).ok();
    let (ip, ua) = client_meta(&headers);
    state
        .db
        .log_activity("login", Some(&user.id), None, None, ip.as_deref(), ua.as_deref())
        .ok();
    tracing::info!("User logged in: {}", user.username);

    match issue_token_pair(&state, &user) {
        Ok((access_token, refresh_token)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "user": user_json(&user),
                    "access_token": access_token,
                    "refresh_token": refresh_token,
                }
            })),
        ),
        Err(e) => internal_error("login", e),
    }
}

/// Current user information.
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> ApiResult {
    match state.db.get_user_by_id(&claims.sub) {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": user_json(&user)})),
        ),
        Ok(None) => failure(StatusCode::NOT_FOUND, "User not found"),
        Err(e) => internal_error("current_user", e),
    }
}

/// Exchange a refresh token for a new access token.
pub async fn refresh(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult {
    let Some(token) = bearer_token(&headers) else {
        return failure(StatusCode::UNAUTHORIZED, "Authentication required");
    };
    let claims = match chronika_auth::validate_token(token, &state.jwt_secret) {
        Ok(c) => c,
        Err(_) => return failure(StatusCode::UNAUTHORIZED, "Invalid token"),
    };
    if claims.token_type != chronika_auth::TOKEN_REFRESH {
        return failure(StatusCode::UNAUTHORIZED, "Refresh token required");
    }

    match chronika_auth::create_token(
        &claims.sub,
        &claims.username,
        &claims.role,
        chronika_auth::TOKEN_ACCESS,
        state.config.auth.access_ttl_secs,
        &state.jwt_secret,
    ) {
        Ok(access_token) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": {"access_token": access_token}})),
        ),
        Err(e) => internal_error("refresh", e),
    }
}

// ── Analytics ──────────────────────────────

/// Most viewed leaders.
pub async fn popular_leaders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParam>,
) -> ApiResult {
    let limit = params.limit.unwrap_or(10).min(50);
    match state.db.popular(limit) {
        Ok(leaders) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": leaders})),
        ),
        Err(e) => internal_error("popular_leaders", e),
    }
}

/// Recent activity log (requires the view_analytics permission).
pub async fn recent_activity(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<LimitParam>,
) -> ApiResult {
    if !state.db.role_has_permission(&claims.role, "view_analytics") {
        return failure(
            StatusCode::FORBIDDEN,
            "You do not have permission to access this resource",
        );
    }

    let limit = params.limit.unwrap_or(100).min(500);
    match state.db.recent_activity(limit) {
        Ok(entries) => (
            StatusCode::OK,
            Json(json!({"success": true, "count": entries.len(), "data": entries})),
        ),
        Err(e) => internal_error("recent_activity", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer abc.def.ghi".parse().unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(axum::http::header::AUTHORIZATION, "Basic xyz".parse().unwrap());
        assert!(bearer_token(&headers).is_none());
    }

    #[test]
    fn test_client_meta_forwarded_for() {
        let mut headers = HeaderMap::new();
        let (ip, ua) = client_meta(&headers);
        assert!(ip.is_none());
        assert!(ua.is_none());

        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        headers.insert(axum::http::header::USER_AGENT, "curl/8".parse().unwrap());
        let (ip, ua) = client_meta(&headers);
        assert_eq!(ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(ua.as_deref(), Some("curl/8"));
    }

    #[test]
    fn test_attempt_limiter_blocks_sixth_try() {
        let map = Mutex::new(HashMap::new());
        for _ in 0..5 {
            assert!(!too_many_attempts(&map, "someone@example.com"));
        }
        assert!(too_many_attempts(&map, "someone@example.com"));
        // other keys are unaffected
        assert!(!too_many_attempts(&map, "other@example.com"));
    }
}
