/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (HTTP 共通 / Bearer)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::config::{AppEnv, Config, HttpConfig};
use crate::repos::{order_repo::OrderRepo, user_repo::UserRepo};
use crate::services::access::RoleRowIdentityLookup;
use crate::services::auth::build_auth_service;
use crate::state::AppState;
use crate::{api, middleware};

// Used when RUST_LOG is unset.
const DEFAULT_LOG_FILTER: &str = "info,order_access=info,tower_http=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Route panics through tracing. Outside production the process aborts.
fn install_panic_hook(app_env: AppEnv) {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(%location, "panic: {info}");

        if !app_env.is_production() {
            process::abort();
        }
        previous(info);
    }));
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    install_panic_hook(config.app_env);

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    let auth = build_auth_service(config)?;
    let orders = Arc::new(OrderRepo::new(db.clone()));
    let identities = Arc::new(RoleRowIdentityLookup::new(UserRepo::new(db)));

    Ok(AppState::new(auth, orders, identities))
}

pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, http)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::services::access::fake::{self, InMemoryStore};
    use crate::services::access::types::{ROLE_ADMIN, ROLE_CLIENT};
    use crate::services::auth::AuthService;
    use crate::services::auth::access_jwt::test_keys::{self, AUDIENCE, ISSUER, PUBLIC_KEY_PEM};

    fn app() -> Router {
        app_with(&HttpConfig::default())
    }

    fn app_with(http: &HttpConfig) -> Router {
        let store = Arc::new(
            InMemoryStore::new()
                .with_order(fake::order(1, 5))
                .with_identity(fake::identity(5, "maria@gmail.com", &[ROLE_CLIENT]))
                .with_identity(fake::identity(6, "bob@gmail.com", &[ROLE_CLIENT]))
                .with_identity(fake::identity(7, "alex@gmail.com", &[ROLE_ADMIN]))
                .with_identity(fake::identity(8, "guest@gmail.com", &["ROLE_GUEST"])),
        );
        let auth = Arc::new(AuthService::new(PUBLIC_KEY_PEM, ISSUER, AUDIENCE, 0).unwrap());

        build_router(AppState::new(auth, store.clone(), store), http)
    }

    async fn get(uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder().uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let res = app().oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let (status, body) = get("/api/v1/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn order_without_token_is_unauthorized() {
        let (status, body) = get("/api/v1/orders/1", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn order_with_tampered_token_is_unauthorized() {
        let token = format!("{}xpto", test_keys::token_for("alex@gmail.com"));
        let (status, _) = get("/api/v1/orders/1", Some(&token)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn owner_sees_order_with_totals() {
        let token = test_keys::token_for("maria@gmail.com");
        let (status, body) = get("/api/v1/orders/1", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["client_id"], 5);
        assert_eq!(body["items"][0]["quantity"], 2);
        assert_eq!(body["items"][0]["sub_total"], "20.00");
        assert_eq!(body["total"], "20.00");
    }

    #[tokio::test]
    async fn admin_sees_any_order() {
        let token = test_keys::token_for("alex@gmail.com");
        let (status, body) = get("/api/v1/orders/1", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["client_id"], 5);
    }

    #[tokio::test]
    async fn other_client_is_forbidden() {
        let token = test_keys::token_for("bob@gmail.com");
        let (status, body) = get("/api/v1/orders/1", Some(&token)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], "Access denied. Should be self or admin");
        assert!(body.get("items").is_none());
    }

    #[tokio::test]
    async fn unknown_order_is_not_found_even_for_admin() {
        let token = test_keys::token_for("alex@gmail.com");
        let (status, body) = get("/api/v1/orders/100", Some(&token)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_unauthorized() {
        let token = test_keys::token_for("ghost@gmail.com");
        let (status, _) = get("/api/v1/orders/1", Some(&token)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_returns_caller_profile() {
        let token = test_keys::token_for("maria@gmail.com");
        let (status, body) = get("/api/v1/users/me", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 5);
        assert_eq!(body["email"], "maria@gmail.com");
        assert_eq!(body["roles"], json!([{"id": 1, "authority": "ROLE_CLIENT"}]));
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn me_requires_client_or_admin_role() {
        let token = test_keys::token_for("guest@gmail.com");
        let (status, _) = get("/api/v1/users/me", Some(&token)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let res = app()
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(res.headers().contains_key(middleware::http::REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn body_over_configured_limit_is_rejected() {
        let http = HttpConfig {
            body_limit_bytes: 16,
            ..HttpConfig::default()
        };
        let req = Request::builder()
            .uri("/api/v1/health")
            .header(header::CONTENT_LENGTH, "64")
            .body(Body::from(vec![b'x'; 64]))
            .unwrap();

        let res = app_with(&http).oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
