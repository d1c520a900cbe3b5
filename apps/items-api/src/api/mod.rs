//! API routes module

pub mod health;
pub mod items;

use axum::Router;
use axum_helpers::server::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .merge(health::router(state.clone()))
}

/// Full application: API routes, docs, layers and `/health`
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state))?;
    Ok(router.merge(health_router(state.config.app)))
}

/// Initialize the database schema
pub async fn init_schema(state: &AppState) -> eyre::Result<()> {
    items::init_schema(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::sqlite::{connect_from_config, SqliteConfig};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    async fn state() -> AppState {
        let database = SqliteConfig::in_memory();
        let db = connect_from_config(database.clone()).await.unwrap();
        let state = AppState {
            config: Config {
                app: app_info!(),
                database,
                server: ServerConfig::default(),
                environment: Environment::Development,
                shutdown_timeout: Duration::from_secs(1),
            },
            db,
        };
        init_schema(&state).await.unwrap();
        state
    }

    fn test_app(state: &AppState) -> Router {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || app(state).unwrap())
    }

    async fn request(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let state = state().await;
        let app = test_app(&state);

        let (status, body) = request(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "items_api");

        let (status, body) = request(&app, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ready", "database": "connected" }));
    }

    #[tokio::test]
    async fn test_items_mounted_at_root() {
        let state = state().await;
        let app = test_app(&state);

        let (status, created) =
            request(&app, "POST", "/items", Some(json!({ "name": "Test Item" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);

        let (status, page) = request(&app, "GET", "/items", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 1);
    }

    #[tokio::test]
    async fn test_unknown_route_and_docs() {
        let state = state().await;
        let app = test_app(&state);

        let (status, body) = request(&app, "GET", "/widgets", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Not found" }));

        let (status, doc) = request(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/items"].is_object());
        assert!(doc["paths"]["/items/{id}"].is_object());
    }
}
