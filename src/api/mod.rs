use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::WRITE_TOKEN_HEADER;
use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::state::AppState;

/// Routes only, no global middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Browser clients use the /api prefix
        .route("/shows", show_routes())
        .route("/api/shows", show_routes())
        .with_state(state)
}

/// Full application: routes plus the configured CORS and request tracing
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut app = router(state);

    if config.security.enable_cors {
        if let Some(cors) = cors_layer(&config.security.cors_origins) {
            app = app.layer(cors);
        }
    }

    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn show_routes() -> MethodRouter<AppState> {
    get(public::shows_list)
        .post(protected::shows_create)
        .delete(protected::shows_delete)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(WRITE_TOKEN_HEADER)]),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::database::models::{NewShow, Show};
    use crate::database::{DatabaseError, MemoryShowStore, ShowStore};

    const TOKEN: &str = "test-token";

    fn setup() -> (Router, Arc<MemoryShowStore>) {
        let store = Arc::new(MemoryShowStore::new());
        let state = AppState::new(store.clone(), TOKEN);
        (router(state), store)
    }

    async fn seed(store: &MemoryShowStore, date: &str, venue: &str, band: &str) {
        store
            .insert(NewShow {
                show_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                venue: venue.to_string(),
                band: band.to_string(),
            })
            .await
            .unwrap();
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_show(token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::post("/shows").header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(WRITE_TOKEN_HEADER, token);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn delete_show(token: Option<&str>, query: &str) -> Request<Body> {
        let mut builder = Request::delete(format!("/shows{}", query));
        if let Some(token) = token {
            builder = builder.header(WRITE_TOKEN_HEADER, token);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn list(year: &str) -> Request<Body> {
        Request::get(format!("/shows?year={}", year)).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn lists_one_year_in_date_then_insertion_order() {
        let (app, store) = setup();
        seed(&store, "2024-12-31", "Obras", "Last").await;
        seed(&store, "2024-01-01", "Niceto", "First").await;
        seed(&store, "2024-06-01", "Vorterix", "Middle A").await;
        seed(&store, "2024-06-01", "Vorterix", "Middle B").await;
        seed(&store, "2025-01-01", "Groove", "Next year").await;
        seed(&store, "2023-12-31", "Groove", "Last year").await;

        let (status, body) = send(&app, list("2024")).await;
        assert_eq!(status, StatusCode::OK);

        let bands: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["band"].as_str().unwrap())
            .collect();
        assert_eq!(bands, vec!["First", "Middle A", "Middle B", "Last"]);
    }

    #[tokio::test]
    async fn list_without_year_uses_current_year() {
        let (app, store) = setup();
        let today = chrono::Local::now().date_naive();
        seed(&store, &today.format("%Y-%m-%d").to_string(), "Niceto", "Today").await;

        let request = Request::get("/shows").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_handles_extreme_and_invalid_years() {
        let (app, _store) = setup();

        let (status, body) = send(&app, list("2147483647")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": [] }));

        let (status, body) = send(&app, list("abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid year: abc");
    }

    #[tokio::test]
    async fn create_requires_token_before_validation() {
        let (app, store) = setup();

        let (status, body) = send(&app, post_show(None, json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));

        let valid = json!({ "show_date": "2024-05-10", "venue": "Niceto", "band": "SuperVos" });
        let (status, _) = send(&app, post_show(Some("wrong"), valid)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_validates_fields() {
        let (app, store) = setup();

        for body in [
            json!({ "venue": "Niceto", "band": "SuperVos" }),
            json!({ "show_date": "2024-05-10", "venue": "   ", "band": "SuperVos" }),
            json!({ "show_date": "2024-05-10", "venue": "Niceto", "band": "" }),
            json!({ "show_date": "2024-05-10", "venue": "Niceto", "band": null }),
        ] {
            let (status, resp) = send(&app, post_show(Some(TOKEN), body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(resp, json!({ "error": "Missing fields" }));
        }

        let (status, _) = send(
            &app,
            post_show(Some(TOKEN), json!({ "show_date": "2024-13-01", "venue": "Niceto", "band": "SuperVos" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = Request::post("/shows")
            .header(WRITE_TOKEN_HEADER, TOKEN)
            .body(Body::from("not json"))
            .unwrap();
        let (status, resp) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, json!({ "error": "Invalid JSON body" }));

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_trims_and_round_trips() {
        let (app, _store) = setup();

        let (status, body) = send(
            &app,
            post_show(Some(TOKEN), json!({ "show_date": "2024-05-10", "venue": " Niceto ", "band": "SuperVos  " })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let (_, body) = send(&app, list("2024")).await;
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["venue"], "Niceto");
        assert_eq!(rows[0]["band"], "SuperVos");
        assert_eq!(rows[0]["show_date"], "2024-05-10");
        assert!(rows[0]["id"].is_string());
        assert!(rows[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn delete_requires_token_and_id() {
        let (app, store) = setup();
        seed(&store, "2024-05-10", "Niceto", "SuperVos").await;
        let (_, body) = send(&app, list("2024")).await;
        let id = body["data"][0]["id"].as_str().unwrap().to_string();

        let (status, _) = send(&app, delete_show(None, &format!("?id={}", id))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(store.len().await, 1);

        let (status, body) = send(&app, delete_show(Some(TOKEN), "")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing id" }));

        let (status, _) = send(&app, delete_show(Some(TOKEN), "?id=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (app, store) = setup();
        seed(&store, "2024-05-10", "Niceto", "SuperVos").await;
        let (_, body) = send(&app, list("2024")).await;
        let id = body["data"][0]["id"].as_str().unwrap().to_string();

        for _ in 0..2 {
            let (status, body) = send(&app, delete_show(Some(TOKEN), &format!("?id={}", id))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "ok": true }));
        }
        assert!(store.is_empty().await);

        let (status, _) = send(&app, delete_show(Some(TOKEN), "?id=does-not-exist")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn api_prefix_serves_the_same_routes() {
        let (app, store) = setup();
        seed(&store, "2024-05-10", "Niceto", "SuperVos").await;

        let request = Request::get("/api/shows?year=2024").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _store) = setup();
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn repeated_query_keys_use_the_first_value() {
        let (app, store) = setup();
        seed(&store, "2024-05-10", "Niceto", "SuperVos").await;
        seed(&store, "2025-03-01", "Obras", "Next year").await;

        let request = Request::get("/shows?year=2024&year=2025").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["band"], "SuperVos");

        let id = rows[0]["id"].as_str().unwrap().to_string();
        let (status, body) = send(&app, delete_show(Some(TOKEN), &format!("?id={}&id=other", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
        assert_eq!(store.len().await, 1);

        let (status, body) = send(&app, delete_show(Some(TOKEN), "?id=a&id=b")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    /// Store whose every call fails, counting how often it was reached
    #[derive(Default)]
    struct FailingStore {
        calls: AtomicUsize,
    }

    impl FailingStore {
        fn fail(&self, op: &str) -> DatabaseError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            DatabaseError::QueryError(format!("connection refused during {}", op))
        }
    }

    #[async_trait]
    impl ShowStore for FailingStore {
        async fn insert(&self, _show: NewShow) -> Result<(), DatabaseError> {
            Err(self.fail("insert"))
        }

        async fn delete(&self, _id: &str) -> Result<u64, DatabaseError> {
            Err(self.fail("delete"))
        }

        async fn select_range(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<Show>, DatabaseError> {
            Err(self.fail("select"))
        }

        async fn ping(&self) -> Result<(), DatabaseError> {
            Err(self.fail("ping"))
        }
    }

    fn setup_failing() -> (Router, Arc<FailingStore>) {
        let store = Arc::new(FailingStore::default());
        let state = AppState::new(store.clone(), TOKEN);
        (router(state), store)
    }

    #[tokio::test]
    async fn store_failures_surface_verbatim_as_400() {
        let (app, store) = setup_failing();

        let (status, body) = send(&app, list("2024")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "connection refused during select" }));

        let valid = json!({ "show_date": "2024-05-10", "venue": "Niceto", "band": "SuperVos" });
        let (status, body) = send(&app, post_show(Some(TOKEN), valid)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "connection refused during insert" }));

        let (status, body) = send(&app, delete_show(Some(TOKEN), "?id=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "connection refused during delete" }));

        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn years_the_store_cannot_hold_list_empty_without_a_query() {
        let (app, store) = setup_failing();

        for year in ["-5000", "-4713", "5874898", "6000000"] {
            let (status, body) = send(&app, list(year)).await;
            assert_eq!(status, StatusCode::OK, "year {}", year);
            assert_eq!(body, json!({ "data": [] }), "year {}", year);
        }

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_writes_never_reach_the_store() {
        let (app, store) = setup_failing();

        let valid = json!({ "show_date": "2024-05-10", "venue": "Niceto", "band": "SuperVos" });
        let (status, _) = send(&app, post_show(Some("wrong"), valid)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, delete_show(None, "?id=abc")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, post_show(Some(TOKEN), json!({ "venue": "Niceto" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn health_reports_store_outage() {
        let (app, _store) = setup_failing();
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "error": "store unavailable" }));
    }

    #[test]
    fn cors_layer_from_origins() {
        assert!(cors_layer(&["*".to_string()]).is_some());
        assert!(cors_layer(&["http://localhost:5173".to_string()]).is_some());
        assert!(cors_layer(&[]).is_none());
    }
}
