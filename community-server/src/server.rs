use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::limits::apply_limits;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_app(settings, state)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

pub(crate) fn build_app(settings: &Settings, state: AppState) -> anyhow::Result<Router> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    apply_cors(app, settings)
}

pub(crate) fn build_router(state: AppState) -> Router {
    http::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::build_app;
    use crate::application::community_service::CommunityService;
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::infrastructure::settings::Settings;
    use crate::presentation::AppState;

    fn app() -> Router {
        let settings = Settings::default();
        let service = Arc::new(CommunityService::new(InMemoryPostRepository::new()));
        let state = AppState::new(service, settings.featured_defaults());
        build_app(&settings, state).expect("app must build")
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request must build");

        let response = app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn new_post(author_id: &str, text: &str) -> Value {
        json!({
            "author": {
                "id": author_id,
                "name": "Алана",
                "avatar": null,
                "district": "Иристон"
            },
            "text": text,
            "tags": ["культура"]
        })
    }

    #[tokio::test]
    async fn healthz_responds_ok() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn second_post_of_the_day_is_rejected() {
        let app = app();

        let (status, body) =
            send(&app, Method::POST, "/api/posts", Some(new_post("user1", "Привет"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "1");
        assert_eq!(body["stats"]["likes"], 0);

        let (status, body) =
            send(&app, Method::POST, "/api/posts", Some(new_post("user1", "Ещё раз"))).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body["error"].as_str().is_some());

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/authors/user1/posting-status",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["can_post"], false);
    }

    #[tokio::test]
    async fn invalid_post_is_rejected() {
        let app = app();
        let (status, _) = send(&app, Method::POST, "/api/posts", Some(new_post("user1", ""))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn likes_change_featured_order() {
        let app = app();
        send(&app, Method::POST, "/api/posts", Some(new_post("a", "first"))).await;
        send(&app, Method::POST, "/api/posts", Some(new_post("b", "second"))).await;

        for _ in 0..3 {
            let (status, _) = send(&app, Method::POST, "/api/posts/2/like", None).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = send(&app, Method::POST, "/api/posts/1/view", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["views"], 1);

        let (status, body) = send(&app, Method::GET, "/api/posts/featured?limit=1", None).await;
        assert_eq!(status, StatusCode::OK);
        let posts = body["posts"].as_array().expect("posts must be an array");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["post"]["id"], "2");
        assert_eq!(posts[0]["relative_time"], "Только что");
        assert_eq!(body["skipped"], 0);
    }

    #[tokio::test]
    async fn featured_query_is_validated() {
        let app = app();
        let (status, _) = send(&app, Method::GET, "/api/posts/featured?limit=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(&app, Method::GET, "/api/posts/featured?window_hours=500", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_post_is_not_found() {
        let app = app();
        let (status, _) = send(&app, Method::GET, "/api/posts/404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::POST, "/api/posts/404/like", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn gallery_and_district_stats_reflect_posts() {
        let app = app();
        let mut with_image = new_post("a", "закат");
        with_image["image"] = json!("/demo/art1.jpg");
        send(&app, Method::POST, "/api/posts", Some(with_image)).await;
        send(&app, Method::POST, "/api/posts", Some(new_post("b", "без фото"))).await;

        let (status, body) = send(&app, Method::GET, "/api/gallery/top-photos", None).await;
        assert_eq!(status, StatusCode::OK);
        let photos = body.as_array().expect("photos must be an array");
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0]["src"], "/demo/art1.jpg");

        let (status, body) = send(&app, Method::GET, "/api/districts/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Иристон");
        assert_eq!(body[0]["posts"], 2);
        assert_eq!(body[0]["images"], 1);
    }

    #[tokio::test]
    async fn list_posts_reports_total() {
        let app = app();
        send(&app, Method::POST, "/api/posts", Some(new_post("a", "one"))).await;
        send(&app, Method::POST, "/api/posts", Some(new_post("b", "two"))).await;

        let (status, body) = send(&app, Method::GET, "/api/posts?limit=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["posts"].as_array().map(Vec::len), Some(1));
    }
}
