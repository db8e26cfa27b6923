//! Post handlers

use crate::error::ApiError;
use crate::extractors::PathId;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use blog_core::{
    CreatePostRequest, MessageResponse, NewPost, PostPatch, PostResponse, UpdatePostRequest,
};
use tracing::info;

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let Json(req_body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new_post = NewPost::try_from(req_body)?;

    let post = state.store.create_post(new_post).await?;
    info!("Created post {}", post.id);

    Ok((StatusCode::CREATED, Json(post.into())))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state.store.list_posts().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.store.get_post(id).await?;
    Ok(Json(post.into()))
}

pub async fn update(
    State(state): State<AppState>,
    PathId(id): PathId,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    // Unknown ids are reported before anything is said about the body
    state.store.get_post(id).await?;

    let patch = match payload {
        Ok(Json(req_body)) => PostPatch::from(req_body),
        Err(e) => {
            tracing::debug!("Rejected update body for post {}: {}", id, e.body_text());
            PostPatch::default()
        }
    };
    if patch.is_empty() {
        return Err(ApiError::BadRequest("no data in request".to_string()));
    }

    let post = state.store.update_post(id, patch).await?;
    info!("Updated post {}", post.id);

    Ok(Json(post.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_post(id).await?;
    info!("Deleted post {}", id);

    Ok(Json(MessageResponse::new("post deleted")))
}

#[cfg(test)]
mod tests {
    use crate::{build_router, AppState};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use blog_core::{MemoryPostStore, PostStore};
    use serde_json::{json, Value};
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(store: Arc<dyn PostStore>, index_path: &Path) -> Router {
        build_router(AppState { store }, index_path)
    }

    fn empty_app() -> (Router, Arc<dyn PostStore>) {
        let store: Arc<dyn PostStore> = Arc::new(MemoryPostStore::new());
        (test_app(store.clone(), Path::new("index.html")), store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_example_scenario() {
        let (app, _store) = empty_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/posts",
            Some(json!({"title": "A", "content": "B"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 1, "title": "A", "content": "B"}));

        let (status, body) = send(&app, Method::GET, "/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": 1, "title": "A", "content": "B"}]));

        let (status, body) = send(&app, Method::PUT, "/posts/1", Some(json!({"content": "C"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "title": "A", "content": "C"}));

        let (status, body) = send(&app, Method::GET, "/posts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "title": "A", "content": "C"}));

        let (status, body) = send(&app, Method::DELETE, "/posts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        let (status, body) = send(&app, Method::GET, "/posts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_create_rejects_missing_or_empty_fields() {
        let (app, store) = empty_app();

        for body in [
            json!({"title": "A"}),
            json!({"content": "B"}),
            json!({"title": "", "content": "B"}),
            json!({"title": "A", "content": ""}),
            json!({}),
        ] {
            let (status, resp) = send(&app, Method::POST, "/posts", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(resp["error"].is_string());
        }

        let (status, _) = send(&app, Method::POST, "/posts", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(store.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_accepts_blank_and_long_titles() {
        let (app, store) = empty_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/posts",
            Some(json!({"title": " ", "content": "B"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], " ");

        let long_title = "x".repeat(101);
        let (status, body) = send(
            &app,
            Method::POST,
            "/posts",
            Some(json!({"title": &long_title, "content": "B"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], long_title.as_str());

        assert_eq!(store.count_posts().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let (app, _store) = empty_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/posts")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_partial_updates() {
        let (app, _store) = empty_app();
        send(&app, Method::POST, "/posts", Some(json!({"title": "A", "content": "B"}))).await;

        let (_, body) = send(&app, Method::PUT, "/posts/1", Some(json!({"title": "T"}))).await;
        assert_eq!(body, json!({"id": 1, "title": "T", "content": "B"}));

        let (_, body) = send(&app, Method::PUT, "/posts/1", Some(json!({"content": "X"}))).await;
        assert_eq!(body, json!({"id": 1, "title": "T", "content": "X"}));
    }

    #[tokio::test]
    async fn test_update_errors() {
        let (app, _store) = empty_app();

        let (status, _) = send(&app, Method::PUT, "/posts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, Method::POST, "/posts", Some(json!({"title": "A", "content": "B"}))).await;

        let (status, _) = send(&app, Method::PUT, "/posts/1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::PUT, "/posts/1", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::PUT, "/posts/1", Some(json!({"title": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");

        let (_, body) = send(&app, Method::GET, "/posts/1", None).await;
        assert_eq!(body["title"], "A");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids_are_not_found() {
        let (app, _store) = empty_app();

        for uri in ["/posts/1", "/posts/abc", "/posts/-1", "/posts/1.5"] {
            let (status, _) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        }

        let (status, _) = send(&app, Method::DELETE, "/posts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_posts_responses_are_json() {
        let (app, _store) = empty_app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/posts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_index_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("index.html");
        std::fs::write(&index, "<h1>Blog</h1>").unwrap();
        let app = test_app(Arc::new(MemoryPostStore::new()), &index);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>Blog</h1>");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _store) = empty_app();

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }
}
