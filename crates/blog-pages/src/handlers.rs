//! Page handlers

use crate::render;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use blog_core::{BlogError, NewPost};
use serde::Deserialize;
use tracing::{error, info};

/// Fields of the creation form; absent fields arrive as empty strings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

impl CreatePostForm {
    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("content", &self.content),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

pub async fn index(State(state): State<AppState>) -> Response {
    match state.store.list_posts().await {
        Ok(posts) => render::index_page(&posts).into_response(),
        Err(e) => {
            error!("Failed to list posts: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                render::error_page("Could not load posts."),
            )
                .into_response()
        }
    }
}

pub async fn create_form() -> impl IntoResponse {
    render::create_page(&CreatePostForm::default(), None)
}

pub async fn create(State(state): State<AppState>, Form(form): Form<CreatePostForm>) -> Response {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        error!("Rejected post submission, empty fields: {}", missing.join(", "));
        let message = format!("Please fill in: {}", missing.join(", "));
        return rejected(&form, &message);
    }

    let new_post = NewPost::new(form.title.clone(), form.content.clone())
        .with_author(form.author.clone());

    match state.store.create_post(new_post).await {
        Ok(post) => {
            info!("Created post {}: {}", post.id, post.title);
            Redirect::to("/").into_response()
        }
        Err(BlogError::Validation(e)) => {
            error!("Rejected post submission: {}", e);
            rejected(&form, &e.to_string())
        }
        Err(e) => {
            error!("Failed to create post: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                render::error_page("Could not save the post."),
            )
                .into_response()
        }
    }
}

/// Re-render the form with the submitted values and a visible message
fn rejected(form: &CreatePostForm, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        render::create_page(form, Some(message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_router;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::Router;
    use blog_core::{MemoryPostStore, PostStore};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<dyn PostStore>) {
        let store: Arc<dyn PostStore> = Arc::new(MemoryPostStore::new());
        (build_router(AppState { store: store.clone() }), store)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn submit(form: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/create")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    #[test]
    fn test_missing_fields() {
        let form = CreatePostForm {
            title: " ".to_string(),
            author: String::new(),
            content: String::new(),
        };
        assert_eq!(form.missing_fields(), vec!["author", "content"]);
    }

    #[tokio::test]
    async fn test_valid_submission_redirects_and_lists_post() {
        let (app, store) = test_app();

        let response = app
            .clone()
            .oneshot(submit("title=Hello&author=Ann&content=Line+one%0A%0ALine+two"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let post = store.get_post(1).await.unwrap();
        assert_eq!(post.author.as_deref(), Some("Ann"));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Hello"));
        assert!(html.contains("<p>Line one</p><p>Line two</p>"));
    }

    #[tokio::test]
    async fn test_invalid_submission_shows_error_and_stores_nothing() {
        let (app, store) = test_app();

        let response = app
            .oneshot(submit("title=Hello&author=&content=Body"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains("Please fill in: author"));
        assert!(html.contains(r#"value="Hello""#));
        assert_eq!(store.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_form_renders() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/create").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"action="/create""#));
    }
}
