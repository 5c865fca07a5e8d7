use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::community::featured_posts;
use crate::presentation::http::handlers::posts::{
    create_post, get_post, like_post, list_posts, view_post,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/featured", get(featured_posts))
        .route("/{id}", get(get_post))
        .route("/{id}/like", post(like_post))
        .route("/{id}/view", post(view_post))
}
