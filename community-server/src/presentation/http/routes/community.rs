use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::http::handlers::community::{district_stats, posting_status, top_photos};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/authors/{author_id}/posting-status", get(posting_status))
        .route("/gallery/top-photos", get(top_photos))
        .route("/districts/stats", get(district_stats))
}
