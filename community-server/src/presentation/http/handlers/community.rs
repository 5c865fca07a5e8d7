use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::posts::PostDto;
use crate::application::community_service::{FeaturedPostsResult, PostingStatus};
use crate::domain::lookbook::{CityPhoto, DEFAULT_TOP_PHOTOS, DistrictStats};
use crate::domain::ranking::RankingParams;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct FeaturedQuery {
    #[validate(range(min = 1, max = 168))]
    pub(crate) window_hours: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub(crate) limit: Option<u32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct TopPhotosQuery {
    #[validate(range(min = 1, max = 50))]
    pub(crate) limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FeaturedPostDto {
    pub(crate) post: PostDto,
    pub(crate) score: f64,
    pub(crate) age_hours: f64,
    pub(crate) relative_time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FeaturedPostsResponseDto {
    pub(crate) posts: Vec<FeaturedPostDto>,
    pub(crate) window_hours: u32,
    pub(crate) limit: usize,
    pub(crate) skipped: usize,
    pub(crate) evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostingStatusDto {
    pub(crate) author_id: String,
    pub(crate) can_post: bool,
    pub(crate) last_post_at: Option<DateTime<Utc>>,
    pub(crate) next_post_allowed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CityPhotoDto {
    pub(crate) id: String,
    pub(crate) src: String,
    pub(crate) title: String,
    pub(crate) district: String,
    pub(crate) likes: u64,
    pub(crate) author: String,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DistrictStatsDto {
    pub(crate) name: String,
    pub(crate) posts: u64,
    pub(crate) likes: u64,
    pub(crate) images: u64,
}

impl From<FeaturedPostsResult> for FeaturedPostsResponseDto {
    fn from(result: FeaturedPostsResult) -> Self {
        Self {
            posts: result
                .posts
                .into_iter()
                .map(|featured| FeaturedPostDto {
                    post: PostDto::from(featured.post),
                    score: featured.score,
                    age_hours: featured.age_hours,
                    relative_time: featured.relative_time,
                })
                .collect(),
            window_hours: result.window_hours,
            limit: result.limit,
            skipped: result.skipped,
            evaluated_at: result.evaluated_at,
        }
    }
}

impl From<PostingStatus> for PostingStatusDto {
    fn from(status: PostingStatus) -> Self {
        Self {
            author_id: status.author_id,
            can_post: status.can_post,
            last_post_at: status.last_post_at,
            next_post_allowed_at: status.next_post_allowed_at,
        }
    }
}

impl From<CityPhoto> for CityPhotoDto {
    fn from(photo: CityPhoto) -> Self {
        Self {
            id: photo.id,
            src: photo.src,
            title: photo.title,
            district: photo.district,
            likes: photo.likes,
            author: photo.author,
            timestamp: photo.timestamp,
        }
    }
}

impl From<DistrictStats> for DistrictStatsDto {
    fn from(stats: DistrictStats) -> Self {
        Self {
            name: stats.name,
            posts: stats.posts,
            likes: stats.likes,
            images: stats.images,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts/featured",
    tag = "community",
    params(
        ("window_hours" = Option<u32>, Query, description = "Recency window in hours (1..=168)"),
        ("limit" = Option<u32>, Query, description = "Maximum number of posts (1..=50)")
    ),
    responses(
        (status = 200, description = "Top posts of the window", body = FeaturedPostsResponseDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn featured_posts(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<(StatusCode, Json<FeaturedPostsResponseDto>)> {
    query.validate()?;
    let defaults = state.featured_defaults;
    let params = RankingParams {
        window_hours: query.window_hours.unwrap_or(defaults.window_hours),
        limit: query.limit.map_or(defaults.limit, |limit| limit as usize),
    };

    let result = state
        .community_service
        .featured_posts(params, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(FeaturedPostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/authors/{author_id}/posting-status",
    tag = "community",
    params(
        ("author_id" = String, Path, description = "Author id")
    ),
    responses(
        (status = 200, description = "Whether the author may post now", body = PostingStatusDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn posting_status(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> AppResult<(StatusCode, Json<PostingStatusDto>)> {
    let status = state
        .community_service
        .posting_status(&author_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(PostingStatusDto::from(status))))
}

#[utoipa::path(
    get,
    path = "/api/gallery/top-photos",
    tag = "community",
    params(
        ("limit" = Option<u32>, Query, description = "Maximum number of photos (1..=50)")
    ),
    responses(
        (status = 200, description = "Most liked photos", body = [CityPhotoDto]),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn top_photos(
    State(state): State<AppState>,
    Query(query): Query<TopPhotosQuery>,
) -> AppResult<(StatusCode, Json<Vec<CityPhotoDto>>)> {
    query.validate()?;
    let limit = query.limit.map_or(DEFAULT_TOP_PHOTOS, |limit| limit as usize);

    let photos = state.community_service.top_photos(limit).await?;

    Ok((
        StatusCode::OK,
        Json(photos.into_iter().map(CityPhotoDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/districts/stats",
    tag = "community",
    responses(
        (status = 200, description = "Posts, likes and images per district", body = [DistrictStatsDto])
    )
)]
pub(crate) async fn district_stats(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<DistrictStatsDto>>)> {
    let stats = state.community_service.district_stats().await?;

    Ok((
        StatusCode::OK,
        Json(stats.into_iter().map(DistrictStatsDto::from).collect()),
    ))
}
