use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::community_service::ListPostsResult;
use crate::domain::post::{Author, CommunityPost, CreatePostRequest, PostStats};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct AuthorDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) id: String,
    #[validate(length(min = 1, max = 100))]
    pub(crate) name: String,
    pub(crate) avatar: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub(crate) district: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(nested)]
    pub(crate) author: AuthorDto,
    #[validate(length(min = 1, max = 500))]
    pub(crate) text: String,
    pub(crate) image: Option<String>,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PaginationQuery {
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
    pub(crate) offset: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostContentDto {
    pub(crate) text: String,
    pub(crate) image: Option<String>,
    pub(crate) tags: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostStatsDto {
    pub(crate) likes: u64,
    pub(crate) views: u64,
    pub(crate) comments: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: String,
    pub(crate) author: AuthorDto,
    pub(crate) content: PostContentDto,
    pub(crate) stats: PostStatsDto,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostDto>,
    pub(crate) limit: u32,
    pub(crate) offset: u32,
    pub(crate) total: u64,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            avatar: author.avatar,
            district: author.district,
        }
    }
}

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            avatar: dto.avatar,
            district: dto.district,
        }
    }
}

impl From<PostStats> for PostStatsDto {
    fn from(stats: PostStats) -> Self {
        Self {
            likes: stats.likes,
            views: stats.views,
            comments: stats.comments,
        }
    }
}

impl From<CommunityPost> for PostDto {
    fn from(post: CommunityPost) -> Self {
        Self {
            id: post.id,
            author: AuthorDto::from(post.author),
            content: PostContentDto {
                text: post.content.text,
                image: post.content.image,
                tags: post.content.tags,
            },
            stats: PostStatsDto::from(post.stats),
            timestamp: post.timestamp,
        }
    }
}

impl From<ListPostsResult> for ListPostsResponseDto {
    fn from(result: ListPostsResult) -> Self {
        let offset = result
            .page
            .saturating_sub(1)
            .saturating_mul(result.page_size);
        Self {
            posts: result.posts.into_iter().map(PostDto::from).collect(),
            limit: result.page_size,
            offset,
            total: result.total,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100)"),
        ("offset" = Option<u32>, Query, description = "Offset from the beginning (>= 0)")
    ),
    responses(
        (status = 200, description = "Posts listed, newest first", body = ListPostsResponseDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    query.validate()?;
    let limit = query.limit.unwrap_or(20);
    let offset = query.offset.unwrap_or(0);
    let page = (offset / limit) + 1;
    let page_size = limit;

    let result = state.community_service.list_posts(page, page_size).await?;

    Ok((StatusCode::OK, Json(ListPostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state.community_service.get_post(&id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 429, description = "Author already posted within the last 24 hours")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        author: Author::from(dto.author),
        text: dto.text,
        image: dto.image,
        tags: dto.tags,
    };

    let result = state.community_service.create_post(req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Like counted", body = PostDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state.community_service.like_post(&id).await?;
    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/view",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "View counted", body = PostDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn view_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state.community_service.view_post(&id).await?;
    Ok((StatusCode::OK, Json(PostDto::from(result))))
}
