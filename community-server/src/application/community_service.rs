use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::lookbook::{CityPhoto, DistrictStats, district_stats, top_photos};
use crate::domain::post::{CommunityPost, CreatePostRequest, PostContent, PostStats};
use crate::domain::ranking::{
    RankingParams, can_user_post_today, format_relative_time, next_post_allowed_at,
    select_top_posts,
};

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<CommunityPost>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct FeaturedPost {
    pub(crate) post: CommunityPost,
    pub(crate) score: f64,
    pub(crate) age_hours: f64,
    pub(crate) relative_time: String,
}

#[derive(Debug, Clone)]
pub(crate) struct FeaturedPostsResult {
    pub(crate) posts: Vec<FeaturedPost>,
    pub(crate) window_hours: u32,
    pub(crate) limit: usize,
    pub(crate) skipped: usize,
    pub(crate) evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostingStatus {
    pub(crate) author_id: String,
    pub(crate) can_post: bool,
    pub(crate) last_post_at: Option<DateTime<Utc>>,
    pub(crate) next_post_allowed_at: Option<DateTime<Utc>>,
}

pub(crate) struct CommunityService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> CommunityService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(
        &self,
        req: CreatePostRequest,
        now: DateTime<Utc>,
    ) -> Result<CommunityPost, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            author: req.author,
            content: PostContent {
                text: req.text,
                image: req.image,
                tags: req.tags,
            },
            stats: PostStats::default(),
            timestamp: now,
        };
        let post = self.repo.create_post(new_post).await?;
        info!(post_id = %post.id, author_id = %post.author.id, "post created");
        Ok(post)
    }

    pub(crate) async fn get_post(&self, id: &str) -> Result<CommunityPost, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn list_posts(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<ListPostsResult, DomainError> {
        let pagination = Pagination { page, page_size };
        let posts = self.repo.list_posts(pagination).await?;
        let total = self.repo.total_posts().await?;

        Ok(ListPostsResult {
            posts,
            page,
            page_size,
            total,
        })
    }

    pub(crate) async fn like_post(&self, id: &str) -> Result<CommunityPost, DomainError> {
        self.repo
            .like_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn view_post(&self, id: &str) -> Result<CommunityPost, DomainError> {
        self.repo
            .view_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn featured_posts(
        &self,
        params: RankingParams,
        now: DateTime<Utc>,
    ) -> Result<FeaturedPostsResult, DomainError> {
        let snapshot = self.repo.snapshot().await?;
        let ranking = select_top_posts(&snapshot, now, params);

        if ranking.skipped > 0 {
            warn!(
                skipped = ranking.skipped,
                "posts dated in the future were left out of the ranking"
            );
        }

        let posts = ranking
            .posts
            .iter()
            .map(|ranked| FeaturedPost {
                post: ranked.post.clone(),
                score: ranked.score,
                age_hours: ranked.age_hours,
                relative_time: format_relative_time(ranked.post.timestamp, now),
            })
            .collect();

        Ok(FeaturedPostsResult {
            posts,
            window_hours: params.window_hours,
            limit: params.limit,
            skipped: ranking.skipped,
            evaluated_at: now,
        })
    }

    pub(crate) async fn posting_status(
        &self,
        author_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PostingStatus, DomainError> {
        let author_id = author_id.trim();
        if author_id.is_empty() {
            return Err(DomainError::Validation {
                field: "author_id",
                message: "must not be empty",
            });
        }

        let last_post_at = self.repo.last_post_at(author_id).await?;
        let can_post = can_user_post_today(last_post_at, now);
        let next_post_allowed_at = match last_post_at {
            Some(last) if !can_post => Some(next_post_allowed_at(last)),
            _ => None,
        };

        Ok(PostingStatus {
            author_id: author_id.to_string(),
            can_post,
            last_post_at,
            next_post_allowed_at,
        })
    }

    pub(crate) async fn top_photos(&self, limit: usize) -> Result<Vec<CityPhoto>, DomainError> {
        let snapshot = self.repo.snapshot().await?;
        Ok(top_photos(&snapshot, limit))
    }

    pub(crate) async fn district_stats(&self) -> Result<Vec<DistrictStats>, DomainError> {
        let snapshot = self.repo.snapshot().await?;
        Ok(district_stats(&snapshot))
    }
}
