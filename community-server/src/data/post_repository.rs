use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::post::{Author, CommunityPost, PostContent, PostStats};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) author: Author,
    pub(crate) content: PostContent,
    pub(crate) stats: PostStats,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Pagination {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

impl Pagination {
    pub(crate) fn offset(&self) -> usize {
        self.page.saturating_sub(1) as usize * self.page_size as usize
    }
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// Inserts the post unless its author is still inside the posting
    /// cooldown at `input.timestamp`. Check and insert are atomic.
    async fn create_post(&self, input: NewPost) -> Result<CommunityPost, DomainError>;
    async fn get_post(&self, id: &str) -> Result<Option<CommunityPost>, DomainError>;
    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<CommunityPost>, DomainError>;
    async fn total_posts(&self) -> Result<u64, DomainError>;
    async fn snapshot(&self) -> Result<Vec<CommunityPost>, DomainError>;
    async fn last_post_at(&self, author_id: &str) -> Result<Option<DateTime<Utc>>, DomainError>;
    async fn like_post(&self, id: &str) -> Result<Option<CommunityPost>, DomainError>;
    async fn view_post(&self, id: &str) -> Result<Option<CommunityPost>, DomainError>;
}
