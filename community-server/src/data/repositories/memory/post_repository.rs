use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Author, CommunityPost, PostContent, PostStats};
use crate::domain::ranking::{can_user_post_today, next_post_allowed_at};

#[derive(Debug)]
struct StoredPost {
    id: String,
    author: Author,
    content: PostContent,
    timestamp: DateTime<Utc>,
    likes: AtomicU64,
    views: AtomicU64,
    comments: AtomicU64,
}

impl From<CommunityPost> for StoredPost {
    fn from(post: CommunityPost) -> Self {
        Self {
            id: post.id,
            author: post.author,
            content: post.content,
            timestamp: post.timestamp,
            likes: AtomicU64::new(post.stats.likes),
            views: AtomicU64::new(post.stats.views),
            comments: AtomicU64::new(post.stats.comments),
        }
    }
}

impl StoredPost {
    fn snapshot(&self) -> CommunityPost {
        CommunityPost {
            id: self.id.clone(),
            author: self.author.clone(),
            content: self.content.clone(),
            stats: PostStats {
                likes: self.likes.load(Ordering::Relaxed),
                views: self.views.load(Ordering::Relaxed),
                comments: self.comments.load(Ordering::Relaxed),
            },
            timestamp: self.timestamp,
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    posts: HashMap<String, Arc<StoredPost>>,
    last_post_by_author: HashMap<String, DateTime<Utc>>,
    last_id: u64,
}

/// Post store kept in process memory.
///
/// Counters are atomics, so likes and views only need the read lock and
/// concurrent increments never get lost.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryPostRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    async fn bump(
        &self,
        id: &str,
        counter: impl Fn(&StoredPost) -> &AtomicU64,
    ) -> Option<CommunityPost> {
        let store = self.store.read().await;
        let stored = store.posts.get(id)?;
        counter(stored).fetch_add(1, Ordering::Relaxed);
        Some(stored.snapshot())
    }

    async fn sorted_snapshot(&self) -> Vec<CommunityPost> {
        let store = self.store.read().await;
        let mut posts: Vec<CommunityPost> = store.posts.values().map(|p| p.snapshot()).collect();
        posts.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| numeric_id(&b.id).cmp(&numeric_id(&a.id)))
        });
        posts
    }
}

fn numeric_id(id: &str) -> (usize, &str) {
    // decimal ids: shorter is smaller
    (id.len(), id)
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<CommunityPost, DomainError> {
        let mut store = self.store.write().await;

        let last = store.last_post_by_author.get(&input.author.id).copied();
        if !can_user_post_today(last, input.timestamp) {
            if let Some(last) = last {
                return Err(DomainError::PostingLimitReached {
                    next_allowed_at: next_post_allowed_at(last),
                });
            }
        }

        let next_id = store.last_id + 1;
        let id = next_id.to_string();
        let post = CommunityPost::new(
            id.clone(),
            input.author,
            input.content,
            input.stats,
            input.timestamp,
        )?;
        let stored = Arc::new(StoredPost::from(post));

        store.last_id = next_id;

        store
            .last_post_by_author
            .entry(stored.author.id.clone())
            .and_modify(|at| *at = (*at).max(stored.timestamp))
            .or_insert(stored.timestamp);
        store.posts.insert(id.clone(), Arc::clone(&stored));
        debug!(post_id = %id, author_id = %stored.author.id, "post stored");

        Ok(stored.snapshot())
    }

    async fn get_post(&self, id: &str) -> Result<Option<CommunityPost>, DomainError> {
        let store = self.store.read().await;
        Ok(store.posts.get(id).map(|p| p.snapshot()))
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<CommunityPost>, DomainError> {
        let posts = self.sorted_snapshot().await;
        Ok(posts
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.page_size as usize)
            .collect())
    }

    async fn total_posts(&self) -> Result<u64, DomainError> {
        let store = self.store.read().await;
        Ok(store.posts.len() as u64)
    }

    async fn snapshot(&self) -> Result<Vec<CommunityPost>, DomainError> {
        Ok(self.sorted_snapshot().await)
    }

    async fn last_post_at(&self, author_id: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
        let store = self.store.read().await;
        Ok(store.last_post_by_author.get(author_id).copied())
    }

    async fn like_post(&self, id: &str) -> Result<Option<CommunityPost>, DomainError> {
        Ok(self.bump(id, |post| &post.likes).await)
    }

    async fn view_post(&self, id: &str) -> Result<Option<CommunityPost>, DomainError> {
        Ok(self.bump(id, |post| &post.views).await)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::InMemoryPostRepository;
    use crate::data::post_repository::{NewPost, Pagination, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{Author, PostContent, PostStats};

    fn new_post(author_id: &str, at: chrono::DateTime<Utc>) -> NewPost {
        NewPost {
            author: Author {
                id: author_id.to_string(),
                name: "Зураб".to_string(),
                avatar: None,
                district: "Затеречный".to_string(),
            },
            content: PostContent {
                text: "новая кофейня".to_string(),
                image: None,
                tags: vec![],
            },
            stats: PostStats::default(),
            timestamp: at,
        }
    }

    #[tokio::test]
    async fn create_post_assigns_sequential_ids() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();

        let first = repo.create_post(new_post("a", now)).await.expect("first");
        let second = repo.create_post(new_post("b", now)).await.expect("second");

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(repo.total_posts().await.expect("total"), 2);
    }

    #[tokio::test]
    async fn rejected_post_does_not_consume_an_id() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();

        let mut invalid = new_post("a", now);
        invalid.content.text = "   ".to_string();
        let err = repo
            .create_post(invalid)
            .await
            .expect_err("blank text must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "text", .. }));

        let stored = repo
            .create_post(new_post("a", now))
            .await
            .expect("valid post must be stored");
        assert_eq!(stored.id, "1");
        assert_eq!(repo.total_posts().await.expect("total"), 1);
    }

    #[tokio::test]
    async fn create_post_enforces_daily_limit_per_author() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();

        repo.create_post(new_post("a", now - Duration::hours(23)))
            .await
            .expect("first post must be stored");

        let err = repo
            .create_post(new_post("a", now))
            .await
            .expect_err("second post within 24h must be rejected");
        match err {
            DomainError::PostingLimitReached { next_allowed_at } => {
                assert_eq!(next_allowed_at, now + Duration::hours(1));
            }
            other => panic!("expected PostingLimitReached, got {other:?}"),
        }

        repo.create_post(new_post("a", now + Duration::hours(1)))
            .await
            .expect("post after cooldown must be stored");
    }

    #[tokio::test]
    async fn list_posts_returns_newest_first_with_pagination() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();
        for (i, author) in ["a", "b", "c"].iter().enumerate() {
            repo.create_post(new_post(author, now - Duration::hours(i as i64)))
                .await
                .expect("create");
        }

        let page = repo
            .list_posts(Pagination {
                page: 1,
                page_size: 2,
            })
            .await
            .expect("list");
        let ids: Vec<&str> = page.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let page = repo
            .list_posts(Pagination {
                page: 2,
                page_size: 2,
            })
            .await
            .expect("list");
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, "3");
    }

    #[tokio::test]
    async fn like_and_view_of_unknown_post_return_none() {
        let repo = InMemoryPostRepository::new();
        assert!(repo.like_post("404").await.expect("like").is_none());
        assert!(repo.view_post("404").await.expect("view").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_likes_are_not_lost() {
        let repo = InMemoryPostRepository::new();
        let post = repo
            .create_post(new_post("a", Utc::now()))
            .await
            .expect("create");

        let mut handles = Vec::new();
        for _ in 0..64 {
            let repo = repo.clone();
            let id = post.id.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..10 {
                    repo.like_post(&id).await.expect("like");
                }
            }));
        }
        for handle in handles {
            handle.await.expect("task must not panic");
        }

        let stored = repo
            .get_post(&post.id)
            .await
            .expect("get")
            .expect("post must exist");
        assert_eq!(stored.stats.likes, 640);
        assert_eq!(stored.stats.views, 0);
    }
}
