//! Клиентская библиотека для работы с community-server по HTTP.
//!
//! Предоставляет `CommunityClient` поверх `reqwest`: лента постов, лайки и
//! просмотры, подборка лучших постов дня, галерея и сводка по районам.
//!
//! Клиент может хранить профиль автора, чтобы не передавать его в каждом
//! `create_post`.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{CommunityClientError, CommunityClientResult};
pub use models::{
    Author, CityPhoto, DistrictStats, FeaturedPost, FeaturedPosts, ListPostsResponse, NewPost,
    Post, PostContent, PostStats, PostingStatus,
};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент REST API сообщества.
pub struct CommunityClient {
    http_client: HttpClient,
    author: Option<Author>,
}

impl CommunityClient {
    /// Создаёт клиент для сервера, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> CommunityClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
            author: None,
        })
    }

    /// Запоминает профиль автора для последующих публикаций.
    pub fn set_author(&mut self, author: Author) {
        self.author = Some(author);
    }

    /// Возвращает сохранённый профиль автора.
    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    /// Публикует пост от имени сохранённого автора.
    ///
    /// Требует `set_author`. Сервер разрешает один пост на автора за 24 часа.
    pub async fn create_post(
        &self,
        text: &str,
        image: Option<&str>,
        tags: &[String],
    ) -> CommunityClientResult<Post> {
        let author = self.require_author()?;
        let post = NewPost {
            author: author.clone(),
            text: text.to_string(),
            image: image.map(str::to_string),
            tags: tags.to_vec(),
        };
        self.http_client.create_post(&post).await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: &str) -> CommunityClientResult<Post> {
        self.http_client.get_post(id).await
    }

    /// Возвращает ленту постов, сначала новые.
    pub async fn list_posts(
        &self,
        limit: u32,
        offset: u32,
    ) -> CommunityClientResult<ListPostsResponse> {
        self.http_client.list_posts(limit, offset).await
    }

    /// Ставит лайк посту.
    pub async fn like_post(&self, id: &str) -> CommunityClientResult<Post> {
        self.http_client.like_post(id).await
    }

    /// Засчитывает просмотр поста.
    pub async fn view_post(&self, id: &str) -> CommunityClientResult<Post> {
        self.http_client.view_post(id).await
    }

    /// Возвращает подборку лучших постов за окно `window_hours`.
    pub async fn featured_posts(
        &self,
        window_hours: Option<u32>,
        limit: Option<u32>,
    ) -> CommunityClientResult<FeaturedPosts> {
        self.http_client.featured_posts(window_hours, limit).await
    }

    /// Проверяет, может ли автор опубликовать пост сейчас.
    pub async fn posting_status(&self, author_id: &str) -> CommunityClientResult<PostingStatus> {
        self.http_client.posting_status(author_id).await
    }

    /// Возвращает самые популярные фотографии сообщества.
    pub async fn top_photos(&self, limit: Option<u32>) -> CommunityClientResult<Vec<CityPhoto>> {
        self.http_client.top_photos(limit).await
    }

    /// Возвращает сводку по районам.
    pub async fn district_stats(&self) -> CommunityClientResult<Vec<DistrictStats>> {
        self.http_client.district_stats().await
    }

    fn require_author(&self) -> CommunityClientResult<&Author> {
        self.author.as_ref().ok_or_else(|| {
            CommunityClientError::InvalidRequest("author profile is not set".to_string())
        })
    }
}
