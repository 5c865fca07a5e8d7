use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{CommunityClientError, CommunityClientResult};
use crate::models::{
    CityPhoto, DistrictStats, FeaturedPosts, ListPostsResponse, NewPost, Post, PostingStatus,
};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Serialize)]
struct ListPostsQuery {
    limit: u32,
    offset: u32,
}

#[derive(Serialize)]
struct FeaturedQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    window_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

#[derive(Serialize)]
struct LimitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `community-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> CommunityClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> CommunityClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        CommunityClientError::from_http_status(status, Some(message))
    }

    /// отправляет запрос и декодирует json-ответ либо тело ошибки
    async fn execute<TRes>(&self, request: RequestBuilder) -> CommunityClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(CommunityClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(CommunityClientError::from_reqwest)
    }

    async fn get<TRes>(&self, path: &str) -> CommunityClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let request = self.client.request(Method::GET, self.endpoint(path));
        self.execute(request).await
    }

    async fn get_with_query<TQuery, TRes>(
        &self,
        path: &str,
        query: &TQuery,
    ) -> CommunityClientResult<TRes>
    where
        TQuery: Serialize,
        TRes: DeserializeOwned,
    {
        let request = self
            .client
            .request(Method::GET, self.endpoint(path))
            .query(query);
        self.execute(request).await
    }

    async fn post_empty<TRes>(&self, path: &str) -> CommunityClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let request = self.client.request(Method::POST, self.endpoint(path));
        self.execute(request).await
    }

    /// Публикует пост. Сервер разрешает один пост на автора за 24 часа.
    pub async fn create_post(&self, post: &NewPost) -> CommunityClientResult<Post> {
        let request = self
            .client
            .request(Method::POST, self.endpoint("/api/posts"))
            .json(post);
        self.execute(request).await
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, id: &str) -> CommunityClientResult<Post> {
        self.get(&format!("/api/posts/{id}")).await
    }

    /// Возвращает список постов (сначала новые) с пагинацией `limit/offset`.
    pub async fn list_posts(
        &self,
        limit: u32,
        offset: u32,
    ) -> CommunityClientResult<ListPostsResponse> {
        self.get_with_query("/api/posts", &ListPostsQuery { limit, offset })
            .await
    }

    /// Ставит лайк посту и возвращает обновлённый пост.
    pub async fn like_post(&self, id: &str) -> CommunityClientResult<Post> {
        self.post_empty(&format!("/api/posts/{id}/like")).await
    }

    /// Засчитывает просмотр поста.
    pub async fn view_post(&self, id: &str) -> CommunityClientResult<Post> {
        self.post_empty(&format!("/api/posts/{id}/view")).await
    }

    /// Возвращает подборку лучших постов.
    ///
    /// `None` означает значение по умолчанию сервера.
    pub async fn featured_posts(
        &self,
        window_hours: Option<u32>,
        limit: Option<u32>,
    ) -> CommunityClientResult<FeaturedPosts> {
        let query = FeaturedQuery {
            window_hours,
            limit,
        };
        self.get_with_query("/api/posts/featured", &query).await
    }

    /// Проверяет, может ли автор опубликовать пост сейчас.
    pub async fn posting_status(&self, author_id: &str) -> CommunityClientResult<PostingStatus> {
        self.get(&format!("/api/authors/{author_id}/posting-status"))
            .await
    }

    /// Возвращает самые популярные фотографии.
    pub async fn top_photos(&self, limit: Option<u32>) -> CommunityClientResult<Vec<CityPhoto>> {
        self.get_with_query("/api/gallery/top-photos", &LimitQuery { limit })
            .await
    }

    /// Возвращает сводку по районам.
    pub async fn district_stats(&self) -> CommunityClientResult<Vec<DistrictStats>> {
        self.get("/api/districts/stats").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client must build");
        let full = client.endpoint("/api/posts");
        assert_eq!(full, "http://localhost:8080/api/posts");
    }

    #[test]
    fn featured_query_omits_unset_parameters() {
        let query = FeaturedQuery {
            window_hours: None,
            limit: Some(3),
        };
        let encoded = serde_json::to_value(&query).expect("query must serialize");
        assert_eq!(encoded, serde_json::json!({ "limit": 3 }));
    }

    #[test]
    fn featured_posts_payload_deserializes() {
        let raw = serde_json::json!({
            "posts": [{
                "post": {
                    "id": "1",
                    "author": {
                        "id": "user1",
                        "name": "Алан",
                        "avatar": null,
                        "district": "Иристон"
                    },
                    "content": { "text": "привет", "image": null, "tags": ["город"] },
                    "stats": { "likes": 3, "views": 10, "comments": 1 },
                    "timestamp": "2025-06-01T10:00:00Z"
                },
                "score": 4.9,
                "age_hours": 2.0,
                "relative_time": "2ч назад"
            }],
            "window_hours": 24,
            "limit": 8,
            "skipped": 0,
            "evaluated_at": "2025-06-01T12:00:00Z"
        });

        let featured: FeaturedPosts =
            serde_json::from_value(raw).expect("payload must deserialize");
        assert_eq!(featured.posts.len(), 1);
        assert_eq!(featured.posts[0].post.stats.likes, 3);
        assert_eq!(featured.posts[0].relative_time, "2ч назад");
    }
}
