use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Author, PostContent, PostStats};

struct DemoPost {
    author_id: &'static str,
    name: &'static str,
    avatar: &'static str,
    district: &'static str,
    text: &'static str,
    image: Option<&'static str>,
    tags: &'static [&'static str],
    stats: PostStats,
    hours_ago: i64,
}

const DEMO_POSTS: &[DemoPost] = &[
    DemoPost {
        author_id: "user1",
        name: "Алан Дзагоев",
        avatar: "/avatars/alana.png",
        district: "Иристон",
        text: "Сегодня утром в парке встретил старика, который рассказывал детям легенды об Осетии. Это напомнило мне, что мы — хранители нашей культуры.",
        image: Some("/demo/art1.jpg"),
        tags: &["культура", "память", "Иристон"],
        stats: PostStats {
            likes: 47,
            views: 156,
            comments: 12,
        },
        hours_ago: 2,
    },
    DemoPost {
        author_id: "user2",
        name: "Зураб Цховребов",
        avatar: "/avatars/zurab.png",
        district: "Затеречный",
        text: "В Затеречном районе открыли новую кофейню. Атмосфера как в старом Владикавказе — дерево, книги, джаз. Рекомендую всем любителям уюта.",
        image: Some("/demo/art2.jpg"),
        tags: &["кофейня", "Затеречный", "атмосфера"],
        stats: PostStats {
            likes: 34,
            views: 89,
            comments: 8,
        },
        hours_ago: 4,
    },
    DemoPost {
        author_id: "user3",
        name: "Яна Козаева",
        avatar: "/avatars/janik.png",
        district: "Северо-Западный",
        text: "Вечером в Северо-Западном районе небо было особенно красивым. Фотография не передаёт всей красоты, но попыталась запечатлеть этот момент.",
        image: None,
        tags: &["небо", "вечер", "Северо-Западный", "красота"],
        stats: PostStats {
            likes: 28,
            views: 67,
            comments: 5,
        },
        hours_ago: 6,
    },
    DemoPost {
        author_id: "user4",
        name: "Максим",
        avatar: "/avatars/default.png",
        district: "Северо-Западный",
        text: "Прогулка по Северо-Западному району",
        image: None,
        tags: &["прогулка"],
        stats: PostStats {
            likes: 31,
            views: 120,
            comments: 12,
        },
        hours_ago: 48,
    },
];

/// Fills the store with the demo feed, timestamps relative to `now`.
pub(crate) async fn seed_demo_posts<R: PostRepository>(
    repo: &R,
    now: DateTime<Utc>,
) -> Result<usize, DomainError> {
    for demo in DEMO_POSTS {
        let input = NewPost {
            author: Author {
                id: demo.author_id.to_string(),
                name: demo.name.to_string(),
                avatar: Some(demo.avatar.to_string()),
                district: demo.district.to_string(),
            },
            content: PostContent {
                text: demo.text.to_string(),
                image: demo.image.map(str::to_string),
                tags: demo.tags.iter().map(|tag| tag.to_string()).collect(),
            },
            stats: demo.stats,
            timestamp: now - Duration::hours(demo.hours_ago),
        };
        repo.create_post(input).await?;
    }

    info!(count = DEMO_POSTS.len(), "demo posts seeded");
    Ok(DEMO_POSTS.len())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::seed_demo_posts;
    use crate::data::post_repository::PostRepository;
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;

    #[tokio::test]
    async fn seed_inserts_every_demo_post() {
        let repo = InMemoryPostRepository::new();
        let count = seed_demo_posts(&repo, Utc::now()).await.expect("seed");

        assert_eq!(count, 4);
        assert_eq!(repo.total_posts().await.expect("total"), 4);
    }
}
