use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Автор поста.
pub struct Author {
    /// Идентификатор автора.
    pub id: String,
    /// Отображаемое имя.
    pub name: String,
    /// Ссылка на аватар.
    pub avatar: Option<String>,
    /// Район, от имени которого пишет автор.
    pub district: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Содержимое поста.
pub struct PostContent {
    /// Текст поста.
    pub text: String,
    /// Ссылка на изображение.
    pub image: Option<String>,
    /// Теги.
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Счётчики вовлечённости.
pub struct PostStats {
    /// Лайки.
    pub likes: u64,
    /// Просмотры.
    pub views: u64,
    /// Комментарии.
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Публичная модель поста сообщества.
pub struct Post {
    /// Идентификатор поста.
    pub id: String,
    /// Автор.
    pub author: Author,
    /// Содержимое.
    pub content: PostContent,
    /// Счётчики.
    pub stats: PostStats,
    /// Дата и время публикации (UTC).
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Данные для создания поста.
pub struct NewPost {
    /// Автор.
    pub author: Author,
    /// Текст (до 500 символов).
    pub text: String,
    /// Ссылка на изображение.
    pub image: Option<String>,
    /// Теги (не более 5).
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ списка постов с параметрами пагинации.
pub struct ListPostsResponse {
    /// Список постов на текущей странице.
    pub posts: Vec<Post>,
    /// Размер страницы.
    pub limit: u32,
    /// Смещение от начала выборки.
    pub offset: u32,
    /// Общее количество постов.
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Пост из подборки лучших с его оценкой.
pub struct FeaturedPost {
    /// Пост.
    pub post: Post,
    /// Оценка: вовлечённость с экспоненциальным затуханием по возрасту.
    pub score: f64,
    /// Возраст поста в часах.
    pub age_hours: f64,
    /// Подпись вида «3ч назад».
    pub relative_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Подборка лучших постов за окно.
pub struct FeaturedPosts {
    /// Посты в порядке убывания оценки.
    pub posts: Vec<FeaturedPost>,
    /// Окно свежести в часах.
    pub window_hours: u32,
    /// Максимальный размер подборки.
    pub limit: usize,
    /// Сколько постов пропущено из-за даты в будущем.
    pub skipped: usize,
    /// Момент, на который считалась подборка.
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Может ли автор опубликовать пост сейчас.
pub struct PostingStatus {
    /// Идентификатор автора.
    pub author_id: String,
    /// `true`, если с последнего поста прошло не меньше 24 часов.
    pub can_post: bool,
    /// Время последнего поста.
    pub last_post_at: Option<DateTime<Utc>>,
    /// Когда станет можно опубликовать следующий пост.
    pub next_post_allowed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Фотография из галереи.
pub struct CityPhoto {
    /// Идентификатор поста.
    pub id: String,
    /// Ссылка на изображение.
    pub src: String,
    /// Заголовок (начало текста поста).
    pub title: String,
    /// Район автора.
    pub district: String,
    /// Лайки.
    pub likes: u64,
    /// Имя автора.
    pub author: String,
    /// Дата и время публикации (UTC).
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Сводка по району.
pub struct DistrictStats {
    /// Название района.
    pub name: String,
    /// Количество постов.
    pub posts: u64,
    /// Сумма лайков.
    pub likes: u64,
    /// Количество постов с изображениями.
    pub images: u64,
}
