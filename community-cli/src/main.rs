use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use community_client::{
    Author, CityPhoto, CommunityClient, CommunityClientError, DistrictStats, FeaturedPosts,
    ListPostsResponse, Post, PostingStatus,
};

const AUTHOR_FILE: &str = ".community_author.json";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "COMMUNITY_SERVER";
const MISSING_AUTHOR_HINT: &str =
    "укажите --author-id или сохраните профиль через `community-cli profile ...`";

#[derive(Debug, Parser)]
#[command(name = "community-cli", version, about = "CLI клиент для community-server")]
struct Cli {
    /// Адрес сервера. По умолчанию берётся из COMMUNITY_SERVER.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Сохранить профиль автора для публикаций.
    Profile(ProfileArgs),
    /// Опубликовать пост от имени сохранённого автора.
    Create {
        #[arg(long)]
        text: String,
        #[arg(long)]
        image: Option<String>,
        /// Тег поста, можно указать несколько раз.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: String,
    },
    /// Лента постов, сначала новые.
    List {
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Поставить лайк.
    Like {
        #[arg(long)]
        id: String,
    },
    /// Засчитать просмотр.
    View {
        #[arg(long)]
        id: String,
    },
    /// Лучшие посты за последние часы.
    Featured {
        #[arg(long)]
        window_hours: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Может ли автор опубликовать пост сейчас.
    ///
    /// Без `--author-id` проверяется сохранённый профиль.
    CanPost {
        #[arg(long)]
        author_id: Option<String>,
    },
    /// Самые популярные фотографии.
    Photos {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Сводка по районам.
    Districts,
}

#[derive(Debug, Args)]
struct ProfileArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    district: String,
    #[arg(long)]
    avatar: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let mut client = CommunityClient::new(server).map_err(map_client_error)?;

    if let Some(author) = load_author().context("не удалось прочитать профиль автора")? {
        client.set_author(author);
    }

    match cli.command {
        Command::Profile(args) => {
            let author = Author {
                id: args.id,
                name: args.name,
                avatar: args.avatar,
                district: args.district,
            };
            persist_author(&author).context("не удалось сохранить профиль автора")?;
            println!("Профиль сохранён: {} ({})", author.name, author.id);
        }
        Command::Create { text, image, tags } => {
            let post = client
                .create_post(&text, image.as_deref(), &tags)
                .await
                .map_err(map_client_error)?;
            print_post("Пост опубликован", &post);
        }
        Command::Get { id } => {
            let post = client.get_post(&id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        Command::List { limit, offset } => {
            let list = client
                .list_posts(limit, offset)
                .await
                .map_err(map_client_error)?;
            print_list(&list);
        }
        Command::Like { id } => {
            let post = client.like_post(&id).await.map_err(map_client_error)?;
            println!("Лайк засчитан: id={}, likes={}", post.id, post.stats.likes);
        }
        Command::View { id } => {
            let post = client.view_post(&id).await.map_err(map_client_error)?;
            println!("Просмотр засчитан: id={}, views={}", post.id, post.stats.views);
        }
        Command::Featured {
            window_hours,
            limit,
        } => {
            let featured = client
                .featured_posts(window_hours, limit)
                .await
                .map_err(map_client_error)?;
            print_featured(&featured);
        }
        Command::CanPost { author_id } => {
            let author_id = match author_id {
                Some(author_id) => author_id,
                None => client
                    .author()
                    .map(|author| author.id.clone())
                    .context(MISSING_AUTHOR_HINT)?,
            };
            let status = client
                .posting_status(&author_id)
                .await
                .map_err(map_client_error)?;
            print_posting_status(&status);
        }
        Command::Photos { limit } => {
            let photos = client.top_photos(limit).await.map_err(map_client_error)?;
            print_photos(&photos);
        }
        Command::Districts => {
            let stats = client.district_stats().await.map_err(map_client_error)?;
            print_districts(&stats);
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|server| !server.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_author_content(raw: &str) -> Option<Author> {
    if raw.trim().is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}

fn load_author() -> io::Result<Option<Author>> {
    if !Path::new(AUTHOR_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(AUTHOR_FILE)?;
    Ok(parse_author_content(&raw))
}

fn persist_author(author: &Author) -> Result<()> {
    let raw = serde_json::to_string_pretty(author)?;
    fs::write(AUTHOR_FILE, raw)?;
    Ok(())
}

fn map_client_error(err: CommunityClientError) -> anyhow::Error {
    let message = match err {
        CommunityClientError::NotFound => "пост не найден".to_string(),
        CommunityClientError::PostingLimitReached(message) => {
            format!("лимит публикаций: не больше одного поста в сутки ({message})")
        }
        CommunityClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        CommunityClientError::Server(message) => format!("ошибка сервера: {message}"),
        CommunityClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("author: {} ({})", post.author.name, post.author.id);
    println!("district: {}", post.author.district);
    println!("text: {}", post.content.text);
    if let Some(image) = &post.content.image {
        println!("image: {image}");
    }
    if !post.content.tags.is_empty() {
        println!("tags: {}", post.content.tags.join(", "));
    }
    println!(
        "likes: {}, views: {}, comments: {}",
        post.stats.likes, post.stats.views, post.stats.comments
    );
    println!("timestamp: {}", format_timestamp(post.timestamp));
}

fn print_list(list: &ListPostsResponse) {
    println!(
        "Постов: {} (limit={}, offset={}, total={})",
        list.posts.len(),
        list.limit,
        list.offset,
        list.total
    );

    for post in &list.posts {
        println!(
            "- [{}] {}: {} ({})",
            post.id,
            post.author.name,
            post.content.text,
            format_timestamp(post.timestamp)
        );
    }
}

fn print_featured(featured: &FeaturedPosts) {
    println!(
        "Лучшие посты за {}ч: {} (limit={}, пропущено={})",
        featured.window_hours,
        featured.posts.len(),
        featured.limit,
        featured.skipped
    );

    for (rank, entry) in featured.posts.iter().enumerate() {
        println!(
            "{}. [{}] {} · {} · score={:.2}",
            rank + 1,
            entry.post.id,
            entry.post.author.name,
            entry.relative_time,
            entry.score
        );
    }
}

fn print_posting_status(status: &PostingStatus) {
    if status.can_post {
        println!("Автор {} может опубликовать пост", status.author_id);
        return;
    }

    println!("Автор {} уже публиковал пост сегодня", status.author_id);
    if let Some(next) = status.next_post_allowed_at {
        println!("следующий пост: {}", format_timestamp(next));
    }
}

fn print_photos(photos: &[CityPhoto]) {
    println!("Фотографий: {}", photos.len());
    for photo in photos {
        println!(
            "- [{}] {} · {} · {} ♥ · {}",
            photo.id, photo.title, photo.district, photo.likes, photo.src
        );
    }
}

fn print_districts(stats: &[DistrictStats]) {
    println!("Районов: {}", stats.len());
    for district in stats {
        println!(
            "- {}: постов={}, лайков={}, фото={}",
            district.name, district.posts, district.likes, district.images
        );
    }
}
