use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::post::CommunityPost;

pub(crate) const DEFAULT_TOP_PHOTOS: usize = 6;
const PHOTO_TITLE_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CityPhoto {
    pub(crate) id: String,
    pub(crate) src: String,
    pub(crate) title: String,
    pub(crate) district: String,
    pub(crate) likes: u64,
    pub(crate) author: String,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub(crate) struct DistrictStats {
    pub(crate) name: String,
    pub(crate) posts: u64,
    pub(crate) likes: u64,
    pub(crate) images: u64,
}

/// Most liked posts that carry an image, shaped for the photo gallery.
pub(crate) fn top_photos(posts: &[CommunityPost], limit: usize) -> Vec<CityPhoto> {
    let mut with_images: Vec<(&CommunityPost, &str)> = posts
        .iter()
        .filter_map(|post| post.content.image.as_deref().map(|src| (post, src)))
        .collect();

    with_images.sort_by(|(a, _), (b, _)| {
        b.stats
            .likes
            .cmp(&a.stats.likes)
            .then_with(|| a.id.cmp(&b.id))
    });

    with_images
        .into_iter()
        .take(limit)
        .map(|(post, src)| CityPhoto {
            id: post.id.clone(),
            src: src.to_string(),
            title: photo_title(&post.content.text),
            district: post.author.district.clone(),
            likes: post.stats.likes,
            author: post.author.name.clone(),
            timestamp: post.timestamp,
        })
        .collect()
}

pub(crate) fn district_stats(posts: &[CommunityPost]) -> Vec<DistrictStats> {
    let mut by_district: BTreeMap<&str, DistrictStats> = BTreeMap::new();

    for post in posts {
        let entry = by_district
            .entry(post.author.district.as_str())
            .or_insert_with(|| DistrictStats {
                name: post.author.district.clone(),
                ..DistrictStats::default()
            });
        entry.posts += 1;
        entry.likes += post.stats.likes;
        if post.has_image() {
            entry.images += 1;
        }
    }

    by_district.into_values().collect()
}

fn photo_title(text: &str) -> String {
    if text.chars().count() <= PHOTO_TITLE_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PHOTO_TITLE_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{district_stats, photo_title, top_photos};
    use crate::domain::post::{Author, CommunityPost, PostContent, PostStats};

    fn post(id: &str, district: &str, likes: u64, image: Option<&str>) -> CommunityPost {
        CommunityPost::new(
            id,
            Author {
                id: format!("author-{id}"),
                name: format!("name-{id}"),
                avatar: None,
                district: district.to_string(),
            },
            PostContent {
                text: format!("text {id}"),
                image: image.map(str::to_string),
                tags: vec![],
            },
            PostStats {
                likes,
                views: 0,
                comments: 0,
            },
            Utc::now(),
        )
        .expect("sample post must be valid")
    }

    #[test]
    fn top_photos_skips_posts_without_image_and_sorts_by_likes() {
        let posts = vec![
            post("1", "Иристон", 10, Some("/demo/a.jpg")),
            post("2", "Иристон", 99, None),
            post("3", "Затеречный", 40, Some("/demo/b.jpg")),
            post("4", "Затеречный", 10, Some("/demo/c.jpg")),
        ];

        let photos = top_photos(&posts, 2);

        let ids: Vec<&str> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(photos[0].src, "/demo/b.jpg");
        assert_eq!(photos[0].author, "name-3");
    }

    #[test]
    fn photo_title_truncates_long_text_by_chars() {
        let long = "ы".repeat(60);
        let title = photo_title(&long);
        assert_eq!(title.chars().count(), 53);
        assert!(title.ends_with("..."));

        assert_eq!(photo_title("коротко"), "коротко");
    }

    #[test]
    fn district_stats_groups_by_author_district() {
        let posts = vec![
            post("1", "Иристон", 10, Some("/demo/a.jpg")),
            post("2", "Иристон", 5, None),
            post("3", "Затеречный", 7, Some("/demo/b.jpg")),
        ];

        let stats = district_stats(&posts);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Затеречный");
        assert_eq!(stats[0].posts, 1);
        assert_eq!(stats[1].name, "Иристон");
        assert_eq!(stats[1].posts, 2);
        assert_eq!(stats[1].likes, 15);
        assert_eq!(stats[1].images, 1);
    }
}
