use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

pub(crate) const MAX_TEXT_CHARS: usize = 500;
pub(crate) const MAX_TAGS: usize = 5;
const MAX_TAG_CHARS: usize = 32;
const MAX_AUTHOR_ID_CHARS: usize = 64;
const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Author {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) avatar: Option<String>,
    pub(crate) district: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PostContent {
    pub(crate) text: String,
    pub(crate) image: Option<String>,
    pub(crate) tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PostStats {
    pub(crate) likes: u64,
    pub(crate) views: u64,
    pub(crate) comments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CommunityPost {
    pub(crate) id: String,
    pub(crate) author: Author,
    pub(crate) content: PostContent,
    pub(crate) stats: PostStats,
    pub(crate) timestamp: DateTime<Utc>,
}

impl CommunityPost {
    pub(crate) fn new(
        id: impl Into<String>,
        author: Author,
        content: PostContent,
        stats: PostStats,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::Validation {
                field: "id",
                message: "must not be empty",
            });
        }

        Ok(Self {
            id,
            author: normalize_author(author)?,
            content: normalize_content(content)?,
            stats,
            timestamp,
        })
    }

    pub(crate) fn has_image(&self) -> bool {
        self.content.image.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) author: Author,
    pub(crate) text: String,
    pub(crate) image: Option<String>,
    pub(crate) tags: Vec<String>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let author = normalize_author(self.author)?;
        let content = normalize_content(PostContent {
            text: self.text,
            image: self.image,
            tags: self.tags,
        })?;

        Ok(Self {
            author,
            text: content.text,
            image: content.image,
            tags: content.tags,
        })
    }
}

fn normalize_author(author: Author) -> Result<Author, DomainError> {
    Ok(Author {
        id: normalize_bounded(
            "author.id",
            &author.id,
            MAX_AUTHOR_ID_CHARS,
            "must be 1..64 chars",
        )?,
        name: normalize_bounded(
            "author.name",
            &author.name,
            MAX_NAME_CHARS,
            "must be 1..100 chars",
        )?,
        avatar: normalize_optional(author.avatar),
        district: normalize_bounded(
            "author.district",
            &author.district,
            MAX_NAME_CHARS,
            "must be 1..100 chars",
        )?,
    })
}

fn normalize_content(content: PostContent) -> Result<PostContent, DomainError> {
    Ok(PostContent {
        text: normalize_bounded("text", &content.text, MAX_TEXT_CHARS, "must be 1..500 chars")?,
        image: normalize_optional(content.image),
        tags: normalize_tags(content.tags)?,
    })
}

fn normalize_bounded(
    field: &'static str,
    value: &str,
    max_chars: usize,
    message: &'static str,
) -> Result<String, DomainError> {
    let value = value.trim();
    let len = value.chars().count();
    if len == 0 || len > max_chars {
        return Err(DomainError::Validation { field, message });
    }
    Ok(value.to_string())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, DomainError> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());

    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if tag.chars().count() > MAX_TAG_CHARS {
            return Err(DomainError::Validation {
                field: "tags",
                message: "each tag must be 1..32 chars",
            });
        }
        let lowered = tag.to_lowercase();
        if normalized.iter().any(|known| known.to_lowercase() == lowered) {
            continue;
        }
        normalized.push(tag.to_string());
    }

    if normalized.len() > MAX_TAGS {
        return Err(DomainError::Validation {
            field: "tags",
            message: "at most 5 tags allowed",
        });
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Author, CommunityPost, CreatePostRequest, DomainError, PostContent, PostStats};

    fn author() -> Author {
        Author {
            id: "user1".to_string(),
            name: "Алан".to_string(),
            avatar: None,
            district: "Иристон".to_string(),
        }
    }

    fn request(text: &str, tags: &[&str]) -> CreatePostRequest {
        CreatePostRequest {
            author: author(),
            text: text.to_string(),
            image: None,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[test]
    fn create_post_request_validate_rejects_blank_text() {
        let err = request("   ", &[]).validate().expect_err("text must be rejected");
        assert_validation_field(err, "text");
    }

    #[test]
    fn create_post_request_validate_counts_chars_not_bytes() {
        let text = "ж".repeat(500);
        let validated = request(&text, &[]).validate().expect("500 chars must be accepted");
        assert_eq!(validated.text.chars().count(), 500);

        let err = request(&"ж".repeat(501), &[])
            .validate()
            .expect_err("501 chars must be rejected");
        assert_validation_field(err, "text");
    }

    #[test]
    fn create_post_request_validate_normalizes_tags() {
        let validated = request("  hello  ", &[" Культура ", "", "культура", "память"])
            .validate()
            .expect("must validate");

        assert_eq!(validated.text, "hello");
        assert_eq!(validated.tags, vec!["Культура", "память"]);
    }

    #[test]
    fn create_post_request_validate_rejects_too_many_tags() {
        let err = request("text", &["a", "b", "c", "d", "e", "f"])
            .validate()
            .expect_err("six tags must be rejected");
        assert_validation_field(err, "tags");
    }

    #[test]
    fn create_post_request_validate_drops_blank_image_and_avatar() {
        let mut req = request("text", &[]);
        req.image = Some("   ".to_string());
        req.author.avatar = Some("".to_string());

        let validated = req.validate().expect("must validate");
        assert!(validated.image.is_none());
        assert!(validated.author.avatar.is_none());
    }

    #[test]
    fn create_post_request_validate_rejects_blank_district() {
        let mut req = request("text", &[]);
        req.author.district = "  ".to_string();

        let err = req.validate().expect_err("district must be rejected");
        assert_validation_field(err, "author.district");
    }

    #[test]
    fn community_post_new_rejects_empty_id() {
        let content = PostContent {
            text: "text".to_string(),
            image: None,
            tags: vec![],
        };
        let err = CommunityPost::new(" ", author(), content, PostStats::default(), Utc::now())
            .expect_err("id must be rejected");
        assert_validation_field(err, "id");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
