use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};

use super::post::{CommunityPost, PostStats};

pub(crate) const DEFAULT_WINDOW_HOURS: u32 = 24;
pub(crate) const DEFAULT_LIMIT: usize = 8;
pub(crate) const POSTING_COOLDOWN_HOURS: i64 = 24;

const LIKE_WEIGHT: f64 = 1.0;
const VIEW_WEIGHT: f64 = 0.1;
const COMMENT_WEIGHT: f64 = 2.0;
/// Per hour; half-life is ln(2) / 0.1 ≈ 6.93h.
const DECAY_RATE: f64 = 0.1;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RankingParams {
    pub(crate) window_hours: u32,
    pub(crate) limit: usize,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankedPost<'a> {
    pub(crate) post: &'a CommunityPost,
    pub(crate) score: f64,
    pub(crate) age_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ranking<'a> {
    pub(crate) posts: Vec<RankedPost<'a>>,
    /// Posts dated after `now`; they are left out of the ranking.
    pub(crate) skipped: usize,
}

/// Picks the most relevant posts of the recent window.
///
/// Posts older than `params.window_hours` are dropped, the rest are scored
/// with [`post_score`] and sorted by score descending, then by id ascending.
/// The result holds at most `params.limit` entries.
pub(crate) fn select_top_posts<'a>(
    posts: &'a [CommunityPost],
    now: DateTime<Utc>,
    params: RankingParams,
) -> Ranking<'a> {
    let window = Duration::hours(i64::from(params.window_hours));
    let mut skipped = 0;

    let mut ranked: Vec<RankedPost<'a>> = posts
        .iter()
        .filter_map(|post| {
            let age = now - post.timestamp;
            if age < Duration::zero() {
                skipped += 1;
                return None;
            }
            if age > window {
                return None;
            }
            let age_hours = hours_of(age);
            Some(RankedPost {
                post,
                score: post_score(&post.stats, age_hours),
                age_hours,
            })
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked.truncate(params.limit);

    Ranking {
        posts: ranked,
        skipped,
    }
}

pub(crate) fn post_score(stats: &PostStats, age_hours: f64) -> f64 {
    let engagement = stats.likes as f64 * LIKE_WEIGHT
        + stats.views as f64 * VIEW_WEIGHT
        + stats.comments as f64 * COMMENT_WEIGHT;
    engagement * (-DECAY_RATE * age_hours).exp()
}

pub(crate) fn can_user_post_today(
    last_post_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    match last_post_at {
        None => true,
        Some(last) => now - last >= Duration::hours(POSTING_COOLDOWN_HOURS),
    }
}

pub(crate) fn next_post_allowed_at(last_post_at: DateTime<Utc>) -> DateTime<Utc> {
    last_post_at + Duration::hours(POSTING_COOLDOWN_HOURS)
}

pub(crate) fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes() % 60;

    if hours > 0 {
        format!("{hours}ч назад")
    } else if minutes > 0 {
        format!("{minutes}м назад")
    } else {
        "Только что".to_string()
    }
}

fn hours_of(age: Duration) -> f64 {
    (age.num_seconds() as f64 + f64::from(age.subsec_nanos()) / NANOS_PER_SECOND)
        / SECONDS_PER_HOUR
}

fn compare_ranked(a: &RankedPost<'_>, b: &RankedPost<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.post.id.cmp(&b.post.id))
}
