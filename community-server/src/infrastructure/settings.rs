use anyhow::{Context, Result, anyhow};

use crate::domain::ranking::{DEFAULT_LIMIT, DEFAULT_WINDOW_HOURS, RankingParams};

const MAX_FEATURED_WINDOW_HOURS: u32 = 168;
const MAX_FEATURED_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct Settings {
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub featured_window_hours: u32,
    pub featured_limit: usize,
    pub seed_demo_posts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".to_string(),
            cors_origins: parse_cors_origins(
                "http://localhost:3000,http://127.0.0.1:3000".to_string(),
            ),
            log_level: "info".to_string(),
            http_request_body_limit_bytes: 1024 * 1024,
            http_concurrency_limit: 256,
            http_request_timeout_secs: 10,
            featured_window_hours: DEFAULT_WINDOW_HOURS,
            featured_limit: DEFAULT_LIMIT,
            seed_demo_posts: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or(defaults.http_addr);
        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(raw) => parse_cors_origins(raw),
            Err(_) => defaults.cors_origins,
        };
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(defaults.log_level);
        let http_request_body_limit_bytes = parse_usize_env(
            "HTTP_REQUEST_BODY_LIMIT_BYTES",
            defaults.http_request_body_limit_bytes,
        )?;
        let http_concurrency_limit =
            parse_usize_env("HTTP_CONCURRENCY_LIMIT", defaults.http_concurrency_limit)?;
        let http_request_timeout_secs =
            parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", defaults.http_request_timeout_secs)?;
        let featured_window_hours = u32::try_from(parse_u64_env(
            "FEATURED_WINDOW_HOURS",
            u64::from(defaults.featured_window_hours),
        )?)
        .context("FEATURED_WINDOW_HOURS is out of range")?;
        let featured_limit = parse_usize_env("FEATURED_LIMIT", defaults.featured_limit)?;
        let seed_demo_posts = match std::env::var("SEED_DEMO_POSTS") {
            Ok(raw) => parse_bool(&raw).context("Failed to parse SEED_DEMO_POSTS")?,
            Err(_) => defaults.seed_demo_posts,
        };

        let settings = Self {
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            featured_window_hours,
            featured_limit,
            seed_demo_posts,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn featured_defaults(&self) -> RankingParams {
        RankingParams {
            window_hours: self.featured_window_hours,
            limit: self.featured_limit,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.featured_window_hours > MAX_FEATURED_WINDOW_HOURS {
            return Err(anyhow!(
                "FEATURED_WINDOW_HOURS must be <= {MAX_FEATURED_WINDOW_HOURS}"
            ));
        }
        if self.featured_limit > MAX_FEATURED_LIMIT {
            return Err(anyhow!("FEATURED_LIMIT must be <= {MAX_FEATURED_LIMIT}"));
        }
        Ok(())
    }
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected boolean, got '{other}'")),
    }
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
