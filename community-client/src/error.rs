use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `community-client`.
pub enum CommunityClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Автор уже публиковал пост за последние 24 часа.
    #[error("posting limit reached: {0}")]
    PostingLimitReached(String),

    /// Некорректный запрос или ошибка валидации.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Сервер вернул неожиданный ответ.
    #[error("server error: {0}")]
    Server(String),
}

/// Результат операций `community-client`.
pub type CommunityClientResult<T> = Result<T, CommunityClientError>;

impl CommunityClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::PostingLimitReached(message),
            status if status.is_server_error() => Self::Server(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
