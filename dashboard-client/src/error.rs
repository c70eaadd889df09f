use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `dashboard-client`.
pub enum DashboardClientError {
    /// Базовый URL API не задан (или пустой).
    #[error("posts API base URL is not defined (set {0})")]
    MissingBaseUrl(&'static str),

    /// Сервер ответил неуспешным статусом.
    #[error("failed to fetch {path}: http status {status}")]
    FetchFailed {
        /// HTTP-статус ответа.
        status: reqwest::StatusCode,
        /// Запрошенный путь относительно базового URL.
        path: String,
    },

    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    /// Тело ответа не удалось разобрать как ожидаемый JSON.
    #[error("decode error: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Результат операций `dashboard-client`.
pub type DashboardClientResult<T> = Result<T, DashboardClientError>;

impl DashboardClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err);
        }
        Self::Http(err)
    }

    /// Возвращает HTTP-статус, если ошибка вызвана неуспешным ответом.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::FetchFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
