use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель поста в формате внешнего API.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Идентификатор пользователя-владельца.
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Текст поста.
    pub body: String,
}
