//! Клиентская библиотека для внешнего posts API, из которого дашборд берёт
//! данные.
//!
//! Предоставляет `PostsClient` поверх `reqwest`:
//! - `GET <base-url>/posts`: список постов;
//! - `GET <base-url>/posts/<id>`: один пост.
//!
//! Базовый URL может отсутствовать: клиент создаётся в любом случае, а ошибка
//! конфигурации возвращается при первом запросе.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{DashboardClientError, DashboardClientResult};
pub use http_client::{BASE_URL_ENV, PostsClient};
pub use models::Post;
