use dashboard_client::Post;

use super::error::DomainError;

const DEFAULT_TITLE: &str = "Default title";
const DEFAULT_BODY: &str = "No body";
const WORDS_PER_MINUTE: usize = 200;
const EXCERPT_CHARS: usize = 140;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostCard {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) title: String,
    pub(crate) body: String,
}

impl Default for PostCard {
    fn default() -> Self {
        Self {
            id: 0,
            user_id: 0,
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
        }
    }
}

impl From<Post> for PostCard {
    fn from(post: Post) -> Self {
        let defaults = Self::default();
        Self {
            id: post.id,
            user_id: post.user_id,
            title: non_blank(post.title).unwrap_or(defaults.title),
            body: non_blank(post.body).unwrap_or(defaults.body),
        }
    }
}

impl PostCard {
    pub(crate) fn reading_minutes(&self) -> usize {
        let words = self.body.split_whitespace().count();
        words.div_ceil(WORDS_PER_MINUTE).max(1)
    }

    pub(crate) fn excerpt(&self) -> String {
        let mut chars = self.body.chars();
        let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
        if chars.next().is_some() {
            format!("{}…", head.trim_end())
        } else {
            head
        }
    }
}

pub(crate) fn parse_post_slug(slug: &str) -> Result<i64, DomainError> {
    match slug.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::NotFound(format!("post slug: {slug}"))),
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
