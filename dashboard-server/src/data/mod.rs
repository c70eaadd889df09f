pub(crate) mod http_post_source;
pub(crate) mod post_source;
