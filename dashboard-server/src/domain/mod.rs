pub(crate) mod error;
pub(crate) mod forms;
pub(crate) mod image_selection;
pub(crate) mod post;
