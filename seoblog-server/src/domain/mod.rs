pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod refresh;
pub(crate) mod user;
