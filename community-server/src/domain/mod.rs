pub(crate) mod error;
pub(crate) mod lookbook;
pub(crate) mod post;
pub(crate) mod ranking;
