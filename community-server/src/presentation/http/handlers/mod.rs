pub(crate) mod community;
pub(crate) mod posts;
