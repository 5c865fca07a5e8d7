pub(crate) mod community_service;
