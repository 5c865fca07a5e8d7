use std::sync::Arc;

use crate::application::community_service::CommunityService;
use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
use crate::domain::ranking::RankingParams;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) community_service: Arc<CommunityService<InMemoryPostRepository>>,
    pub(crate) featured_defaults: RankingParams,
}

impl AppState {
    pub(crate) fn new(
        community_service: Arc<CommunityService<InMemoryPostRepository>>,
        featured_defaults: RankingParams,
    ) -> Self {
        Self {
            community_service,
            featured_defaults,
        }
    }
}
