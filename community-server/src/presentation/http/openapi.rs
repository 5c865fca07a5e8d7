use utoipa::OpenApi;

use crate::presentation::http::handlers::community::{
    CityPhotoDto, DistrictStatsDto, FeaturedPostDto, FeaturedPostsResponseDto, FeaturedQuery,
    PostingStatusDto, TopPhotosQuery,
};
use crate::presentation::http::handlers::posts::{
    AuthorDto, CreatePostDto, ListPostsResponseDto, PaginationQuery, PostContentDto, PostDto,
    PostStatsDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::like_post,
        crate::presentation::http::handlers::posts::view_post,
        crate::presentation::http::handlers::community::featured_posts,
        crate::presentation::http::handlers::community::posting_status,
        crate::presentation::http::handlers::community::top_photos,
        crate::presentation::http::handlers::community::district_stats
    ),
    components(
        schemas(
            AuthorDto,
            CreatePostDto,
            PaginationQuery,
            PostContentDto,
            PostStatsDto,
            PostDto,
            ListPostsResponseDto,
            FeaturedQuery,
            TopPhotosQuery,
            FeaturedPostDto,
            FeaturedPostsResponseDto,
            PostingStatusDto,
            CityPhotoDto,
            DistrictStatsDto
        )
    ),
    tags(
        (name = "posts", description = "Community post endpoints"),
        (name = "community", description = "Featured posts, gallery and district endpoints")
    )
)]
pub(crate) struct ApiDoc;
