use std::time::{SystemTime, UNIX_EPOCH};

use community_client::{Author, CommunityClient, CommunityClientError};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running HTTP server"]
async fn http_smoke_flow() {
    let base_url = std::env::var("COMMUNITY_HTTP_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let mut client = CommunityClient::new(base_url).expect("client must build");

    let author_id = format!("smoke_{}", unique_suffix());
    client.set_author(Author {
        id: author_id.clone(),
        name: "Smoke".to_string(),
        avatar: None,
        district: "Центр".to_string(),
    });

    let status = client
        .posting_status(&author_id)
        .await
        .expect("posting_status must succeed");
    assert!(status.can_post);
    assert!(status.last_post_at.is_none());

    let created = client
        .create_post(
            "вечерний проспект",
            Some("/demo/smoke.jpg"),
            &["город".to_string()],
        )
        .await
        .expect("create_post must succeed");
    assert_eq!(created.author.id, author_id);
    assert_eq!(created.stats.likes, 0);

    let fetched = client
        .get_post(&created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched.id, created.id);

    let liked = client
        .like_post(&created.id)
        .await
        .expect("like_post must succeed");
    assert_eq!(liked.stats.likes, 1);

    let viewed = client
        .view_post(&created.id)
        .await
        .expect("view_post must succeed");
    assert_eq!(viewed.stats.views, 1);

    let featured = client
        .featured_posts(Some(24), Some(50))
        .await
        .expect("featured_posts must succeed");
    assert!(featured.posts.iter().any(|f| f.post.id == created.id));
    assert!(
        featured
            .posts
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score)
    );

    let second = client.create_post("ещё один пост", None, &[]).await;
    assert!(matches!(
        second,
        Err(CommunityClientError::PostingLimitReached(_))
    ));

    let status = client
        .posting_status(&author_id)
        .await
        .expect("posting_status must succeed");
    assert!(!status.can_post);
    assert!(status.next_post_allowed_at.is_some());

    let listed = client
        .list_posts(50, 0)
        .await
        .expect("list_posts must succeed");
    assert!(listed.posts.iter().any(|post| post.id == created.id));

    let photos = client
        .top_photos(Some(50))
        .await
        .expect("top_photos must succeed");
    assert!(photos.iter().any(|photo| photo.id == created.id));

    let districts = client
        .district_stats()
        .await
        .expect("district_stats must succeed");
    assert!(districts.iter().any(|d| d.name == "Центр" && d.posts >= 1));

    let missing = client.get_post("does-not-exist").await;
    assert!(matches!(missing, Err(CommunityClientError::NotFound)));
}
