// Integration tests for the community detail loader using wiremock.
//
// The detail view is the one read that retries: transient backend
// failures back off and try again, persistent ones give up with the
// attempt count, and cancellation wins over both.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fourpaws_core::{
    CommunityId, CoreError, Platform, PlatformConfig, PostOrdering, RetryPolicy,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Platform) {
    let server = MockServer::start().await;
    let mut config = PlatformConfig::new(server.uri().parse().expect("mock server uri"));
    // Keep the backoff short so failure tests run in real time.
    config.retry = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
    };
    let platform = Platform::new(config).expect("platform construction");
    (server, platform)
}

fn community_json() -> serde_json::Value {
    json!({
        "id": 5,
        "name": "Amantes de los perros",
        "description": "Todo sobre perros",
        "category": "dogs",
        "imageUrl": null,
        "members": 3,
        "followers": ["u1"],
        "posts": [1, 2]
    })
}

fn post_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Paseos por el parque",
        "content": "Buscamos compañía para paseos",
        "imageUrl": null,
        "author": { "id": "u1", "username": "maria" },
        "community": 5,
        "createdAt": "2024-05-01T10:00:00Z",
        "likes": 0,
        "likedBy": [],
        "comments": []
    })
}

async fn mount_posts(server: &MockServer, ordering: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/posts/community/5/{ordering}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_json(2),
            post_json(1),
        ])))
        .mount(server)
        .await;
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn detail_composes_community_and_ordered_posts() {
    let (server, platform) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/communities/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(community_json()))
        .mount(&server)
        .await;
    mount_posts(&server, "recent").await;

    let detail = platform
        .community_detail(
            CommunityId::new(5),
            PostOrdering::Recent,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(detail.community.name, "Amantes de los perros");
    // Whatever order the backend chose is the order shown.
    let ids: Vec<i64> = detail.posts.iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn detail_honors_the_popular_ordering() {
    let (server, platform) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/communities/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(community_json()))
        .mount(&server)
        .await;
    mount_posts(&server, "popular").await;

    let detail = platform
        .community_detail(
            CommunityId::new(5),
            PostOrdering::Popular,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(detail.posts.len(), 2);
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let (server, platform) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/communities/5"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Inténtalo de nuevo" })),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/communities/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(community_json()))
        .mount(&server)
        .await;
    mount_posts(&server, "recent").await;

    let detail = platform
        .community_detail(
            CommunityId::new(5),
            PostOrdering::Recent,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(detail.community.id, CommunityId::new(5));
}

#[tokio::test]
async fn persistent_failures_give_up_with_the_attempt_count() {
    let (server, platform) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/communities/5"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Sin servicio" })),
        )
        .expect(3)
        .mount(&server)
        .await;

    let err = platform
        .community_detail(
            CommunityId::new(5),
            PostOrdering::Recent,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    match err {
        CoreError::RetriesExhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, CoreError::Api { .. }));
        }
        other => panic!("expected RetriesExhausted, got {other}"),
    }
}

#[tokio::test]
async fn cancellation_stops_before_the_first_request() {
    let (server, platform) = setup().await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = platform
        .community_detail(CommunityId::new(5), PostOrdering::Recent, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Cancelled));
    assert!(server.received_requests().await.expect("recording").is_empty());
}

#[tokio::test]
async fn cancellation_during_backoff_stops_retrying() {
    let server = MockServer::start().await;
    // A long base delay so the cancel reliably lands inside the first
    // backoff window.
    let mut config = PlatformConfig::new(server.uri().parse().expect("mock server uri"));
    config.retry = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_secs(5),
    };
    let platform = Platform::new(config).expect("platform construction");

    Mock::given(method("GET"))
        .and(path("/api/communities/5"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Sin servicio" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let teardown = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        teardown.cancel();
    });

    let err = platform
        .community_detail(CommunityId::new(5), PostOrdering::Recent, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Cancelled));
}
