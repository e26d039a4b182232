// Integration tests for the entity stores using wiremock.
//
// These drive a full Platform against a mock backend and pin down the
// cache discipline: read-through caching, invalidate-and-refetch after
// successful writes, untouched state after failed writes, and the
// loading/error observability channels.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fourpaws_core::{
    AnimalId, CommunityId, CoreError, Gender, NewAnimal, Platform, PlatformConfig, PostId, Size,
    Species,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Platform) {
    let server = MockServer::start().await;
    let config = PlatformConfig::new(server.uri().parse().expect("mock server uri"));
    let platform = Platform::new(config).expect("platform construction");
    (server, platform)
}

async fn log_in(server: &MockServer, platform: &Platform) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-token",
            "user": { "id": "u1", "username": "maria", "role": "user" }
        })))
        .mount(server)
        .await;

    platform
        .session()
        .login("maria", SecretString::from("hunter2"))
        .await
        .expect("login against mock backend");
}

fn animal_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "species": "dog",
        "breed": "Labrador",
        "gender": "male",
        "birthDate": "2019-01-01",
        "size": "large",
        "location": "Madrid",
        "description": "Friendly and house-trained",
        "adopted": false,
        "imagenUrl": "/uploads/rex.jpg"
    })
}

fn post_json(id: i64, likes: u32) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Paseos por el parque",
        "content": "Buscamos compañía para paseos",
        "imageUrl": null,
        "author": { "id": "u1", "username": "maria" },
        "community": 5,
        "createdAt": "2024-05-01T10:00:00Z",
        "likes": likes,
        "likedBy": [],
        "comments": []
    })
}

fn community_json(id: i64, members: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Amantes de los perros",
        "description": "Todo sobre perros",
        "category": "dogs",
        "imageUrl": null,
        "members": members,
        "followers": ["u1"],
        "posts": [1, 2]
    })
}

fn new_animal() -> NewAnimal {
    NewAnimal {
        name: "Luna".into(),
        species: Species::Cat,
        breed: "Siamese".into(),
        description: "Quiet and affectionate lap cat".into(),
        birth_date: NaiveDate::from_ymd_opt(2021, 5, 1).expect("valid date"),
        gender: Gender::Female,
        size: Size::Small,
        location: "Valencia".into(),
        contact_phone: "+34600111222".into(),
        image: None,
    }
}

// ── Read-through caching ────────────────────────────────────────────

#[tokio::test]
async fn listing_is_fetched_once_and_then_served_from_cache() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([animal_json(1, "Rex")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let first = platform.animals().animals().await.unwrap();
    let second = platform.animals().animals().await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].name, "Rex");
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn concurrent_first_reads_share_one_fetch() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([animal_json(1, "Rex")]))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (a, b) = tokio::join!(platform.animals().animals(), platform.animals().animals());
    assert_eq!(a.unwrap().len(), 1);
    assert_eq!(b.unwrap().len(), 1);
}

#[tokio::test]
async fn listing_preserves_server_order() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            animal_json(3, "Rex"),
            animal_json(1, "Luna"),
            animal_json(2, "Toby"),
        ])))
        .mount(&server)
        .await;

    let animals = platform.animals().animals().await.unwrap();
    let ids: Vec<i64> = animals.iter().map(|a| a.id.get()).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    // The same entities are reachable by id.
    assert_eq!(
        platform.animals().cached(AnimalId::new(1)).unwrap().name,
        "Luna"
    );
}

#[tokio::test]
async fn failed_fetch_surfaces_error_state_then_recovers() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Base de datos caída" })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([animal_json(1, "Rex")])),
        )
        .mount(&server)
        .await;

    let err = platform.animals().animals().await.unwrap_err();
    assert!(matches!(err, CoreError::Api { .. }));
    assert_eq!(
        platform.animals().last_error().borrow().as_deref(),
        Some("Backend error: Base de datos caída")
    );

    // "No data" and "fetch failed" stay distinguishable: the listing
    // is still empty but the error channel says why.
    let recovered = platform.animals().animals().await.unwrap();
    assert_eq!(recovered.len(), 1);
    assert!(platform.animals().last_error().borrow().is_none());
    assert!(!*platform.animals().loading().borrow());
}

// ── Mutations and invalidation ──────────────────────────────────────

#[tokio::test]
async fn successful_registration_refetches_the_listing() {
    let (server, platform) = setup().await;
    log_in(&server, &platform).await;

    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([animal_json(1, "Rex")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/animals"))
        .respond_with(ResponseTemplate::new(201).set_body_json(animal_json(2, "Luna")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            animal_json(1, "Rex"),
            animal_json(2, "Luna"),
        ])))
        .mount(&server)
        .await;

    let before = platform.animals().animals().await.unwrap();
    assert_eq!(before.len(), 1);

    let created = platform.animals().register(new_animal()).await.unwrap();
    assert_eq!(created.name, "Luna");

    // The next read sees the refetched collection, not a local patch.
    let after = platform.animals().animals().await.unwrap();
    assert_eq!(after.len(), 2);
    assert!(!Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn failed_registration_leaves_the_listing_untouched() {
    let (server, platform) = setup().await;
    log_in(&server, &platform).await;

    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([animal_json(1, "Rex")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/animals"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Nombre duplicado" })),
        )
        .mount(&server)
        .await;

    let before = platform.animals().animals().await.unwrap();

    let err = platform.animals().register(new_animal()).await.unwrap_err();
    match err {
        CoreError::Api { message, .. } => assert_eq!(message, "Nombre duplicado"),
        other => panic!("expected Api error, got {other}"),
    }

    // Reference-equal snapshot: nothing was invalidated or patched.
    let after = platform.animals().animals().await.unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn mutations_require_a_session() {
    let (server, platform) = setup().await;

    let err = platform.animals().register(new_animal()).await.unwrap_err();
    assert!(matches!(err, CoreError::SessionRequired));

    let err = platform
        .posts()
        .like(PostId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::SessionRequired));

    // Nothing reached the network.
    assert!(server.received_requests().await.expect("recording").is_empty());
}

#[tokio::test]
async fn validation_rejects_bad_payloads_before_dispatch() {
    let (server, platform) = setup().await;
    log_in(&server, &platform).await;

    let mut invalid = new_animal();
    invalid.contact_phone = "not-a-phone".into();

    let err = platform.animals().register(invalid).await.unwrap_err();
    match err {
        CoreError::Validation { field, .. } => assert_eq!(field, "contact_phone"),
        other => panic!("expected Validation error, got {other}"),
    }

    // Only the login call went out.
    assert_eq!(server.received_requests().await.expect("recording").len(), 1);
}

#[tokio::test]
async fn like_toggle_refetches_the_feed() {
    let (server, platform) = setup().await;
    log_in(&server, &platform).await;

    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(7, 0)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/posts/7/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(7, 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(7, 1)])))
        .mount(&server)
        .await;

    let before = platform.posts().posts().await.unwrap();
    assert_eq!(before[0].like_count, 0);

    let liked = platform.posts().like(PostId::new(7)).await.unwrap();
    assert_eq!(liked.like_count, 1);

    // The server's answer, not a local increment, is what the cache
    // ends up holding.
    let after = platform.posts().posts().await.unwrap();
    assert_eq!(after[0].like_count, 1);
}

#[tokio::test]
async fn follow_refetches_membership_counts() {
    let (server, platform) = setup().await;
    log_in(&server, &platform).await;

    Mock::given(method("GET"))
        .and(path("/api/communities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([community_json(5, 3)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/communities/5/follow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(community_json(5, 4)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/communities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([community_json(5, 4)])))
        .mount(&server)
        .await;

    assert_eq!(platform.communities().communities().await.unwrap()[0].member_count, 3);

    platform
        .communities()
        .follow(CommunityId::new(5))
        .await
        .unwrap();

    assert_eq!(platform.communities().communities().await.unwrap()[0].member_count, 4);
}

// ── Soft failure ────────────────────────────────────────────────────

#[tokio::test]
async fn similar_animals_resolve_to_empty_on_failure() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/animals/42/similar"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let similar = platform.animals().similar(AnimalId::new(42)).await;
    assert!(similar.is_empty());
}

// ── Subscriptions ───────────────────────────────────────────────────

#[tokio::test]
async fn subscribers_see_the_refetched_listing() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/animals"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([animal_json(1, "Rex")])),
        )
        .mount(&server)
        .await;

    let mut subscription = platform.animals().subscribe();
    assert!(subscription.current().is_empty());

    platform.animals().animals().await.unwrap();

    let snap = subscription.changed().await.expect("store alive");
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].name, "Rex");
}
