use std::sync::Arc;

use eduflexcli::{
    api::{ACCESS_TOKEN_KEY, ApiClient, ApiError, MemoryTokenStore, REFRESH_TOKEN_KEY, TokenStore},
    eduflex::{auth, capsules, comments, notes, playlists, progress},
    types::{
        ItemType, LikeState, NewCapsule, NewComment, NewDiscussion, ProgressUpdate, Registration,
        Role, TokenPair,
    },
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "id": 1,
        "email": "ada@example.com",
        "username": "ada",
        "role": "creator",
        "bio": "",
        "avatar": null,
        "is_creator": true,
        "created_at": "2025-01-10T08:30:00Z"
    })
}

fn client_with(server: &MockServer, store: Arc<MemoryTokenStore>) -> ApiClient {
    ApiClient::builder()
        .base_url(format!("{}/api/", server.uri()))
        .token_store(store)
        .build()
        .unwrap()
}

fn signed_in() -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_tokens(&TokenPair {
        access: "A1".into(),
        refresh: "R1".into(),
    }))
}

#[tokio::test]
async fn test_login_stores_token_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"email": "ada@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(),
            "tokens": {"access": "A1", "refresh": "R1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, Arc::clone(&store));

    let user = auth::login(&client, "ada@example.com", "secret").await.unwrap();

    assert_eq!(user.username, "ada");
    assert_eq!(user.role, Role::Creator);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("A1"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_rejected_login_without_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_with(&server, Arc::new(MemoryTokenStore::new()));
    let err = auth::login(&client, "ada@example.com", "wrong").await.unwrap_err();

    assert!(err.is_session_expired());
}

#[tokio::test]
async fn test_register_field_errors_keep_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"email": ["user with this email already exists."]})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, Arc::clone(&store));
    let registration = Registration {
        email: "ada@example.com".into(),
        username: "ada".into(),
        password: "secret123".into(),
        password2: "secret123".into(),
    };

    let err = auth::register(&client, &registration).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.message(), "Request failed");
    assert_eq!(
        err.data().unwrap()["email"][0],
        "user with this email already exists."
    );
    assert!(store.get(ACCESS_TOKEN_KEY).await.is_none());
}

#[tokio::test]
async fn test_restore_session_without_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_with(&server, Arc::new(MemoryTokenStore::new()));

    assert!(auth::restore_session(&client).await.unwrap().is_none());
}

#[tokio::test]
async fn test_restore_session_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let user = auth::restore_session(&client).await.unwrap().unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert!(user.is_creator);
}

#[tokio::test]
async fn test_restore_session_drops_rejected_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Inactive user"})))
        .mount(&server)
        .await;

    let store = signed_in();
    let client = client_with(&server, Arc::clone(&store));

    assert!(auth::restore_session(&client).await.unwrap().is_none());
    assert!(store.pair().await.is_none());
}

#[tokio::test]
async fn test_become_creator_sends_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/become-creator/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "You are now a creator!",
            "user": user_json()
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let upgrade = auth::become_creator(&client).await.unwrap();

    assert_eq!(upgrade.message, "You are now a creator!");
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_list_playlists_accepts_paginated_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/playlists/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id": 1, "title": "Rust", "is_public": true},
                {"id": 2, "title": "Go", "is_public": false}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let list = playlists::list(&client).await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title, "Rust");
    assert!(!list[1].is_public);
}

#[tokio::test]
async fn test_discover_accepts_plain_array_and_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/playlists/discover/"))
        .and(query_param("search", "async rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "title": "Async Rust", "description": "Futures and tasks", "is_public": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, Arc::new(MemoryTokenStore::new()));
    let found = playlists::discover(&client, Some("async rust")).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 7);
}

#[tokio::test]
async fn test_get_playlist_orders_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/playlists/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "title": "Rust",
            "items": [
                {"id": 11, "title": "Traits", "item_type": "video", "url": "https://youtu.be/b", "order": 2},
                {"id": 10, "title": "Ownership", "item_type": "article", "url": "https://a.dev/o", "order": 1}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let playlist = playlists::get(&client, 3).await.unwrap();

    let ids: Vec<u64> = playlist.items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![10, 11]);
    assert_eq!(playlist.items[0].item_type, ItemType::Article);
}

#[tokio::test]
async fn test_reorder_puts_item_ids() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/playlists/3/reorder/"))
        .and(body_json(json!({"item_ids": [11, 10]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Items reordered"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());

    playlists::reorder(&client, 3, &[11, 10]).await.unwrap();
}

#[tokio::test]
async fn test_unexpected_shape_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/playlists/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let err = playlists::get(&client, 3).await.unwrap_err();

    assert!(matches!(err, ApiError::UnexpectedBody(_)));
}

#[tokio::test]
async fn test_notes_sorted_by_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes/"))
        .and(query_param("item_id", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "content": "later", "timestamp_seconds": 300},
            {"id": 1, "content": "earlier", "timestamp_seconds": 42}
        ])))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let list = notes::for_item(&client, 10).await.unwrap();

    assert_eq!(list[0].content, "earlier");
    assert_eq!(list[1].timestamp_seconds, Some(300));
}

#[tokio::test]
async fn test_record_progress_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/progress/"))
        .and(body_json(json!({
            "playlist_item_id": 10,
            "is_completed": true,
            "time_spent_seconds": 600
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Progress updated",
            "progress": {
                "id": 5,
                "is_completed": true,
                "time_spent_seconds": 1200,
                "completed_at": "2025-01-10T09:00:00Z",
                "last_accessed": "2025-01-10T09:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let update = ProgressUpdate {
        playlist_item_id: 10,
        is_completed: true,
        time_spent_seconds: 600,
    };
    let recorded = progress::record(&client, &update).await.unwrap();

    assert!(recorded.is_completed);
    assert_eq!(recorded.time_spent_seconds, 1200);
}

#[tokio::test]
async fn test_streaks_parse_dates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/progress/streaks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_streak": 3,
            "longest_streak": 9,
            "recent_activity": [
                {"date": "2025-01-10", "minutes_learned": 25, "items_completed": 1}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let streaks = progress::streaks(&client).await.unwrap();

    assert_eq!(streaks.longest_streak, 9);
    assert_eq!(streaks.recent_activity[0].date.to_string(), "2025-01-10");
}

#[test]
fn test_progress_minutes_saturate() {
    let update = ProgressUpdate::from_minutes(10, 25, false);
    assert_eq!(update.time_spent_seconds, 1500);

    let update = ProgressUpdate::from_minutes(10, u64::MAX, true);
    assert_eq!(update.time_spent_seconds, u64::MAX);
}

#[tokio::test]
async fn test_item_comments_keep_reply_threads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comments/item/10/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "id": 2, "content": "Great video", "username": "bob", "parent": null,
                    "replies": [], "created_at": "2025-01-11T10:00:00Z"
                },
                {
                    "id": 1, "content": "What is a lifetime?", "username": "ada", "parent": null,
                    "replies": [
                        {"id": 3, "content": "A scope for borrows", "username": "bob", "parent": 1, "replies": []}
                    ],
                    "created_at": "2025-01-10T10:00:00Z"
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let thread = comments::for_item(&client, 10).await.unwrap();

    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].id, 1);
    assert_eq!(thread[0].replies[0].parent, Some(1));
    assert_eq!(thread[1].username, "bob");
}

#[tokio::test]
async fn test_reply_comment_sends_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/comments/"))
        .and(body_json(json!({"playlist_item": 10, "content": "Thanks!", "parent": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "playlist_item": 10, "content": "Thanks!", "parent": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/comments/"))
        .and(body_json(json!({"playlist_item": 10, "content": "First"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "playlist_item": 10, "content": "First", "parent": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let reply = NewComment {
        playlist_item: 10,
        content: "Thanks!".into(),
        parent: Some(1),
    };
    let top_level = NewComment {
        playlist_item: 10,
        content: "First".into(),
        parent: None,
    };

    assert_eq!(comments::create(&client, &reply).await.unwrap().parent, Some(1));
    assert!(comments::create(&client, &top_level).await.unwrap().parent.is_none());
}

#[tokio::test]
async fn test_discussions_pinned_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comments/discussions/playlist/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 5, "playlist": 3, "title": "Week 2", "author_username": "ada", "is_pinned": false, "reply_count": 0},
            {"id": 4, "playlist": 3, "title": "Read me first", "author_username": "ada", "is_pinned": true, "reply_count": 2}
        ])))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let threads = comments::discussions(&client, 3).await.unwrap();

    assert_eq!(threads[0].title, "Read me first");
    assert_eq!(threads[0].reply_count, 2);
    assert_eq!(threads[1].id, 5);
}

#[tokio::test]
async fn test_start_and_reply_to_discussion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/comments/discussions/"))
        .and(body_json(json!({"playlist": 3, "title": "Study group", "content": "Who is in?"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "playlist": 3, "title": "Study group", "content": "Who is in?"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/comments/discussions/4/reply/"))
        .and(body_json(json!({"content": "Me!"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "content": "Me!", "author_username": "bob",
            "created_at": "2025-01-10T10:00:00Z", "updated_at": "2025-01-10T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let discussion = NewDiscussion {
        playlist: 3,
        title: "Study group".into(),
        content: "Who is in?".into(),
    };

    let started = comments::start_discussion(&client, &discussion).await.unwrap();
    assert_eq!(started.title, "Study group");

    let reply = comments::reply(&client, 4, "Me!").await.unwrap();
    assert_eq!(reply.id, 9);
    assert_eq!(reply.author_username, "bob");
}

#[tokio::test]
async fn test_reply_to_missing_discussion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/comments/discussions/99/reply/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Discussion not found"})),
        )
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let err = comments::reply(&client, 99, "Hello").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.message(), "Discussion not found");
}

#[tokio::test]
async fn test_public_capsules_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/capsules/public/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{
                "id": 12, "username": "ada", "item_title": "Ownership",
                "summary": "Moves transfer ownership", "likes_count": 4,
                "is_public": true, "created_at": "2025-01-10T10:00:00Z"
            }]
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let list = capsules::public(&client).await.unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].likes_count, 4);
    assert_eq!(list[0].item_title, "Ownership");
}

#[tokio::test]
async fn test_create_capsule_returns_full_capsule() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/capsules/"))
        .and(body_json(json!({
            "playlist_item": 10,
            "summary": "Borrowing rules",
            "key_points": ["One mutable or many shared"],
            "common_mistakes": "",
            "code_snippet": "let r = &x;",
            "code_language": "rust",
            "is_public": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 13, "username": "ada", "playlist_item": 10, "item_title": "Ownership",
            "summary": "Borrowing rules", "key_points": ["One mutable or many shared"],
            "common_mistakes": "", "code_snippet": "let r = &x;", "code_language": "rust",
            "image": null, "is_public": true, "likes_count": 0, "is_liked": false,
            "created_at": "2025-01-10T10:00:00Z", "updated_at": "2025-01-10T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let capsule = NewCapsule {
        playlist_item: 10,
        summary: "Borrowing rules".into(),
        key_points: vec!["One mutable or many shared".into()],
        common_mistakes: String::new(),
        code_snippet: "let r = &x;".into(),
        code_language: "rust".into(),
        is_public: true,
    };
    let created = capsules::create(&client, &capsule).await.unwrap();

    assert_eq!(created.id, 13);
    assert_eq!(created.key_points.len(), 1);
    assert!(created.image.is_none());
}

#[tokio::test]
async fn test_toggle_capsule_like() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/capsules/12/like/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"liked": true, "likes_count": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let state = capsules::toggle_like(&client, 12).await.unwrap();

    assert_eq!(
        state,
        LikeState {
            liked: true,
            likes_count: 5
        }
    );
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_item_capsules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/capsules/item/10/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 13, "username": "ada", "playlist_item": 10, "item_title": "Ownership",
            "summary": "Borrowing rules", "key_points": [], "is_public": false,
            "likes_count": 0, "is_liked": false
        }])))
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let list = capsules::for_item(&client, 10).await.unwrap();

    assert_eq!(list[0].playlist_item, 10);
    assert!(!list[0].is_public);
}
