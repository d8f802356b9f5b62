use std::sync::{Arc, mpsc};
use std::time::Duration;

use postboard::api::{ApiClient, BoardApi, CommentDraft};
use postboard::core::action::{Action, Effect, update};
use postboard::core::comment_form::Field;
use postboard::core::state::{App, MainContent};
use postboard::tui::tasks::{perform, spawn_effect};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client(server: &MockServer) -> ApiClient {
    assert_ok!(ApiClient::new(server.uri(), Duration::from_secs(5)))
}

fn app_for(server: &MockServer) -> App {
    App::new(Arc::new(client(server)))
}

fn users_json() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Alice", "username": "alice", "email": "alice@example.com", "phone": "1"},
        {"id": 2, "name": "Bob", "username": "bob", "email": "bob@example.com", "phone": "2"}
    ])
}

async fn mount_posts(server: &MockServer, user_id: u32, posts: serde_json::Value, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", user_id.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(posts)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

/// Runs `effects` concurrently and returns their completions in arrival order.
async fn run_concurrently(app: &App, effects: Vec<Effect>) -> Vec<Action> {
    let (tx, rx) = mpsc::channel();
    let expected = effects.len();
    for effect in effects {
        spawn_effect(effect, app.api.clone(), tx.clone());
    }
    tokio::task::spawn_blocking(move || {
        (0..expected)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect::<Vec<Action>>()
    })
    .await
    .unwrap()
}

// ============================================================================
// HTTP Client
// ============================================================================

#[tokio::test]
async fn test_list_users() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_json()))
        .mount(&server)
        .await;

    let users = assert_ok!(client(&server).list_users().await);
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Alice");
    assert_eq!(users[1].email, "bob@example.com");
}

#[tokio::test]
async fn test_list_posts_filters_by_user() {
    let server = MockServer::start().await;
    mount_posts(
        &server,
        1,
        json!([{"id": 10, "userId": 1, "title": "Hello", "body": "World"}]),
        0,
    )
    .await;

    let posts = assert_ok!(client(&server).list_posts(1).await);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, 10);
    assert_eq!(posts[0].user_id, 1);
}

#[tokio::test]
async fn test_list_comments_filters_by_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "postId": 10, "name": "Ann", "email": "ann@example.com", "body": "nice"}
        ])))
        .mount(&server)
        .await;

    let comments = assert_ok!(client(&server).list_comments(10).await);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].post_id, 10);
    assert_eq!(comments[0].body, "nice");
}

#[tokio::test]
async fn test_add_comment_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .and(body_json(json!({
            "postId": 10,
            "name": "Ann",
            "email": "ann@example.com",
            "body": "hi"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42, "postId": 10, "name": "Ann", "email": "ann@example.com", "body": "hi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = CommentDraft {
        post_id: 10,
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        body: "hi".to_string(),
    };
    let comment = assert_ok!(client(&server).add_comment(&draft).await);
    assert_eq!(comment.id, 42);
}

#[tokio::test]
async fn test_delete_comment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/comments/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client(&server).delete_comment(5).await);
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_server_error_maps_to_network_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = assert_err!(client(&server).list_users().await);
    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "boom");
}

#[tokio::test]
async fn test_undecodable_body_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = assert_err!(client(&server).list_users().await);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn test_failed_delete_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/comments/5"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = assert_err!(client(&server).delete_comment(5).await);
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(users_json())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = assert_ok!(ApiClient::new(server.uri(), Duration::from_millis(200)));
    let err = assert_err!(client.list_users().await);
    assert_eq!(err.status, None);
}

// ============================================================================
// End-to-End Through update()
// ============================================================================

#[tokio::test]
async fn test_startup_load_failure_shows_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    let effect = update(&mut app, Action::Init);
    let action = perform(app.api.as_ref(), effect).await.unwrap();
    update(&mut app, action);

    assert!(app.users.is_empty());
    assert_eq!(app.main_content(), MainContent::Error);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_earlier_user_never_overwrites_later_user() {
    let server = MockServer::start().await;
    mount_posts(
        &server,
        1,
        json!([{"id": 10, "userId": 1, "title": "Alice's", "body": ""}]),
        400,
    )
    .await;
    mount_posts(
        &server,
        2,
        json!([{"id": 20, "userId": 2, "title": "Bob's", "body": ""}]),
        0,
    )
    .await;

    let mut app = app_for(&server);
    app.users = serde_json::from_value(users_json()).unwrap();
    let alice = app.users[0].clone();
    let bob = app.users[1].clone();

    let first = update(&mut app, Action::SelectUser(Some(alice)));
    let second = update(&mut app, Action::SelectUser(Some(bob)));

    let arrivals = run_concurrently(&app, vec![first, second]).await;
    // Bob's answer lands first, Alice's stale one after it
    assert!(matches!(arrivals[0], Action::PostsLoaded { user_id: 2, .. }));
    for action in arrivals {
        update(&mut app, action);
    }

    assert!(!app.is_loading());
    assert_eq!(app.selected_user.as_ref().map(|u| u.id), Some(2));
    let posts = app.posts.as_ref().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Bob's");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fast_earlier_user_is_replaced_by_later_user() {
    let server = MockServer::start().await;
    mount_posts(
        &server,
        1,
        json!([{"id": 10, "userId": 1, "title": "Alice's", "body": ""}]),
        0,
    )
    .await;
    mount_posts(
        &server,
        2,
        json!([{"id": 20, "userId": 2, "title": "Bob's", "body": ""}]),
        300,
    )
    .await;

    let mut app = app_for(&server);
    app.users = serde_json::from_value(users_json()).unwrap();
    let alice = app.users[0].clone();
    let bob = app.users[1].clone();

    let first = update(&mut app, Action::SelectUser(Some(alice)));
    let second = update(&mut app, Action::SelectUser(Some(bob)));

    let arrivals = run_concurrently(&app, vec![first, second]).await;
    assert!(matches!(arrivals[0], Action::PostsLoaded { user_id: 1, .. }));

    // Alice's answer is discarded: still loading Bob's
    update(&mut app, arrivals[0].clone());
    assert!(app.is_loading());
    assert!(app.posts.is_none());

    update(&mut app, arrivals[1].clone());
    assert_eq!(app.posts.as_ref().unwrap()[0].title, "Bob's");
}

#[tokio::test]
async fn test_alice_comment_walkthrough() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Alice"}])))
        .mount(&server)
        .await;
    mount_posts(
        &server,
        1,
        json!([{"id": 10, "userId": 1, "title": "Hello", "body": "First post"}]),
        0,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1, "postId": 10, "name": "Ann", "email": "a@b.com", "body": "hi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    let api = app.api.clone();

    let effect = update(&mut app, Action::Init);
    update(&mut app, perform(api.as_ref(), effect).await.unwrap());
    let alice = app.users[0].clone();

    let effect = update(&mut app, Action::SelectUser(Some(alice)));
    update(&mut app, perform(api.as_ref(), effect).await.unwrap());
    assert_eq!(app.main_content(), MainContent::Posts);
    let hello = app.posts.as_ref().unwrap()[0].clone();
    assert_eq!(hello.title, "Hello");

    let effect = update(&mut app, Action::SelectPost(hello));
    update(&mut app, perform(api.as_ref(), effect).await.unwrap());
    assert!(app.details.as_ref().unwrap().comments.is_empty());

    // Missing name: rejected locally, nothing sent
    {
        let form = app.comment_form_mut().unwrap();
        form.set(Field::Email, "a@b.com");
        form.set(Field::Body, "hi");
    }
    assert_eq!(update(&mut app, Action::SubmitComment), Effect::None);
    assert!(app.details.as_ref().unwrap().form.name_error);

    app.comment_form_mut().unwrap().set(Field::Name, "Ann");
    let effect = update(&mut app, Action::SubmitComment);
    assert!(matches!(effect, Effect::AddComment { .. }));
    update(&mut app, perform(api.as_ref(), effect).await.unwrap());

    let details = app.details.as_ref().unwrap();
    assert_eq!(details.comments.len(), 1);
    assert_eq!(details.form.body, "");
    assert_eq!(details.form.name, "Ann");
    assert_eq!(details.form.email, "a@b.com");
    assert!(!details.form.submitting);
}

#[tokio::test]
async fn test_failed_submission_is_silent() {
    let server = MockServer::start().await;
    mount_posts(
        &server,
        1,
        json!([{"id": 10, "userId": 1, "title": "Hello", "body": ""}]),
        0,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    let api = app.api.clone();
    app.users = serde_json::from_value(users_json()).unwrap();
    let alice = app.users[0].clone();

    let effect = update(&mut app, Action::SelectUser(Some(alice)));
    update(&mut app, perform(api.as_ref(), effect).await.unwrap());
    let hello = app.posts.as_ref().unwrap()[0].clone();
    let effect = update(&mut app, Action::SelectPost(hello));
    update(&mut app, perform(api.as_ref(), effect).await.unwrap());

    {
        let form = app.comment_form_mut().unwrap();
        form.set(Field::Name, "Ann");
        form.set(Field::Email, "a@b.com");
        form.set(Field::Body, "hi");
    }
    let effect = update(&mut app, Action::SubmitComment);
    update(&mut app, perform(api.as_ref(), effect).await.unwrap());

    let details = app.details.as_ref().unwrap();
    assert!(details.comments.is_empty());
    assert_eq!(details.form.body, "hi");
    assert!(!details.form.submitting);
    assert!(!details.load_failed);
    assert!(!app.load_failed);
}
