use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use holocron::{app, AppState, MemoryStore, SeedData};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const FIXTURE: &str = include_str!("../seed/catalog.json");

async fn seeded_app() -> Router {
    let store = MemoryStore::new();
    SeedData::from_json(FIXTURE).unwrap().apply(&store).await.unwrap();
    app(AppState::new(Arc::new(store)))
}

fn empty_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn empty_collections_return_404_with_message() {
    let app = empty_app();
    for (uri, msg) in [
        ("/planet", "Sorry! No star wars planet found!"),
        ("/people", "Sorry! No star wars characters found!"),
        ("/users", "Sorry! No user found!"),
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, json!(msg));
    }
}

#[tokio::test]
async fn lists_catalog_in_id_order() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body.as_array().unwrap().iter().map(|p| p["name"].clone()).collect();
    assert_eq!(names[0], "Luke Skywalker");
    assert_eq!(names.len(), 5);

    let (status, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[1]["username"], "leia");
}

#[tokio::test]
async fn post_on_planet_collection_lists() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::POST, "/planet", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn get_by_id() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/planet/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Hoth");
    assert_eq!(body["climate"], "frozen");

    let (status, body) = send(&app, Method::GET, "/people/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Darth Vader");
}

#[tokio::test]
async fn unknown_id_returns_404() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/planet/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Planet ID 99 was not found");

    let (status, body) = send(&app, Method::GET, "/people/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Person ID 42 was not found");
}

#[tokio::test]
async fn non_integer_id_is_bad_request() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/planet/tatooine", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "invalid id");
}

#[tokio::test]
async fn adding_favorite_twice_is_idempotent() {
    let app = seeded_app().await;
    let body = json!({ "user_id": 1 });

    let (status, msg) = send(&app, Method::POST, "/favorite/planet/1", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg, json!("User luke has added Tatooine to their favorites"));

    let (status, msg) = send(&app, Method::POST, "/favorite/planet/1", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg, json!("Tatooine is already a favorite of luke"));

    let (_, favs) = send(&app, Method::GET, "/users/1/favorites", None).await;
    assert_eq!(favs["data"]["planets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn add_person_favorite_works() {
    let app = seeded_app().await;
    let (status, msg) = send(&app, Method::POST, "/favorite/people/4", Some(json!({ "user_id": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg, json!("User luke has added Darth Vader to their favorites"));
}

#[tokio::test]
async fn missing_user_id_on_add_is_bad_request() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::POST, "/favorite/people/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "user_id is required");

    let (status, _) = send(&app, Method::POST, "/favorite/planet/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_with_unknown_user_or_target_is_404() {
    let app = seeded_app().await;
    let (status, _) = send(&app, Method::POST, "/favorite/planet/1", Some(json!({ "user_id": 77 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, "/favorite/planet/77", Some(json!({ "user_id": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Planet or user not found");
}

#[tokio::test]
async fn removing_non_favorite_is_bad_request() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::DELETE, "/favorite/people/2", Some(json!({ "user_id": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "C-3PO is not in favorites");
}

#[tokio::test]
async fn remove_favorite_round_trip() {
    let app = seeded_app().await;
    let (status, msg) = send(&app, Method::DELETE, "/favorite/people/3", Some(json!({ "user_id": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg, json!("R2-D2 removed successfully"));

    let (status, _) = send(&app, Method::DELETE, "/favorite/people/3", Some(json!({ "user_id": 2 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/favorite/planet/2", Some(json!({ "user_id": 99 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_favorites_lists_both_kinds_in_order() {
    let app = seeded_app().await;
    send(&app, Method::POST, "/favorite/people/5", Some(json!({ "user_id": "2" }))).await;

    let (status, body) = send(&app, Method::GET, "/users/2/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User leia's list of favorites");
    let people: Vec<_> = body["data"]["people"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(people, ["Luke Skywalker", "R2-D2", "Leia Organa"]);
    assert_eq!(body["data"]["planets"][0]["name"], "Alderaan");
}

#[tokio::test]
async fn favorites_of_unknown_user_is_404() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/users/9/favorites", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Sorry! No user found!");
}

#[tokio::test]
async fn health_and_ready() {
    let app = empty_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "ok");

    let (_, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(body["name"], "holocron");
}

#[tokio::test]
async fn oversized_favorite_body_is_rejected_with_413() {
    let app = seeded_app().await;
    let padding = "x".repeat(70 * 1024);
    let (status, body) = send(
        &app,
        Method::POST,
        "/favorite/planet/1",
        Some(json!({ "user_id": 1, "note": padding })),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");
}

#[tokio::test]
async fn cors_headers_are_sent() {
    let app = seeded_app().await;
    let req = Request::builder()
        .method(Method::GET)
        .uri("/people/1")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("access-control-allow-origin"));
}
