//! HTTP contract tests for `/api/movies`, driven through the assembled router
//! against an in-memory store.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use marquee_kernel::settings::{DatabaseSettings, Settings};
use serde_json::{json, Value};
use tower::ServiceExt;

const INCEPTION_SUMMARY: &str =
    "A thief who steals corporate secrets through dream-sharing is given a chance at redemption.";

async fn app() -> Router {
    let settings = Settings {
        database: DatabaseSettings::in_memory(),
        ..Settings::default()
    };
    marquee_app::bootstrap(settings).await.unwrap().router()
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn inception() -> Value {
    json!({
        "name": "Inception",
        "img": "http://example.com/i.jpg",
        "summary": INCEPTION_SUMMARY,
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = call(app, Method::POST, "/api/movies", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    created
}

#[tokio::test]
async fn list_starts_empty() {
    let app = app().await;
    let (status, body) = call(&app, Method::GET, "/api/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = app().await;
    let created = create(&app, inception()).await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = call(&app, Method::GET, &format!("/api/movies/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Inception");
    assert_eq!(fetched["img"], "http://example.com/i.jpg");
    assert_eq!(fetched["summary"], INCEPTION_SUMMARY);
    assert_eq!(fetched, created);

    let (_, all) = call(&app, Method::GET, "/api/movies", None).await;
    assert_eq!(all, json!([created]));
}

#[tokio::test]
async fn create_stores_trimmed_fields() {
    let app = app().await;
    let created = create(
        &app,
        json!({
            "name": "  Inception  ",
            "img": " http://example.com/i.jpg ",
            "summary": format!("  {INCEPTION_SUMMARY}\n"),
        }),
    )
    .await;

    assert_eq!(created["name"], "Inception");
    assert_eq!(created["img"], "http://example.com/i.jpg");
    assert_eq!(created["summary"], INCEPTION_SUMMARY);
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let app = app().await;
    let (status, body) = call(&app, Method::GET, "/api/movies/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Movie not found");
}

#[tokio::test]
async fn duplicate_name_is_400_and_original_untouched() {
    let app = app().await;
    let original = create(&app, inception()).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/movies",
        Some(json!({
            "name": " Inception ",
            "img": "http://other.example.com/x.png",
            "summary": "Another summary that is long enough to pass.",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "duplicate_key");
    assert_eq!(body["error"], "A movie named \"Inception\" already exists");

    let (_, all) = call(&app, Method::GET, "/api/movies", None).await;
    assert_eq!(all, json!([original]));
}

#[tokio::test]
async fn invalid_fields_are_rejected_per_field() {
    let app = app().await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/movies",
        Some(json!({ "name": "X", "img": "http://example.com/i.jpg", "summary": "tiny" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
    assert_eq!(
        body["details"],
        json!([
            { "field": "name", "error": "Name must be at least 2 characters." },
            { "field": "summary", "error": "Summary must be at least 20 characters." }
        ])
    );

    let (_, all) = call(&app, Method::GET, "/api/movies", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn update_replaces_every_field() {
    let app = app().await;
    let created = create(&app, inception()).await;
    let uri = format!("/api/movies/{}", created["id"].as_str().unwrap());
    let replacement = json!({
        "name": "Interstellar",
        "img": "https://example.com/interstellar.png",
        "summary": "A team of explorers travel through a wormhole in space.",
    });

    let (status, updated) = call(&app, Method::PUT, &uri, Some(replacement.clone())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    for field in ["name", "img", "summary"] {
        assert_eq!(updated[field], replacement[field]);
    }
    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn partial_update_body_changes_nothing() {
    let app = app().await;
    let created = create(&app, inception()).await;
    let uri = format!("/api/movies/{}", created["id"].as_str().unwrap());

    let (status, body) = call(&app, Method::PUT, &uri, Some(json!({ "name": "Renamed" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let app = app().await;
    let (status, body) = call(&app, Method::PUT, "/api/movies/missing", Some(inception())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Movie not found");

    let (_, all) = call(&app, Method::GET, "/api/movies", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = app().await;
    let created = create(&app, inception()).await;
    let uri = format!("/api/movies/{}", created["id"].as_str().unwrap());

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Movie deleted" }));

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Movie not found");

    let (_, all) = call(&app, Method::GET, "/api/movies", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn openapi_document_lists_movie_paths() {
    let app = app().await;
    let (status, spec) = call(&app, Method::GET, "/docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"]["/api/movies"]["post"].is_object());
    assert!(spec["paths"]["/api/movies/{id}"]["put"].is_object());
    assert!(spec["components"]["schemas"]["Movie"].is_object());
}

#[tokio::test]
async fn module_health_route_wins_over_id_route() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(Request::get("/api/movies/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
