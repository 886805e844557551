mod common;

use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todo_core::{DeleteResponse, ErrorBody, Todo};
use todo_server::{app, service};
use tower::ServiceExt;

use common::{expired_token, foreign_token, token_for, SECRET};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn test_app() -> Router {
    app(service(SECRET))
}

fn request(method: &str, uri: &str, token: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

async fn assert_invalid_token(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = body_json(response).await;
    assert_eq!(body.message, "invalid token");
}

// --- auth ---

#[tokio::test]
async fn every_route_requires_a_token() {
    let app = test_app();
    for req in [
        request("GET", "/todos", None),
        json_request("POST", "/todos", None, r#"{"content":"x"}"#),
        request("DELETE", "/todos", None),
        request("DELETE", "/todos/1", None),
    ] {
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_invalid_token(resp).await;
    }
}

#[tokio::test]
async fn wrong_secret_looks_like_missing_token() {
    let token = foreign_token(1);
    let resp = test_app()
        .oneshot(request("GET", "/todos", Some(&token)))
        .await
        .unwrap();
    assert_invalid_token(resp).await;
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let token = expired_token(1);
    let resp = test_app()
        .oneshot(request("GET", "/todos", Some(&token)))
        .await
        .unwrap();
    assert_invalid_token(resp).await;
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let req = Request::builder()
        .uri("/todos")
        .header(http::header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(String::new())
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_invalid_token(resp).await;
}

#[tokio::test]
async fn auth_is_checked_before_body() {
    let resp = test_app()
        .oneshot(json_request("POST", "/todos", None, r#"{"content":""}"#))
        .await
        .unwrap();
    assert_invalid_token(resp).await;

    let resp = test_app()
        .oneshot(json_request("POST", "/todos", None, "not json"))
        .await
        .unwrap();
    assert_invalid_token(resp).await;
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let token = token_for(1);
    let resp = test_app()
        .oneshot(request("GET", "/todos", Some(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"[]");
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_200() {
    let token = token_for(1);
    let resp = test_app()
        .oneshot(json_request(
            "POST",
            "/todos",
            Some(&token),
            r#"{"content":"Complete E2E testing"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: serde_json::Value = body_json(resp).await;
    assert_eq!(todo["content"], "Complete E2E testing");
    assert_eq!(todo["userId"], 1);
    assert!(todo["id"].is_u64());
}

#[tokio::test]
async fn create_todo_empty_content_returns_400() {
    let token = token_for(1);
    let app = test_app();
    for body in [r#"{"content":""}"#, r#"{"content":"   "}"#, r#"{}"#] {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/todos", Some(&token), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        let err: ErrorBody = body_json(resp).await;
        assert_eq!(err.message, "Content cannot be empty");
    }

    let resp = app
        .oneshot(request("GET", "/todos", Some(&token)))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn create_todo_malformed_json_returns_400() {
    let token = token_for(1);
    let resp = test_app()
        .oneshot(json_request("POST", "/todos", Some(&token), "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorBody = body_json(resp).await;
    assert!(!err.message.is_empty());
}

// --- delete ---

#[tokio::test]
async fn delete_unknown_id_succeeds() {
    let token = token_for(1);
    let resp = test_app()
        .oneshot(request("DELETE", "/todos/424242", Some(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: DeleteResponse = body_json(resp).await;
    assert_eq!(body.deleted, 0);
}

#[tokio::test]
async fn delete_non_numeric_id_returns_400() {
    let token = token_for(1);
    let resp = test_app()
        .oneshot(request("DELETE", "/todos/not-a-number", Some(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_all_on_empty_store_succeeds() {
    let token = token_for(1);
    let app = test_app();
    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(request("DELETE", "/todos", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: DeleteResponse = body_json(resp).await;
        assert_eq!(body.deleted, 0);
    }
}

// --- ownership ---

#[tokio::test]
async fn users_only_see_and_delete_their_own_todos() {
    let app = test_app();
    let alice = token_for(1);
    let bob = token_for(2);

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/todos",
            Some(&alice),
            r#"{"content":"alice's"}"#,
        ))
        .await
        .unwrap();
    let alices: Todo = body_json(resp).await;

    let resp = app
        .clone()
        .oneshot(request("GET", "/todos", Some(&bob)))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());

    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/todos/{}", alices.id),
            Some(&bob),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: DeleteResponse = body_json(resp).await;
    assert_eq!(body.deleted, 0);

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/todos", Some(&bob)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(request("GET", "/todos", Some(&alice)))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![alices]);
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = test_app();
    let token = token_for(1);

    // create
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/todos",
            Some(&token),
            r#"{"content":"Walk dog"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Todo = body_json(resp).await;
    assert_eq!(first.content, "Walk dog");
    assert_eq!(first.owner_id, 1);

    // same content again, new record
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/todos",
            Some(&token),
            r#"{"content":"Walk dog"}"#,
        ))
        .await
        .unwrap();
    let second: Todo = body_json(resp).await;
    assert_ne!(second.id, first.id);

    // list
    let resp = app
        .clone()
        .oneshot(request("GET", "/todos", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![first.clone(), second.clone()]);

    // delete one
    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/todos/{}", first.id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: DeleteResponse = body_json(resp).await;
    assert_eq!(body.deleted, 1);

    let resp = app
        .clone()
        .oneshot(request("GET", "/todos", Some(&token)))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![second]);

    // delete all
    let resp = app
        .clone()
        .oneshot(request("DELETE", "/todos", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: DeleteResponse = body_json(resp).await;
    assert_eq!(body.deleted, 1);

    // list after delete all is empty
    let resp = app
        .oneshot(request("GET", "/todos", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}
