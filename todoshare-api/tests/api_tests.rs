/// Router-level tests for the TodoShare API
///
/// Every test drives the full Axum router (authentication layer, handlers,
/// error mapping) against the in-memory store:
/// - Registration and login
/// - Todo visibility, update and delete permissions
/// - Sharing and category handling
/// - Token checks

mod common;

use axum::http::{Method, StatusCode};
use chrono::Duration;
use common::{TestContext, STRONG_PASSWORD, TEST_JWT_SECRET};
use serde_json::json;
use todoshare_shared::auth::jwt::{create_token, validate_token, Claims};

#[tokio::test]
async fn test_register_returns_valid_token() {
    let ctx = TestContext::new();

    let token = ctx.register("alice").await;

    let claims = validate_token(&token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, "alice");

    let stored = ctx.repos.users.get_by_username("alice").await.unwrap();
    assert_ne!(stored.password_hash, STRONG_PASSWORD);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let ctx = TestContext::new();
    ctx.register("alice").await;

    let (status, body) = ctx
        .post(
            "/register",
            None,
            json!({ "username": "alice", "password": "An0ther!pass" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_register_reports_every_unmet_rule() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post("/register", None, json!({ "username": "al", "password": "abc" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let details = body["details"].as_array().unwrap();
    let fields: Vec<&str> = details
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();

    // Username length, then password: length, uppercase, digit, symbol
    assert_eq!(fields.iter().filter(|f| **f == "username").count(), 1);
    assert_eq!(fields.iter().filter(|f| **f == "password").count(), 4);

    assert!(ctx.repos.users.get_by_username("al").await.is_err());
}

#[tokio::test]
async fn test_register_missing_field_is_bad_request() {
    let ctx = TestContext::new();

    let (status, body) = ctx.post("/register", None, json!({ "username": "alice" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_login_flow() {
    let ctx = TestContext::new();
    ctx.register("alice").await;

    let (status, body) = ctx
        .post(
            "/login",
            None,
            json!({ "username": "alice", "password": STRONG_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    assert_eq!(validate_token(token, TEST_JWT_SECRET).unwrap().sub, "alice");

    let (status, _) = ctx
        .post(
            "/login",
            None,
            json!({ "username": "alice", "password": "Wrong-pass1" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .post(
            "/login",
            None,
            json!({ "username": "nobody", "password": STRONG_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx
        .post("/login", None, json!({ "username": "", "password": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_two_logins_yield_distinct_tokens() {
    let ctx = TestContext::new();
    ctx.register("alice").await;

    let credentials = json!({ "username": "alice", "password": STRONG_PASSWORD });
    let (_, first) = ctx.post("/login", None, credentials.clone()).await;
    let (_, second) = ctx.post("/login", None, credentials).await;

    assert_ne!(first["token"], second["token"]);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let ctx = TestContext::new();

    let (status, _) = ctx.request(Method::GET, "/auth/todos", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.get("/auth/check-token", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_token() {
    let ctx = TestContext::new();
    let token = ctx.register("alice").await;

    let (status, body) = ctx.get("/auth/check-token", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Token is valid");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let ctx = TestContext::new();
    ctx.register("alice").await;

    let expired = create_token(
        &Claims::new("alice", Duration::seconds(-60)),
        TEST_JWT_SECRET,
    )
    .unwrap();

    let (status, body) = ctx.get("/auth/check-token", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_token_for_unknown_user_rejected() {
    let ctx = TestContext::new();

    let token = create_token(&Claims::new("ghost", Duration::hours(1)), TEST_JWT_SECRET).unwrap();

    let (status, _) = ctx.get("/auth/todos", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_todo_validation() {
    let ctx = TestContext::new();
    let token = ctx.register("alice").await;

    let (status, _) = ctx
        .post("/auth/todo/create", Some(&token), json!({ "title": "   " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = ctx
        .post("/auth/todo/create", Some(&token), json!({ "title": "buy milk" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "buy milk");
    assert_eq!(body["completed"], false);
    assert!(body["category"].is_null());
}

#[tokio::test]
async fn test_update_todo_with_category() {
    let ctx = TestContext::new();
    let token = ctx.register("alice").await;
    let todo_id = ctx.create_todo(&token, "buy milk").await;
    let uri = format!("/auth/todo/{}", todo_id);

    let (status, body) = ctx
        .put(
            &uri,
            &token,
            json!({ "title": "buy oat milk", "completed": true, "category": "groceries" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "buy oat milk");
    assert_eq!(body["completed"], true);
    assert_eq!(body["category"]["title"], "groceries");
    let category_id = body["category"]["id"].clone();

    // Category object form resolves to the same category
    let (status, body) = ctx
        .put(
            &uri,
            &token,
            json!({
                "id": todo_id,
                "title": "buy oat milk",
                "completed": false,
                "category": { "id": 999, "title": "groceries" }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["id"], category_id);

    let (_, categories) = ctx.get("/auth/categories", &token).await;
    assert_eq!(categories.as_array().unwrap().len(), 1);

    // No category clears it
    let (status, body) = ctx
        .put(&uri, &token, json!({ "title": "buy oat milk", "completed": false }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["category"].is_null());
}

#[tokio::test]
async fn test_update_todo_rejects_mismatched_id_and_empty_title() {
    let ctx = TestContext::new();
    let token = ctx.register("alice").await;
    let todo_id = ctx.create_todo(&token, "buy milk").await;
    let uri = format!("/auth/todo/{}", todo_id);

    let (status, _) = ctx
        .put(
            &uri,
            &token,
            json!({ "id": todo_id + 1, "title": "x", "completed": false }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .put(&uri, &token, json!({ "title": "", "completed": false }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_todo_id_is_bad_request() {
    let ctx = TestContext::new();
    let token = ctx.register("alice").await;

    let (status, body) = ctx
        .put("/auth/todo/abc", &token, json!({ "title": "x", "completed": false }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = ctx.delete("/auth/todo/abc", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_update_unknown_todo_is_forbidden() {
    let ctx = TestContext::new();
    let token = ctx.register("alice").await;

    let (status, _) = ctx
        .put("/auth/todo/4242", &token, json!({ "title": "x", "completed": false }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_unknown_todo_is_not_found() {
    let ctx = TestContext::new();
    let token = ctx.register("alice").await;

    let (status, _) = ctx.delete("/auth/todo/4242", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories_are_scoped_to_owner() {
    let ctx = TestContext::new();
    let alice = ctx.register("alice").await;
    let bob = ctx.register("bob").await;

    let (status, first) = ctx
        .post("/auth/category/create", Some(&alice), json!({ "title": "work" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, again) = ctx
        .post("/auth/category/create", Some(&alice), json!({ "title": "work" }))
        .await;
    assert_eq!(first["id"], again["id"]);

    let (_, bobs) = ctx
        .post("/auth/category/create", Some(&bob), json!({ "title": "work" }))
        .await;
    assert_ne!(first["id"], bobs["id"]);

    let (status, _) = ctx
        .post("/auth/category/create", Some(&alice), json!({ "title": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = ctx.get("/auth/categories", &alice).await;
    assert_eq!(listed, json!([first]));
}

#[tokio::test]
async fn test_share_missing_field_is_bad_request() {
    let ctx = TestContext::new();
    let token = ctx.register("alice").await;

    let (status, _) = ctx.post("/auth/share", Some(&token), json!({ "id": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Alice owns a todo, shares it with Bob, Bob edits it but cannot delete it
#[tokio::test]
async fn test_alice_and_bob_sharing_scenario() {
    let ctx = TestContext::new();
    let alice = ctx.register("alice").await;
    let bob = ctx.register("bob").await;
    let bob_id = ctx.repos.users.get_by_username("bob").await.unwrap().id;

    let todo_id = ctx.create_todo(&alice, "plan trip").await;
    let uri = format!("/auth/todo/{}", todo_id);

    // Not visible or editable before sharing
    let (_, todos) = ctx.get("/auth/todos", &bob).await;
    assert_eq!(todos, json!([]));

    let (status, _) = ctx
        .put(&uri, &bob, json!({ "title": "hijack", "completed": true }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Bob cannot share what he does not own
    let (status, _) = ctx
        .post("/auth/share", Some(&bob), json!({ "id": todo_id, "username": "bob" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unknown target user
    let (status, _) = ctx
        .post(
            "/auth/share",
            Some(&alice),
            json!({ "id": todo_id, "username": "carol" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Unknown todo
    let (status, _) = ctx
        .post("/auth/share", Some(&alice), json!({ "id": 4242, "username": "bob" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx
        .post(
            "/auth/share",
            Some(&alice),
            json!({ "id": todo_id, "username": "bob" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todo shared successfully");

    // Sharing again is harmless
    let (status, _) = ctx
        .post(
            "/auth/share",
            Some(&alice),
            json!({ "id": todo_id, "username": "bob" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, todos) = ctx.get("/auth/todos", &bob).await;
    assert_eq!(todos.as_array().unwrap().len(), 1);

    // Bob edits; the category he names becomes his own
    let (status, body) = ctx
        .put(
            &uri,
            &bob,
            json!({ "title": "plan trip to Lisbon", "completed": false, "category": "travel" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "plan trip to Lisbon");
    assert_eq!(body["category"]["created_user_id"], bob_id);

    let (_, todos) = ctx.get("/auth/todos", &alice).await;
    assert_eq!(todos[0]["title"], "plan trip to Lisbon");

    // Bob cannot delete; the todo survives
    let (status, _) = ctx.delete(&uri, &bob).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, todos) = ctx.get("/auth/todos", &alice).await;
    assert_eq!(todos.as_array().unwrap().len(), 1);

    let (status, body) = ctx.delete(&uri, &alice).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todo deleted successfully");

    let (_, todos) = ctx.get("/auth/todos", &bob).await;
    assert_eq!(todos, json!([]));
}
