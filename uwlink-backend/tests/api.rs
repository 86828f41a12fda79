use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;
use uwlink_auth::TokenKeys;
use uwlink_backend::{config::Config, create_app, database::setup_database, AppState};

// Build a router backed by a throwaway sqlite database. The TempDir must be
// kept alive for the duration of the test.
async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let database_url = format!("sqlite://{}/uwlink-test.db?mode=rwc", dir.path().display());

    let db = setup_database(&database_url).await.unwrap();

    let config = Config {
        database_url,
        server_address: "127.0.0.1:0".to_string(),
        jwt_secret: "test-secret".to_string(),
        token_ttl_minutes: 15,
    };
    let token_keys = TokenKeys::from_secret(config.jwt_secret.as_bytes());

    let app = create_app(AppState {
        db,
        config,
        token_keys,
    });

    (app, dir)
}

async fn request(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn signup(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    request(
        app,
        "POST",
        "/owners",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_works() {
    let (app, _dir) = test_app().await;

    let (status, body) = request(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn signup_login_and_pet_flow() {
    let (app, _dir) = test_app().await;

    // Signup returns the owner with no pets, and never the password or username
    let (status, owner) = signup(&app, "alice", "hunter2").await;
    assert_eq!(status, StatusCode::OK);
    let owner_id = owner["owner_id"].as_str().unwrap().to_string();
    assert_eq!(owner["pets"], json!([]));
    assert!(owner.get("username").is_none());
    assert!(owner.get("hashed_password").is_none());
    assert!(owner["joined_at"].is_string());

    let token = login(&app, "alice", "hunter2").await;

    // Create a pet; the owner is taken from the token
    let (status, pet) = request(
        &app,
        "POST",
        "/pets",
        Some(&token),
        Some(json!({ "name": "Rex", "type": "dog" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["name"], "Rex");
    assert_eq!(pet["type"], "dog");
    assert_eq!(pet["owner_id"].as_str().unwrap(), owner_id);
    let pet_id = pet["pet_id"].as_str().unwrap().to_string();

    // The owner's pet list is derived from the pets collection
    let (status, fetched) = request(
        &app,
        "GET",
        &format!("/owners/{}", owner_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["pets"], json!([pet_id]));

    // Listings include the new records
    let (status, owners) = request(&app, "GET", "/owners", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(owners.as_array().unwrap().len(), 1);
    assert_eq!(owners[0]["pets"], json!([pet_id]));

    let (status, pets) = request(&app, "GET", "/pets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pets.as_array().unwrap().len(), 1);

    let (status, fetched_pet) = request(
        &app,
        "GET",
        &format!("/pets/{}", pet_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched_pet["name"], "Rex");
}

#[tokio::test]
async fn endpoints_require_a_token() {
    let (app, _dir) = test_app().await;

    for path in ["/owners", "/pets"] {
        let (status, _) = request(&app, "GET", path, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "GET {} without token", path);
    }

    let (status, _) = request(
        &app,
        "POST",
        "/pets",
        None,
        Some(json!({ "name": "Rex", "type": "dog" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A syntactically invalid token is rejected the same way
    let (status, _) = request(&app, "GET", "/owners", Some("not.a.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_rejected() {
    let (app, _dir) = test_app().await;

    signup(&app, "alice", "hunter2").await;

    let forged = TokenKeys::from_secret(b"other-secret")
        .issue(Uuid::new_v4(), chrono::Duration::minutes(15))
        .unwrap();

    let (status, _) = request(&app, "GET", "/owners", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_ids_return_not_found() {
    let (app, _dir) = test_app().await;

    signup(&app, "alice", "hunter2").await;
    let token = login(&app, "alice", "hunter2").await;

    let missing = Uuid::new_v4();

    let (status, _) = request(
        &app,
        "GET",
        &format!("/owners/{}", missing),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "GET",
        &format!("/pets/{}", missing),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let (app, _dir) = test_app().await;

    let (status, _) = signup(&app, "alice", "hunter2").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = signup(&app, "alice", "different-password").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already in use");
}

#[tokio::test]
async fn bad_credentials_rejected() {
    let (app, _dir) = test_app().await;

    signup(&app, "alice", "hunter2").await;

    // Wrong password and unknown user produce the same response
    let (wrong_status, wrong_body) = request(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong" })),
    )
    .await;
    let (unknown_status, unknown_body) = request(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "nobody", "password": "wrong" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_body["error"], unknown_body["error"]);
}

#[tokio::test]
async fn empty_signup_fields_rejected() {
    let (app, _dir) = test_app().await;

    let (status, _) = signup(&app, "", "hunter2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = signup(&app, "alice", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
