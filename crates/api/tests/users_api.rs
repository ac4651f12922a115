//! HTTP-level integration tests for the `/api/users` endpoints: account
//! creation, login verification and profile updates.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;
use strategist_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn signup(username: &str, email: &str) -> Value {
    json!({
        "email": email,
        "username": username,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "company_name": "Analytical Engines",
    })
}

/// Create a user through the API and return its JSON representation.
async fn create_user(pool: &PgPool, username: &str, email: &str) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/users/create", signup(username, email)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_user_succeeds_with_login_count_one(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/users/create", signup("ada", "Ada@Example.com ")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["login_count"], 1);
    assert_eq!(json["data"]["username"], "ada");
    assert_eq!(json["data"]["email"], "ada@example.com");
    assert_eq!(json["data"]["company_name"], "Analytical Engines");
    assert!(json["data"]["job_title"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_user_accepts_camel_case_names(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "email": "grace@example.com",
        "username": "grace",
        "firstName": "Grace",
        "lastName": "Hopper",
    });

    let response = post_json(app, "/api/users/create", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["first_name"], "Grace");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_is_rejected_without_new_row(pool: PgPool) {
    create_user(&pool, "ada", "ada@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/users/create", signup("ada2", "ADA@example.com")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "A user with this email already exists");
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_username_maps_constraint_to_409(pool: PgPool) {
    create_user(&pool, "ada", "ada@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/users/create", signup("ada", "other@example.com")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["message"],
        "A user with this username already exists"
    );
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_required_fields_fail_before_any_write(pool: PgPool) {
    for field in ["email", "username", "first_name", "last_name"] {
        let mut body = signup("ada", "ada@example.com");
        body.as_object_mut().unwrap().remove(field);

        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/users/create", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "field {field}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(
            json["message"],
            format!("Missing required fields: {field}")
        );
    }

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_required_field_counts_as_missing(pool: PgPool) {
    let mut body = signup("ada", "ada@example.com");
    body["last_name"] = json!("   ");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/users/create", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_email_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/users/create", signup("ada", "not-an-email")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Login verification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn verified_login_increments_count_by_one(pool: PgPool) {
    create_user(&pool, "ada", "ada@example.com").await;

    let app = common::build_test_app(pool.clone());
    let body = json!({ "username": "ada", "email": "ADA@example.com" });
    let response = post_json(app, "/api/users/get-info", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["login_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mismatched_identity_fails_and_touches_no_counter(pool: PgPool) {
    let ada = create_user(&pool, "ada", "ada@example.com").await;
    let grace = create_user(&pool, "grace", "grace@example.com").await;

    let app = common::build_test_app(pool.clone());
    let body = json!({ "username": "ada", "email": "grace@example.com" });
    let response = post_json(app, "/api/users/get-info", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Username and email do not match the same account"
    );

    for user in [ada, grace] {
        let id = user["id"].as_i64().unwrap();
        let row = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(row.login_count, 1);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_username_returns_404(pool: PgPool) {
    create_user(&pool, "ada", "ada@example.com").await;

    let app = common::build_test_app(pool);
    let body = json!({ "username": "ghost", "email": "ada@example.com" });
    let response = post_json(app, "/api/users/get-info", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_email_returns_404(pool: PgPool) {
    create_user(&pool, "ada", "ada@example.com").await;

    let app = common::build_test_app(pool);
    let body = json!({ "username": "ada", "email": "ghost@example.com" });
    let response = post_json(app, "/api/users/get-info", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_without_email_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/users/get-info", json!({ "username": "ada" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing and profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_users_returns_newest_first(pool: PgPool) {
    create_user(&pool, "first", "first@example.com").await;
    create_user(&pool, "second", "second@example.com").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/users").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["second", "first"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_user_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/users/9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_user_patches_profile(pool: PgPool) {
    let user = create_user(&pool, "ada", "ada@example.com").await;
    let id = user["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = json!({ "jobTitle": "Head of Growth", "country": "UK" });
    let response = put_json(app, &format!("/api/users/{id}"), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["job_title"], "Head of Growth");
    assert_eq!(json["data"]["country"], "UK");
    assert_eq!(json["data"]["company_name"], "Analytical Engines");
    assert_eq!(json["data"]["login_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_user_rejects_blank_name(pool: PgPool) {
    let user = create_user(&pool, "ada", "ada@example.com").await;
    let id = user["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/users/{id}"), json!({ "first_name": " " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn nul_character_in_profile_is_a_validation_error(pool: PgPool) {
    let mut body = signup("ada", "ada@example.com");
    body["company_name"] = json!("Analytical\u{0000}Engines");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/users/create", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "company_name must not contain NUL characters");
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn nul_character_in_login_lookup_is_a_validation_error(pool: PgPool) {
    create_user(&pool, "ada", "ada@example.com").await;

    let app = common::build_test_app(pool);
    let body = json!({ "username": "ada\u{0000}", "email": "ada@example.com" });
    let response = post_json(app, "/api/users/get-info", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mistyped_field_gets_error_envelope(pool: PgPool) {
    let mut body = signup("ada", "ada@example.com");
    body["username"] = json!(42);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/users/create", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_user_id_gets_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/users/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}
