//! HTTP-level integration tests for the `/api/strategies` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, header, post_json};
use serde_json::{json, Value};
use sqlx::PgPool;

/// Create a user through the API and return its id.
async fn create_user(pool: &PgPool) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = json!({
        "email": "ada@example.com",
        "username": "ada",
        "first_name": "Ada",
        "last_name": "Lovelace",
    });
    let response = post_json(app, "/api/users/create", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

fn strategy() -> Value {
    json!({
        "summary": "Own the founder niche",
        "personas": [
            { "name": "Founder Fiona", "pain": "No time" },
            { "role": "Marketer" },
        ],
        "goToMarketPlan": { "channels": ["YouTube"] },
        "shorts_scripts": [{ "title": "Hook in 3s", "script": "..." }],
        "ifc_profile": { "segment": "Seed-stage SaaS" },
    })
}

async fn store_strategy(pool: &PgPool, user_id: i64) -> Value {
    let app = common::build_test_app(pool.clone());
    let body = json!({
        "userId": user_id,
        "businessName": "Acme Analytics",
        "formInput": { "industry": "SaaS" },
        "strategy": strategy(),
    });
    let response = post_json(app, "/api/strategies", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn storing_a_strategy_splits_artifacts(pool: PgPool) {
    let user_id = create_user(&pool).await;
    let stored = store_strategy(&pool, user_id).await;

    assert_eq!(stored["user_id"], user_id);
    assert_eq!(stored["business_name"], "Acme Analytics");
    assert_eq!(stored["form_input"]["industry"], "SaaS");

    let personas = stored["personas"].as_array().unwrap();
    assert_eq!(personas.len(), 2);
    assert_eq!(personas[0]["title"], "Founder Fiona");
    assert_eq!(personas[1]["title"], "Persona 2");
    assert_eq!(stored["go_to_market_plans"].as_array().unwrap().len(), 1);
    assert_eq!(stored["shorts_scripts"][0]["title"], "Hook in 3s");
    assert_eq!(stored["ifc_profiles"][0]["content"]["segment"], "Seed-stage SaaS");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stored_strategy_can_be_fetched(pool: PgPool) {
    let user_id = create_user(&pool).await;
    let stored = store_strategy(&pool, user_id).await;
    let id = stored["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/strategies/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["personas"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn strategy_for_unknown_user_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "user_id": 9999,
        "business_name": "Acme",
        "strategy": strategy(),
    });
    let response = post_json(app, "/api/strategies", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_strategy_is_rejected(pool: PgPool) {
    let user_id = create_user(&pool).await;

    for strategy in [json!("just text"), json!({ "personas": { "name": "x" } })] {
        let app = common::build_test_app(pool.clone());
        let body = json!({
            "user_id": user_id,
            "business_name": "Acme",
            "strategy": strategy,
        });
        let response = post_json(app, "/api/strategies", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/users/{user_id}/strategies")).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_business_name_is_rejected(pool: PgPool) {
    let user_id = create_user(&pool).await;

    let app = common::build_test_app(pool);
    let body = json!({ "user_id": user_id, "strategy": strategy() });
    let response = post_json(app, "/api/strategies", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Missing required fields: business_name"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn user_strategies_are_listed_newest_first(pool: PgPool) {
    let user_id = create_user(&pool).await;
    let first = store_strategy(&pool, user_id).await;
    let second = store_strategy(&pool, user_id).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/users/{user_id}/strategies")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].clone())
        .collect();
    assert_eq!(ids, vec![second["id"].clone(), first["id"].clone()]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stored_strategy_downloads_with_business_name_title(pool: PgPool) {
    let user_id = create_user(&pool).await;
    let id = store_strategy(&pool, user_id).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/strategies/{id}/download?format=txt")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), "text/plain");
    assert_eq!(
        header(&response, "content-disposition"),
        "attachment; filename=\"acme-analytics.txt\""
    );
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.starts_with("Acme Analytics\n"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stored_strategy_download_rejects_bad_format(pool: PgPool) {
    let user_id = create_user(&pool).await;
    let id = store_strategy(&pool, user_id).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/strategies/{id}/download?format=xlsx")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_strategy_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/strategies/9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_user_id_is_reported_with_other_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/strategies", json!({ "strategy": strategy() })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Missing required fields: user_id, business_name");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mistyped_user_id_gets_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "user_id": "seven",
        "business_name": "Acme",
        "strategy": strategy(),
    });
    let response = post_json(app, "/api/strategies", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_id_in_path_gets_error_envelope(pool: PgPool) {
    for uri in ["/api/strategies/abc", "/api/strategies/abc/download?format=txt"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn nul_characters_are_rejected_before_any_write(pool: PgPool) {
    let user_id = create_user(&pool).await;

    let bodies = [
        json!({ "user_id": user_id, "business_name": "Ac\u{0000}me", "strategy": strategy() }),
        json!({
            "user_id": user_id,
            "business_name": "Acme",
            "strategy": { "personas": [{ "name": "Fi\u{0000}ona" }] },
        }),
        json!({
            "user_id": user_id,
            "business_name": "Acme",
            "form_input": { "notes": "\u{0000}" },
            "strategy": strategy(),
        }),
    ];

    for body in bodies {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/strategies", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/users/{user_id}/strategies")).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}
