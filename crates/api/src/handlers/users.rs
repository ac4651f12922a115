//! Handlers for the `/users` resource (create, login verification, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use strategist_core::error::CoreError;
use strategist_core::types::DbId;
use strategist_core::user::{self, INITIAL_LOGIN_COUNT, MAX_NAME_LENGTH};
use strategist_core::validation::{self, present};
use strategist_db::models::user::{CreateUser, UpdateUser, User};
use strategist_db::repositories::{FormOutputRepo, UserRepo};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/create`.
///
/// Every field is optional at the wire level so that missing required
/// fields are reported together instead of as a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    #[serde(alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(alias = "companyName")]
    pub company_name: Option<String>,
    #[serde(alias = "jobTitle")]
    pub job_title: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    #[serde(alias = "ageRange")]
    pub age_range: Option<String>,
}

/// Request body for `POST /users/get-info`.
#[derive(Debug, Deserialize)]
pub struct VerifyLoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(alias = "companyName")]
    pub company_name: Option<String>,
    #[serde(alias = "jobTitle")]
    pub job_title: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    #[serde(alias = "ageRange")]
    pub age_range: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users/create
///
/// Create an account. Fails before touching the database when a required
/// field is missing; fails with 409 when the email is already registered.
/// The new account starts with `login_count = 1`.
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    validation::require_fields(&[
        ("email", present(input.email.as_deref())),
        ("username", present(input.username.as_deref())),
        ("first_name", present(input.first_name.as_deref())),
        ("last_name", present(input.last_name.as_deref())),
    ])?;
    validation::ensure_no_nul(&[
        ("email", input.email.as_deref()),
        ("username", input.username.as_deref()),
        ("first_name", input.first_name.as_deref()),
        ("last_name", input.last_name.as_deref()),
        ("company_name", input.company_name.as_deref()),
        ("job_title", input.job_title.as_deref()),
        ("industry", input.industry.as_deref()),
        ("country", input.country.as_deref()),
        ("age_range", input.age_range.as_deref()),
    ])?;

    let email = user::normalize_email(&input.email.unwrap_or_default());
    let username = trimmed(input.username);
    let first_name = trimmed(input.first_name);
    let last_name = trimmed(input.last_name);
    user::validate_identity(&email, &username, &first_name, &last_name)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::Conflict("A user with this email already exists".into()).into());
    }

    let create = CreateUser {
        email,
        username,
        first_name,
        last_name,
        company_name: optional(input.company_name),
        job_title: optional(input.job_title),
        industry: optional(input.industry),
        country: optional(input.country),
        age_range: optional(input.age_range),
        login_count: INITIAL_LOGIN_COUNT,
    };
    let created = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = created.id, username = %created.username, "User created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

/// POST /api/users/get-info
///
/// Verify that `username` and `email` belong to the same account and, if so,
/// record one login. A mismatch leaves every counter untouched.
pub async fn verify_login(
    State(state): State<AppState>,
    AppJson(input): AppJson<VerifyLoginRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    validation::require_fields(&[
        ("username", present(input.username.as_deref())),
        ("email", present(input.email.as_deref())),
    ])?;
    validation::ensure_no_nul(&[
        ("username", input.username.as_deref()),
        ("email", input.email.as_deref()),
    ])?;

    let username = trimmed(input.username);
    let email = user::normalize_email(&input.email.unwrap_or_default());

    let by_username = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| CoreError::NotFoundBy {
            entity: "User",
            field: "username",
            value: username.clone(),
        })?;

    let by_email = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| CoreError::NotFoundBy {
            entity: "User",
            field: "email",
            value: email.clone(),
        })?;

    if let Err(err) = user::ensure_same_account(by_username.id, by_email.id) {
        tracing::warn!(
            username_user_id = by_username.id,
            email_user_id = by_email.id,
            "Login identity mismatch"
        );
        return Err(err.into());
    }

    let updated = UserRepo::increment_login_count(&state.pool, by_username.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: by_username.id,
        })?;

    tracing::info!(
        user_id = updated.id,
        login_count = updated.login_count,
        "Login recorded"
    );

    Ok(Json(DataResponse::new(updated)))
}

/// GET /api/users
///
/// List all users, most recently created first.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(users)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = find_user(&state, id).await?;
    Ok(Json(DataResponse::new(user)))
}

/// PUT /api/users/{id}
///
/// Patch profile fields. Names may be changed but not blanked.
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    validation::ensure_no_nul(&[
        ("first_name", input.first_name.as_deref()),
        ("last_name", input.last_name.as_deref()),
        ("company_name", input.company_name.as_deref()),
        ("job_title", input.job_title.as_deref()),
        ("industry", input.industry.as_deref()),
        ("country", input.country.as_deref()),
        ("age_range", input.age_range.as_deref()),
    ])?;

    for (label, value) in [
        ("first_name", &input.first_name),
        ("last_name", &input.last_name),
    ] {
        if let Some(value) = value {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!("{label} must not be blank")).into());
            }
            if value.trim().chars().count() > MAX_NAME_LENGTH {
                return Err(CoreError::Validation(format!(
                    "{label} exceeds maximum length of {MAX_NAME_LENGTH} characters"
                ))
                .into());
            }
        }
    }

    let patch = UpdateUser {
        first_name: input.first_name.map(|s| s.trim().to_string()),
        last_name: input.last_name.map(|s| s.trim().to_string()),
        company_name: optional(input.company_name),
        job_title: optional(input.job_title),
        industry: optional(input.industry),
        country: optional(input.country),
        age_range: optional(input.age_range),
    };

    let updated = UserRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    tracing::info!(user_id = id, "User profile updated");

    Ok(Json(DataResponse::new(updated)))
}

/// GET /api/users/{id}/strategies
///
/// List the user's stored strategies, newest first.
pub async fn list_user_strategies(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    find_user(&state, id).await?;
    let strategies = FormOutputRepo::list_by_user(&state.pool, id).await?;
    Ok(Json(DataResponse::new(strategies)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a user or fail with 404.
pub(crate) async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(user)
}

/// Trim a field already checked for presence.
fn trimmed(value: Option<String>) -> String {
    value.unwrap_or_default().trim().to_string()
}

/// Trim an optional field, treating blank as absent.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
