//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strategist_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub age_range: Option<String>,
    pub login_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. Required fields are already validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub age_range: Option<String>,
    pub login_count: i32,
}

/// DTO for updating a user's profile. All fields are optional.
///
/// Email and username are identity keys and are not patchable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub age_range: Option<String>,
}
