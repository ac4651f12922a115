//! Stored strategy (form output) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strategist_core::types::{DbId, Timestamp};

use crate::models::artifact::Artifacts;

/// A row from the `form_outputs` table: one submitted form and the strategy
/// generated for it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormOutput {
    pub id: DbId,
    pub user_id: DbId,
    pub business_name: String,
    pub form_input: serde_json::Value,
    pub strategy: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight listing row (no JSON payloads).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormOutputSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub business_name: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a form output.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFormOutput {
    pub user_id: DbId,
    pub business_name: String,
    pub form_input: serde_json::Value,
    pub strategy: serde_json::Value,
}

/// A form output together with its child artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct FormOutputWithArtifacts {
    #[serde(flatten)]
    pub form_output: FormOutput,
    #[serde(flatten)]
    pub artifacts: Artifacts,
}
