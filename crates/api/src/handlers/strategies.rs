//! Handlers for the `/strategies` resource: storing generated strategy
//! documents and reading or exporting them back.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use strategist_core::error::CoreError;
use strategist_core::export;
use strategist_core::strategy::split_strategy;
use strategist_core::types::DbId;
use strategist_core::validation;
use strategist_db::models::artifact::CreateArtifact;
use strategist_db::models::form_output::{CreateFormOutput, FormOutputWithArtifacts};
use strategist_db::repositories::FormOutputRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::download::attachment;
use crate::handlers::users::find_user;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /strategies`.
#[derive(Debug, Deserialize)]
pub struct CreateStrategyRequest {
    #[serde(alias = "userId")]
    pub user_id: Option<DbId>,
    #[serde(alias = "businessName")]
    pub business_name: Option<String>,
    /// The submitted form, stored verbatim.
    #[serde(default, alias = "formInput")]
    pub form_input: Option<Value>,
    /// The generated strategy document. Must be a JSON object.
    #[serde(default)]
    pub strategy: Value,
}

/// Query string for `GET /strategies/{id}/download`.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub format: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/strategies
///
/// Store a strategy and split it into persona / go-to-market / shorts-script /
/// ideal-customer rows, all in one transaction.
pub async fn create_strategy(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateStrategyRequest>,
) -> AppResult<impl IntoResponse> {
    validation::require_fields(&[
        ("user_id", input.user_id.is_some()),
        ("business_name", validation::present(input.business_name.as_deref())),
    ])?;
    validation::ensure_no_nul(&[("business_name", input.business_name.as_deref())])?;
    if let Some(form_input) = &input.form_input {
        validation::ensure_json_no_nul("form_input", form_input)?;
    }
    validation::ensure_json_no_nul("strategy", &input.strategy)?;

    let artifacts: Vec<CreateArtifact> = split_strategy(&input.strategy)?
        .into_iter()
        .map(|a| CreateArtifact {
            kind: a.kind,
            title: a.title,
            content: a.content,
        })
        .collect();

    let user_id = input.user_id.unwrap_or_default();
    find_user(&state, user_id).await?;

    let create = CreateFormOutput {
        user_id,
        business_name: input.business_name.unwrap_or_default().trim().to_string(),
        form_input: input
            .form_input
            .unwrap_or_else(|| Value::Object(Default::default())),
        strategy: input.strategy,
    };
    let stored = FormOutputRepo::create_with_artifacts(&state.pool, &create, &artifacts).await?;

    tracing::info!(
        form_output_id = stored.form_output.id,
        user_id = stored.form_output.user_id,
        artifact_count = stored.artifacts.len(),
        "Strategy stored"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(stored))))
}

/// GET /api/strategies/{id}
pub async fn get_strategy(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<FormOutputWithArtifacts>>> {
    let stored = find_strategy(&state, id).await?;
    Ok(Json(DataResponse::new(stored)))
}

/// GET /api/strategies/{id}/download?format=pdf|csv|txt
///
/// Export a stored strategy. The business name is used as the document
/// title unless the strategy carries its own.
pub async fn download_strategy(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(query): AppQuery<DownloadQuery>,
) -> AppResult<Response> {
    let format = query.format.unwrap_or_default();
    let format: export::ExportFormat = format.parse()?;

    let stored = find_strategy(&state, id).await?;
    let payload = titled_payload(stored.form_output.strategy, &stored.form_output.business_name);

    let doc = export::ExportDocument::from_json(&payload)?;
    let file = export::render(&doc, format)?;

    tracing::info!(form_output_id = id, %format, bytes = file.bytes.len(), "Strategy exported");

    Ok(attachment(file))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_strategy(state: &AppState, id: DbId) -> AppResult<FormOutputWithArtifacts> {
    let stored = FormOutputRepo::find_with_artifacts(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Strategy",
            id,
        })?;
    Ok(stored)
}

/// Put `business_name` in the payload's title slot when it has no string title.
fn titled_payload(strategy: Value, business_name: &str) -> Value {
    match strategy {
        Value::Object(map) if !map.get(export::TITLE_KEY).is_some_and(Value::is_string) => {
            let mut titled = serde_json::Map::with_capacity(map.len() + 1);
            titled.insert(
                export::TITLE_KEY.to_string(),
                Value::String(business_name.to_string()),
            );
            titled.extend(map.into_iter().filter(|(k, _)| k != export::TITLE_KEY));
            Value::Object(titled)
        }
        other => other,
    }
}
