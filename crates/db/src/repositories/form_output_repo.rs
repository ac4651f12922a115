//! Repository for the `form_outputs` table.

use sqlx::PgPool;
use strategist_core::types::DbId;

use crate::models::artifact::{Artifacts, CreateArtifact};
use crate::models::form_output::{
    CreateFormOutput, FormOutput, FormOutputSummary, FormOutputWithArtifacts,
};
use crate::repositories::ArtifactRepo;

/// Column list for the `form_outputs` table.
const COLUMNS: &str = "id, user_id, business_name, form_input, strategy, created_at, updated_at";

/// Column list for listing rows without JSON payloads.
const SUMMARY_COLUMNS: &str = "id, user_id, business_name, created_at";

/// Provides CRUD operations for stored strategies.
pub struct FormOutputRepo;

impl FormOutputRepo {
    /// Insert a form output and all of its artifacts in one transaction.
    pub async fn create_with_artifacts(
        pool: &PgPool,
        input: &CreateFormOutput,
        artifacts: &[CreateArtifact],
    ) -> Result<FormOutputWithArtifacts, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO form_outputs (user_id, business_name, form_input, strategy)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let form_output = sqlx::query_as::<_, FormOutput>(&insert_query)
            .bind(input.user_id)
            .bind(&input.business_name)
            .bind(&input.form_input)
            .bind(&input.strategy)
            .fetch_one(&mut *tx)
            .await?;

        let mut rows = Artifacts::default();
        for artifact in artifacts {
            let row =
                ArtifactRepo::create_in_tx(&mut tx, input.user_id, form_output.id, artifact)
                    .await?;
            rows.bucket_mut(artifact.kind).push(row);
        }

        tx.commit().await?;

        tracing::debug!(
            form_output_id = form_output.id,
            artifact_count = rows.len(),
            "Stored form output"
        );

        Ok(FormOutputWithArtifacts {
            form_output,
            artifacts: rows,
        })
    }

    /// Find a form output by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FormOutput>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form_outputs WHERE id = $1");
        sqlx::query_as::<_, FormOutput>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a form output by ID, enriched with its artifacts.
    pub async fn find_with_artifacts(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FormOutputWithArtifacts>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(form_output) => {
                let artifacts = ArtifactRepo::load_all(pool, form_output.id).await?;
                Ok(Some(FormOutputWithArtifacts {
                    form_output,
                    artifacts,
                }))
            }
            None => Ok(None),
        }
    }

    /// List a user's form outputs, most recent first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FormOutputSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM form_outputs
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, FormOutputSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
