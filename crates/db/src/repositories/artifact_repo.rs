//! Repository for the strategy artifact tables.

use sqlx::PgPool;
use strategist_core::strategy::ArtifactKind;
use strategist_core::types::DbId;

use crate::models::artifact::{table_for, ArtifactRow, Artifacts, CreateArtifact};

/// Column list shared by all four artifact tables.
const COLUMNS: &str = "id, user_id, form_output_id, title, content, created_at, updated_at";

/// Provides insert and lookup operations for persona, go-to-market plan,
/// shorts script and ideal-customer-profile rows.
pub struct ArtifactRepo;

impl ArtifactRepo {
    /// Insert one artifact inside an existing transaction.
    pub async fn create_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        form_output_id: DbId,
        input: &CreateArtifact,
    ) -> Result<ArtifactRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (user_id, form_output_id, title, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}",
            table_for(input.kind)
        );
        sqlx::query_as::<_, ArtifactRow>(&query)
            .bind(user_id)
            .bind(form_output_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(&mut **tx)
            .await
    }

    /// List artifacts of one kind for a form output, in insertion order.
    pub async fn list_by_form_output(
        pool: &PgPool,
        kind: ArtifactKind,
        form_output_id: DbId,
    ) -> Result<Vec<ArtifactRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE form_output_id = $1 ORDER BY created_at ASC, id ASC",
            table_for(kind)
        );
        sqlx::query_as::<_, ArtifactRow>(&query)
            .bind(form_output_id)
            .fetch_all(pool)
            .await
    }

    /// Load every artifact of a form output, grouped by kind.
    pub async fn load_all(pool: &PgPool, form_output_id: DbId) -> Result<Artifacts, sqlx::Error> {
        let mut artifacts = Artifacts::default();
        for kind in ArtifactKind::ALL {
            *artifacts.bucket_mut(kind) =
                Self::list_by_form_output(pool, kind, form_output_id).await?;
        }
        Ok(artifacts)
    }
}
