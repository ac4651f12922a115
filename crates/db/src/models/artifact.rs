//! Strategy artifact rows (`personas`, `go_to_market_plans`,
//! `shorts_scripts`, `ifc_profiles`).
//!
//! The four tables share one shape, so one row type serves all of them and
//! the table is chosen from the [`ArtifactKind`].

use serde::Serialize;
use sqlx::FromRow;
use strategist_core::strategy::ArtifactKind;
use strategist_core::types::{DbId, Timestamp};

/// Table holding rows of the given kind.
pub fn table_for(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Persona => "personas",
        ArtifactKind::GoToMarketPlan => "go_to_market_plans",
        ArtifactKind::ShortsScript => "shorts_scripts",
        ArtifactKind::IfcProfile => "ifc_profiles",
    }
}

/// A child artifact row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtifactRow {
    pub id: DbId,
    pub user_id: DbId,
    pub form_output_id: DbId,
    pub title: String,
    pub content: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Persona row.
pub type Persona = ArtifactRow;
/// Go-to-market plan row.
pub type GoToMarketPlan = ArtifactRow;
/// Short-form video script row.
pub type ShortsScript = ArtifactRow;
/// Ideal customer profile row.
pub type IfcProfile = ArtifactRow;

/// DTO for inserting one artifact under a form output.
#[derive(Debug, Clone)]
pub struct CreateArtifact {
    pub kind: ArtifactKind,
    pub title: String,
    pub content: serde_json::Value,
}

/// All artifacts of one form output, grouped by kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Artifacts {
    pub personas: Vec<Persona>,
    pub go_to_market_plans: Vec<GoToMarketPlan>,
    pub shorts_scripts: Vec<ShortsScript>,
    pub ifc_profiles: Vec<IfcProfile>,
}

impl Artifacts {
    /// Mutable bucket for `kind`.
    pub fn bucket_mut(&mut self, kind: ArtifactKind) -> &mut Vec<ArtifactRow> {
        match kind {
            ArtifactKind::Persona => &mut self.personas,
            ArtifactKind::GoToMarketPlan => &mut self.go_to_market_plans,
            ArtifactKind::ShortsScript => &mut self.shorts_scripts,
            ArtifactKind::IfcProfile => &mut self.ifc_profiles,
        }
    }

    /// Total number of artifacts across all kinds.
    pub fn len(&self) -> usize {
        self.personas.len()
            + self.go_to_market_plans.len()
            + self.shorts_scripts.len()
            + self.ifc_profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
