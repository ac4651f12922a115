//! Strategy artifacts: splitting a generated strategy document into the
//! persona / go-to-market / shorts-script / ideal-customer rows it is stored as.
//!
//! Artifact payloads are opaque; only their position in the document and a
//! display title are interpreted here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Artifact kinds
// ---------------------------------------------------------------------------

/// The kinds of child artifact a strategy document contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Persona,
    GoToMarketPlan,
    ShortsScript,
    IfcProfile,
}

impl ArtifactKind {
    /// All kinds, in document order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Persona,
        ArtifactKind::GoToMarketPlan,
        ArtifactKind::ShortsScript,
        ArtifactKind::IfcProfile,
    ];

    /// Human-readable label used for fallback titles.
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Persona => "Persona",
            ArtifactKind::GoToMarketPlan => "Go-to-market plan",
            ArtifactKind::ShortsScript => "Shorts script",
            ArtifactKind::IfcProfile => "Ideal customer profile",
        }
    }

    /// Document keys this kind may appear under (snake_case first).
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            ArtifactKind::Persona => &["personas"],
            ArtifactKind::GoToMarketPlan => &["go_to_market_plan", "goToMarketPlan"],
            ArtifactKind::ShortsScript => &["shorts_scripts", "shortsScripts"],
            ArtifactKind::IfcProfile => &["ifc_profile", "ifcProfile"],
        }
    }

    /// Whether the document holds a list of this kind or a single object.
    pub fn is_list(self) -> bool {
        matches!(self, ArtifactKind::Persona | ArtifactKind::ShortsScript)
    }
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// One child artifact extracted from a strategy document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub title: String,
    pub content: Value,
}

/// Split a strategy document into its child artifacts.
///
/// Artifacts come out grouped by kind in [`ArtifactKind::ALL`] order and,
/// within a list, in the order the document gives them. Absent keys yield
/// nothing; a key holding the wrong JSON type is a validation error.
pub fn split_strategy(strategy: &Value) -> Result<Vec<Artifact>, CoreError> {
    let map = strategy
        .as_object()
        .ok_or_else(|| CoreError::Validation("Strategy must be a JSON object".into()))?;

    let mut artifacts = Vec::new();
    for kind in ArtifactKind::ALL {
        let Some((key, value)) = kind
            .keys()
            .iter()
            .find_map(|k| map.get(*k).map(|v| (*k, v)))
        else {
            continue;
        };

        if value.is_null() {
            continue;
        }

        if kind.is_list() {
            let items = value.as_array().ok_or_else(|| {
                CoreError::Validation(format!("Strategy field '{key}' must be an array"))
            })?;
            for (index, item) in items.iter().enumerate() {
                artifacts.push(Artifact {
                    kind,
                    title: artifact_title(kind, item, index + 1),
                    content: item.clone(),
                });
            }
        } else {
            if !value.is_object() {
                return Err(CoreError::Validation(format!(
                    "Strategy field '{key}' must be an object"
                )));
            }
            artifacts.push(Artifact {
                kind,
                title: artifact_title(kind, value, 1),
                content: value.clone(),
            });
        }
    }

    Ok(artifacts)
}

/// Pick a display title: the payload's `name` or `title`, else `"<Label> <n>"`.
pub fn artifact_title(kind: ArtifactKind, content: &Value, position: usize) -> String {
    ["name", "title"]
        .iter()
        .filter_map(|k| content.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| format!("{} {position}", kind.label()))
}
