//! Field paths, updates and wire DTOs shared by the HTTP gateway and the docstore server.

use serde::{Deserialize, Serialize};

use super::Document;

/// Path into a document, one entry per nested map key.
///
/// Segments are kept separate so keys containing `.` stay addressable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldUpdate {
    Set(serde_json::Value),
    Delete,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub key: String,
    pub fields: Document,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatchRequest {
    pub path: FieldPath,
    pub op: FieldUpdate,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SetQuery {
    #[serde(default)]
    pub merge: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
