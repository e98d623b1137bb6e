//! Shared types passed from scanning to generation.

use serde::{Deserialize, Serialize};

/// Metadata an article may declare in its `+++` front matter.
///
/// Every field is optional; missing values fall back to what can be derived
/// from the file itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArticleHeader {
    pub title: Option<String>,
    /// ISO date (`YYYY-MM-DD`), used for ordering.
    pub date: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    /// Drafts are generated but left off the index page.
    pub draft: bool,
}

/// An article discovered in the content directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Route id: file stem with any `NNN-` prefix removed.
    pub id: String,
    /// Front matter title, first `# heading`, or the id with dashes → spaces.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub draft: bool,
    /// Markdown body without the front matter.
    pub body: String,
    /// Path of the source file relative to the content root.
    pub source_path: String,
}

/// URL path of an article page.
pub fn link(id: &str) -> String {
    format!("/posts/{id}")
}
