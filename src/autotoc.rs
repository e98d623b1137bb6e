//! Automatic table of contents.
//!
//! Walks an element tree, finds section headings (by default every `H2`),
//! gives each a stable slug id and returns a nested outline that mirrors the
//! document structure.
//!
//! ## Extraction Rules
//!
//! For every child of a node, in document order:
//!
//! - The child's own subtree is outlined first, using the same heading tags,
//!   so headings are found at any depth.
//! - A heading with a non-blank title becomes a [`Section`] whose children are
//!   the sections found in its subtree. The title is the heading's trimmed
//!   text, leaving out the text of headings nested inside it.
//! - A heading with a blank title, and any non-heading node, contributes its
//!   subtree's sections in place. Nothing is lost and no placeholder entry is
//!   created.
//!
//! ```text
//! H2 "Intro"                    Intro   #intro
//! P  "text"                →    Setup   #setup
//! H2 "Setup"                      Nested  #nested
//! └── H2 "Nested"
//! ```
//!
//! ## Ids
//!
//! An existing `id` attribute is always reused. Otherwise the id is the title
//! lower-cased with whitespace runs turned into single dashes
//! (`"Multi  Word Title"` → `multi-word-title`). Ids are not deduplicated:
//! two headings with the same title get the same id.
//!
//! ## Two-Phase Operation
//!
//! [`find_sections`] only reads the tree and reports the ids it would assign
//! as [`IdAssignment`]s. [`apply`] writes those ids back. [`extract`] does
//! both, which leaves every titled heading with an `id` and makes a second
//! run a no-op.

use crate::element::{ElementNode, ElementNodeMut};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// One entry of the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Trimmed heading text, never empty.
    pub title: String,
    /// Fragment id of the heading element.
    pub id: String,
    /// Sections nested inside this heading.
    #[serde(default)]
    pub children: Vec<Section>,
}

/// An id the extractor wants written onto a heading that had none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAssignment {
    /// Child-element indices from the root down to the heading.
    pub path: Vec<usize>,
    pub id: String,
}

/// Result of a read-only extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub sections: Vec<Section>,
    pub assignments: Vec<IdAssignment>,
}

/// Set of tag names treated as section headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingTags(BTreeSet<String>);

impl HeadingTags {
    /// Build from tag names; names are upper-cased.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tags.into_iter()
                .map(|t| t.as_ref().trim().to_ascii_uppercase())
                .collect(),
        )
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for HeadingTags {
    fn default() -> Self {
        Self::new(["H2"])
    }
}

/// A heading's title as read from its text content.
///
/// `Absent` and `Blank` are kept apart for diagnostics but both mean the
/// heading has no title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    Absent,
    Blank,
    Present(String),
}

/// Whitespace as browsers' `trim()` and `\s` see it: Unicode `White_Space`
/// plus the byte order mark, minus NEL (U+0085).
pub fn is_title_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

impl Title {
    pub fn from_text(text: Option<&str>) -> Self {
        match text.map(|t| t.trim_matches(is_title_whitespace)) {
            None => Title::Absent,
            Some("") => Title::Blank,
            Some(trimmed) => Title::Present(trimmed.to_string()),
        }
    }

    /// Title of a heading node. Text inside nested headings belongs to
    /// those headings and is not part of this one.
    pub fn of<N: ElementNode>(node: &N, headings: &HeadingTags) -> Self {
        let text = node.text_without(&|child: &N| headings.contains(child.tag_name()));
        Self::from_text(text.as_deref())
    }
}

/// Derive a fragment id from a title: lower-case, trim, whitespace runs → `-`.
pub fn title_to_id(title: &str) -> String {
    title
        .to_lowercase()
        .split(is_title_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// The node's `id`, treating an empty attribute as missing.
fn existing_id<N: ElementNode>(node: &N) -> Option<&str> {
    node.id().filter(|id| !id.is_empty())
}

/// Outline `root` without modifying it.
pub fn find_sections<N: ElementNode>(root: &N, headings: &HeadingTags) -> Outline {
    let mut assignments = Vec::new();
    let mut path = Vec::new();
    let sections = walk(root, headings, &mut path, &mut assignments);
    Outline {
        sections,
        assignments,
    }
}

fn walk<N: ElementNode>(
    node: &N,
    headings: &HeadingTags,
    path: &mut Vec<usize>,
    assignments: &mut Vec<IdAssignment>,
) -> Vec<Section> {
    let mut matches = Vec::new();

    for (index, current) in node.children().enumerate() {
        path.push(index);
        let children = walk(current, headings, path, assignments);

        let title = if headings.contains(current.tag_name()) {
            Title::of(current, headings)
        } else {
            Title::Absent
        };

        match title {
            Title::Present(title) => {
                let id = match existing_id(current) {
                    Some(id) => id.to_string(),
                    None => {
                        let id = title_to_id(&title);
                        assignments.push(IdAssignment {
                            path: path.clone(),
                            id: id.clone(),
                        });
                        id
                    }
                };
                matches.push(Section {
                    title,
                    id,
                    children,
                });
            }
            Title::Absent | Title::Blank => matches.extend(children),
        }

        path.pop();
    }

    matches
}

/// Write assignments onto the tree. Returns how many ids were set.
///
/// Paths that no longer resolve, and nodes that gained an id since the
/// assignment was computed, are skipped.
pub fn apply<N: ElementNodeMut>(root: &mut N, assignments: &[IdAssignment]) -> usize {
    let mut applied = 0;
    for assignment in assignments {
        let Some(node) = resolve_mut(root, &assignment.path) else {
            debug!(path = ?assignment.path, "assignment path does not resolve");
            continue;
        };
        if existing_id(&*node).is_some() {
            continue;
        }
        node.set_id(&assignment.id);
        applied += 1;
    }
    applied
}

fn resolve_mut<'a, N: ElementNodeMut>(root: &'a mut N, path: &[usize]) -> Option<&'a mut N> {
    let mut node = root;
    for &index in path {
        node = node.child_mut(index)?;
    }
    Some(node)
}

/// Outline `root` with the default heading tags, writing missing ids.
pub fn extract<N: ElementNodeMut>(root: &mut N) -> Vec<Section> {
    extract_with(root, &HeadingTags::default())
}

/// Outline `root`, writing ids onto titled headings that lack one.
pub fn extract_with<N: ElementNodeMut>(root: &mut N, headings: &HeadingTags) -> Vec<Section> {
    let outline = find_sections(&*root, headings);
    let applied = apply(root, &outline.assignments);
    debug!(
        sections = outline.sections.len(),
        assigned = applied,
        "extracted outline"
    );
    outline.sections
}

/// Total number of sections at every depth.
pub fn count_sections(sections: &[Section]) -> usize {
    sections
        .iter()
        .map(|s| 1 + count_sections(&s.children))
        .sum()
}
