//! Shared test utilities for the autotoc test suite.
//!
//! Provides element-tree builders for hand-written documents, fixture setup,
//! lookups into scanned articles and outline shape assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut doc = article([h2("Intro"), div([h2("Setup").with_child(h2("Nested"))])]);
//! let sections = autotoc::extract(&mut doc);
//!
//! assert_outline_shape(&sections, &[
//!     ("Intro", &[]),
//!     ("Setup", &["Nested"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::autotoc::Section;
use crate::element::Element;
use crate::types::Article;

// =========================================================================
// Element builders
// =========================================================================

/// Document root holding the given children.
pub fn article(children: impl IntoIterator<Item = Element>) -> Element {
    Element::new("ARTICLE").with_children(children)
}

/// Element with a tag and text content.
pub fn h(tag: &str, text: &str) -> Element {
    Element::new(tag).with_text(text)
}

pub fn h2(text: &str) -> Element {
    h("H2", text)
}

pub fn p(text: &str) -> Element {
    h("P", text)
}

pub fn div(children: impl IntoIterator<Item = Element>) -> Element {
    Element::new("DIV").with_children(children)
}

pub fn section(children: impl IntoIterator<Item = Element>) -> Element {
    Element::new("SECTION").with_children(children)
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Article lookups: panic with a clear message on miss
// =========================================================================

/// Find an article by id. Panics if not found.
pub fn find_article<'a>(articles: &'a [Article], id: &str) -> &'a Article {
    articles.iter().find(|a| a.id == id).unwrap_or_else(|| {
        let ids = article_ids(articles);
        panic!("article '{id}' not found. Available: {ids:?}")
    })
}

/// All article ids in order.
pub fn article_ids(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.id.as_str()).collect()
}

// =========================================================================
// Outline helpers
// =========================================================================

/// Top-level section titles in order.
pub fn section_titles(sections: &[Section]) -> Vec<&str> {
    sections.iter().map(|s| s.title.as_str()).collect()
}

/// Assert that an outline matches an expected two-level shape.
///
/// Each entry is `(title, child titles)`. Use `&[]` for leaf sections.
pub fn assert_outline_shape(sections: &[Section], expected: &[(&str, &[&str])]) {
    let expected_titles: Vec<&str> = expected.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        section_titles(sections),
        expected_titles,
        "outline top-level titles mismatch"
    );

    for (section, (title, children)) in sections.iter().zip(expected) {
        assert_eq!(
            section_titles(&section.children),
            children.to_vec(),
            "children of '{title}' mismatch"
        );
    }
}
