//! # Autotoc
//!
//! A small static site builder for long-form articles. Every article page
//! gets a table of contents derived from its own headings, and every heading
//! listed there gets a fragment id the contents can link to.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  Manifest   (markdown files + config → articles)
//! 2. Generate  Manifest  →  dist/      (element tree → outline → HTML)
//! ```
//!
//! The outline extractor at the centre of stage 2 works on any tree that
//! implements [`element::ElementNode`], not on HTML strings. Markdown is
//! parsed into an [`element::Element`] tree, [`autotoc`] finds sections and
//! writes missing ids, and the annotated tree is serialized into the page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`autotoc`] | Outline extraction: sections, fragment ids, id write-back |
//! | [`element`] | Element tree and the node traits the extractor reads through |
//! | [`markdown`] | Markdown → element tree via pulldown-cmark |
//! | [`scan`] | Stage 1: walks the content directory, parses front matter |
//! | [`generate`] | Stage 2: renders index and article pages with Maud |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`types`] | Article records shared between stages |
//! | [`naming`] | `NNN-name` file stem parser |
//! | [`output`] | CLI output formatting |
//! | [`puzzle`] | Elapsed-time formatting and shuffling for the puzzle page |
//!
//! # Extracting an Outline
//!
//! ```
//! use autotoc::autotoc::extract;
//! use autotoc::element::{Element, ElementNode};
//!
//! let mut doc = Element::new("ARTICLE")
//!     .with_child(Element::new("H2").with_text("Getting Started"))
//!     .with_child(Element::new("P").with_text("..."));
//!
//! let sections = extract(&mut doc);
//! assert_eq!(sections[0].id, "getting-started");
//! assert_eq!(doc.children().next().unwrap().id(), Some("getting-started"));
//! ```

pub mod autotoc;
pub mod config;
pub mod element;
pub mod generate;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod puzzle;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
