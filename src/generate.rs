//! HTML site generation.
//!
//! Stage 2 of the autotoc build. Takes the scan manifest and writes the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): article list with dates, summaries and tags
//! - **Article pages** (`/posts/{id}/index.html`): rendered markdown with a
//!   "Contents" navigation built from the article's own headings
//! - **Outlines** (`/posts/{id}/outline.json`): the extracted sections as JSON
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── dice.svg                      # Copied from content/assets/
//! └── posts/
//!     ├── bessel-correction/
//!     │   ├── index.html
//!     │   └── outline.json
//!     └── nontransitive-dice/
//!         └── ...
//! ```
//!
//! Every heading that appears in the contents navigation carries the `id` the
//! navigation links to: the article body is parsed into an element tree,
//! annotated by [`autotoc::extract_with`], and only then serialized.
//!
//! Pages are rendered in parallel with rayon; files are written afterwards on
//! the calling thread.

use crate::autotoc::{self, HeadingTags, Section};
use crate::config::SiteConfig;
use crate::element::{Element, ElementNode};
use crate::markdown;
use crate::scan::{ASSETS_DIR, Manifest};
use crate::types::{Article, link};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a build wrote, for CLI reporting.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<PageReport>,
    /// Number of files copied from the assets directory.
    pub assets: usize,
}

#[derive(Debug)]
pub struct PageReport {
    pub id: String,
    pub title: String,
    /// Output path relative to the output directory.
    pub path: String,
    pub sections: Vec<Section>,
    /// Whether the contents navigation was rendered.
    pub toc: bool,
    pub draft: bool,
}

/// An article rendered in memory, not yet written.
struct RenderedArticle {
    html: String,
    sections: Vec<Section>,
    toc: bool,
}

const CSS: &str = include_str!("../static/style.css");

pub fn generate(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let tags = config.toc.heading_tags();

    fs::create_dir_all(output_dir)?;
    let assets = copy_assets(&source_root.join(ASSETS_DIR), output_dir)?;

    let index_html = render_index(&manifest.articles, config);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;

    let rendered: Vec<RenderedArticle> = manifest
        .articles
        .par_iter()
        .map(|article| render_article(article, config, &tags))
        .collect();

    let mut pages = Vec::with_capacity(rendered.len());
    for (article, page) in manifest.articles.iter().zip(rendered) {
        let page_dir = output_dir.join("posts").join(&article.id);
        fs::create_dir_all(&page_dir)?;
        fs::write(page_dir.join("index.html"), &page.html)?;
        fs::write(
            page_dir.join("outline.json"),
            serde_json::to_string_pretty(&page.sections)?,
        )?;
        debug!(id = %article.id, sections = page.sections.len(), "wrote article");

        pages.push(PageReport {
            id: article.id.clone(),
            title: article.title.clone(),
            path: format!("posts/{}/index.html", article.id),
            sections: page.sections,
            toc: page.toc,
            draft: article.draft,
        });
    }

    Ok(GenerateReport { pages, assets })
}

/// Copy `src` into `dst`, keeping relative paths. A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn render_article(article: &Article, config: &SiteConfig, tags: &HeadingTags) -> RenderedArticle {
    let mut body = markdown::parse(&article.body);
    drop_title_heading(&mut body, &article.title);
    let sections = autotoc::extract_with(&mut body, tags);
    let toc = !sections.is_empty() && sections.len() >= config.toc.min_sections;

    let html = render_article_page(article, &body.inner_html(), &sections, toc, config);
    RenderedArticle {
        html: html.into_string(),
        sections,
        toc,
    }
}

/// The page header already shows the title; a leading `H1` repeating it goes.
fn drop_title_heading(body: &mut Element, title: &str) {
    let repeats_title = body.children().next().is_some_and(|first| {
        first.tag_name() == "H1"
            && first.text_content().is_some_and(|text| text.trim() == title)
    });
    if repeats_title {
        body.remove_child(0);
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, config: &SiteConfig, body_class: Option<&str>, content: Markup) -> Markup {
    let description = (!config.site.description.is_empty()).then_some(&config.site.description);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the site header with breadcrumb
fn site_header(breadcrumb: Markup) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                (breadcrumb)
            }
        }
    }
}

/// Renders the contents navigation for an article
pub fn render_toc(label: &str, sections: &[Section]) -> Markup {
    html! {
        nav.toc aria-label=(label) {
            h2.toc-label { (label) }
            ul {
                @for section in sections {
                    (render_toc_item(section))
                }
            }
        }
    }
}

/// Renders a single contents entry (may have children)
fn render_toc_item(section: &Section) -> Markup {
    html! {
        li {
            a href={ "#" (section.id) } { (section.title) }
            @if !section.children.is_empty() {
                ul {
                    @for child in &section.children {
                        (render_toc_item(child))
                    }
                }
            }
        }
    }
}

fn render_tags(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul.tags {
                @for tag in tags {
                    li.tag { (tag) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page listing every non-draft article
fn render_index(articles: &[Article], config: &SiteConfig) -> Markup {
    let breadcrumb = html! {
        a href="/" { (config.site.title) }
    };

    let content = html! {
        (site_header(breadcrumb))
        main.index-page {
            @if !config.site.description.is_empty() {
                p.site-description { (config.site.description) }
            }
            ul.article-list {
                @for article in articles.iter().filter(|a| !a.draft) {
                    li.article-card {
                        a.article-title href=(link(&article.id)) { (article.title) }
                        @if let Some(date) = &article.date {
                            " "
                            time datetime=(date) { (date) }
                        }
                        @if let Some(summary) = &article.summary {
                            p.article-summary { (summary) }
                        }
                        (render_tags(&article.tags))
                    }
                }
            }
        }
    };

    base_document(&config.site.title, config, None, content)
}

/// Renders an article page
fn render_article_page(
    article: &Article,
    body_html: &str,
    sections: &[Section],
    toc: bool,
    config: &SiteConfig,
) -> Markup {
    let breadcrumb = html! {
        a href="/" { (config.site.title) }
        " › "
        (article.title)
    };

    let page_title = format!("{} - {}", article.title, config.site.title);

    let content = html! {
        (site_header(breadcrumb))
        main.article-page {
            header.article-header {
                h1 { (article.title) }
                @if let Some(date) = &article.date {
                    time datetime=(date) { (date) }
                }
                (render_tags(&article.tags))
            }
            @if toc {
                (render_toc(&config.toc.label, sections))
            }
            article.article-body {
                (PreEscaped(body_html))
            }
        }
    };

    base_document(&page_title, config, toc.then_some("with-toc"), content)
}

// ============================================================================
// Tests
// ============================================================================
