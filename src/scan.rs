//! Content directory scanning.
//!
//! Stage 1 of the build. Walks the content root for markdown articles and
//! loads the site configuration, producing a [`Manifest`] the generate stage
//! consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                    # Site configuration (optional)
//! ├── assets/                        # Copied as-is, never scanned
//! ├── 010-bessel-correction.md       # Article "bessel-correction"
//! ├── nontransitive-dice.md          # Article "nontransitive-dice"
//! └── python/                        # Subdirectories only group files
//!     └── snakebytes-enum.md         # Article "snakebytes-enum"
//! ```
//!
//! ## Front Matter
//!
//! An article may start with a TOML block fenced by `+++` lines:
//!
//! ```text
//! +++
//! title = "Why divide by n-1 for sample variance?"
//! date = "2025-11-14"
//! summary = "About the Bessel correction."
//! tags = ["Mathematics", "Statistics"]
//! +++
//!
//! ## The estimator
//! ```
//!
//! ## Validation
//!
//! - Front matter must be valid TOML with known keys and must be closed.
//! - Two files may not resolve to the same article id.

use crate::config::{self, SiteConfig};
use crate::element::ElementNode;
use crate::markdown;
use crate::naming::parse_article_name;
use crate::types::{Article, ArticleHeader};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid front matter in {0}: {1}")]
    FrontMatter(PathBuf, toml::de::Error),
    #[error("Front matter is not closed with +++ in {0}")]
    UnterminatedFrontMatter(PathBuf),
    #[error("No article id can be derived from {0}")]
    EmptyId(PathBuf),
    #[error("Article id '{0}' used by both {1} and {2}")]
    DuplicateId(String, PathBuf, PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub articles: Vec<Article>,
    pub config: SiteConfig,
}

/// Directory under the content root that holds static files.
pub const ASSETS_DIR: &str = "assets";

const FRONT_MATTER_FENCE: &str = "+++";

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let articles = scan_articles(root)?;
    Ok(Manifest { articles, config })
}

/// Parse every markdown file under `root` into an article, newest first.
pub fn scan_articles(root: &Path) -> Result<Vec<Article>, ScanError> {
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut articles = Vec::new();

    for path in collect_markdown(root)? {
        let article = parse_article(root, &path)?;
        if let Some(previous) = seen.insert(article.id.clone(), path.clone()) {
            return Err(ScanError::DuplicateId(article.id, previous, path));
        }
        debug!(id = %article.id, source = %article.source_path, "scanned article");
        articles.push(article);
    }

    sort_articles(&mut articles);
    Ok(articles)
}

/// Newest first; undated articles last; ties broken by id.
fn sort_articles(articles: &mut [Article]) {
    articles.sort_by(|a, b| match (&a.date, &b.date) {
        (Some(da), Some(db)) => db.cmp(da).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

fn collect_markdown(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let assets = root.join(ASSETS_DIR);
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.path() != assets.as_path());

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("md"))
                .unwrap_or(false)
        {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn parse_article(root: &Path, path: &Path) -> Result<Article, ScanError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let parsed = parse_article_name(&stem);
    if parsed.id.is_empty() {
        return Err(ScanError::EmptyId(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let (front_matter, body) = split_front_matter(&content)
        .ok_or_else(|| ScanError::UnterminatedFrontMatter(path.to_path_buf()))?;

    let header: ArticleHeader = match front_matter {
        Some(raw) => {
            toml::from_str(raw).map_err(|e| ScanError::FrontMatter(path.to_path_buf(), e))?
        }
        None => ArticleHeader::default(),
    };

    let title = header
        .title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| first_heading(body))
        .unwrap_or(parsed.display_title);

    let source_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");

    Ok(Article {
        id: parsed.id,
        title,
        date: header.date,
        summary: header.summary,
        tags: header.tags,
        draft: header.draft,
        body: body.to_string(),
        source_path,
    })
}

/// Split `+++`-fenced front matter from the body.
///
/// Returns `None` when a front matter block is opened but never closed.
fn split_front_matter(content: &str) -> Option<(Option<&str>, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content.strip_prefix(FRONT_MATTER_FENCE).and_then(|r| {
        r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n'))
    }) else {
        return Some((None, content));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((Some(front), body));
        }
        offset += line.len();
    }
    None
}

/// Text of the first level-one heading of the rendered body.
fn first_heading(body: &str) -> Option<String> {
    let doc = markdown::parse(body);
    let title = doc.find("H1")?.text_content()?.trim().to_string();
    (!title.is_empty()).then_some(title)
}
