//! CLI output formatting for outlines and build stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (article, section) is its semantic identity: title and
//! positional index. Source files and anchors are secondary context, shown on
//! indented lines or after an arrow.
//!
//! # Output Format
//!
//! ## Outline
//!
//! ```text
//! 001 Intro → #intro
//! 002 Setup → #setup
//!     001 Install → #install
//! ```
//!
//! ## Scan
//!
//! ```text
//! Articles
//! 001 Why divide by n-1 for sample variance? (2025-11-14)
//!     Source: 010-bessel-correction.md
//!     Tags: Mathematics, Statistics
//! 002 Reading list (draft)
//!     Source: reading-list.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 Why divide by n-1 for sample variance? → posts/bessel-correction/index.html
//!     3 sections, contents shown
//!
//! Generated 4 articles, 9 sections, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure, except that scan output checks which optional files
//! exist in the content root.

use crate::autotoc::{Section, count_sections};
use crate::generate::GenerateReport;
use crate::scan::{ASSETS_DIR, Manifest};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional detail.
///
/// ```text
/// 001 Nontransitive dice (2023-09-19)
/// 002 Reading list
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

// ============================================================================
// Outline
// ============================================================================

/// Format an outline as an indented tree of sections with their anchors.
pub fn format_outline(sections: &[Section]) -> Vec<String> {
    let mut lines = Vec::new();
    format_outline_level(sections, 0, &mut lines);
    lines
}

fn format_outline_level(sections: &[Section], depth: usize, lines: &mut Vec<String>) {
    for (i, section) in sections.iter().enumerate() {
        lines.push(format!(
            "{}{} → #{}",
            indent(depth),
            entity_header(i + 1, &section.title, None),
            section.id
        ));
        format_outline_level(&section.children, depth + 1, lines);
    }
}

/// Print an outline to stdout.
pub fn print_outline(sections: &[Section]) {
    if sections.is_empty() {
        println!("No sections found");
        return;
    }
    for line in format_outline(sections) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered articles.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];

    for (i, article) in manifest.articles.iter().enumerate() {
        let detail = if article.draft {
            Some("draft")
        } else {
            article.date.as_deref()
        };
        lines.push(entity_header(i + 1, &article.title, detail));
        lines.push(format!("    Source: {}", article.source_path));

        if let Some(summary) = &article.summary {
            let truncated = truncate_desc(summary.trim(), 60);
            if !truncated.is_empty() {
                lines.push(format!("    {}", truncated));
            }
        }
        if !article.tags.is_empty() {
            lines.push(format!("    Tags: {}", article.tags.join(", ")));
        }
    }

    if manifest.articles.is_empty() {
        lines.push("    (none)".to_string());
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    if source_root.join(ASSETS_DIR).is_dir() {
        lines.push(format!("    {}/", ASSETS_DIR));
    }
    lines.push(format!(
        "    Headings: {}",
        manifest.config.toc.heading_tags.join(", ")
    ));

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output mapping each article to its page.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec!["Home → index.html".to_string()];
    let mut total_sections = 0;

    for (i, page) in report.pages.iter().enumerate() {
        let detail = page.draft.then_some("draft");
        lines.push(format!(
            "{} → {}",
            entity_header(i + 1, &page.title, detail),
            page.path
        ));

        let count = count_sections(&page.sections);
        total_sections += count;
        let toc = if page.toc { "contents shown" } else { "no contents" };
        lines.push(format!("    {}, {}", plural(count, "section", "sections"), toc));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(report.pages.len(), "article", "articles"),
        plural(total_sections, "section", "sections"),
        plural(report.assets, "asset", "assets"),
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::PageReport;
    use crate::scan;
    use crate::test_helpers::*;

    fn section(title: &str, id: &str, children: Vec<Section>) -> Section {
        Section {
            title: title.to_string(),
            id: id.to_string(),
            children,
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(999), "999");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_with_detail() {
        assert_eq!(
            entity_header(2, "Nontransitive dice", Some("2023-09-19")),
            "002 Nontransitive dice (2023-09-19)"
        );
        assert_eq!(entity_header(1, "Notes", None), "001 Notes");
    }

    #[test]
    fn truncate_desc_counts_characters() {
        assert_eq!(truncate_desc("short", 10), "short");
        assert_eq!(truncate_desc("abcdef", 3), "abc...");
        assert_eq!(truncate_desc("ééééé", 2), "éé...");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "asset", "assets"), "1 asset");
        assert_eq!(plural(0, "asset", "assets"), "0 assets");
    }

    // =========================================================================
    // Outline tests
    // =========================================================================

    #[test]
    fn outline_empty() {
        assert!(format_outline(&[]).is_empty());
    }

    #[test]
    fn outline_nested() {
        let sections = vec![
            section("Intro", "intro", vec![]),
            section(
                "Setup",
                "setup",
                vec![section("Install", "install", vec![])],
            ),
        ];
        assert_eq!(
            format_outline(&sections),
            vec![
                "001 Intro → #intro",
                "002 Setup → #setup",
                "    001 Install → #install",
            ]
        );
    }

    // =========================================================================
    // Scan output tests
    // =========================================================================

    #[test]
    fn scan_output_lists_fixture_articles() {
        let tmp = setup_fixtures();
        let manifest = scan::scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Articles");
        assert!(lines.contains(&"001 Why divide by n-1 for sample variance? (2025-11-14)".to_string()));
        assert!(lines.contains(&"    Source: 010-bessel-correction.md".to_string()));
        assert!(lines.contains(&"    Tags: Mathematics, Statistics".to_string()));
        assert!(lines.iter().any(|l| l.ends_with("(draft)")));
    }

    #[test]
    fn scan_output_config_section() {
        let tmp = setup_fixtures();
        let manifest = scan::scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        let config_pos = lines.iter().position(|l| l == "Config").unwrap();
        assert_eq!(lines[config_pos + 1], "    config.toml");
        assert_eq!(lines[config_pos + 2], "    assets/");
        assert_eq!(lines[config_pos + 3], "    Headings: H2, H3");
    }

    // =========================================================================
    // Generate output tests
    // =========================================================================

    #[test]
    fn generate_output_summary() {
        let report = GenerateReport {
            pages: vec![
                PageReport {
                    id: "dice".to_string(),
                    title: "Dice".to_string(),
                    path: "posts/dice/index.html".to_string(),
                    sections: vec![section("A", "a", vec![section("B", "b", vec![])])],
                    toc: true,
                    draft: false,
                },
                PageReport {
                    id: "wip".to_string(),
                    title: "WIP".to_string(),
                    path: "posts/wip/index.html".to_string(),
                    sections: vec![],
                    toc: false,
                    draft: true,
                },
            ],
            assets: 1,
        };
        assert_eq!(
            format_generate_output(&report),
            vec![
                "Home → index.html",
                "001 Dice → posts/dice/index.html",
                "    2 sections, contents shown",
                "002 WIP (draft) → posts/wip/index.html",
                "    0 sections, no contents",
                "",
                "Generated 2 articles, 2 sections, 1 asset",
            ]
        );
    }
}
