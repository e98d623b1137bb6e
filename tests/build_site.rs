//! End-to-end build of the fixture content through the public API.
//!
//! Run with: cargo test --test build_site

use autotoc::autotoc::Section;
use autotoc::{generate, output, scan};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn fixture_copy() -> TempDir {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    let tmp = TempDir::new().unwrap();
    for entry in WalkDir::new(&src) {
        let entry = entry.unwrap();
        let target = tmp.path().join(entry.path().strip_prefix(&src).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    tmp
}

fn build() -> (TempDir, TempDir, generate::GenerateReport) {
    let content = fixture_copy();
    let out = TempDir::new().unwrap();
    let manifest = scan::scan(content.path()).unwrap();
    let report = generate::generate(&manifest, content.path(), out.path()).unwrap();
    (content, out, report)
}

fn read(dir: &TempDir, path: &str) -> String {
    fs::read_to_string(dir.path().join(path)).unwrap()
}

#[test]
fn every_contents_link_has_a_target() {
    let (_content, out, report) = build();

    for page in &report.pages {
        let html = read(&out, &page.path);
        let mut pending: Vec<&Section> = page.sections.iter().collect();
        while let Some(section) = pending.pop() {
            assert!(
                html.contains(&format!(r#"id="{}""#, section.id)),
                "{}: no element with id '{}'",
                page.id,
                section.id
            );
            pending.extend(&section.children);
        }
    }
}

#[test]
fn author_anchor_is_kept() {
    let (_content, out, _report) = build();
    let html = read(&out, "posts/bessel-correction/index.html");

    assert!(html.contains(r#"<h2 id="bessel">Bessel's correction"#));
    assert!(html.contains(r##"<a href="#bessel">Bessel's correction</a>"##));
    assert!(html.contains(r#"<h2 id="the-naive-estimator">"#));
    assert!(html.contains(r#"<h3 id="a-short-proof">"#));
}

#[test]
fn title_heading_appears_once() {
    let (_content, out, _report) = build();
    for path in ["posts/nontransitive-dice/index.html", "posts/reading-list/index.html"] {
        let html = read(&out, path);
        assert_eq!(html.matches("<h1").count(), 1, "{path}");
    }
}

#[test]
fn index_links_published_articles_newest_first() {
    let (_content, out, _report) = build();
    let html = read(&out, "index.html");

    let bessel = html.find("/posts/bessel-correction").unwrap();
    let dice = html.find("/posts/nontransitive-dice").unwrap();
    let snake = html.find("/posts/snakebytes-enum").unwrap();
    assert!(bessel < dice && dice < snake);
    assert!(!html.contains("/posts/reading-list"));
    assert!(html.contains("<title>Notebook</title>"));
}

#[test]
fn drafts_are_still_generated() {
    let (_content, out, report) = build();
    let draft = report.pages.iter().find(|p| p.id == "reading-list").unwrap();
    assert!(draft.draft);
    assert!(out.path().join("posts/reading-list/index.html").exists());
}

#[test]
fn generate_output_ends_with_totals() {
    let (_content, _out, report) = build();
    let lines = output::format_generate_output(&report);
    assert_eq!(lines.first().map(String::as_str), Some("Home → index.html"));
    assert!(lines.last().unwrap().starts_with("Generated 4 articles"));
    assert!(lines.last().unwrap().ends_with("1 asset"));
}

#[test]
fn broken_front_matter_fails_the_build() {
    let content = fixture_copy();
    fs::write(content.path().join("broken.md"), "+++\ntitle = \n+++\n").unwrap();
    assert!(matches!(
        scan::scan(content.path()),
        Err(scan::ScanError::FrontMatter(_, _))
    ));
}
