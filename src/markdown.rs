//! Markdown to element tree.
//!
//! Articles are written in markdown and rendered through an [`Element`] tree
//! rather than straight to HTML, so the outline extractor can annotate
//! headings before the page is serialized.
//!
//! The tree is rooted at an `ARTICLE` element. Tag names follow HTML
//! (`H2`, `P`, `UL`, `PRE`, ...). Heading attributes written as
//! `## Title {#anchor .class}` become `id` and `class` attributes, so an
//! author-chosen anchor takes precedence over the generated slug.

use crate::element::{Element, Node};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Placeholder for HTML blocks; its content is spliced into the parent.
const HTML_BLOCK: &str = "#HTML";

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Parse markdown into an element tree rooted at `ARTICLE`.
pub fn parse(markdown: &str) -> Element {
    let mut stack = vec![Element::new("ARTICLE")];
    // pulldown-cmark emits header cells directly inside the table head.
    let mut in_table_head = false;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::TableHead) => {
                in_table_head = true;
                stack.push(Element::new("THEAD"));
                stack.push(Element::new("TR"));
            }
            Event::Start(Tag::TableCell) if in_table_head => stack.push(Element::new("TH")),
            Event::Start(tag) => stack.push(open(tag)),
            Event::End(TagEnd::TableHead) => {
                in_table_head = false;
                close(&mut stack);
                close(&mut stack);
            }
            Event::End(_) => close(&mut stack),
            Event::Text(text) => append_text(&mut stack, &text),
            Event::Code(code) => {
                append(
                    &mut stack,
                    Node::Element(Element::new("CODE").with_text(&code)),
                );
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                append(&mut stack, Node::Raw(html.to_string()));
            }
            Event::SoftBreak => append_text(&mut stack, "\n"),
            Event::HardBreak => append(&mut stack, Node::Element(Element::new("BR"))),
            Event::Rule => append(&mut stack, Node::Element(Element::new("HR"))),
            Event::FootnoteReference(name) => {
                let link = Element::new("A")
                    .with_attr("href", &format!("#fn-{name}"))
                    .with_text(&name);
                append(
                    &mut stack,
                    Node::Element(Element::new("SUP").with_child(link)),
                );
            }
            Event::TaskListMarker(checked) => {
                let mut input = Element::new("INPUT")
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "");
                if checked {
                    input.set_attr("checked", "");
                }
                append(&mut stack, Node::Element(input));
            }
            _ => {}
        }
    }

    // Unbalanced input cannot happen with pulldown-cmark, but fold any
    // leftovers into their parents rather than dropping them.
    while stack.len() > 1 {
        if let Some(element) = stack.pop() {
            append(&mut stack, Node::Element(element));
        }
    }
    stack.pop().unwrap_or_else(|| Element::new("ARTICLE"))
}

/// Pop the innermost open element into its parent. The root is never closed.
fn close(stack: &mut Vec<Element>) {
    if stack.len() < 2 {
        return;
    }
    let Some(mut element) = stack.pop() else {
        return;
    };
    let tag = element.tag().to_string();
    match tag.as_str() {
        HTML_BLOCK => {
            for node in element.into_content() {
                append(stack, node);
            }
        }
        "IMG" => {
            let alt = element.take_text();
            element.set_attr("alt", &alt);
            append(stack, Node::Element(element));
        }
        _ => append(stack, Node::Element(element)),
    }
}

fn append(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.push(node);
    }
}

fn append_text(stack: &mut [Element], text: &str) {
    if let Some(parent) = stack.last_mut() {
        parent.push_text(text);
    }
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "H1",
        HeadingLevel::H2 => "H2",
        HeadingLevel::H3 => "H3",
        HeadingLevel::H4 => "H4",
        HeadingLevel::H5 => "H5",
        HeadingLevel::H6 => "H6",
    }
}

fn open(tag: Tag<'_>) -> Element {
    match tag {
        Tag::Heading {
            level, id, classes, ..
        } => {
            let mut element = Element::new(heading_tag(level));
            if let Some(id) = id {
                element.set_attr("id", &id);
            }
            if !classes.is_empty() {
                let classes: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
                element.set_attr("class", &classes.join(" "));
            }
            element
        }
        Tag::HtmlBlock => Element::new(HTML_BLOCK),
        Tag::Paragraph => Element::new("P"),
        Tag::BlockQuote(_) => Element::new("BLOCKQUOTE"),
        Tag::CodeBlock(kind) => {
            let mut element = Element::new("PRE");
            if let CodeBlockKind::Fenced(lang) = kind {
                if !lang.is_empty() {
                    element.set_attr("data-lang", &lang);
                }
            }
            element
        }
        Tag::List(Some(start)) => {
            let element = Element::new("OL");
            if start == 1 {
                element
            } else {
                element.with_attr("start", &start.to_string())
            }
        }
        Tag::List(None) => Element::new("UL"),
        Tag::Item => Element::new("LI"),
        Tag::FootnoteDefinition(name) => Element::new("DIV")
            .with_attr("class", "footnote")
            .with_attr("id", &format!("fn-{name}")),
        Tag::Table(_) => Element::new("TABLE"),
        Tag::TableRow => Element::new("TR"),
        Tag::TableCell => Element::new("TD"),
        Tag::Emphasis => Element::new("EM"),
        Tag::Strong => Element::new("STRONG"),
        Tag::Strikethrough => Element::new("DEL"),
        Tag::Link {
            dest_url, title, ..
        } => {
            let element = Element::new("A").with_attr("href", &dest_url);
            if title.is_empty() {
                element
            } else {
                element.with_attr("title", &title)
            }
        }
        Tag::Image {
            dest_url, title, ..
        } => {
            let element = Element::new("IMG").with_attr("src", &dest_url);
            if title.is_empty() {
                element
            } else {
                element.with_attr("title", &title)
            }
        }
        _ => Element::new("DIV"),
    }
}
