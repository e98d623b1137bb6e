//! In-memory element tree consumed by the outline extractor.
//!
//! The extractor only needs a narrow view of a document: tag names, the
//! concatenated text of a node, its ordered child elements and a readable
//! `id` attribute. That view is the [`ElementNode`] trait; [`ElementNodeMut`]
//! adds the single write the extractor ever performs (setting a missing `id`).
//!
//! [`Element`] is the crate's own implementation, built either by hand (tests)
//! or from markdown by [`crate::markdown::parse`]. It serializes back to HTML
//! so generated pages carry the ids assigned during extraction.
//!
//! ```text
//! ARTICLE
//! ├── H2 "Intro"
//! ├── P  "text"
//! └── DIV
//!     └── H2 "Setup"
//! ```

use maud::html;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Read-only view of a document node.
pub trait ElementNode {
    /// Upper-case tag identifier, e.g. `"H2"` or `"DIV"`.
    fn tag_name(&self) -> &str;

    /// Visible text of the node and all of its descendants, if any.
    ///
    /// Defaults to [`text_without`](Self::text_without) skipping nothing.
    /// An override must return the same text.
    fn text_content(&self) -> Option<Cow<'_, str>> {
        self.text_without(&|_| false)
    }

    /// Visible text leaving out the subtree of every descendant element for
    /// which `skip` returns true. `None` only when the node has no content.
    ///
    /// Heading titles are read through this method, so with a `skip` that
    /// never matches it must agree with [`text_content`](Self::text_content).
    fn text_without(&self, skip: &dyn Fn(&Self) -> bool) -> Option<Cow<'_, str>>;

    /// Current value of the `id` attribute.
    fn id(&self) -> Option<&str>;

    /// Child elements in document order.
    fn children(&self) -> impl Iterator<Item = &Self>;
}

/// Mutable access needed to write back extracted ids.
pub trait ElementNodeMut: ElementNode {
    fn set_id(&mut self, id: &str);

    /// The `index`-th child element, counting elements only.
    fn child_mut(&mut self, index: usize) -> Option<&mut Self>;
}

/// A node in an [`Element`]'s content list.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Plain text, escaped on output.
    Text(String),
    /// Markup passed through verbatim. Contributes no text content.
    Raw(String),
}

/// An element with a tag, attributes and mixed content.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    content: Vec<Node>,
}

/// Tags rendered without a closing tag.
const VOID_TAGS: &[&str] = &["BR", "HR", "IMG", "INPUT"];

impl Element {
    /// Create an empty element. The tag is stored upper-cased.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            attributes: BTreeMap::new(),
            content: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.push_text(text);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push(Node::Element(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.content
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn content(&self) -> &[Node] {
        &self.content
    }

    pub fn into_content(self) -> Vec<Node> {
        self.content
    }

    pub fn push(&mut self, node: Node) {
        self.content.push(node);
    }

    /// Append text, merging with a directly preceding text node.
    pub fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.content.last_mut() {
            last.push_str(text);
        } else {
            self.content.push(Node::Text(text.to_string()));
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// First descendant element with the given tag, in document order.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        let tag = tag.to_ascii_uppercase();
        self.find_upper(&tag)
    }

    fn find_upper(&self, tag: &str) -> Option<&Element> {
        self.children().find_map(|child| {
            if child.tag == tag {
                Some(child)
            } else {
                child.find_upper(tag)
            }
        })
    }

    /// Remove the `index`th child element, not counting text or raw nodes.
    pub fn remove_child(&mut self, index: usize) -> Option<Element> {
        let position = self
            .content
            .iter()
            .enumerate()
            .filter(|(_, node)| matches!(node, Node::Element(_)))
            .nth(index)
            .map(|(position, _)| position)?;
        match self.content.remove(position) {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Drop all content and return it as concatenated text.
    ///
    /// Used for `IMG`, whose markdown alt text arrives as child text.
    pub fn take_text(&mut self) -> String {
        let text = collect_text(&self.content);
        self.content.clear();
        text
    }

    /// Serialize this element and its descendants as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }

    /// Serialize only the content of this element.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        write_content(&self.content, &mut out);
        out
    }
}

impl ElementNode for Element {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn text_content(&self) -> Option<Cow<'_, str>> {
        match self.content.as_slice() {
            [] => None,
            [Node::Text(text)] => Some(Cow::Borrowed(text)),
            content => Some(Cow::Owned(collect_text(content))),
        }
    }

    fn text_without(&self, skip: &dyn Fn(&Self) -> bool) -> Option<Cow<'_, str>> {
        if self.content.is_empty() {
            return None;
        }
        let mut text = String::new();
        collect_text_filtered(&self.content, skip, &mut text);
        Some(Cow::Owned(text))
    }

    fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.content.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }
}

impl ElementNodeMut for Element {
    fn set_id(&mut self, id: &str) {
        self.set_attr("id", id);
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        self.content
            .iter_mut()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element),
                _ => None,
            })
            .nth(index)
    }
}

fn collect_text(content: &[Node]) -> String {
    let mut text = String::new();
    for node in content {
        match node {
            Node::Text(t) => text.push_str(t),
            Node::Element(element) => text.push_str(&collect_text(&element.content)),
            Node::Raw(_) => {}
        }
    }
    text
}

fn collect_text_filtered(content: &[Node], skip: &dyn Fn(&Element) -> bool, text: &mut String) {
    for node in content {
        match node {
            Node::Text(t) => text.push_str(t),
            Node::Element(element) if !skip(element) => {
                collect_text_filtered(&element.content, skip, text);
            }
            _ => {}
        }
    }
}

fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

fn write_element(element: &Element, out: &mut String) {
    let tag = element.tag.to_ascii_lowercase();
    out.push('<');
    out.push_str(&tag);
    for (name, value) in &element.attributes {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
    out.push('>');

    if VOID_TAGS.contains(&element.tag.as_str()) {
        return;
    }

    write_content(&element.content, out);
    out.push_str(&format!("</{}>", tag));
}

fn write_content(content: &[Node], out: &mut String) {
    for node in content {
        match node {
            Node::Element(element) => write_element(element, out),
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Raw(raw) => out.push_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_uppercased() {
        assert_eq!(Element::new("h2").tag_name(), "H2");
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let el = Element::new("H2")
            .with_text("Hello ")
            .with_child(Element::new("EM").with_text("brave"))
            .with_child(Element::new("SPAN").with_child(Element::new("B").with_text(" new")))
            .with_text(" world");
        assert_eq!(el.text_content().as_deref(), Some("Hello brave new world"));
    }

    #[test]
    fn text_content_agrees_with_text_without_skipping_nothing() {
        let mut el = Element::new("H2")
            .with_text("a ")
            .with_child(Element::new("CODE").with_text("b"));
        el.push(Node::Raw("<wbr>".to_string()));
        el.push_text(" c");
        for el in [el, Element::new("H2"), Element::new("P").with_text("only")] {
            assert_eq!(el.text_content(), el.text_without(&|_| false));
        }
    }

    #[test]
    fn text_content_absent_for_empty_element() {
        assert_eq!(Element::new("DIV").text_content(), None);
    }

    #[test]
    fn text_content_skips_raw_markup() {
        let mut el = Element::new("P").with_text("a");
        el.push(Node::Raw("<br>".to_string()));
        el.push_text("b");
        assert_eq!(el.text_content().as_deref(), Some("ab"));
    }

    #[test]
    fn text_without_skips_matching_subtrees() {
        let el = Element::new("H2")
            .with_text("Setup")
            .with_child(Element::new("EM").with_text(" now"))
            .with_child(Element::new("H2").with_text("Nested"));
        let text = el.text_without(&|c| c.tag_name() == "H2");
        assert_eq!(text.as_deref(), Some("Setup now"));
        assert_eq!(el.text_content().as_deref(), Some("Setup nowNested"));
    }

    #[test]
    fn text_without_absent_for_empty_element() {
        assert_eq!(Element::new("H2").text_without(&|_| true), None);
    }

    #[test]
    fn push_text_merges_adjacent_text() {
        let el = Element::new("P").with_text("one ").with_text("two");
        assert_eq!(el.content().len(), 1);
    }

    #[test]
    fn children_yields_only_elements_in_order() {
        let el = Element::new("DIV")
            .with_text("lead")
            .with_child(Element::new("P"))
            .with_text("middle")
            .with_child(Element::new("H2"));
        let tags: Vec<&str> = el.children().map(|c| c.tag_name()).collect();
        assert_eq!(tags, vec!["P", "H2"]);
    }

    #[test]
    fn child_mut_counts_elements_only() {
        let mut el = Element::new("DIV")
            .with_text("lead")
            .with_child(Element::new("P"))
            .with_child(Element::new("H2"));
        el.child_mut(1).unwrap().set_id("second");
        let ids: Vec<Option<&str>> = el.children().map(|c| c.id()).collect();
        assert_eq!(ids, vec![None, Some("second")]);
        assert!(el.child_mut(2).is_none());
    }

    #[test]
    fn to_html_escapes_text_and_attributes() {
        let el = Element::new("H2")
            .with_attr("id", "a\"b")
            .with_text("1 < 2 & 3");
        assert_eq!(
            el.to_html(),
            r#"<h2 id="a&quot;b">1 &lt; 2 &amp; 3</h2>"#
        );
    }

    #[test]
    fn to_html_keeps_raw_markup() {
        let mut el = Element::new("DIV");
        el.push(Node::Raw("<aside>x</aside>".to_string()));
        assert_eq!(el.to_html(), "<div><aside>x</aside></div>");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let el = Element::new("P")
            .with_child(Element::new("IMG").with_attr("src", "a.png"))
            .with_child(Element::new("BR"));
        assert_eq!(el.to_html(), r#"<p><img src="a.png"><br></p>"#);
    }

    #[test]
    fn inner_html_omits_own_tag() {
        let el = Element::new("ARTICLE").with_child(Element::new("P").with_text("x"));
        assert_eq!(el.inner_html(), "<p>x</p>");
    }

    #[test]
    fn remove_child_counts_elements_only() {
        let mut el = Element::new("DIV")
            .with_text("lead")
            .with_child(Element::new("H2").with_text("A"))
            .with_child(Element::new("H3").with_text("B"));
        let removed = el.remove_child(1).unwrap();
        assert_eq!(removed.tag(), "H3");
        assert_eq!(el.inner_html(), "lead<h2>A</h2>");
        assert!(el.remove_child(1).is_none());
    }

    #[test]
    fn find_is_depth_first_in_document_order() {
        let el = Element::new("ARTICLE")
            .with_child(Element::new("DIV").with_child(Element::new("H1").with_text("deep")))
            .with_child(Element::new("H1").with_text("later"));
        let found = el.find("h1").unwrap();
        assert_eq!(found.text_content().as_deref(), Some("deep"));
        assert!(el.find("H3").is_none());
    }

    #[test]
    fn take_text_clears_content() {
        let mut el = Element::new("IMG")
            .with_text("a ")
            .with_child(Element::new("EM").with_text("cat"));
        assert_eq!(el.take_text(), "a cat");
        assert!(el.content().is_empty());
    }
}
