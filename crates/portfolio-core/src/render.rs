//! Card rendering.
//!
//! Projects are mapped to a small element tree ([`Element`] / [`Node`])
//! rather than to strings, so callers can inspect the result (tests, the
//! headless [`Page`](crate::page::Page)) and serialize it to HTML only at
//! the edge with [`Element::to_html`].
//!
//! # Card layout
//!
//! ```text
//! div.card.project-card
//! ├── h3                      title
//! ├── p.tagline               description
//! ├── ul.project-bullets      first 3 bullets (omitted when none)
//! ├── div.chips               span.chip per tag
//! └── div.card-actions        GitHub link, optional Live Demo link
//! ```

use crate::links::PlaceholderPolicy;
use crate::models::ProjectRecord;

/// Bullets beyond this count are not shown on a card.
pub const MAX_CARD_BULLETS: usize = 3;

pub const EMPTY_TITLE: &str = "No projects found";
pub const EMPTY_HINT: &str = "Try a different search or tag.";

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Serialized verbatim; only for trusted content such as inline scripts.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Attributes in insertion order; setting an existing name replaces it.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn raw(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::Raw(content.into()));
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|x| x == class))
            .unwrap_or(false)
    }

    /// Direct element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) | Node::Raw(_) => None,
        })
    }

    /// Depth-first search over this element and its descendants.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect(pred, &mut out);
        out
    }

    pub fn find<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
        self.find_all(pred).into_iter().next()
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect(pred, out);
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Raw(_) => {}
                Node::Element(e) => e.write_text(out),
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape_text(t)),
                Node::Raw(r) => out.push_str(r),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// An anchor that opens in a new browsing context without a referrer.
fn external_link(class: &str, href: &str, label: &str) -> Element {
    Element::new("a")
        .class(class)
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", "noreferrer")
        .text(label)
}

/// The GitHub action: a live link, or a disabled affordance that never
/// navigates when the link is missing or still a placeholder.
pub fn github_action(project: &ProjectRecord, policy: &PlaceholderPolicy) -> Element {
    match policy.live_link(project.github.as_deref()) {
        Some(href) => external_link("small-btn primary", href, "GitHub"),
        None => Element::new("a")
            .class("small-btn primary")
            .attr("href", "#")
            .attr("aria-disabled", "true")
            .attr("data-disabled", "missing-link")
            .attr("onclick", "return false;")
            .text("GitHub (Add link)"),
    }
}

pub fn demo_action(project: &ProjectRecord) -> Option<Element> {
    project
        .demo
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|href| external_link("small-btn", href, "Live Demo"))
}

pub fn render_card(project: &ProjectRecord, policy: &PlaceholderPolicy) -> Element {
    let mut card = Element::new("div")
        .class("card project-card")
        .child(Element::new("h3").text(&project.title))
        .child(Element::new("p").class("tagline").text(&project.description));

    if !project.bullets.is_empty() {
        card = card.child(
            Element::new("ul").class("project-bullets").children(
                project
                    .bullets
                    .iter()
                    .take(MAX_CARD_BULLETS)
                    .map(|b| Element::new("li").text(b)),
            ),
        );
    }

    card = card.child(
        Element::new("div").class("chips").children(
            project
                .tags
                .iter()
                .map(|t| Element::new("span").class("chip").text(t)),
        ),
    );

    let mut actions = Element::new("div")
        .class("card-actions")
        .child(github_action(project, policy));
    if let Some(demo) = demo_action(project) {
        actions = actions.child(demo);
    }

    card.child(actions)
}

/// Placeholder shown instead of cards when nothing matches.
pub fn render_empty() -> Element {
    Element::new("div")
        .class("card")
        .child(Element::new("h3").text(EMPTY_TITLE))
        .child(Element::new("p").text(EMPTY_HINT))
}

/// Cards for `projects` in order, or the single empty placeholder.
pub fn render_cards<'a, I>(projects: I, policy: &PlaceholderPolicy) -> Vec<Element>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let cards: Vec<Element> = projects
        .into_iter()
        .map(|p| render_card(p, policy))
        .collect();
    if cards.is_empty() {
        vec![render_empty()]
    } else {
        cards
    }
}
