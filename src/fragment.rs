//! Parsed HTML fragment with its top-level nodes pre-serialized.
//!
//! Parsing goes through scraper's html5ever-backed fragment parser, which recovers from
//! malformed markup instead of failing, so [`Fragment::parse`] is infallible. Nodes are
//! serialized once, up front, by html5ever's own serializer: the splitter only ever moves
//! whole top-level nodes between buckets and never needs the tree again.
//!
//! Audio cards are hidden by editing the parsed tree before serialization, so every other
//! attribute (namespaced ones included) is written back exactly as the serializer sees it.

use crate::keywords::normalize;
use crate::section::Heading;
use html5ever::{LocalName, Namespace, QualName};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, StrTendril};

/// Class pair marking an embedded audio card in post content.
const AUDIO_CARD_CLASSES: [&str; 2] = ["kg-card", "kg-audio-card"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Whether embedded audio cards are left as authored or hidden during serialization.
pub enum AudioVisibility {
    #[default]
    /// Serialize audio cards unchanged.
    Keep,
    /// Append `display: none;` to each audio card's inline style.
    Hide,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One top-level node of a fragment.
pub enum FragmentNode {
    /// An `h1`..`h6` element.
    Heading(Heading),
    /// Any other element, or a text run that is not pure whitespace.
    Content(String),
}

impl FragmentNode {
    #[must_use]
    /// Serialized outer HTML of this node.
    pub fn html(&self) -> &str {
        match self {
            Self::Heading(heading) => &heading.html,
            Self::Content(html) => html,
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Ordered top-level nodes of an HTML fragment.
pub struct Fragment {
    nodes: Vec<FragmentNode>,
    paragraphs: Vec<String>,
    heading_count: usize,
    parse_errors: usize,
}

impl Fragment {
    #[must_use]
    /// Parse `source` as body content.
    ///
    /// Comments and whitespace-only text between elements are not kept as nodes.
    pub fn parse(source: &str, audio: AudioVisibility) -> Self {
        if source.trim().is_empty() {
            return Self::default();
        }

        let mut html = Html::parse_fragment(source);
        let parse_errors = html.errors.len();
        if parse_errors > 0 {
            log::debug!("Recovered from {parse_errors} HTML parse errors");
        }

        if audio == AudioVisibility::Hide {
            hide_audio_cards(&mut html);
        }

        let root = html.root_element();
        let mut nodes = Vec::new();

        for child in root.children() {
            match child.value() {
                Node::Element(_) => {
                    let Some(element) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let markup = element.html();

                    if let Some(level) = heading_level(element.value().name()) {
                        let text: String = element.text().collect();
                        nodes.push(FragmentNode::Heading(Heading {
                            level,
                            label: normalize(&text),
                            html: markup,
                        }));
                    } else {
                        nodes.push(FragmentNode::Content(markup));
                    }
                }
                Node::Text(text) if !text.trim().is_empty() => {
                    nodes.push(FragmentNode::Content(escape_text(text)));
                }
                _ => {}
            }
        }

        let mut heading_count = 0;
        let mut paragraphs = Vec::new();
        for element in root.descendants().filter_map(ElementRef::wrap) {
            match element.value().name() {
                "p" => paragraphs.push(element.html()),
                name if heading_level(name).is_some() => heading_count += 1,
                _ => {}
            }
        }

        Self {
            nodes,
            paragraphs,
            heading_count,
            parse_errors,
        }
    }

    #[must_use]
    /// Top-level nodes in document order.
    pub fn nodes(&self) -> &[FragmentNode] {
        &self.nodes
    }

    #[must_use]
    /// Number of `h1`..`h6` elements anywhere in the fragment, nested ones included.
    pub fn heading_count(&self) -> usize {
        self.heading_count
    }

    #[must_use]
    /// The first `limit` `<p>` elements at any depth, in document order.
    pub fn paragraphs(&self, limit: usize) -> &[String] {
        &self.paragraphs[..limit.min(self.paragraphs.len())]
    }

    #[must_use]
    /// Count of recoverable errors the parser reported.
    pub fn parse_errors(&self) -> usize {
        self.parse_errors
    }

    #[must_use]
    /// Whether the fragment has no top-level nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    /// All top-level nodes serialized back to back.
    pub fn to_html(&self) -> String {
        self.nodes.iter().map(FragmentNode::html).collect()
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn is_audio_card(element: ElementRef<'_>) -> bool {
    AUDIO_CARD_CLASSES
        .iter()
        .all(|class| element.value().classes().any(|c| c == *class))
}

/// Append `display: none;` to the inline style of every audio card in `html`.
fn hide_audio_cards(html: &mut Html) {
    let cards: Vec<_> = html
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| is_audio_card(*element))
        .map(|element| element.id())
        .collect();

    log::trace!("Hiding {} audio cards", cards.len());
    for id in cards {
        if let Some(mut node) = html.tree.get_mut(id) {
            if let Node::Element(element) = node.value() {
                hide_element(element);
            }
        }
    }
}

fn hide_element(element: &mut Element) {
    let existing = element
        .attrs
        .iter_mut()
        .find(|(name, _)| name.ns == Namespace::from("") && &*name.local == "style");

    match existing {
        Some((_, value)) => *value = StrTendril::from(hidden_style(value)),
        None => {
            let name = QualName::new(None, Namespace::from(""), LocalName::from("style"));
            element.attrs.insert(name, StrTendril::from(hidden_style("")));
        }
    }
}

fn hidden_style(existing: &str) -> String {
    let existing = existing.trim().trim_end_matches(';').trim_end();
    if existing.is_empty() {
        "display: none;".to_string()
    } else {
        format!("{existing}; display: none;")
    }
}

/// Escape a top-level text run the way html5ever escapes text content.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/fragment.rs"]
mod tests;
