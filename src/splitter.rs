//! Heading-driven partitioning of a fragment into summary and explanation markup.
//!
//! The scan walks top-level nodes once. A recognised heading switches the current bucket,
//! an unrecognised heading closes it, and non-heading nodes land in whichever bucket is open.
//! Content that arrives while no bucket is open is dropped, so a single decorative heading
//! truncates the section above it.
//!
//! A fragment with no headings at any depth falls back to its leading paragraphs as the summary.

use crate::fragment::{AudioVisibility, Fragment, FragmentNode};
use crate::keywords::KeywordTable;
use crate::section::{Partition, Section};

/// Paragraphs used as the summary of a fragment without headings.
pub const DEFAULT_FALLBACK_PARAGRAPHS: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// What happens to the heading that opens a recognised section.
pub enum HeadingMode {
    #[default]
    /// Consume the heading; only the content after it is emitted.
    Omit,
    /// Emit the heading as the first node of its section.
    Include,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Knobs that differ between the render-time and in-page call sites.
pub struct SplitOptions {
    /// Treatment of section headings in the output.
    pub headings: HeadingMode,
    /// Leading paragraphs used when the fragment has no headings; `0` disables the fallback.
    pub fallback_paragraphs: usize,
    /// Treatment of embedded audio cards during serialization.
    pub audio: AudioVisibility,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            headings: HeadingMode::Omit,
            fallback_paragraphs: DEFAULT_FALLBACK_PARAGRAPHS,
            audio: AudioVisibility::Keep,
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Keyword table plus options; the single entry point for both call sites.
pub struct Splitter {
    keywords: KeywordTable,
    options: SplitOptions,
}

impl Splitter {
    #[must_use]
    /// Splitter recognising headings from `keywords`.
    pub fn new(keywords: KeywordTable, options: SplitOptions) -> Self {
        Self { keywords, options }
    }

    #[must_use]
    /// Keyword table in use.
    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    #[must_use]
    /// Options in use.
    pub fn options(&self) -> SplitOptions {
        self.options
    }

    #[must_use]
    /// Parse `source` with this splitter's audio treatment.
    pub fn parse(&self, source: &str) -> Fragment {
        Fragment::parse(source, self.options.audio)
    }

    #[must_use]
    /// Group top-level nodes into sections, one per heading.
    ///
    /// Content before the first heading forms a leading section with no heading. Labels are
    /// assigned from the keyword table; `None` marks content the partition will drop.
    pub fn sections(&self, fragment: &Fragment) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();

        for node in fragment.nodes() {
            match node {
                FragmentNode::Heading(heading) => sections.push(Section {
                    label: self.keywords.classify(&heading.label),
                    heading: Some(heading.clone()),
                    nodes: Vec::new(),
                }),
                FragmentNode::Content(html) => match sections.last_mut() {
                    Some(section) => section.nodes.push(html.clone()),
                    None => sections.push(Section {
                        label: None,
                        heading: None,
                        nodes: vec![html.clone()],
                    }),
                },
            }
        }

        sections
    }

    #[must_use]
    /// Partition an already parsed fragment.
    ///
    /// The paragraph fallback applies only when the fragment has no heading at any depth. A
    /// heading nested inside a card still counts, even though only top-level headings open
    /// sections.
    pub fn partition_fragment(&self, fragment: &Fragment) -> Partition {
        if fragment.heading_count() == 0 {
            let paragraphs = fragment.paragraphs(self.options.fallback_paragraphs);
            log::debug!(
                "No headings found, using {} leading paragraphs as summary",
                paragraphs.len()
            );
            return Partition {
                summary: paragraphs.concat(),
                explanation: String::new(),
            };
        }

        let mut partition = Partition::default();
        let mut dropped = 0;

        for section in self.sections(fragment) {
            let Some(label) = section.label else {
                if let Some(heading) = &section.heading {
                    log::trace!("Unrecognised heading {:?} closes the open section", heading.label);
                }
                dropped += section.nodes.len();
                continue;
            };

            if self.options.headings == HeadingMode::Include {
                if let Some(heading) = &section.heading {
                    partition.push(label, &heading.html);
                }
            }
            for node in &section.nodes {
                partition.push(label, node);
            }
        }

        if dropped > 0 {
            log::debug!("Dropped {dropped} nodes outside recognised sections");
        }

        partition
    }

    #[must_use]
    /// Parse and partition `source`. Malformed markup never fails; empty input yields an
    /// empty partition.
    pub fn partition(&self, source: &str) -> Partition {
        self.partition_fragment(&self.parse(source))
    }
}

#[must_use]
/// Partition `source` with the default keywords and options.
pub fn partition(source: &str) -> Partition {
    Splitter::default().partition(source)
}

#[cfg(test)]
#[path = "tests/splitter.rs"]
mod tests;
