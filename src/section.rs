//! Section representation for heading-partitioned HTML fragments.
//!
//! A section is an ordered bucket of serialized nodes that follows a heading. Only two
//! labels are meaningful to the theme, so everything else is an untagged section whose
//! content is dropped when the buckets are folded into a [`Partition`].

use crate::error::PartitaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Named output bucket recognised by the theme.
pub enum SectionLabel {
    /// Short overview shown first on the page.
    Summary,
    /// Long-form body shown below the summary.
    Explanation,
}

impl SectionLabel {
    /// Every label, in the order headings are checked against them.
    pub const ALL: [Self; 2] = [Self::Summary, Self::Explanation];

    #[must_use]
    /// Template-facing name of the label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Explanation => "explanation",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionLabel {
    type Err = PartitaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "explanation" => Ok(Self::Explanation),
            _ => Err(PartitaError::UnknownSection(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Heading element (`h1`..`h6`) used as a section delimiter.
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Text content, trimmed and lower-cased for keyword matching.
    pub label: String,
    /// Serialized markup of the heading element itself.
    pub html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Ordered run of nodes between one heading and the next.
pub struct Section {
    /// Bucket this run belongs to, `None` when its heading was not recognised.
    pub label: Option<SectionLabel>,
    /// Heading that opened the run; absent for content before the first heading.
    pub heading: Option<Heading>,
    /// Serialized non-heading nodes in document order.
    pub nodes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Serialized markup for each recognised section.
pub struct Partition {
    /// Markup for the summary region.
    pub summary: String,
    /// Markup for the explanation region.
    pub explanation: String,
}

impl Partition {
    #[must_use]
    /// Markup collected for `label`.
    pub fn get(&self, label: SectionLabel) -> &str {
        match label {
            SectionLabel::Summary => &self.summary,
            SectionLabel::Explanation => &self.explanation,
        }
    }

    pub(crate) fn push(&mut self, label: SectionLabel, html: &str) {
        match label {
            SectionLabel::Summary => self.summary.push_str(html),
            SectionLabel::Explanation => self.explanation.push_str(html),
        }
    }

    #[must_use]
    /// Whether neither region received any markup.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.explanation.is_empty()
    }
}
