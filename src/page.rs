//! In-page variant of the split, writing into the summary and explanation containers.
//!
//! The page starts with the whole post body in the summary container and an empty
//! explanation container. Splitting replaces both. The unsplit body is captured on the first
//! run so that later runs (every load or resize may trigger one) produce the same result
//! instead of re-splitting already split markup.

use crate::section::Partition;
use crate::splitter::Splitter;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Inner HTML of the two content containers, `None` where the container is absent.
pub struct ContentPage {
    /// Summary container; holds the full post body until split.
    pub summary: Option<String>,
    /// Explanation container.
    pub explanation: Option<String>,
    source: Option<String>,
}

impl ContentPage {
    #[must_use]
    /// Page with the given container contents.
    pub fn new(summary: Option<String>, explanation: Option<String>) -> Self {
        Self {
            summary,
            explanation,
            source: None,
        }
    }

    #[must_use]
    /// Unsplit body captured by the first successful split.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Split the post body into both containers.
    ///
    /// Returns `false` without touching anything when either container is missing. When the
    /// split produces no summary, the summary container gets the whole body back, serialized
    /// with the splitter's options so audio cards are hidden there too.
    pub fn split_sections(&mut self, splitter: &Splitter) -> bool {
        let (Some(summary), Some(_)) = (&self.summary, &self.explanation) else {
            log::debug!("Content containers missing, leaving page unsplit");
            return false;
        };

        let source = self.source.get_or_insert_with(|| summary.clone());
        let fragment = splitter.parse(source);
        let Partition {
            summary,
            explanation,
        } = splitter.partition_fragment(&fragment);

        let summary = if summary.is_empty() {
            fragment.to_html()
        } else {
            summary
        };

        self.summary = Some(summary);
        self.explanation = Some(explanation);
        true
    }
}

#[cfg(test)]
#[path = "tests/page.rs"]
mod tests;
