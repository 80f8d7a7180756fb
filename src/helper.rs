//! Render-time template helper.
//!
//! Templates ask for one section at a time by name and receive `{ html }` back, so the helper
//! resolves the name, partitions the post body, and returns only the requested region. It is
//! pure: nothing outside the returned value changes.

use crate::section::SectionLabel;
use crate::splitter::Splitter;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Value handed back to the calling template.
pub struct HelperOutput {
    /// Markup for the requested section, empty when there is none.
    pub html: String,
}

#[derive(Clone, Debug, Default)]
/// Section lookup for templates, backed by a [`Splitter`].
pub struct ContentHelper {
    splitter: Splitter,
}

impl ContentHelper {
    #[must_use]
    /// Helper that partitions with `splitter`.
    pub fn new(splitter: Splitter) -> Self {
        Self { splitter }
    }

    #[must_use]
    /// Markup for `section_name` within the post body `html`.
    ///
    /// Unknown names produce empty output rather than an error, matching how templates treat
    /// missing sections.
    pub fn get_content(&self, section_name: &str, html: &str) -> HelperOutput {
        let label = match section_name.parse::<SectionLabel>() {
            Ok(label) => label,
            Err(e) => {
                log::debug!("{e}");
                return HelperOutput::default();
            }
        };

        let partition = self.splitter.partition(html);
        HelperOutput {
            html: partition.get(label).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const POST: &str = "<h2>要約</h2><p>A</p><h2>解説</h2><p>B</p>";

    #[test]
    fn test_returns_requested_section() {
        let helper = ContentHelper::default();

        assert_eq!(helper.get_content("summary", POST).html, "<p>A</p>");
        assert_eq!(helper.get_content("explanation", POST).html, "<p>B</p>");
    }

    #[test]
    fn test_unknown_section_is_empty() {
        let helper = ContentHelper::default();
        assert_eq!(helper.get_content("related", POST), HelperOutput::default());
    }

    #[test]
    fn test_fallback_only_applies_to_summary() {
        let helper = ContentHelper::default();
        let post = "<p>one</p><p>two</p>";

        assert_eq!(helper.get_content("summary", post).html, "<p>one</p><p>two</p>");
        assert_eq!(helper.get_content("explanation", post).html, "");
    }

    #[test]
    fn test_output_shape() {
        let output = ContentHelper::default().get_content("summary", POST);
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r#"{"html":"<p>A</p>"}"#
        );
    }
}
