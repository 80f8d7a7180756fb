//! Keyword table mapping heading text to section labels.
//!
//! Each label carries a list of keywords; a heading belongs to a label when its normalised
//! text contains any of them. The defaults recognise a Japanese and an English form per
//! label, and further locales are added by extending the lists.

use crate::section::SectionLabel;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Ordered `{label: [keyword, ...]}` table consulted for every heading.
pub struct KeywordTable {
    entries: Vec<(SectionLabel, Vec<String>)>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::empty()
            .with(SectionLabel::Summary, ["要約", "summary"])
            .with(SectionLabel::Explanation, ["解説", "explanation"])
    }
}

impl KeywordTable {
    #[must_use]
    /// Table that recognises nothing.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    /// Builder form of [`KeywordTable::insert`] for several keywords at once.
    pub fn with<I, S>(mut self, label: SectionLabel, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            self.insert(label, keyword.as_ref());
        }
        self
    }

    /// Register `keyword` for `label`. Keywords are stored lower-cased and trimmed; blank
    /// keywords are ignored since they would match every heading.
    pub fn insert(&mut self, label: SectionLabel, keyword: &str) {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return;
        }
        if let Some((_, keywords)) = self.entries.iter_mut().find(|(l, _)| *l == label) {
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        } else {
            self.entries.push((label, vec![keyword]));
        }
    }

    #[must_use]
    /// Keywords currently registered for `label`.
    pub fn keywords(&self, label: SectionLabel) -> &[String] {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(&[], |(_, keywords)| keywords.as_slice())
    }

    #[must_use]
    /// Label for a heading's text, checking labels in insertion order.
    ///
    /// `text` is normalised here as well, so raw heading text is accepted.
    pub fn classify(&self, text: &str) -> Option<SectionLabel> {
        let text = normalize(text);
        self.entries
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|(label, _)| *label)
    }
}

/// Trim and lower-case heading text for matching.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
