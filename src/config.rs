//! Configuration to acknowledge theme preferences as well as set defaults.
//!
//! Specifically, we try to find a partita.toml, and if present we load settings from there.
//! This provides the heading keyword lists, the split options, event rate limits, and the file
//! extensions picked up when scanning directories.

use crate::error::{PartitaError, Result};
use crate::fragment::AudioVisibility;
use crate::keywords::KeywordTable;
use crate::layout::{Debounce, Throttle};
use crate::section::SectionLabel;
use crate::splitter::{HeadingMode, SplitOptions, Splitter, DEFAULT_FALLBACK_PARAGRAPHS};
use facet::Facet;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// File looked up in the working directory by [`Config::load`].
pub const CONFIG_FILE: &str = "partita.toml";

fn default_summary_keywords() -> Vec<String> {
    vec!["要約".to_string(), "summary".to_string()]
}

fn default_explanation_keywords() -> Vec<String> {
    vec!["解説".to_string(), "explanation".to_string()]
}

fn default_file_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

#[derive(Facet, Clone, Debug, PartialEq)]
/// Theme preferences loaded from partita.toml or falling back to defaults.
pub struct Config {
    #[facet(default = default_summary_keywords())]
    /// Heading keywords that open the summary section.
    pub summary_keywords: Vec<String>,
    #[facet(default = default_explanation_keywords())]
    /// Heading keywords that open the explanation section.
    pub explanation_keywords: Vec<String>,
    #[facet(default = false)]
    /// Emit each recognised heading at the start of its section.
    pub include_headings: bool,
    #[facet(default = DEFAULT_FALLBACK_PARAGRAPHS)]
    /// Leading paragraphs used as the summary when a post has no headings.
    pub fallback_paragraphs: usize,
    #[facet(default = false)]
    /// Hide embedded audio cards in the split output.
    pub hide_audio_cards: bool,
    #[facet(default = 100)]
    /// Cooldown between handled scroll events, in milliseconds.
    pub throttle_ms: u64,
    #[facet(default = 250)]
    /// Quiet period before a resize is handled, in milliseconds.
    pub debounce_ms: u64,
    #[facet(default = default_file_extensions())]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_keywords: default_summary_keywords(),
            explanation_keywords: default_explanation_keywords(),
            include_headings: false,
            fallback_paragraphs: DEFAULT_FALLBACK_PARAGRAPHS,
            hide_audio_cards: false,
            throttle_ms: 100,
            debounce_ms: 250,
            file_extensions: default_file_extensions(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from partita.toml if present.
    ///
    /// A file that cannot be read or parsed is reported and the defaults are used instead.
    pub fn load() -> Self {
        match Self::load_from(CONFIG_FILE) {
            Ok(config) => config,
            Err(PartitaError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid configuration.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        facet_toml::from_str::<Self>(&contents).map_err(|e| PartitaError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    #[must_use]
    /// Keyword table built from the configured lists.
    pub fn keyword_table(&self) -> KeywordTable {
        KeywordTable::empty()
            .with(SectionLabel::Summary, &self.summary_keywords)
            .with(SectionLabel::Explanation, &self.explanation_keywords)
    }

    #[must_use]
    /// Split options built from the configured flags.
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            headings: if self.include_headings {
                HeadingMode::Include
            } else {
                HeadingMode::Omit
            },
            fallback_paragraphs: self.fallback_paragraphs,
            audio: if self.hide_audio_cards {
                AudioVisibility::Hide
            } else {
                AudioVisibility::Keep
            },
        }
    }

    #[must_use]
    /// Splitter configured from these preferences.
    pub fn splitter(&self) -> Splitter {
        Splitter::new(self.keyword_table(), self.split_options())
    }

    #[must_use]
    /// Scroll throttle with the configured cooldown.
    pub fn throttle(&self) -> Throttle {
        Throttle::new(Duration::from_millis(self.throttle_ms))
    }

    #[must_use]
    /// Resize debounce with the configured quiet period.
    pub fn debounce(&self) -> Debounce {
        Debounce::new(Duration::from_millis(self.debounce_ms))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
