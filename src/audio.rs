//! Audio cards and the custom player that replaces them.
//!
//! Posts embed audio as editor cards inside the body. The theme hides those cards and feeds
//! their sources to its own player containers in the sidebars, pairing the n-th container with
//! the n-th card. This module extracts the tracks, does the pairing, and models the player
//! controls so the behaviour can be exercised without a browser.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// MIME type assumed for sources that do not declare one.
pub const DEFAULT_AUDIO_TYPE: &str = "audio/mpeg";

/// Playback rates offered by the speed menu.
pub const SPEED_OPTIONS: [f64; 5] = [0.75, 1.0, 1.25, 1.5, 2.0];

const RATE_TOLERANCE: f64 = 0.01;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One playable URL of a track.
pub struct AudioSource {
    /// Media URL as written in the card.
    pub url: String,
    /// Declared MIME type, or [`DEFAULT_AUDIO_TYPE`].
    pub mime_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Audio extracted from one card.
pub struct AudioTrack {
    /// Card title, empty when the card has none.
    pub title: String,
    /// Candidate sources in document order.
    pub sources: Vec<AudioSource>,
}

impl AudioTrack {
    #[must_use]
    /// Whether the track has anything to play.
    pub fn is_playable(&self) -> bool {
        !self.sources.is_empty()
    }
}

#[must_use]
/// Tracks for every audio card in `html`, in document order.
///
/// A card whose `<audio>` carries a `src` yields that single source; otherwise its nested
/// `<source>` elements are used.
pub fn extract_tracks(html: &str) -> Vec<AudioTrack> {
    let (Ok(card_selector), Ok(audio_selector), Ok(source_selector), Ok(title_selector)) = (
        Selector::parse(".kg-card.kg-audio-card"),
        Selector::parse("audio"),
        Selector::parse("source"),
        Selector::parse(".kg-audio-title"),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_fragment(html);
    document
        .select(&card_selector)
        .map(|card| {
            let Some(player) = card.select(&audio_selector).next() else {
                return AudioTrack::default();
            };
            let title = card
                .select(&title_selector)
                .next()
                .map(|t| t.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            AudioTrack {
                title,
                sources: sources_of(player, &source_selector),
            }
        })
        .collect()
}

fn sources_of(player: ElementRef<'_>, source: &Selector) -> Vec<AudioSource> {
    let source_of = |element: ElementRef<'_>| {
        let url = element.value().attr("src").filter(|s| !s.is_empty())?;
        let mime_type = element
            .value()
            .attr("type")
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_AUDIO_TYPE);
        Some(AudioSource {
            url: url.to_string(),
            mime_type: mime_type.to_string(),
        })
    };

    if let Some(direct) = source_of(player) {
        return vec![direct];
    }
    player.select(source).filter_map(source_of).collect()
}

#[must_use]
/// Pair player containers with tracks index-for-index.
///
/// `None` marks a container to hide: it has no track, or its track has no sources. The result
/// is empty when there are no containers or no tracks, in which case nothing is relocated.
pub fn assign_containers(
    container_count: usize,
    tracks: &[AudioTrack],
) -> Vec<Option<&AudioTrack>> {
    if container_count == 0 || tracks.is_empty() {
        return Vec::new();
    }
    (0..container_count)
        .map(|i| tracks.get(i).filter(|track| track.is_playable()))
        .collect()
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
/// Format seconds as `m:ss`, with `0:00` for anything that is not a finite, non-negative time.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[derive(Clone, Debug, PartialEq)]
/// State behind one custom player container.
pub struct Player {
    playing: bool,
    current_time: f64,
    duration: Option<f64>,
    volume: f64,
    previous_volume: f64,
    playback_rate: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            playing: false,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            previous_volume: 1.0,
            playback_rate: 1.0,
        }
    }
}

impl Player {
    #[must_use]
    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    /// Playback position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[must_use]
    /// Track length once metadata has loaded.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    #[must_use]
    /// Volume in `0.0..=1.0`.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[must_use]
    /// Current playback rate.
    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    #[must_use]
    /// Whether the volume is at zero.
    pub fn is_muted(&self) -> bool {
        self.volume <= 0.0
    }

    /// Record the track length reported by the media element. Unusable values are ignored.
    pub fn set_duration(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0.0 {
            self.duration = Some(duration);
        }
    }

    /// Record a position update from the media element.
    pub fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let upper = self.duration.unwrap_or(f64::MAX);
        self.current_time = seconds.clamp(0.0, upper);
    }

    /// Flip between playing and paused, returning the new state.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Playback reached the end of the track.
    pub fn finish(&mut self) {
        self.playing = false;
        self.current_time = 0.0;
    }

    /// Jump to `fraction` of the track, as from a click on the progress bar.
    ///
    /// Returns the new position, or `None` while the duration is still unknown.
    pub fn seek_fraction(&mut self, fraction: f64) -> Option<f64> {
        let duration = self.duration?;
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.current_time = fraction * duration;
        Some(self.current_time)
    }

    /// Mute, or restore the volume from before muting (full volume if that was zero).
    ///
    /// Returns whether the player is muted afterwards.
    pub fn toggle_mute(&mut self) -> bool {
        if self.is_muted() {
            self.volume = if self.previous_volume > 0.0 {
                self.previous_volume
            } else {
                1.0
            };
        } else {
            self.previous_volume = self.volume;
            self.volume = 0.0;
        }
        self.is_muted()
    }

    /// Select a playback rate from [`SPEED_OPTIONS`]. Rates not on the menu are rejected.
    pub fn set_speed(&mut self, rate: f64) -> bool {
        match SPEED_OPTIONS
            .iter()
            .find(|option| (*option - rate).abs() < RATE_TOLERANCE)
        {
            Some(option) => {
                self.playback_rate = *option;
                true
            }
            None => false,
        }
    }

    #[must_use]
    /// Text for the timestamp label.
    pub fn timestamp(&self) -> String {
        match self.duration {
            Some(duration) => format!(
                "{} / {}",
                format_time(self.current_time),
                format_time(duration)
            ),
            None => "Loading...".to_string(),
        }
    }

    #[must_use]
    /// Width of the progress bar fill, `0.0..=100.0`.
    pub fn progress_percent(&self) -> f64 {
        match self.duration {
            Some(duration) => (self.current_time / duration * 100.0).clamp(0.0, 100.0),
            None => 0.0,
        }
    }
}

#[cfg(test)]
#[path = "tests/audio.rs"]
mod tests;
