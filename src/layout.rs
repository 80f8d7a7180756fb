//! Sticky sidebar column, the active-section highlight, and the rate limits on the events
//! that drive them.
//!
//! On desktop widths the navigation column pins itself to the top of the viewport once it
//! scrolls up to it, leaving a placeholder of its own size in the flow so the content does
//! not jump. The state the page script used to keep in module globals lives in
//! [`StickyColumn`]; handlers feed it measurements and apply the returned [`ColumnAction`].
//!
//! ```text
//! Floating --(rect.top <= 10)--> Pinned
//!    ^                             |
//!    +--(rect.top > 20, scrolled above origin, or not desktop)
//! ```
//!
//! The navigation menu highlights whichever section [`ActiveSection`] reports. Scrolling
//! recomputes it from both sections' rects; clicking a menu item selects a section directly.

use crate::section::SectionLabel;
use std::time::{Duration, Instant};

/// Widest viewport treated as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 768;
/// Widest viewport treated as tablet.
pub const TABLET_MAX_WIDTH: u32 = 1024;
/// Widest viewport at which audio sidebars stack under their content rows.
pub const AUDIO_STACK_MAX_WIDTH: u32 = 992;

/// Distance from the viewport top at which a pinned column sits.
pub const PIN_TOP: f64 = 10.0;
/// A pinned column is released once its natural position drops below this.
pub const RELEASE_TOP: f64 = 20.0;
/// Stacking order of the pinned column.
pub const PIN_Z_INDEX: u32 = 100;
/// The explanation section only becomes active once its top is within this distance of the
/// viewport top.
pub const ACTIVE_SECTION_TOP: f64 = 150.0;

/// Default cooldown for scroll handling.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);
/// Default quiet period before resize handling.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Responsive breakpoint class of a viewport width.
pub enum ViewportClass {
    /// Up to [`MOBILE_MAX_WIDTH`].
    Mobile,
    /// Above mobile, up to [`TABLET_MAX_WIDTH`].
    Tablet,
    /// Wider than tablet; the only class with a sticky column.
    Desktop,
}

impl ViewportClass {
    #[must_use]
    /// Classify a viewport width in CSS pixels.
    pub fn from_width(width: u32) -> Self {
        if width > TABLET_MAX_WIDTH {
            Self::Desktop
        } else if width > MOBILE_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Mobile
        }
    }
}

#[must_use]
/// Whether audio sidebars should be moved under their content rows at this width.
pub fn stacks_audio_sidebars(width: u32) -> bool {
    width <= AUDIO_STACK_MAX_WIDTH
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Bounding box of the column relative to the viewport.
pub struct ColumnRect {
    /// Distance from the viewport top.
    pub top: f64,
    /// Distance from the viewport left edge.
    pub left: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Inline style applied to a pinned column.
pub struct FixedPosition {
    /// Offset from the viewport top.
    pub top: f64,
    /// Offset from the viewport left edge.
    pub left: f64,
    /// Width frozen at pin time so the column does not reflow.
    pub width: f64,
    /// Stacking order.
    pub z_index: u32,
}

impl FixedPosition {
    fn from_rect(rect: ColumnRect) -> Self {
        Self {
            top: PIN_TOP,
            left: rect.left,
            width: rect.width,
            z_index: PIN_Z_INDEX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Size of the in-flow stand-in shown while the column is pinned.
pub struct Placeholder {
    /// Width of the column it replaces.
    pub width: f64,
    /// Height of the column it replaces.
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// DOM change a handler should make after consulting [`StickyColumn`].
pub enum ColumnAction {
    /// Nothing to change.
    None,
    /// Fix the column at `position` and show the placeholder.
    Pin {
        /// Style for the column.
        position: FixedPosition,
        /// Size for the placeholder.
        placeholder: Placeholder,
    },
    /// Clear the column's inline style and hide the placeholder.
    Unpin,
    /// Keep the column pinned but move it, e.g. after a resize.
    Reposition(FixedPosition),
}

#[derive(Clone, Debug, PartialEq)]
/// Explicit state for the sticky column.
pub struct StickyColumn {
    offset_from_top: f64,
    fixed: Option<FixedPosition>,
    placeholder: Option<Placeholder>,
}

impl StickyColumn {
    #[must_use]
    /// Column whose natural top sits `offset_from_top` pixels down the page.
    pub fn new(offset_from_top: f64) -> Self {
        Self {
            offset_from_top,
            fixed: None,
            placeholder: None,
        }
    }

    #[must_use]
    /// Whether the column is currently pinned.
    pub fn is_pinned(&self) -> bool {
        self.fixed.is_some()
    }

    #[must_use]
    /// Style of the pinned column, if pinned.
    pub fn fixed_position(&self) -> Option<FixedPosition> {
        self.fixed
    }

    #[must_use]
    /// Placeholder size, if a placeholder is showing.
    pub fn placeholder(&self) -> Option<Placeholder> {
        self.placeholder
    }

    fn unpin(&mut self) -> ColumnAction {
        if self.fixed.take().is_some() {
            self.placeholder = None;
            ColumnAction::Unpin
        } else {
            ColumnAction::None
        }
    }

    /// React to a scroll to `scroll_top` with the column currently measured at `rect`.
    pub fn on_scroll(
        &mut self,
        viewport_width: u32,
        scroll_top: f64,
        rect: ColumnRect,
    ) -> ColumnAction {
        if ViewportClass::from_width(viewport_width) != ViewportClass::Desktop {
            return self.unpin();
        }

        if scroll_top < self.offset_from_top {
            return self.unpin();
        }

        match self.fixed {
            None if rect.top <= PIN_TOP => {
                let position = FixedPosition::from_rect(rect);
                let placeholder = Placeholder {
                    width: rect.width,
                    height: rect.height,
                };
                self.fixed = Some(position);
                self.placeholder = Some(placeholder);
                log::trace!("Pinning column at left {}", position.left);
                ColumnAction::Pin {
                    position,
                    placeholder,
                }
            }
            None => ColumnAction::None,
            Some(_) if rect.top > RELEASE_TOP => self.unpin(),
            Some(_) => self.reposition(rect),
        }
    }

    /// React to a settled resize. The pinned column follows the new layout, and leaves the
    /// pinned state entirely below desktop width.
    pub fn on_resize(&mut self, viewport_width: u32, rect: ColumnRect) -> ColumnAction {
        if ViewportClass::from_width(viewport_width) != ViewportClass::Desktop {
            return self.unpin();
        }
        if self.fixed.is_none() {
            return ColumnAction::None;
        }
        if let Some(placeholder) = self.placeholder.as_mut() {
            placeholder.width = rect.width;
            placeholder.height = rect.height;
        }
        self.reposition(rect)
    }

    fn reposition(&mut self, rect: ColumnRect) -> ColumnAction {
        let position = FixedPosition::from_rect(rect);
        self.fixed = Some(position);
        ColumnAction::Reposition(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Section highlighted in the navigation menu.
pub struct ActiveSection {
    label: SectionLabel,
}

impl Default for ActiveSection {
    fn default() -> Self {
        Self {
            label: SectionLabel::Summary,
        }
    }
}

impl ActiveSection {
    #[must_use]
    /// Section that should be active given both sections' rects in a viewport
    /// `viewport_height` pixels tall.
    ///
    /// The explanation wins only when more of it is visible than of the summary and its top
    /// has reached [`ACTIVE_SECTION_TOP`]. Every other case, ties included, is the summary.
    pub fn from_rects(viewport_height: f64, summary: ColumnRect, explanation: ColumnRect) -> Self {
        let summary_visible = visible_height(viewport_height, summary);
        let explanation_visible = visible_height(viewport_height, explanation);

        let explanation_leads = explanation_visible > summary_visible;
        let label = if explanation_leads && explanation.top <= ACTIVE_SECTION_TOP {
            SectionLabel::Explanation
        } else {
            SectionLabel::Summary
        };
        Self { label }
    }

    #[must_use]
    /// The highlighted section.
    pub fn label(&self) -> SectionLabel {
        self.label
    }

    /// Recompute after a scroll. Nothing changes unless both sections are on the page.
    ///
    /// Returns whether the highlight moved.
    pub fn on_scroll(
        &mut self,
        viewport_height: f64,
        summary: Option<ColumnRect>,
        explanation: Option<ColumnRect>,
    ) -> bool {
        let (Some(summary), Some(explanation)) = (summary, explanation) else {
            return false;
        };
        self.select(Self::from_rects(viewport_height, summary, explanation).label)
    }

    /// Highlight `label`, as a click on its menu item does. Returns whether the highlight
    /// moved.
    pub fn select(&mut self, label: SectionLabel) -> bool {
        if self.label == label {
            return false;
        }
        log::trace!("Active section {} -> {label}", self.label);
        self.label = label;
        true
    }
}

/// Height of `rect` inside a viewport of `viewport_height`, negative when fully off screen.
fn visible_height(viewport_height: f64, rect: ColumnRect) -> f64 {
    (rect.top + rect.height).min(viewport_height) - rect.top.max(0.0)
}

#[derive(Clone, Debug)]
/// Leading-edge rate limit: the first event fires, then events are ignored for `window`.
pub struct Throttle {
    window: Duration,
    last_fire: Option<Instant>,
}

impl Throttle {
    #[must_use]
    /// Throttle with the given cooldown.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fire: None,
        }
    }

    /// Whether an event arriving at `now` should be handled.
    pub fn should_fire(&mut self, now: Instant) -> bool {
        let ready = self
            .last_fire
            .is_none_or(|last| now.saturating_duration_since(last) >= self.window);
        if ready {
            self.last_fire = Some(now);
        }
        ready
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE)
    }
}

#[derive(Clone, Debug)]
/// Trailing-edge rate limit: fires once events have stopped for `quiet`.
pub struct Debounce {
    quiet: Duration,
    last_event: Option<Instant>,
}

impl Debounce {
    #[must_use]
    /// Debounce with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_event: None,
        }
    }

    /// Record an event at `now`, restarting the quiet period.
    pub fn trigger(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    #[must_use]
    /// Whether an event is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.last_event.is_some()
    }

    /// Whether the pending event should fire at `now`. Fires at most once per burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(last) if now.saturating_duration_since(last) >= self.quiet => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
#[path = "tests/layout.rs"]
mod tests;
