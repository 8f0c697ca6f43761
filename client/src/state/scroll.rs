//! Scroll direction / threshold trackers.
//!
//! DESIGN
//! ======
//! Pure state machines fed one committed offset per animation frame by
//! `util::scroll`. They publish only on change so the signals built on top
//! never fire redundant updates.
//!
//! Direction uses a hysteresis band: small jitters are ignored until the
//! page has moved more than [`DIRECTION_HYSTERESIS_PX`] away from the anchor.
//! The anchor follows the furthest point reached in the current direction, so
//! a reversal is measured from the turning point, and slow scrolling made of
//! many small steps still accumulates into a flip.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Movement needed before the direction may change.
pub const DIRECTION_HYSTERESIS_PX: u32 = 10;

/// Default offset past which the page counts as scrolled.
pub const DEFAULT_SCROLL_THRESHOLD_PX: u32 = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    /// No movement has exceeded the hysteresis band yet.
    #[default]
    Unknown,
    Up,
    Down,
}

/// Clamp a raw browser offset to whole non-negative pixels. Overscroll
/// bounce reports negative values; NaN is treated as the top.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_offset(raw: f64) -> u32 {
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    raw.round().min(f64::from(u32::MAX)) as u32
}

// =============================================================================
// DIRECTION
// =============================================================================

/// Result of feeding one frame to a [`DirectionTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionSample {
    pub offset: u32,
    /// Set only when the published direction changed on this frame.
    pub direction: Option<ScrollDirection>,
}

#[derive(Clone, Debug, Default)]
pub struct DirectionTracker {
    direction: ScrollDirection,
    anchor: u32,
}

impl DirectionTracker {
    /// Tracker anchored at the offset the page was at when it started.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self { direction: ScrollDirection::Unknown, anchor: clamp_offset(initial) }
    }

    #[must_use]
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn sample(&mut self, raw: f64) -> DirectionSample {
        let offset = clamp_offset(raw);
        let mut changed = None;

        if offset.abs_diff(self.anchor) > DIRECTION_HYSTERESIS_PX {
            let next = if offset > self.anchor { ScrollDirection::Down } else { ScrollDirection::Up };
            if next != self.direction {
                self.direction = next;
                changed = Some(next);
            }
            self.anchor = offset;
        } else if self.extends_current_direction(offset) {
            self.anchor = offset;
        }

        DirectionSample { offset, direction: changed }
    }

    fn extends_current_direction(&self, offset: u32) -> bool {
        match self.direction {
            ScrollDirection::Down => offset > self.anchor,
            ScrollDirection::Up => offset < self.anchor,
            ScrollDirection::Unknown => false,
        }
    }
}

// =============================================================================
// THRESHOLD
// =============================================================================

#[derive(Clone, Debug)]
pub struct ThresholdTracker {
    threshold: u32,
    scrolled: bool,
}

impl ThresholdTracker {
    /// Evaluates `initial` immediately so a page restored mid-scroll starts
    /// in the right state.
    #[must_use]
    pub fn new(threshold: u32, initial: f64) -> Self {
        Self { threshold, scrolled: clamp_offset(initial) > threshold }
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed one frame; returns the new value only when it flipped.
    pub fn sample(&mut self, raw: f64) -> Option<bool> {
        let scrolled = clamp_offset(raw) > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}

// =============================================================================
// FRAME GATE
// =============================================================================

/// Coalesces scroll events so at most one recomputation runs per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Called on every scroll event. Returns `true` when the caller should
    /// request an animation frame; `false` when one is already queued.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called at the start of the frame callback.
    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

// =============================================================================
// HEADER VISIBILITY
// =============================================================================

/// Offset below which the sticky header never hides.
pub const HEADER_HIDE_OFFSET_PX: u32 = 100;

/// Hide the sticky header while scrolling down past [`HEADER_HIDE_OFFSET_PX`].
#[must_use]
pub fn should_hide_header(direction: ScrollDirection, offset: u32) -> bool {
    direction == ScrollDirection::Down && offset > HEADER_HIDE_OFFSET_PX
}
