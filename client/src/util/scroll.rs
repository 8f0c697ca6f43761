//! Window scroll bindings exposed as Leptos signals.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components call these inside a reactive owner. Under `hydrate` a window
//! `scroll` listener is installed and removed again when the owner is
//! cleaned up; on the server the signals keep their initial values.
//!
//! Each burst of scroll events is coalesced by a [`FrameGate`] into a single
//! `requestAnimationFrame` callback, which reads the committed offset and
//! feeds it to the pure trackers in `state::scroll`.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::state::scroll::FrameGate;
use crate::state::scroll::{DirectionTracker, ScrollDirection, ThresholdTracker};

/// Signals returned by [`use_scroll_direction`].
#[derive(Clone, Copy)]
pub struct ScrollSignals {
    pub direction: ReadSignal<ScrollDirection>,
    pub offset: ReadSignal<u32>,
}

/// Track scroll direction (with hysteresis) and the current offset.
pub fn use_scroll_direction() -> ScrollSignals {
    let (direction, set_direction) = signal(ScrollDirection::Unknown);
    let (offset, set_offset) = signal(0_u32);

    let mut tracker = DirectionTracker::new(current_offset());
    on_scroll_frame(move |raw| {
        let sample = tracker.sample(raw);
        if offset.get_untracked() != sample.offset {
            set_offset.set(sample.offset);
        }
        if let Some(next) = sample.direction {
            set_direction.set(next);
        }
    });

    ScrollSignals { direction, offset }
}

/// `true` while the page is scrolled past `threshold` pixels.
pub fn use_scrolled(threshold: u32) -> ReadSignal<bool> {
    let mut tracker = ThresholdTracker::new(threshold, current_offset());
    // Start false to match server-rendered markup; effects run only after
    // hydration, which is where the eager check lands.
    let (scrolled, set_scrolled) = signal(false);
    let initially_scrolled = tracker.is_scrolled();
    Effect::new(move || {
        if initially_scrolled {
            set_scrolled.set(true);
        }
    });

    on_scroll_frame(move |raw| {
        if let Some(next) = tracker.sample(raw) {
            set_scrolled.set(next);
        }
    });

    scrolled
}

/// Current vertical scroll offset, or 0 outside the browser.
fn current_offset() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Run `on_frame` with the committed offset at most once per animation frame
/// while the page scrolls.
fn on_scroll_frame<F>(on_frame: F)
where
    F: FnMut(f64) + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        let gate = Rc::new(RefCell::new(FrameGate::default()));
        let on_frame = Rc::new(RefCell::new(on_frame));

        let handle = window_event_listener(leptos::ev::scroll, move |_| {
            if !gate.borrow_mut().request() {
                return;
            }
            let gate = Rc::clone(&gate);
            let on_frame = Rc::clone(&on_frame);
            request_animation_frame(move || {
                gate.borrow_mut().begin_frame();
                (on_frame.borrow_mut())(current_offset());
            });
        });
        on_cleanup(move || handle.remove());
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = on_frame;
    }
}
