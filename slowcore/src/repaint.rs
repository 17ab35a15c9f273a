//! Repaint controller
//!
//! egui redraws the whole window every frame it runs. A document viewer
//! has nothing to animate, so most of the time there should be no frames
//! at all. `RepaintController` sits between the app and egui's scheduler
//! and tracks *why* a frame is needed:
//!
//! 1. **Input**: click, key, wheel. egui wakes for these on its own.
//! 2. **State change**: the app mutated something outside an input event
//!    (a background load finished). One extra frame.
//! 3. **Polling**: work is in flight and the app wants to check on it at
//!    a fixed rate until it calls `set_polling(false)`.
//! 4. **Idle**: nothing. egui sleeps until the next input event.

use std::time::Duration;

/// How often to wake while polling.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Why this frame is being painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintReason {
    /// First frame, always painted.
    Init,
    /// User input (mouse move, key press, scroll).
    Input,
    /// App-requested repaint (state changed internally).
    StateChange,
    /// Timed wake-up while work is in flight.
    Polling,
}

/// Controls when the egui context should request repaints.
///
/// Call [`RepaintController::begin_frame`] at the top of `update()` and
/// [`RepaintController::end_frame`] at the bottom.
pub struct RepaintController {
    polling: bool,
    needs_repaint: bool,
    interval: Duration,
    frame: u64,
    reason: RepaintReason,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            polling: false,
            needs_repaint: false,
            interval: DEFAULT_POLL_INTERVAL,
            frame: 0,
            reason: RepaintReason::Init,
        }
    }

    /// Keep waking at the poll interval until switched off.
    pub fn set_polling(&mut self, polling: bool) {
        self.polling = polling;
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Request a single repaint at the end of this frame.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Call at the **start** of `update()`.
    pub fn begin_frame(&mut self, ctx: &egui::Context) {
        let had_input = ctx.input(|i| {
            !i.events.is_empty()
                || i.pointer.any_pressed()
                || i.pointer.any_released()
                || i.raw_scroll_delta != egui::Vec2::ZERO
                || !i.raw.dropped_files.is_empty()
        });
        self.reason = Self::classify(self.frame, had_input, self.needs_repaint, self.polling);
        self.needs_repaint = false;
    }

    /// Call at the **end** of `update()`.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        tracing::trace!("frame {} painted ({:?})", self.frame, self.reason);
        self.frame += 1;
        if self.needs_repaint {
            ctx.request_repaint();
        } else if self.polling {
            ctx.request_repaint_after(self.interval);
        }
    }

    fn classify(frame: u64, had_input: bool, needs_repaint: bool, polling: bool) -> RepaintReason {
        if frame == 0 {
            RepaintReason::Init
        } else if had_input {
            RepaintReason::Input
        } else if needs_repaint {
            RepaintReason::StateChange
        } else if polling {
            RepaintReason::Polling
        } else {
            // Window resize and focus changes arrive without events.
            RepaintReason::Input
        }
    }
}
