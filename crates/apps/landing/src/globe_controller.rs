//! Rotation controller for the orthographic globe.
//!
//! This module owns the globe orientation and decides who may change it:
//! - Auto-rotation advances longitude by a fixed step every animation frame
//! - Dragging maps pointer deltas linearly onto longitude/latitude
//! - After a drag ends, auto-rotation resumes on a short grace timer
//!
//! Auto-rotation and dragging never mutate the rotation in the same frame.

use foundation::math::wrap_lon_deg;
use foundation::time::Millis;
use runtime::{Scheduler, TimerHandle};

use crate::timers::PageTimer;

/// Grace period between pointer release and auto-rotation resuming.
pub const RESUME_AUTO_ROTATE_MS: f64 = 10.0;

/// Latitude tilt is clamped to this magnitude (degrees).
const MAX_TILT_DEG: f64 = 90.0;

/// Globe orientation in degrees, in projection `rotate` order.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RotationState {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl RotationState {
    pub fn as_rotate(self) -> [f64; 2] {
        [self.lon_deg, self.lat_deg]
    }
}

/// Snapshot taken at pointer-down. Moves are applied relative to it so
/// rounding never accumulates over a long drag.
#[derive(Debug, Copy, Clone, PartialEq)]
struct DragSession {
    start_pos_px: [f64; 2],
    start_rotation: RotationState,
}

/// Globe controller state.
#[derive(Debug, Clone)]
pub struct GlobeController {
    rotation: RotationState,

    /// Whether the per-frame auto-rotation step applies.
    auto_rotate: bool,

    /// Longitude step per frame while auto-rotating.
    speed_deg: f64,

    /// Degrees per dragged pixel.
    sensitivity: f64,

    drag: Option<DragSession>,

    /// Pending grace timer that re-enables auto-rotation.
    resume_timer: Option<TimerHandle>,
}

impl GlobeController {
    pub fn new(speed_deg: f64, sensitivity: f64) -> Self {
        Self {
            rotation: RotationState::default(),
            auto_rotate: true,
            speed_deg,
            sensitivity,
            drag: None,
            resume_timer: None,
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    /// Handle pointer down on the canvas.
    ///
    /// Stops auto-rotation and any pending resume, then captures the start
    /// position and rotation.
    pub fn on_pointer_down(&mut self, pos_px: [f64; 2], scheduler: &mut Scheduler<PageTimer>) {
        scheduler.cancel_slot(&mut self.resume_timer);
        self.auto_rotate = false;
        self.drag = Some(DragSession {
            start_pos_px: pos_px,
            start_rotation: self.rotation,
        });
    }

    /// Handle pointer move anywhere on the page.
    ///
    /// Returns `true` when the rotation changed and the globe should be
    /// redrawn immediately.
    pub fn on_pointer_move(&mut self, pos_px: [f64; 2]) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        let dx = pos_px[0] - session.start_pos_px[0];
        let dy = pos_px[1] - session.start_pos_px[1];
        self.rotation = RotationState {
            lon_deg: session.start_rotation.lon_deg + dx * self.sensitivity,
            lat_deg: (session.start_rotation.lat_deg - dy * self.sensitivity)
                .clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
        };
        true
    }

    /// Handle pointer up anywhere on the page.
    pub fn on_pointer_up(&mut self, now: Millis, scheduler: &mut Scheduler<PageTimer>) {
        if self.drag.take().is_none() {
            return;
        }
        scheduler.cancel_slot(&mut self.resume_timer);
        self.resume_timer = Some(scheduler.schedule_once(
            now,
            RESUME_AUTO_ROTATE_MS,
            PageTimer::ResumeAutoRotate,
        ));
    }

    /// Called when a `ResumeAutoRotate` timer fires. Stale handles are ignored.
    pub fn on_resume_timer(&mut self, handle: TimerHandle) {
        if self.resume_timer == Some(handle) {
            self.resume_timer = None;
            if self.drag.is_none() {
                self.auto_rotate = true;
            }
        }
    }

    /// Advance one animation frame.
    pub fn update(&mut self) {
        if self.auto_rotate && self.drag.is_none() {
            self.rotation.lon_deg = wrap_lon_deg(self.rotation.lon_deg + self.speed_deg);
        }
    }

    pub fn teardown(&mut self, scheduler: &mut Scheduler<PageTimer>) {
        scheduler.cancel_slot(&mut self.resume_timer);
        self.drag = None;
    }
}
