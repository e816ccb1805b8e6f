//! Tilt/drag input collaborator
//!
//! The platform layer (device orientation events, pointer events) lives
//! outside the core; this module owns the mapping policy: null-axis samples
//! are dropped before they can reach the gravity mapper, pointer drags become
//! pseudo-tilt angles, and a denied orientation permission falls back to drag
//! mode permanently instead of halting.

use crate::consts::MAX_TILT_DEG;

/// Which input source currently drives the gravity mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Device orientation (tilt) events
    Orientation,
    /// Pointer drag producing pseudo-tilt
    Drag,
}

/// Stateful tilt source fed by raw platform events.
///
/// Every method returns the `(beta, gamma)` degree pair to forward to
/// [`crate::sim::GravityMapper`], or `None` when nothing should be forwarded.
#[derive(Debug)]
pub struct TiltInput {
    mode: InputMode,
    /// Degrees of pseudo-tilt per pixel of drag
    sensitivity: f32,
    drag_anchor: Option<(f32, f32)>,
}

impl TiltInput {
    pub fn new(mode: InputMode, sensitivity: f32) -> Self {
        Self {
            mode,
            sensitivity,
            drag_anchor: None,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Ingest a device orientation sample. A sample with any unavailable axis
    /// is dropped whole — `null` never reaches the mapper.
    pub fn orientation_sample(
        &mut self,
        beta: Option<f64>,
        gamma: Option<f64>,
    ) -> Option<(f32, f32)> {
        if self.mode != InputMode::Orientation {
            return None;
        }
        let (beta, gamma) = (beta?, gamma?);
        Some((beta as f32, gamma as f32))
    }

    /// Orientation permission was denied. Terminal for that capability only:
    /// switch to drag and keep playing.
    pub fn permission_denied(&mut self) {
        if self.mode == InputMode::Orientation {
            log::warn!("orientation permission denied, falling back to drag input");
            self.mode = InputMode::Drag;
        }
    }

    /// Begin a drag at screen position (x, y)
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.mode == InputMode::Drag {
            self.drag_anchor = Some((x, y));
        }
    }

    /// Drag to (x, y). Offsets from the anchor become pseudo-tilt, clamped to
    /// the full-tilt angle so a long drag saturates exactly like full tilt.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (ax, ay) = self.drag_anchor?;
        // Dragging down pulls the ball toward the viewer, like tilting forward
        let beta = ((y - ay) * self.sensitivity).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
        let gamma = ((x - ax) * self.sensitivity).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
        Some((beta, gamma))
    }

    /// End the drag; the pseudo-tilt returns to level
    pub fn pointer_up(&mut self) -> Option<(f32, f32)> {
        self.drag_anchor.take().map(|_| (0.0, 0.0))
    }
}
