//! Data-driven feel tuning
//!
//! Non-protocol knobs only: scoring constants, countdown length, and goal
//! count are exact gameplay contracts and live in `consts`. These values just
//! shape how the controls feel and may be overridden from JSON at startup.

use serde::{Deserialize, Serialize};

use crate::consts::{DRAG_SENSITIVITY, GRAVITY_SMOOTHING};

/// Control-feel overrides
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-read lerp factor toward the gravity target (1.0 = no smoothing)
    pub gravity_smoothing: f32,
    /// Degrees of pseudo-tilt per pixel of pointer drag
    pub drag_sensitivity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity_smoothing: GRAVITY_SMOOTHING,
            drag_sensitivity: DRAG_SENSITIVITY,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults, invalid
    /// JSON falls back wholesale (logged, never fatal).
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("invalid tuning JSON ({err}), using defaults");
                Self::default()
            }
        }
    }
}
