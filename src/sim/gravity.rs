//! Tilt-to-gravity mapping
//!
//! Converts raw two-axis tilt (or drag-derived pseudo-tilt) in degrees into a
//! smoothed world-plane gravity vector. Y is always 0; the arena floor is the
//! XZ plane.

use glam::Vec3;

use crate::consts::*;

/// Maps raw tilt angles to a smoothed gravity vector.
///
/// `update` ingests angles whenever input arrives; `gravity_vector` is read
/// once per physics slice and lerps the current vector toward the latest
/// target, so gravity eases in rather than snapping.
#[derive(Debug, Clone)]
pub struct GravityMapper {
    current: Vec3,
    target: Vec3,
    /// Per-read lerp factor, 1.0 = instant (useful for deterministic tests)
    smoothing: f32,
    /// Last raw angles, kept for diagnostics
    last_beta: f32,
    last_gamma: f32,
}

impl Default for GravityMapper {
    fn default() -> Self {
        Self::new(GRAVITY_SMOOTHING)
    }
}

impl GravityMapper {
    pub fn new(smoothing: f32) -> Self {
        Self {
            current: Vec3::ZERO,
            target: Vec3::ZERO,
            smoothing: smoothing.clamp(0.0, 1.0),
            last_beta: 0.0,
            last_gamma: 0.0,
        }
    }

    /// Ingest a tilt sample. `beta_deg` is forward/back, `gamma_deg` is
    /// left/right. Never fails; out-of-range input saturates.
    pub fn update(&mut self, beta_deg: f32, gamma_deg: f32) {
        self.last_beta = beta_deg;
        self.last_gamma = gamma_deg;

        let beta = apply_deadzone(beta_deg);
        let gamma = apply_deadzone(gamma_deg);

        if beta.abs() > GIMBAL_WARN_DEG {
            log::warn!("tilt beta {beta:.1}° near gimbal singularity, clamping");
        }
        // Keep the forward/back axis away from ±90°
        let beta = beta.clamp(-TILT_CLAMP_DEG, TILT_CLAMP_DEG);

        let nx = (gamma / MAX_TILT_DEG).clamp(-1.0, 1.0);
        let nz = (beta / MAX_TILT_DEG).clamp(-1.0, 1.0);

        // Gamma pulls along +X; beta is sign-inverted onto Z so tilting the
        // device forward pulls the ball toward the viewer.
        let target = Vec3::new(nx * STANDARD_GRAVITY, 0.0, -nz * STANDARD_GRAVITY);
        self.target = target.clamp_length_max(GRAVITY_MULTIPLIER * STANDARD_GRAVITY);
    }

    /// Read the smoothed gravity vector. Each read advances the smoothing.
    pub fn gravity_vector(&mut self) -> Vec3 {
        self.current = self.current.lerp(self.target, self.smoothing);
        self.current
    }

    /// Latest unsmoothed target (for HUD/debug readouts)
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Raw angles from the last `update` call
    pub fn last_angles(&self) -> (f32, f32) {
        (self.last_beta, self.last_gamma)
    }

    /// Zero both vectors and the cached diagnostic angles
    pub fn reset(&mut self) {
        self.current = Vec3::ZERO;
        self.target = Vec3::ZERO;
        self.last_beta = 0.0;
        self.last_gamma = 0.0;
    }
}

/// Treat near-zero axes as exactly zero to suppress sensor-noise drift
#[inline]
fn apply_deadzone(angle_deg: f32) -> f32 {
    if angle_deg.abs() < DEADZONE_DEG {
        0.0
    } else {
        angle_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Mapper with smoothing 1.0 so reads return the target directly
    fn instant() -> GravityMapper {
        GravityMapper::new(1.0)
    }

    #[test]
    fn deadzone_zeroes_small_input() {
        let mut m = instant();
        m.update(1.5, 1.5);
        assert_eq!(m.gravity_vector(), Vec3::ZERO);

        m.update(-1.9, 1.99);
        assert_eq!(m.gravity_vector(), Vec3::ZERO);
    }

    #[test]
    fn full_gamma_tilt_maps_to_one_g_on_x() {
        let mut m = instant();
        m.update(0.0, 45.0);
        let g = m.gravity_vector();
        assert!((g.x - STANDARD_GRAVITY).abs() < 1e-5);
        assert_eq!(g.y, 0.0);
        assert_eq!(g.z, 0.0);
    }

    #[test]
    fn full_beta_tilt_maps_to_negative_z() {
        let mut m = instant();
        m.update(45.0, 0.0);
        let g = m.gravity_vector();
        assert_eq!(g.x, 0.0);
        assert!((g.z + STANDARD_GRAVITY).abs() < 1e-5);
    }

    #[test]
    fn tilt_beyond_max_saturates() {
        let mut a = instant();
        let mut b = instant();
        a.update(0.0, 90.0);
        b.update(0.0, 45.0);
        assert_eq!(a.gravity_vector(), b.gravity_vector());
    }

    #[test]
    fn gimbal_clamp_on_forward_axis() {
        let mut a = instant();
        let mut b = instant();
        a.update(89.0, 0.0);
        b.update(80.0, 0.0);
        assert_eq!(a.gravity_vector(), b.gravity_vector());
    }

    #[test]
    fn smoothing_converges_without_overshoot() {
        let mut m = GravityMapper::new(0.15);
        m.update(0.0, 45.0);

        let mut prev = m.gravity_vector().x;
        for _ in 0..200 {
            let x = m.gravity_vector().x;
            assert!(x >= prev - 1e-6, "must approach target monotonically");
            assert!(x <= STANDARD_GRAVITY + 1e-4, "must never overshoot");
            prev = x;
        }
        assert!((prev - STANDARD_GRAVITY).abs() < 1e-2);
    }

    #[test]
    fn reset_zeroes_state() {
        let mut m = GravityMapper::new(0.15);
        m.update(30.0, 30.0);
        m.gravity_vector();
        m.reset();
        assert_eq!(m.gravity_vector(), Vec3::ZERO);
        assert_eq!(m.target(), Vec3::ZERO);
        assert_eq!(m.last_angles(), (0.0, 0.0));
    }

    proptest! {
        #[test]
        fn magnitude_never_exceeds_multiplier(
            beta in -360.0f32..360.0,
            gamma in -360.0f32..360.0,
        ) {
            let mut m = instant();
            m.update(beta, gamma);
            let g = m.gravity_vector();
            prop_assert!(g.length() <= GRAVITY_MULTIPLIER * STANDARD_GRAVITY + 1e-4);
            prop_assert!(g.is_finite());
        }

        #[test]
        fn y_component_always_zero(
            beta in -360.0f32..360.0,
            gamma in -360.0f32..360.0,
        ) {
            let mut m = GravityMapper::new(0.3);
            m.update(beta, gamma);
            for _ in 0..10 {
                prop_assert_eq!(m.gravity_vector().y, 0.0);
            }
        }
    }
}
