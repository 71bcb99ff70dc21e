use super::registry::BodyRegistry;

/// Global play/pause and speed for the orbital animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRunState {
    pub running: bool,
    pub speed_factor: f32,
}

impl Default for AnimationRunState {
    fn default() -> Self {
        AnimationRunState {
            running: true,
            speed_factor: 1.0,
        }
    }
}

/// Spins every body around the orbit axis, one fixed step per rendered frame.
///
/// Steps are per frame, not per second: at a higher frame rate the bodies
/// move faster. Angular rates in body tables are written with that in mind,
/// so don't "fix" this by scaling with elapsed time.
///
/// This is the only writer of body transforms.
#[derive(Debug, Default)]
pub struct OrbitAnimator {
    state: AnimationRunState,
}

impl OrbitAnimator {
    pub fn new(state: AnimationRunState) -> Self {
        let mut animator = OrbitAnimator::default();
        animator.set_running(state.running);
        animator.set_speed_factor(state.speed_factor);
        animator
    }

    pub fn tick(&self, registry: &mut BodyRegistry) {
        if !self.state.running {
            return;
        }
        let speed = self.state.speed_factor;
        for body in registry.bodies_mut() {
            let delta = body.info.angular_rate * speed;
            body.transform_mut().advance(delta);
        }
    }

    pub fn run_state(&self) -> AnimationRunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn speed_factor(&self) -> f32 {
        self.state.speed_factor
    }

    pub fn set_running(&mut self, running: bool) {
        self.state.running = running;
    }

    /// Flips play/pause and returns the new state.
    pub fn toggle_running(&mut self) -> bool {
        self.state.running = !self.state.running;
        self.state.running
    }

    /// Negative speeds clamp to zero. NaN and infinities are ignored.
    pub fn set_speed_factor(&mut self, speed_factor: f32) {
        if !speed_factor.is_finite() {
            log::warn!("Ignoring non-finite speed factor {}", speed_factor);
            return;
        }
        if speed_factor < 0.0 {
            log::warn!("Clamping speed factor {} to 0", speed_factor);
        }
        self.state.speed_factor = speed_factor.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::registry::BodySpec;

    fn two_body_registry() -> BodyRegistry {
        let spec = |key: &str, rate: f32, x: f32| BodySpec {
            key: key.to_owned(),
            name: key.to_uppercase(),
            description: String::new(),
            radius: 1.0,
            angular_rate: rate,
            position: [x, 0.0, 0.0],
            color: "808080".to_owned(),
            ring: None,
        };
        BodyRegistry::from_specs(vec![spec("sun", 0.0004, 0.0), spec("earth", 0.004, 27.0)]).unwrap()
    }

    fn angles(registry: &BodyRegistry) -> Vec<f32> {
        registry.bodies().map(|b| b.transform().angle()).collect()
    }

    #[test]
    fn test_defaults() {
        let animator = OrbitAnimator::default();
        assert!(animator.is_running());
        assert_eq!(animator.speed_factor(), 1.0);
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut registry = two_body_registry();
        let mut animator = OrbitAnimator::default();
        animator.set_running(false);

        for _ in 0..25 {
            animator.tick(&mut registry);
        }
        assert_eq!(angles(&registry), [0.0, 0.0]);
    }

    #[test]
    fn test_speed_factor_scales_step() {
        let mut registry = two_body_registry();
        let mut animator = OrbitAnimator::default();
        animator.set_speed_factor(2.0);

        animator.tick(&mut registry);
        let after_one = angles(&registry);
        approx::assert_relative_eq!(after_one[0], 2.0 * 0.0004);
        approx::assert_relative_eq!(after_one[1], 2.0 * 0.004);

        animator.tick(&mut registry);
        let after_two = angles(&registry);
        approx::assert_relative_eq!(after_two[1] - after_one[1], 2.0 * 0.004, epsilon = 1e-7);
    }

    #[test]
    fn test_speed_factor_clamps() {
        let mut animator = OrbitAnimator::default();
        animator.set_speed_factor(-3.0);
        assert_eq!(animator.speed_factor(), 0.0);

        animator.set_speed_factor(1.5);
        animator.set_speed_factor(f32::NAN);
        assert_eq!(animator.speed_factor(), 1.5);

        let animator = OrbitAnimator::new(AnimationRunState {
            running: false,
            speed_factor: -1.0,
        });
        assert!(!animator.is_running());
        assert_eq!(animator.speed_factor(), 0.0);
    }

    #[test]
    fn test_toggle_is_symmetric() {
        let mut animator = OrbitAnimator::default();
        assert!(!animator.toggle_running());
        assert!(animator.toggle_running());
    }

    #[test]
    fn test_zero_speed_holds_still() {
        let mut registry = two_body_registry();
        let mut animator = OrbitAnimator::default();
        animator.set_speed_factor(0.0);
        animator.tick(&mut registry);
        assert_eq!(angles(&registry), [0.0, 0.0]);
    }
}
