use crate::core::models::rotation::AxisAngle;
use crate::core::utils::geometry::random_axis_angle;
use rand::Rng;

/// Proposes a new rotation from the current one.
pub trait TakeStep {
    fn take_step<R: Rng + ?Sized>(&mut self, current: &AxisAngle, rng: &mut R) -> AxisAngle;
}

/// Composes the current rotation with a random rotation about a uniformly
/// distributed axis by an angle of at most `max_angle`.
///
/// With `max_angle = π` every proposal is an independent random orientation.
#[derive(Debug, Clone, Copy)]
pub struct RandomRotationStep {
    pub max_angle: f64,
}

impl RandomRotationStep {
    pub fn new(max_angle: f64) -> Self {
        Self { max_angle }
    }
}

impl TakeStep for RandomRotationStep {
    fn take_step<R: Rng + ?Sized>(&mut self, current: &AxisAngle, rng: &mut R) -> AxisAngle {
        let perturbation = random_axis_angle(rng, self.max_angle);
        current.then(&perturbation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn small_steps_stay_close_to_current_rotation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut step = RandomRotationStep::new(0.1);
        let current = AxisAngle::new(Vector3::new(0.2, -0.4, 1.0));

        for _ in 0..50 {
            let proposed = step.take_step(&current, &mut rng);
            let relative = proposed.to_rotation() * current.to_rotation().inverse();
            let angle = UnitQuaternion::from_rotation_matrix(&relative).angle();
            assert!(angle <= 0.1 + 1e-9);
        }
    }

    #[test]
    fn same_seed_gives_same_proposals() {
        let mut step = RandomRotationStep::new(std::f64::consts::PI);
        let start = AxisAngle::identity();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            assert_eq!(step.take_step(&start, &mut a), step.take_step(&start, &mut b));
        }
    }
}
