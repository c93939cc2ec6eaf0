use nalgebra::{Rotation3, UnitQuaternion, Vector3};

/// A rotation stored as a scaled axis: the direction is the axis and the norm is
/// the angle in radians. The zero vector is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisAngle(Vector3<f64>);

impl AxisAngle {
    pub fn new(scaled_axis: Vector3<f64>) -> Self {
        Self(scaled_axis)
    }

    pub fn identity() -> Self {
        Self(Vector3::zeros())
    }

    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Self {
        match axis.try_normalize(f64::EPSILON) {
            Some(unit) => Self(unit * angle),
            None => Self::identity(),
        }
    }

    /// Recovers the scaled axis of a rotation matrix.
    ///
    /// Goes through a unit quaternion, which keeps a well-defined axis at an
    /// angle of exactly π where the antisymmetric part of the matrix vanishes.
    /// The quaternion with a non-negative scalar part is used, so the returned
    /// angle always lies in `[0, π]`.
    pub fn from_rotation(rotation: &Rotation3<f64>) -> Self {
        let quaternion = UnitQuaternion::from_rotation_matrix(rotation);
        Self(quaternion.scaled_axis())
    }

    #[inline]
    pub fn scaled_axis(&self) -> &Vector3<f64> {
        &self.0
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.0.norm()
    }

    pub fn to_rotation(&self) -> Rotation3<f64> {
        Rotation3::new(self.0)
    }

    /// The rotation that applies `self` first and then `other`.
    pub fn then(&self, other: &AxisAngle) -> Self {
        Self::from_rotation(&(other.to_rotation() * self.to_rotation()))
    }
}

impl From<Vector3<f64>> for AxisAngle {
    fn from(v: Vector3<f64>) -> Self {
        Self(v)
    }
}

impl From<&Rotation3<f64>> for AxisAngle {
    fn from(r: &Rotation3<f64>) -> Self {
        Self::from_rotation(r)
    }
}
