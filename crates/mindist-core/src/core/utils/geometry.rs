use crate::core::models::points::{PointSet, PointSetError};
use crate::core::models::rotation::AxisAngle;
use nalgebra::{Matrix3, Quaternion, Rotation3, SVD, Unit, UnitQuaternion, Vector3};
use rand::Rng;
use std::f64::consts::PI;

/// Below this Frobenius norm a cross-covariance carries no orientation
/// information and the identity is returned.
const DEGENERATE_COVARIANCE_NORM: f64 = 1e-300;

pub fn center_of_mass_to_origin(points: &PointSet) -> PointSet {
    points.centered()
}

pub fn apply_rotation(points: &PointSet, rotation: &AxisAngle) -> PointSet {
    points.rotated(&rotation.to_rotation())
}

pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_radians: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle_radians)
}

/// Least-squares rotation of `moving` onto `reference` for a fixed
/// correspondence (Kabsch). Both sets must already be centered.
///
/// Returns the Euclidean distance after rotation, the rotated `moving` set and
/// the rotation itself.
pub fn align_rotation(
    reference: &PointSet,
    moving: &PointSet,
) -> Result<(f64, PointSet, Rotation3<f64>), PointSetError> {
    reference.check_same_len(moving)?;
    let covariance = reference
        .iter()
        .zip(moving.iter())
        .fold(Matrix3::zeros(), |acc, (a, b)| acc + b.coords * a.coords.transpose());

    let rotation = optimal_rotation(&covariance);
    let aligned = moving.rotated(&rotation);
    let distance = reference.distance(&aligned)?;
    Ok((distance, aligned, rotation))
}

/// Rotation `R` maximizing `tr(R H)` for a cross-covariance
/// `H = Σ w b aᵀ`, i.e. minimizing `Σ w |a - R b|²`.
///
/// Reflections are excluded by flipping the axis of the smallest singular
/// value when `det(V Uᵀ) < 0`. A vanishing or undecomposable covariance yields
/// the identity.
pub fn optimal_rotation(covariance: &Matrix3<f64>) -> Rotation3<f64> {
    if covariance.norm() < DEGENERATE_COVARIANCE_NORM {
        return Rotation3::identity();
    }
    let Some(svd) = SVD::try_new(*covariance, true, true, f64::EPSILON, 0) else {
        tracing::warn!("SVD of cross-covariance did not converge; using identity rotation.");
        return Rotation3::identity();
    };
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Rotation3::identity();
    };

    let v = v_t.transpose();
    let mut correction = Matrix3::identity();
    if (v * u.transpose()).determinant() < 0.0 {
        let smallest = svd.singular_values.imin();
        correction[(smallest, smallest)] = -1.0;
    }
    Rotation3::from_matrix_unchecked(v * correction * u.transpose())
}

/// A rotation drawn uniformly from SO(3) (Shoemake's subgroup algorithm).
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> Rotation3<f64> {
    let u1: f64 = rng.r#gen();
    let u2: f64 = rng.r#gen();
    let u3: f64 = rng.r#gen();
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    let q = Quaternion::new(
        a * (2.0 * PI * u2).sin(),
        a * (2.0 * PI * u2).cos(),
        b * (2.0 * PI * u3).sin(),
        b * (2.0 * PI * u3).cos(),
    );
    UnitQuaternion::from_quaternion(q).to_rotation_matrix()
}

/// A rotation about a uniformly random axis by an angle drawn uniformly from
/// `[0, max_angle]`.
pub fn random_axis_angle<R: Rng + ?Sized>(rng: &mut R, max_angle: f64) -> AxisAngle {
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let phi: f64 = rng.gen_range(0.0..2.0 * PI);
    let r = (1.0 - z * z).max(0.0).sqrt();
    let axis = Vector3::new(r * phi.cos(), r * phi.sin(), z);
    let angle = rng.r#gen::<f64>() * max_angle;
    AxisAngle::from_axis_angle(&axis, angle)
}
