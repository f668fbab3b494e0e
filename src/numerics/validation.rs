// src/numerics/validation.rs
// Checked variants of the Matrix4 operations whose preconditions the core
// functions leave unchecked.

use tracing::{debug, trace};

use crate::numerics::config::ValidationConfig;
use crate::numerics::error::MatrixError;
use crate::numerics::types::matrix::{Matrix3x3, Matrix4};
use crate::numerics::types::point::Point3;
use crate::numerics::types::quaternion::AxisAngle;
use crate::numerics::types::traits::FloatingPoint;
use crate::numerics::types::vector::Vector3;

impl<T: FloatingPoint> Matrix4<T> {
    /// Index of the first NaN or infinite element, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_finite())
    }

    /// How far this matrix is from a rigid transform.
    ///
    /// The largest of: the element-wise distance of `R^T R` to identity,
    /// `|det R - 1|`, and the distance of the bottom row to `(0, 0, 0, 1)`.
    pub fn rigid_deviation(&self) -> T {
        let r = self.rotation_block();
        let mut deviation = (r.transpose() * r).max_abs_diff(&Matrix3x3::identity());

        let det = (r.determinant() - T::one()).abs();
        if det > deviation {
            deviation = det;
        }

        let bottom = self.row(3);
        let expected = [T::zero(), T::zero(), T::zero(), T::one()];
        for (actual, wanted) in bottom.iter().zip(expected.iter()) {
            let d = (*actual - *wanted).abs();
            if d > deviation {
                deviation = d;
            }
        }
        deviation
    }

    /// Rotation plus translation only, within `config.epsilon`.
    pub fn is_rigid(&self, config: &ValidationConfig) -> bool {
        self.first_non_finite().is_none() && self.rigid_deviation().to_f64() <= config.epsilon
    }

    /// Rigid with zero translation, within `config.epsilon`.
    pub fn is_rotation(&self, config: &ValidationConfig) -> bool {
        self.is_rigid(config) && self.translation_part().length().to_f64() <= config.epsilon
    }

    fn check_rigid(&self, config: &ValidationConfig) -> Result<(), MatrixError> {
        if let Some(index) = self.first_non_finite() {
            debug!(index, "rejected matrix with non-finite element");
            return Err(MatrixError::NonFinite { index });
        }

        let deviation = self.rigid_deviation().to_f64();
        if deviation > config.epsilon {
            debug!(deviation, epsilon = config.epsilon, "rejected non-rigid matrix");
            return Err(MatrixError::NotRigid { deviation, epsilon: config.epsilon });
        }
        Ok(())
    }

    /// `rotation_axis` that refuses an axis which is not unit length.
    pub fn try_rotation_axis(axis: Vector3<T>, angle: T, config: &ValidationConfig) -> Result<Self, MatrixError> {
        let length = axis.length().to_f64();
        if !length.is_finite() || (length - 1.0).abs() > config.epsilon {
            debug!(length, "rejected non-unit rotation axis");
            return Err(MatrixError::NonUnitAxis { length });
        }
        Ok(Self::rotation_axis(axis, angle))
    }

    /// `frustum` that refuses zero-width, zero-height or zero-depth volumes.
    #[allow(clippy::too_many_arguments)]
    pub fn try_frustum(
        left: T,
        right: T,
        bottom: T,
        top: T,
        near: T,
        far: T,
        config: &ValidationConfig,
    ) -> Result<Self, MatrixError> {
        let extents = [
            ("horizontal", right - left),
            ("vertical", top - bottom),
            ("depth", far - near),
        ];
        for (extent, size) in extents {
            if size.abs().to_f64() < config.min_length {
                debug!(extent, "rejected degenerate frustum");
                return Err(MatrixError::DegenerateFrustum { extent });
            }
        }

        let m = Self::frustum(left, right, bottom, top, near, far);
        trace!("built checked frustum");
        Ok(m)
    }

    /// `projection` that refuses a field of view outside (0, 180) degrees
    /// or a degenerate viewport.
    pub fn try_projection(
        fov: T,
        width: T,
        height: T,
        near: T,
        far: T,
        config: &ValidationConfig,
    ) -> Result<Self, MatrixError> {
        let fov_degrees = fov.to_f64();
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            debug!(fov = fov_degrees, "rejected field of view");
            return Err(MatrixError::InvalidFieldOfView { fov: fov_degrees });
        }
        if height.abs().to_f64() < config.min_length {
            debug!("rejected zero viewport height");
            return Err(MatrixError::DegenerateFrustum { extent: "vertical" });
        }

        let m = Self::projection(fov, width, height, near, far);
        // a zero width or near plane collapses the derived frustum
        if !m.get(0, 0).is_finite() {
            debug!("rejected projection with collapsed frustum");
            return Err(MatrixError::DegenerateFrustum { extent: "horizontal" });
        }
        if let Some(index) = m.first_non_finite() {
            debug!(index, "rejected projection with non-finite element");
            return Err(MatrixError::NonFinite { index });
        }
        Ok(m)
    }

    /// `look_at` that refuses coincident eye/target or an `up` parallel to
    /// the view direction.
    pub fn try_look_at(
        eye: Point3<T>,
        target: Point3<T>,
        up: Vector3<T>,
        config: &ValidationConfig,
    ) -> Result<Self, MatrixError> {
        let view = eye - target;
        if view.length().to_f64() < config.min_length {
            debug!("rejected look-at with coincident eye and target");
            return Err(MatrixError::DegenerateLookAt { reason: "eye and target coincide" });
        }
        if view.normalize().cross(&up).length().to_f64() < config.min_length {
            debug!("rejected look-at with up parallel to view direction");
            return Err(MatrixError::DegenerateLookAt { reason: "up is parallel to the view direction" });
        }
        Ok(Self::look_at(eye, target, up))
    }

    /// `fast_inverse` that first checks the matrix is rigid.
    pub fn try_fast_inverse(self, config: &ValidationConfig) -> Result<Self, MatrixError> {
        self.check_rigid(config)?;
        trace!("inverting rigid matrix");
        Ok(self.fast_inverse())
    }

    /// `to_axis_angle` that first checks the matrix is a pure rotation.
    pub fn try_to_axis_angle(&self, config: &ValidationConfig) -> Result<AxisAngle<T>, MatrixError> {
        self.check_rigid(config)?;
        let translation = self.translation_part().length().to_f64();
        if translation > config.epsilon {
            debug!(translation, "rejected rotation with translation");
            return Err(MatrixError::NotRotation { translation });
        }
        Ok(self.to_axis_angle())
    }
}
