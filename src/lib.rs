//! 4x4 homogeneous transformation matrices for the css3d scene graph.
//!
//! Every node transform, camera and projection is a [`Matrix4`]: sixteen
//! numbers stored row-major. The constructors and operations on it are
//! unchecked; the `try_*` methods in [`numerics::validation`] add
//! precondition checks driven by a [`ValidationConfig`].

pub mod numerics;

pub use numerics::config::ValidationConfig;
pub use numerics::error::MatrixError;
pub use numerics::types::matrix::{Matrix3x3, Matrix4, DEG_TO_RAD};
pub use numerics::types::point::Point3;
pub use numerics::types::quaternion::{AxisAngle, Quaternion};
pub use numerics::types::traits::FloatingPoint;
pub use numerics::types::vector::Vector3;
