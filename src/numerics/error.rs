// src/numerics/error.rs
// Errors reported by the validating entry points in `validation`.

/// Errors that can occur when a transform precondition is checked
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    #[error("Matrix is not rigid: deviation {deviation} exceeds tolerance {epsilon}")]
    NotRigid { deviation: f64, epsilon: f64 },

    #[error("Matrix is not a pure rotation: translation length {translation}")]
    NotRotation { translation: f64 },

    #[error("Degenerate frustum: {extent} extent is zero")]
    DegenerateFrustum { extent: &'static str },

    #[error("Invalid field of view: {fov} degrees is outside (0, 180)")]
    InvalidFieldOfView { fov: f64 },

    #[error("Degenerate look-at: {reason}")]
    DegenerateLookAt { reason: &'static str },

    #[error("Rotation axis is not unit length: length {length}")]
    NonUnitAxis { length: f64 },

    #[error("Non-finite element at index {index}")]
    NonFinite { index: usize },
}
