// src/numerics/config.rs
// Tolerances used by the validating entry points.

use serde::{Deserialize, Serialize};

/// Tolerances for the checked transform constructors.
///
/// The unchecked `Matrix4` operations never read this; it only drives the
/// `try_*` variants and the `is_rigid` / `is_rotation` predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Accepted deviation from orthonormality, unit length and det = +1.
    pub epsilon: f64,

    /// Smallest vector length or frustum extent treated as non-zero.
    pub min_length: f64,
}

impl Default for ValidationConfig {
    /// Tolerances suited to f64 transforms built from a handful of products.
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            min_length: 1e-12,
        }
    }
}

impl ValidationConfig {
    pub fn new(epsilon: f64, min_length: f64) -> Self {
        Self { epsilon, min_length }
    }

    /// Looser tolerances for f32 matrices.
    pub fn single_precision() -> Self {
        Self {
            epsilon: 1e-4,
            min_length: 1e-6,
        }
    }

    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }
}
