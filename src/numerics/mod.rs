// src/numerics/mod.rs
// Top-level numerics module. Exposes a `types` namespace with submodules
// plus the checked-construction layer built on top of it.

pub mod types {
    // The submodules live in src/numerics/types/*.rs
    pub mod traits;
    pub mod vector;
    pub mod point;
    pub mod quaternion;
    pub mod matrix;
}

pub mod config;
pub mod error;
pub mod validation;
