// src/numerics/types/point.rs
// Point3 is an alias for Vector3 used where an argument is a position.

use super::vector::Vector3;

/// Point3 is an alias to Vector3 to represent points in space.
///
/// `Matrix4::look_at` takes its eye and target as points, its up hint as a
/// direction; both are the same type underneath.
pub type Point3<T = f64> = Vector3<T>;
