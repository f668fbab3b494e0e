// src/numerics/types/traits.rs
// Scalar trait shared by the vector, quaternion and matrix types.

use core::fmt::{Debug, Display};

/// FloatingPoint is the scalar type behind every numerics type.
///
/// Besides the basic arithmetic ops on Self it carries the handful of
/// transcendental functions the transform constructors need, so the
/// matrix code can stay generic over f32 and f64.
pub trait FloatingPoint:
Copy + PartialOrd + Debug + Display
+ core::ops::Add<Output = Self>
+ core::ops::Sub<Output = Self>
+ core::ops::Mul<Output = Self>
+ core::ops::Div<Output = Self>
+ core::ops::Neg<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;

    /// Lossy conversion used for literal constants (0.5, PI/180, ...).
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
    fn is_finite(self) -> bool;

    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn abs(self) -> Self;

    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl FloatingPoint for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn from_f64(value: f64) -> Self { value as f32 }
    fn to_f64(self) -> f64 { self as f64 }
    fn is_finite(self) -> bool { f32::is_finite(self) }
    fn sqrt(self) -> Self { f32::sqrt(self) }
    fn sin(self) -> Self { f32::sin(self) }
    fn cos(self) -> Self { f32::cos(self) }
    fn tan(self) -> Self { f32::tan(self) }
    fn acos(self) -> Self { f32::acos(self) }
    fn atan2(self, other: Self) -> Self { f32::atan2(self, other) }
    fn abs(self) -> Self { f32::abs(self) }
}

impl FloatingPoint for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn from_f64(value: f64) -> Self { value }
    fn to_f64(self) -> f64 { self }
    fn is_finite(self) -> bool { f64::is_finite(self) }
    fn sqrt(self) -> Self { f64::sqrt(self) }
    fn sin(self) -> Self { f64::sin(self) }
    fn cos(self) -> Self { f64::cos(self) }
    fn tan(self) -> Self { f64::tan(self) }
    fn acos(self) -> Self { f64::acos(self) }
    fn atan2(self, other: Self) -> Self { f64::atan2(self, other) }
    fn abs(self) -> Self { f64::abs(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_angle_cos<T: FloatingPoint>(angle: T) -> T {
        (angle / T::two()).cos()
    }

    #[test]
    fn test_generic_dispatch_matches_inherent() {
        assert_eq!(half_angle_cos(1.0_f64), (0.5_f64).cos());
        assert_eq!(half_angle_cos(1.0_f32), (0.5_f32).cos());
        assert_eq!(<f64 as FloatingPoint>::abs(-2.5), 2.5);
        assert_eq!(<f32 as FloatingPoint>::from_f64(0.25), 0.25_f32);
        assert_eq!(<f64 as FloatingPoint>::atan2(1.0, -1.0), (1.0_f64).atan2(-1.0));
    }

    #[test]
    fn test_zero_one_two() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(f64::one(), 1.0);
        assert_eq!(f32::two(), 2.0);
    }
}
