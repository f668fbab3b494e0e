// src/numerics/types/quaternion.rs
// Unit quaternion used as the intermediate step of axis-angle extraction.

use approx::{AbsDiffEq, RelativeEq};
use serde::{Serialize, Deserialize};

use super::matrix::Matrix4;
use super::traits::FloatingPoint;
use super::vector::Vector3;

/// A rotation expressed as a unit rotation axis plus an angle in radians.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: FloatingPoint + Serialize",
    deserialize = "T: FloatingPoint + Deserialize<'de>"
))]
pub struct AxisAngle<T: FloatingPoint = f64> {
    pub axis: Vector3<T>,
    pub angle: T,
}

/// A quaternion stored as (w, x, y, z) where w is the scalar part.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quaternion<T: FloatingPoint = f64> {
    pub w: T,
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Serialize for Quaternion<T>
where
    T: FloatingPoint + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (&self.w, &self.x, &self.y, &self.z).serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Quaternion<T>
where
    T: FloatingPoint + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (w, x, y, z) = <(T, T, T, T)>::deserialize(deserializer)?;
        Ok(Quaternion { w, x, y, z })
    }
}

impl<T: FloatingPoint> Quaternion<T> {
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// Identity quaternion (no rotation)
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Rotation of `angle` radians about `axis`, which must be unit length.
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let half = angle / T::two();
        let s = half.sin();
        Self::new(half.cos(), axis.x * s, axis.y * s, axis.z * s)
    }

    /// Extract a quaternion from the rotation block of `m`.
    ///
    /// The matrix is assumed to be a proper rotation (orthonormal, det=+1).
    /// Uses Shepperd's method: the largest of the trace and the three
    /// diagonal terms picks the component that is divided through.
    ///
    /// `m` is row-major, so `m[row * 4 + col]`.
    pub fn from_matrix4(m: &Matrix4<T>) -> Self {
        let one = T::one();
        let quarter = T::from_f64(0.25);
        let (m00, m01, m02) = (m[0], m[1], m[2]);
        let (m10, m11, m12) = (m[4], m[5], m[6]);
        let (m20, m21, m22) = (m[8], m[9], m[10]);
        let trace = m00 + m11 + m22;

        if trace > T::zero() {
            let s = (trace + one).sqrt() * T::two(); // s = 4*w
            Self::new(quarter * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
        } else if m00 > m11 && m00 > m22 {
            let s = (one + m00 - m11 - m22).sqrt() * T::two(); // s = 4*x
            Self::new((m21 - m12) / s, quarter * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = (one + m11 - m00 - m22).sqrt() * T::two(); // s = 4*y
            Self::new((m02 - m20) / s, (m01 + m10) / s, quarter * s, (m12 + m21) / s)
        } else {
            let s = (one + m22 - m00 - m11).sqrt() * T::two(); // s = 4*z
            Self::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, quarter * s)
        }
    }

    /// Convert this quaternion to a row-major 4x4 rotation matrix.
    pub fn to_matrix4(&self) -> Matrix4<T> {
        let Quaternion { w, x, y, z } = *self;
        let one = T::one();
        let zero = T::zero();

        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;
        let xx = x * x2;
        let xy = x * y2;
        let xz = x * z2;
        let yy = y * y2;
        let yz = y * z2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Matrix4::new([
            one - (yy + zz), xy - wz,         xz + wy,         zero,
            xy + wz,         one - (xx + zz), yz - wx,         zero,
            xz - wy,         yz + wx,         one - (xx + yy), zero,
            zero,            zero,            zero,            one,
        ])
    }

    pub fn length(&self) -> T {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy. A zero quaternion yields NaN components.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        Self::new(self.w / len, self.x / len, self.y / len, self.z / len)
    }

    /// Split this rotation into a unit axis and an angle in [0, 2π].
    ///
    /// The axis is the normalized vector part, so it stays accurate for
    /// arbitrarily small angles. Only an exact identity rotation, where the
    /// vector part is zero, has no axis; (1, 0, 0) is returned with angle 0.
    pub fn to_axis_angle(&self) -> AxisAngle<T> {
        let s = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        // atan2 is scale-invariant: |w| > 1 needs no renormalization
        let angle = T::two() * s.atan2(self.w);
        let axis = if s == T::zero() {
            Vector3::new(T::one(), T::zero(), T::zero())
        } else {
            Vector3::new(self.x / s, self.y / s, self.z / s)
        };

        AxisAngle { axis, angle }
    }
}

impl<T> AbsDiffEq for Quaternion<T>
where
    T: FloatingPoint + AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T> RelativeEq for Quaternion<T>
where
    T: FloatingPoint + RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
