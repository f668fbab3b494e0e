// src/numerics/types/matrix.rs
// Matrix3x3 (rotation block) and Matrix4 (homogeneous transform) types.
//
// Matrix4 stores its 16 elements row-major: element `row * 4 + col`.
// Points are column vectors multiplied on the right, which puts the
// translation in column 3 (flat indices 3, 7, 11). In `a * b` the
// transform `b` is applied first.

use core::fmt;
use core::ops::{Index, Mul};
use approx::{AbsDiffEq, RelativeEq};
use serde::{Serialize, Deserialize};

use crate::numerics::types::point::Point3;
use crate::numerics::types::quaternion::{AxisAngle, Quaternion};
use crate::numerics::types::traits::FloatingPoint;
use crate::numerics::types::vector::Vector3;

/// Degrees to radians factor. `Matrix4::projection` takes its field of view
/// in degrees; every other angle in this crate is in radians.
pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;

/// 3x3 matrix, used for the linear (rotation) block of a `Matrix4`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix3x3<T: FloatingPoint = f64> {
    pub data: [[T; 3]; 3],
}

impl<T: FloatingPoint> Matrix3x3<T> {
    pub fn new(data: [[T; 3]; 3]) -> Self {
        Self { data }
    }

    /// Construct a new matrix from 3 rows
    pub fn from_rows(r0: [T; 3], r1: [T; 3], r2: [T; 3]) -> Self {
        Self { data: [r0, r1, r2] }
    }

    /// Construct a new matrix from 3 columns
    pub fn from_columns(c0: [T; 3], c1: [T; 3], c2: [T; 3]) -> Self {
        Self {
            data: [
                [c0[0], c1[0], c2[0]],
                [c0[1], c1[1], c2[1]],
                [c0[2], c1[2], c2[2]],
            ],
        }
    }

    /// Get a row by index
    pub fn row(&self, idx: usize) -> [T; 3] {
        self.data[idx]
    }

    /// Get a column by index
    pub fn column(&self, idx: usize) -> [T; 3] {
        [self.data[0][idx], self.data[1][idx], self.data[2][idx]]
    }

    /// Identity matrix
    pub fn identity() -> Self {
        let mut m = [[T::zero(); 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = T::one();
        }
        Self { data: m }
    }

    pub fn transpose(&self) -> Self {
        Self::from_columns(self.data[0], self.data[1], self.data[2])
    }

    pub fn determinant(&self) -> T {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.data;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> T {
        let mut max = T::zero();
        for i in 0..3 {
            for j in 0..3 {
                let d = (self.data[i][j] - other.data[i][j]).abs();
                if d > max {
                    max = d;
                }
            }
        }
        max
    }
}

// Generic serde implementations for Matrix3x3
impl<T> Serialize for Matrix3x3<T>
where
    T: FloatingPoint + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Matrix3x3<T>
where
    T: FloatingPoint + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let arr = <[[T; 3]; 3]>::deserialize(deserializer)?;
        Ok(Matrix3x3 { data: arr })
    }
}

impl<T: FloatingPoint> Mul<Vector3<T>> for Matrix3x3<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        Vector3 {
            x: self.data[0][0] * rhs.x + self.data[0][1] * rhs.y + self.data[0][2] * rhs.z,
            y: self.data[1][0] * rhs.x + self.data[1][1] * rhs.y + self.data[1][2] * rhs.z,
            z: self.data[2][0] * rhs.x + self.data[2][1] * rhs.y + self.data[2][2] * rhs.z,
        }
    }
}

impl<T: FloatingPoint> Mul<Matrix3x3<T>> for Matrix3x3<T> {
    type Output = Matrix3x3<T>;

    fn mul(self, rhs: Matrix3x3<T>) -> Matrix3x3<T> {
        let mut result = [[T::zero(); 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] =
                    self.data[i][0] * rhs.data[0][j] +
                        self.data[i][1] * rhs.data[1][j] +
                        self.data[i][2] * rhs.data[2][j];
            }
        }
        Matrix3x3 { data: result }
    }
}

/// 4x4 homogeneous transform, 16 elements in row-major order.
///
/// Every operation takes matrices by value and returns a new one; nothing
/// mutates its inputs. None of the operations validate their preconditions:
/// degenerate input produces NaN, infinity or a silently wrong matrix. See
/// `crate::numerics::validation` for checked variants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4<T: FloatingPoint = f64> {
    pub data: [T; 16],
}

impl<T: FloatingPoint> Matrix4<T> {
    pub fn new(data: [T; 16]) -> Self {
        Self { data }
    }

    /// Construct a matrix from 4 rows
    pub fn from_rows(r0: [T; 4], r1: [T; 4], r2: [T; 4], r3: [T; 4]) -> Self {
        Self {
            data: core::array::from_fn(|i| [r0, r1, r2, r3][i / 4][i % 4]),
        }
    }

    /// Affine matrix with linear part `linear` and translation `t`.
    pub fn from_parts(linear: Matrix3x3<T>, t: Vector3<T>) -> Self {
        let [[a, b, c], [d, e, f], [g, h, i]] = linear.data;
        let (zero, one) = (T::zero(), T::one());
        Self::new([
            a,    b,    c,    t.x,
            d,    e,    f,    t.y,
            g,    h,    i,    t.z,
            zero, zero, zero, one,
        ])
    }

    pub fn identity() -> Self {
        Self::from_parts(Matrix3x3::identity(), Vector3::zero())
    }

    /// Element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * 4 + col]
    }

    pub fn row(&self, idx: usize) -> [T; 4] {
        [self.data[idx * 4], self.data[idx * 4 + 1], self.data[idx * 4 + 2], self.data[idx * 4 + 3]]
    }

    pub fn as_array(&self) -> &[T; 16] {
        &self.data
    }

    /// Upper-left 3x3 block.
    pub fn rotation_block(&self) -> Matrix3x3<T> {
        let m = &self.data;
        Matrix3x3::from_rows([m[0], m[1], m[2]], [m[4], m[5], m[6]], [m[8], m[9], m[10]])
    }

    /// Translation column (elements 3, 7, 11).
    pub fn translation_part(&self) -> Vector3<T> {
        Vector3::new(self.data[3], self.data[7], self.data[11])
    }

    /// Matrix product `self × rhs`; `rhs` is applied to a point first.
    pub fn multiply(self, rhs: Self) -> Self {
        let a = &self.data;
        let b = &rhs.data;
        Self {
            data: core::array::from_fn(|i| {
                let (r, c) = (i / 4 * 4, i % 4);
                a[r] * b[c] + a[r + 1] * b[4 + c] + a[r + 2] * b[8 + c] + a[r + 3] * b[12 + c]
            }),
        }
    }

    pub fn rotation_x(angle: T) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        let (o, l) = (T::zero(), T::one());
        Self::new([
            l, o,  o, o,
            o, c, -s, o,
            o, s,  c, o,
            o, o,  o, l,
        ])
    }

    pub fn rotation_y(angle: T) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        let (o, l) = (T::zero(), T::one());
        Self::new([
             c, o, s, o,
             o, l, o, o,
            -s, o, c, o,
             o, o, o, l,
        ])
    }

    pub fn rotation_z(angle: T) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        let (o, l) = (T::zero(), T::one());
        Self::new([
            c, -s, o, o,
            s,  c, o, o,
            o,  o, l, o,
            o,  o, o, l,
        ])
    }

    /// Rodrigues rotation of `angle` radians about `axis`.
    ///
    /// `axis` must be unit length; any other length yields a matrix that is
    /// not orthonormal.
    pub fn rotation_axis(axis: Vector3<T>, angle: T) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        let t = T::one() - c;
        let Vector3 { x, y, z } = axis;
        let (tx, ty) = (t * x, t * y);
        Self::from_parts(
            Matrix3x3::from_rows(
                [tx * x + c,     tx * y - s * z, tx * z + s * y],
                [tx * y + s * z, ty * y + c,     ty * z - s * x],
                [tx * z - s * y, ty * z + s * x, t * z * z + c],
            ),
            Vector3::zero(),
        )
    }

    pub fn scale(x: T, y: T, z: T) -> Self {
        let o = T::zero();
        Self::from_parts(Matrix3x3::from_rows([x, o, o], [o, y, o], [o, o, z]), Vector3::zero())
    }

    pub fn translation(x: T, y: T, z: T) -> Self {
        Self::from_parts(Matrix3x3::identity(), Vector3::new(x, y, z))
    }

    /// Column 0 of the rotation block: `(m00, m10, m20)`.
    pub fn right(&self) -> Vector3<T> {
        Vector3::new(self.data[0], self.data[4], self.data[8])
    }

    /// Negated column 1: `(-m01, -m11, -m21)`.
    pub fn up(&self) -> Vector3<T> {
        Vector3::new(-self.data[1], -self.data[5], -self.data[9])
    }

    /// Column 2: `(m02, m12, m22)`.
    pub fn back(&self) -> Vector3<T> {
        Vector3::new(self.data[2], self.data[6], self.data[10])
    }

    /// Negated column 2: `(-m02, -m12, -m22)`.
    pub fn forward(&self) -> Vector3<T> {
        -self.back()
    }

    /// Off-center perspective projection of the view frustum
    /// `[left, right] x [bottom, top] x [near, far]` into clip space.
    ///
    /// Requires `right != left`, `top != bottom` and `far != near`.
    pub fn frustum(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
        let r_m_l = right - left;
        let t_m_b = top - bottom;
        let f_m_n = far - near;
        let n2 = T::two() * near;
        let o = T::zero();
        Self::new([
            n2 / r_m_l, o,          (right + left) / r_m_l, o,
            o,          n2 / t_m_b, (top + bottom) / t_m_b, o,
            o,          o,          -(far + near) / f_m_n,  -T::two() * (far * near) / f_m_n,
            o,          o,          -T::one(),              o,
        ])
    }

    /// Symmetric perspective projection.
    ///
    /// `fov` is the vertical field of view in degrees, unlike every other
    /// angle in this crate, and must lie in (0, 180).
    pub fn projection(fov: T, width: T, height: T, near: T, far: T) -> Self {
        let radians = fov * T::from_f64(DEG_TO_RAD);
        let half_height = (radians / T::two()).tan() * near;
        let half_width = half_height * (width / height);
        Self::frustum(-half_width, half_width, -half_height, half_height, near, far)
    }

    /// Camera orientation looking from `eye` towards `target`.
    ///
    /// The three basis axes are stored as columns and the translation stays
    /// zero. An `up` parallel to `eye - target` yields NaN.
    pub fn look_at(eye: Point3<T>, target: Point3<T>, up: Vector3<T>) -> Self {
        let z_axis = (eye - target).normalize();
        let x_axis = z_axis.cross(&up).normalize();
        let y_axis = z_axis.cross(&x_axis);
        Self::from_parts(
            Matrix3x3::from_columns(x_axis.into(), y_axis.into(), z_axis.into()),
            Vector3::zero(),
        )
    }

    pub fn transpose(self) -> Self {
        let m = &self.data;
        Self {
            data: core::array::from_fn(|i| m[(i % 4) * 4 + i / 4]),
        }
    }

    /// Inverse of a rigid transform: `[R | t]^-1 = [R^T | -R^T t]`.
    ///
    /// Only valid when the rotation block is orthonormal and the bottom row
    /// is `(0, 0, 0, 1)`. Scale, shear or projection give a wrong result
    /// without any error.
    pub fn fast_inverse(self) -> Self {
        let rt = self.rotation_block().transpose();
        let t = -(rt * self.translation_part());
        Self::from_parts(rt, t)
    }

    /// Axis and angle of a pure rotation matrix, via a quaternion.
    pub fn to_axis_angle(&self) -> AxisAngle<T> {
        Quaternion::from_matrix4(self).to_axis_angle()
    }

    /// Apply to a point (w = 1) followed by the perspective divide.
    pub fn transform_point(&self, p: Point3<T>) -> Point3<T> {
        let m = &self.data;
        let x = m[0] * p.x + m[1] * p.y + m[2] * p.z + m[3];
        let y = m[4] * p.x + m[5] * p.y + m[6] * p.z + m[7];
        let z = m[8] * p.x + m[9] * p.y + m[10] * p.z + m[11];
        let w = m[12] * p.x + m[13] * p.y + m[14] * p.z + m[15];
        Vector3::new(x / w, y / w, z / w)
    }

    /// Apply the linear part only (w = 0), ignoring translation.
    pub fn transform_direction(&self, v: Vector3<T>) -> Vector3<T> {
        self.rotation_block() * v
    }
}

impl<T: FloatingPoint> Default for Matrix4<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: FloatingPoint> Mul for Matrix4<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl<T: FloatingPoint> Index<usize> for Matrix4<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T: FloatingPoint> From<[T; 16]> for Matrix4<T> {
    fn from(data: [T; 16]) -> Self {
        Self { data }
    }
}

impl<T: FloatingPoint> From<Matrix4<T>> for [T; 16] {
    fn from(m: Matrix4<T>) -> Self {
        m.data
    }
}

/// Four comma-separated rows with two decimals, tab after each comma,
/// newline after every row but the last.
/// Value to hand to `{:.2}` so that ties round half away from zero.
///
/// `{:.2}` is exact for every value that is not an exact two-decimal tie,
/// but breaks ties to even. A tie is only real when `v * 100` lands on .5
/// with no rounding error in the product; values like 1.005 sit just below
/// the tie in binary and are left alone. Negative zero becomes 0.0.
fn fixed2_operand(v: f64) -> f64 {
    if v == 0.0 {
        return 0.0;
    }
    let scaled = v * 100.0;
    if scaled.fract().abs() == 0.5 && v.mul_add(100.0, -scaled) == 0.0 {
        scaled.round() / 100.0
    } else {
        v
    }
}

impl<T: FloatingPoint> fmt::Display for Matrix4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            for col in 0..4 {
                write!(f, "{:.2}", fixed2_operand(self.get(row, col).to_f64()))?;
                match (row, col) {
                    (3, 3) => {}
                    (_, 3) => f.write_str(",\n")?,
                    _ => f.write_str(",\t")?,
                }
            }
        }
        Ok(())
    }
}

impl<T> Serialize for Matrix4<T>
where
    T: FloatingPoint + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Matrix4<T>
where
    T: FloatingPoint + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = <[T; 16]>::deserialize(deserializer)?;
        Ok(Matrix4 { data })
    }
}

impl<T> AbsDiffEq for Matrix4<T>
where
    T: FloatingPoint + AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T> RelativeEq for Matrix4<T>
where
    T: FloatingPoint + RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
