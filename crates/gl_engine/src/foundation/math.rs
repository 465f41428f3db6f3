//! Math utilities and types
//!
//! Provides the 4x4 transform matrix and 4-component vector used by the
//! sample programs. Both wrap `nalgebra` types; storage is column-major so a
//! `Matrix` can be handed to `glUniformMatrix4fv` without transposing.
//!
//! None of the factory functions fail. Degenerate input (zero-length rotation
//! axis, up vector parallel to the view direction, zero-sized view volume)
//! produces a well-defined fallback matrix instead:
//!
//! | Constructor                      | Fallback                       |
//! |----------------------------------|--------------------------------|
//! | [`Matrix::rotate`]               | identity                       |
//! | [`Matrix::lookat`]               | translation to the eye only    |
//! | [`Matrix::orthogonal`]           | identity                       |
//! | [`Matrix::frustum`]              | identity                       |
//! | [`Matrix::perspective`]          | identity                       |

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::Unit;
use std::ops::{Index, Mul};

pub use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// 4x4 transform matrix, 16 contiguous `f32` in column-major order
///
/// Element `(row, col)` lives at index `col * 4 + row`. Multiplication
/// composes right-to-left: `a * b` applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    m: Matrix4<f32>,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Build a matrix from 16 column-major elements
    pub fn from_array(m: [f32; 16]) -> Self {
        Self {
            m: Matrix4::from_column_slice(&m),
        }
    }

    /// The multiplicative identity
    pub fn identity() -> Self {
        Self {
            m: Matrix4::identity(),
        }
    }

    /// Column-major elements, ready for upload
    pub fn data(&self) -> &[f32] {
        self.m.as_slice()
    }

    /// Element at `row`, `col`
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[(row, col)]
    }

    /// Translation by `(x, y, z)`
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self {
            m: Matrix4::new_translation(&Vector3::new(x, y, z)),
        }
    }

    /// Scaling by `(x, y, z)`
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            m: Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z)),
        }
    }

    /// Rotation of `angle` radians about the axis `(x, y, z)`
    ///
    /// The axis does not have to be normalized. A zero-length axis yields the
    /// identity matrix.
    pub fn rotate(angle: f32, x: f32, y: f32, z: f32) -> Self {
        let axis = Vector3::new(x, y, z);
        let d = axis.norm();
        if d == 0.0 {
            return Self::identity();
        }

        Self {
            m: Matrix4::from_axis_angle(&Unit::new_unchecked(axis / d), angle),
        }
    }

    /// View transform for an eye at `e` looking at `g` with up direction `u`
    ///
    /// Builds the basis `t = e - g`, `r = u × t`, `s = t × r`. When `r` has
    /// zero length (up parallel to the view direction) only the translation
    /// `translate(-e)` is returned.
    pub fn lookat(
        ex: f32,
        ey: f32,
        ez: f32,
        gx: f32,
        gy: f32,
        gz: f32,
        ux: f32,
        uy: f32,
        uz: f32,
    ) -> Self {
        let eye = Vector3::new(ex, ey, ez);
        let tv = Matrix4::new_translation(&-eye);

        let t = eye - Vector3::new(gx, gy, gz);
        let r = Vector3::new(ux, uy, uz).cross(&t);
        let s = t.cross(&r);

        if r.norm() == 0.0 || s.norm() == 0.0 {
            return Self { m: tv };
        }

        let rv = Matrix3::from_rows(&[
            r.normalize().transpose(),
            s.normalize().transpose(),
            t.normalize().transpose(),
        ]);

        Self {
            m: rv.to_homogeneous() * tv,
        }
    }

    /// Orthographic projection of the box `[left, right] x [bottom, top] x [-z_near, -z_far]`
    pub fn orthogonal(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let mut t = Self::identity();
        let dx = right - left;
        let dy = top - bottom;
        let dz = z_far - z_near;

        if dx != 0.0 && dy != 0.0 && dz != 0.0 {
            t.m[(0, 0)] = 2.0 / dx;
            t.m[(1, 1)] = 2.0 / dy;
            t.m[(2, 2)] = -2.0 / dz;
            t.m[(0, 3)] = -(right + left) / dx;
            t.m[(1, 3)] = -(top + bottom) / dy;
            t.m[(2, 3)] = -(z_far + z_near) / dz;
        }

        t
    }

    /// Perspective projection of a (possibly off-axis) viewing frustum
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Self {
        let mut t = Self::identity();
        let dx = right - left;
        let dy = top - bottom;
        let dz = z_far - z_near;

        if dx != 0.0 && dy != 0.0 && dz != 0.0 {
            t.m[(0, 0)] = 2.0 * z_near / dx;
            t.m[(1, 1)] = 2.0 * z_near / dy;
            t.m[(0, 2)] = (right + left) / dx;
            t.m[(1, 2)] = (top + bottom) / dy;
            t.m[(2, 2)] = -(z_far + z_near) / dz;
            t.m[(3, 2)] = -1.0;
            t.m[(2, 3)] = -2.0 * z_far * z_near / dz;
            t.m[(3, 3)] = 0.0;
        }

        t
    }

    /// Symmetric perspective projection from a vertical field of view in radians
    pub fn perspective(fovy: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let mut t = Self::identity();
        let dz = z_far - z_near;

        if dz != 0.0 && aspect != 0.0 {
            let f = 1.0 / (fovy * 0.5).tan();
            t.m[(0, 0)] = f / aspect;
            t.m[(1, 1)] = f;
            t.m[(2, 2)] = -(z_far + z_near) / dz;
            t.m[(3, 2)] = -1.0;
            t.m[(2, 3)] = -2.0 * z_far * z_near / dz;
            t.m[(3, 3)] = 0.0;
        }

        t
    }

    /// Matrix for transforming normals
    ///
    /// This is the cofactor matrix of the upper-left 3x3 block, i.e. the
    /// inverse transpose scaled by the determinant, so it exists even for
    /// singular transforms. Shaders normalize the result so the scale factor
    /// drops out.
    pub fn normal_matrix(&self) -> Matrix3<f32> {
        let c0: Vector3<f32> = self.m.fixed_view::<3, 1>(0, 0).into_owned();
        let c1: Vector3<f32> = self.m.fixed_view::<3, 1>(0, 1).into_owned();
        let c2: Vector3<f32> = self.m.fixed_view::<3, 1>(0, 2).into_owned();

        Matrix3::from_columns(&[c1.cross(&c2), c2.cross(&c0), c0.cross(&c1)])
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        Self {
            m: self.m.transpose(),
        }
    }
}

impl Index<usize> for Matrix {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.m[index]
    }
}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self { m: self.m * rhs.m }
    }
}

impl Mul<Vector> for Matrix {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        Vector::from(self.m * Vector4::from(v))
    }
}

impl From<Matrix> for Matrix4<f32> {
    fn from(matrix: Matrix) -> Self {
        matrix.m
    }
}

impl From<Matrix4<f32>> for Matrix {
    fn from(m: Matrix4<f32>) -> Self {
        Self { m }
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m.abs_diff_eq(&other.m, epsilon)
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.m.relative_eq(&other.m, epsilon, max_relative)
    }
}

/// Homogeneous 4-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Vector {
    /// Create a vector from its four components
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A position (`w = 1`)
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// A direction (`w = 0`), unaffected by translation
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    /// Components as an array
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Divide through by `w`
    pub fn project(self) -> [f32; 3] {
        [self.x / self.w, self.y / self.w, self.z / self.w]
    }
}

impl From<Vector> for Vector4<f32> {
    fn from(v: Vector) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4<f32>> for Vector {
    fn from(v: Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        Vector4::from(*self).abs_diff_eq(&Vector4::from(*other), epsilon)
    }
}

impl RelativeEq for Vector {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        Vector4::from(*self).relative_eq(&Vector4::from(*other), epsilon, max_relative)
    }
}
