use glam::{Mat4, Vec3};

//
// ──────────────────────────────────────────────────────────────
//   Model transforms
//
//   Matrices are written row by row, the way they appear in a
//   graphics textbook, then handed to glam (column-major).
//   Rotation order is X * Y * Z, model matrix is T * R * S.
// ──────────────────────────────────────────────────────────────
//

const SINGULAR_EPS: f32 = 1e-8;

pub fn translate(v: Vec3) -> Mat4
{
  from_rows(
    [1.0, 0.0, 0.0, v.x],
    [0.0, 1.0, 0.0, v.y],
    [0.0, 0.0, 1.0, v.z],
    [0.0, 0.0, 0.0, 1.0],
  )
}

pub fn scaling(v: Vec3) -> Mat4
{
  from_rows(
    [v.x, 0.0, 0.0, 0.0],
    [0.0, v.y, 0.0, 0.0],
    [0.0, 0.0, v.z, 0.0],
    [0.0, 0.0, 0.0, 1.0],
  )
}

pub fn rotate_x(rad: f32) -> Mat4
{
  let (s, c) = rad.sin_cos();
  from_rows(
    [1.0, 0.0, 0.0, 0.0],
    [0.0, c, -s, 0.0],
    [0.0, s, c, 0.0],
    [0.0, 0.0, 0.0, 1.0],
  )
}

pub fn rotate_y(rad: f32) -> Mat4
{
  let (s, c) = rad.sin_cos();
  from_rows(
    [c, 0.0, s, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [-s, 0.0, c, 0.0],
    [0.0, 0.0, 0.0, 1.0],
  )
}

pub fn rotate_z(rad: f32) -> Mat4
{
  let (s, c) = rad.sin_cos();
  from_rows(
    [c, -s, 0.0, 0.0],
    [s, c, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
  )
}

/// Euler rotation, radians per axis.
pub fn rotate(euler: Vec3) -> Mat4
{
  rotate_x(euler.x) * rotate_y(euler.y) * rotate_z(euler.z)
}

pub fn model_matrix(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4
{
  translate(position) * rotate(rotation) * scaling(scale)
}

/// Inverse-transpose of the model-view matrix, used to carry normals into
/// view space. A singular matrix (a collapsed scale axis) maps to identity.
pub fn normal_matrix(model_view: Mat4) -> Mat4
{
  if model_view.determinant().abs() < SINGULAR_EPS
  {
    return Mat4::IDENTITY;
  }

  model_view.inverse().transpose()
}

/// Build a matrix from four rows.
pub(crate) fn from_rows(r0: [f32; 4], r1: [f32; 4], r2: [f32; 4], r3: [f32; 4]) -> Mat4
{
  Mat4::from_cols_array_2d(&[r0, r1, r2, r3]).transpose()
}
