use glam::{Mat4, Vec4};

use crate::transform::from_rows;

//
// ──────────────────────────────────────────────────────────────
//   Projection (OpenGL clip conventions, depth in [-1, 1])
// ──────────────────────────────────────────────────────────────
//

/// Remaps GL clip depth `[-w, w]` onto wgpu's `[0, w]`.
pub const CLIP_GL_TO_WGPU: Mat4 = Mat4::from_cols(
  Vec4::new(1.0, 0.0, 0.0, 0.0),
  Vec4::new(0.0, 1.0, 0.0, 0.0),
  Vec4::new(0.0, 0.0, 0.5, 0.0),
  Vec4::new(0.0, 0.0, 0.5, 1.0),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode
{
  Orthographic,
  Perspective,
}

impl ProjectionMode
{
  pub fn name(self) -> &'static str
  {
    match self
    {
      ProjectionMode::Orthographic => "Orthographic",
      ProjectionMode::Perspective => "Perspective",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection
{
  pub mode: ProjectionMode,

  /// Vertical field of view in degrees.
  pub fovy_deg: f32,
  /// Width / height of one viewer panel.
  pub aspect: f32,
  pub near: f32,
  pub far: f32,

  // Orthographic volume before aspect correction
  pub left: f32,
  pub right: f32,
  pub top: f32,
  pub bottom: f32,
}

impl Projection
{
  pub fn new(width: u32, height: u32) -> Self
  {
    let mut proj = Self {
      mode: ProjectionMode::Perspective,
      fovy_deg: 80.0,
      aspect: 1.0,
      near: 0.001,
      far: 100.0,
      left: -1.0,
      right: 1.0,
      top: 1.0,
      bottom: -1.0,
    };
    proj.set_viewport(width, height);
    proj
  }

  /// The window is split into two panels side by side, so each one gets
  /// half the width. A zero height keeps the previous aspect.
  pub fn set_viewport(&mut self, width: u32, height: u32)
  {
    if height == 0 || width == 0
    {
      return;
    }

    self.aspect = (width as f32 / 2.0) / height as f32;
  }

  pub fn matrix(&self) -> Mat4
  {
    match self.mode
    {
      ProjectionMode::Orthographic => self.orthographic(),
      ProjectionMode::Perspective => self.perspective(),
    }
  }

  pub fn perspective(&self) -> Mat4
  {
    let f = 1.0 / (self.fovy_deg.to_radians() / 2.0).tan();
    let (n, fa) = (self.near, self.far);

    from_rows(
      [f / self.aspect, 0.0, 0.0, 0.0],
      [0.0, f, 0.0, 0.0],
      [0.0, 0.0, (fa + n) / (n - fa), 2.0 * fa * n / (n - fa)],
      [0.0, 0.0, -1.0, 0.0],
    )
  }

  /// Parallel projection; horizontal bounds follow the panel aspect.
  pub fn orthographic(&self) -> Mat4
  {
    let left = self.left * self.aspect;
    let right = self.right * self.aspect;

    let rl = right - left;
    let tb = self.top - self.bottom;
    let fnr = self.far - self.near;

    from_rows(
      [2.0 / rl, 0.0, 0.0, -(right + left) / rl],
      [0.0, 2.0 / tb, 0.0, -(self.top + self.bottom) / tb],
      [0.0, 0.0, -2.0 / fnr, -(self.far + self.near) / fnr],
      [0.0, 0.0, 0.0, 1.0],
    )
  }
}
