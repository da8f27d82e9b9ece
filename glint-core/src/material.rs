use std::path::{Path, PathBuf};

use glam::{Mat4, Vec2, Vec3};

use crate::transform::translate;

//
// ──────────────────────────────────────────────────────────────
//   Eye sprite sheet
//
//   Eye textures are atlases of poses. Each pose is selected by
//   shifting UVs with one of these offsets.
// ──────────────────────────────────────────────────────────────
//

pub const EYE_OFFSETS: [Vec2; 7] = [
  Vec2::new(0.0, 0.0),
  Vec2::new(0.0, 0.25),
  Vec2::new(0.0, 0.5),
  Vec2::new(0.0, 0.75),
  Vec2::new(0.5, 0.0),
  Vec2::new(0.5, 0.5),
  Vec2::new(0.5, 0.75),
];

pub const EYE_FRAME_COUNT: usize = EYE_OFFSETS.len();

const EYE_MARKER: &str = "Eye";

pub fn eye_offset(frame: usize) -> Vec2
{
  EYE_OFFSETS[frame % EYE_FRAME_COUNT]
}

/// UV transform handed to the shader.
pub fn texture_transform(offset: Vec2) -> Mat4
{
  translate(offset.extend(0.0))
}

//
// ──────────────────────────────────────────────────────────────
//   Phong material
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct PhongMaterial
{
  pub ka: Vec3,
  pub kd: Vec3,
  pub ks: Vec3,

  pub diffuse_texture: Option<PathBuf>,
  pub eye: bool,
}

impl Default for PhongMaterial
{
  fn default() -> Self
  {
    Self { ka: Vec3::splat(0.1), kd: Vec3::splat(0.8), ks: Vec3::splat(0.5), diffuse_texture: None, eye: false }
  }
}

impl PhongMaterial
{
  pub fn with_texture(mut self, path: PathBuf) -> Self
  {
    self.eye = is_eye_texture(&path);
    self.diffuse_texture = Some(path);
    self
  }

  /// UV offset for the given eye frame; non-eye materials never shift.
  pub fn uv_offset(&self, frame: usize) -> Vec2
  {
    if self.eye
    {
      eye_offset(frame)
    }
    else
    {
      Vec2::ZERO
    }
  }
}

fn is_eye_texture(path: &Path) -> bool
{
  path.file_name().map(|name| name.to_string_lossy().contains(EYE_MARKER)).unwrap_or(false)
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn eye_detection_uses_file_name()
  {
    let eye = PhongMaterial::default().with_texture(PathBuf::from("models/FushigidaneEye.png"));
    assert!(eye.eye);

    let body = PhongMaterial::default().with_texture(PathBuf::from("Eyes/body.png"));
    assert!(!body.eye);
  }

  #[test]
  fn eye_offsets_wrap()
  {
    assert_eq!(eye_offset(0), Vec2::ZERO);
    assert_eq!(eye_offset(3), Vec2::new(0.0, 0.75));
    assert_eq!(eye_offset(6), Vec2::new(0.5, 0.75));
    assert_eq!(eye_offset(7), eye_offset(0));
    assert_eq!(eye_offset(15), eye_offset(1));
  }

  #[test]
  fn plain_materials_ignore_eye_frame()
  {
    let m = PhongMaterial::default();
    assert_eq!(m.uv_offset(4), Vec2::ZERO);

    let eye = PhongMaterial { eye: true, ..PhongMaterial::default() };
    assert_eq!(eye.uv_offset(4), Vec2::new(0.5, 0.0));
  }

  #[test]
  fn texture_transform_shifts_uvs()
  {
    let m = texture_transform(Vec2::new(0.5, 0.25));
    let uv = m.transform_point3(Vec3::new(0.1, 0.1, 0.0));
    assert!(uv.abs_diff_eq(Vec3::new(0.6, 0.35, 0.0), 1e-6));
  }
}
