use glam::{Mat4, Vec3};

use crate::transform::{from_rows, translate};

//
// ──────────────────────────────────────────────────────────────
//   View camera (right-handed, Y-up)
//
//   eye    → camera position
//   center → point the camera looks at
//   up     → approximate up direction, re-orthogonalised
// ──────────────────────────────────────────────────────────────
//

const DEGENERATE_EPS: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera
{
  pub eye: Vec3,
  pub center: Vec3,
  pub up: Vec3,
}

impl Default for ViewCamera
{
  fn default() -> Self
  {
    Self { eye: Vec3::new(0.0, 0.0, 2.0), center: Vec3::ZERO, up: Vec3::Y }
  }
}

impl ViewCamera
{
  /// True when no orientation can be derived: eye on top of center, or up
  /// parallel to the viewing direction.
  pub fn is_degenerate(&self) -> bool
  {
    let forward = self.eye - self.center;
    if forward.length_squared() < DEGENERATE_EPS
    {
      return true;
    }

    self.up.cross(forward).length_squared() < DEGENERATE_EPS
  }

  /// Look-at view matrix `R * T(-eye)`.
  ///
  /// Rows of `R` are the camera basis: right, up, and the backwards axis
  /// `normalize(eye - center)`. Returns `None` for a degenerate camera.
  pub fn view_matrix(&self) -> Option<Mat4>
  {
    if self.is_degenerate()
    {
      return None;
    }

    let f = (self.eye - self.center).normalize();
    let r = self.up.cross(f).normalize();
    let u = f.cross(r);

    let rot = from_rows(
      [r.x, r.y, r.z, 0.0],
      [u.x, u.y, u.z, 0.0],
      [f.x, f.y, f.z, 0.0],
      [0.0, 0.0, 0.0, 1.0],
    );

    Some(rot * translate(-self.eye))
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn default_camera_matches_look_at()
  {
    let cam = ViewCamera::default();
    let expected = Mat4::look_at_rh(cam.eye, cam.center, cam.up);
    assert!(cam.view_matrix().unwrap().abs_diff_eq(expected, 1e-6));
  }

  #[test]
  fn arbitrary_camera_matches_look_at()
  {
    let cam =
      ViewCamera { eye: Vec3::new(3.0, -1.5, 4.0), center: Vec3::new(0.2, 0.3, -0.1), up: Vec3::new(0.1, 1.0, 0.3) };
    let expected = Mat4::look_at_rh(cam.eye, cam.center, cam.up);
    assert!(cam.view_matrix().unwrap().abs_diff_eq(expected, 1e-5));
  }

  #[test]
  fn center_lands_on_negative_z()
  {
    let cam = ViewCamera { eye: Vec3::new(1.0, 2.0, 3.0), center: Vec3::new(1.0, 2.0, 0.0), up: Vec3::Y };
    let p = cam.view_matrix().unwrap().transform_point3(cam.center);
    assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-6));
  }

  #[test]
  fn degenerate_cameras_have_no_view()
  {
    let same = ViewCamera { eye: Vec3::ONE, center: Vec3::ONE, up: Vec3::Y };
    assert!(same.is_degenerate());
    assert!(same.view_matrix().is_none());

    let parallel = ViewCamera { eye: Vec3::new(0.0, 5.0, 0.0), center: Vec3::ZERO, up: Vec3::Y };
    assert!(parallel.is_degenerate());
    assert!(parallel.view_matrix().is_none());
  }
}
