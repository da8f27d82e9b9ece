use glam::{Mat3, Mat4};
use glint_core::camera::CLIP_GL_TO_WGPU;
use glint_core::lighting::{Light, LightRig};
use glint_core::material::{texture_transform, PhongMaterial};
use glint_core::viewer::FrameMatrices;

//
// ──────────────────────────────────────────────────────────────
//   Uniform layouts (must match shaders/phong.wgsl)
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform
{
  /// View space. `w == 0` for the directional light.
  pub position: [f32; 4],
  pub ambient: [f32; 4],
  pub diffuse: [f32; 4],
  pub specular: [f32; 4],
  pub spot_direction: [f32; 4],
  pub spot_exponent: f32,
  pub spot_cos_cutoff: f32,
  pub constant: f32,
  pub linear: f32,
  pub quadratic: f32,
  pub _pad: [f32; 3],
}

impl LightUniform
{
  fn from_light(light: &Light, view: Mat4) -> Self
  {
    let direction = Mat3::from_mat4(view) * light.spot_direction;

    Self {
      position: (view * light.position).to_array(),
      ambient: light.ambient.extend(1.0).to_array(),
      diffuse: light.diffuse.extend(1.0).to_array(),
      specular: light.specular.extend(1.0).to_array(),
      spot_direction: direction.extend(0.0).to_array(),
      spot_exponent: light.spot_exponent,
      spot_cos_cutoff: light.spot_cutoff.cos(),
      constant: light.constant,
      linear: light.linear,
      quadratic: light.quadratic,
      _pad: [0.0; 3],
    }
  }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform
{
  pub mvp: [[f32; 4]; 4],
  pub model_view: [[f32; 4]; 4],
  pub normal: [[f32; 4]; 4],
  pub lights: [LightUniform; 3],
  pub shininess: f32,
  pub light_index: u32,
  pub _pad: [u32; 2],
}

impl FrameUniform
{
  pub fn new(frame: &FrameMatrices, lights: &LightRig, shininess: f32) -> Self
  {
    let mvp = CLIP_GL_TO_WGPU * frame.mvp;

    Self {
      mvp: mvp.to_cols_array_2d(),
      model_view: frame.model_view.to_cols_array_2d(),
      normal: frame.normal.to_cols_array_2d(),
      lights: lights.lights.map(|l| LightUniform::from_light(&l, frame.view)),
      shininess,
      light_index: lights.active.index() as u32,
      _pad: [0; 2],
    }
  }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform
{
  pub ka: [f32; 4],
  pub kd: [f32; 4],
  pub ks: [f32; 4],
  pub tex_transform: [[f32; 4]; 4],
}

impl MaterialUniform
{
  pub fn new(material: &PhongMaterial, eye_frame: usize) -> Self
  {
    Self {
      ka: material.ka.extend(1.0).to_array(),
      kd: material.kd.extend(1.0).to_array(),
      ks: material.ks.extend(1.0).to_array(),
      tex_transform: texture_transform(material.uv_offset(eye_frame)).to_cols_array_2d(),
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use glam::{Vec3, Vec4};
  use glint_core::lighting::LightKind;

  #[test]
  fn sizes_match_wgsl()
  {
    assert_eq!(std::mem::size_of::<LightUniform>(), 112);
    assert_eq!(std::mem::size_of::<FrameUniform>(), 544);
    assert_eq!(std::mem::size_of::<MaterialUniform>(), 112);
  }

  #[test]
  fn shader_never_normalizes_unguarded()
  {
    let source = include_str!("../shaders/phong.wgsl");
    for line in source.lines().filter(|l| !l.trim_start().starts_with("//"))
    {
      let bare = line.replace("safe_normalize(", "");
      assert!(!bare.contains("normalize("), "unguarded normalize: {line}");
    }
  }

  #[test]
  fn lights_move_into_view_space()
  {
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0));
    let rig = LightRig::shading();
    let spot = LightUniform::from_light(rig.light(LightKind::Spot), view);

    // spot sits at z = 2, i.e. on the camera
    assert_eq!(spot.position, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(spot.spot_direction, [0.0, 0.0, -1.0, 0.0]);
    assert!((spot.spot_cos_cutoff - 30f32.to_radians().cos()).abs() < 1e-6);

    // directions ignore translation
    let sun = LightUniform::from_light(rig.light(LightKind::Directional), view);
    assert_eq!(Vec4::from_array(sun.position), Vec4::new(1.0, 1.0, 1.0, 0.0));
  }

  #[test]
  fn eye_materials_carry_uv_shift()
  {
    let eye = PhongMaterial { eye: true, ..PhongMaterial::default() };
    let u = MaterialUniform::new(&eye, 1);
    assert_eq!(u.tex_transform[3], [0.0, 0.25, 0.0, 1.0]);

    let plain = MaterialUniform::new(&PhongMaterial::default(), 1);
    assert_eq!(plain.tex_transform, Mat4::IDENTITY.to_cols_array_2d());
  }
}
