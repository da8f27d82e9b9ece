use glam::{Vec3, Vec4};

use crate::material::PhongMaterial;

//
// ──────────────────────────────────────────────────────────────
//   Light sources
//
//   Three fixed slots: directional, point, spot. Only the active
//   slot contributes to shading. The GPU shader mirrors `shade`.
// ──────────────────────────────────────────────────────────────
//

const CUTOFF_MAX: f32 = std::f32::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind
{
  Directional,
  Point,
  Spot,
}

impl LightKind
{
  pub const ALL: [LightKind; 3] = [LightKind::Directional, LightKind::Point, LightKind::Spot];

  pub fn index(self) -> usize
  {
    match self
    {
      LightKind::Directional => 0,
      LightKind::Point => 1,
      LightKind::Spot => 2,
    }
  }

  pub fn next(self) -> Self
  {
    match self
    {
      LightKind::Directional => LightKind::Point,
      LightKind::Point => LightKind::Spot,
      LightKind::Spot => LightKind::Directional,
    }
  }

  pub fn name(self) -> &'static str
  {
    match self
    {
      LightKind::Directional => "Directional",
      LightKind::Point => "Point",
      LightKind::Spot => "Spot",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light
{
  /// Position for point/spot lights (`w = 1`). The directional light stores
  /// the direction towards it with `w = 0`.
  pub position: Vec4,
  pub ambient: Vec3,
  pub diffuse: Vec3,
  pub specular: Vec3,

  pub spot_direction: Vec3,
  pub spot_exponent: f32,
  /// Half-angle of the spot cone, radians.
  pub spot_cutoff: f32,

  pub constant: f32,
  pub linear: f32,
  pub quadratic: f32,
}

impl Light
{
  fn white(position: Vec4, ambient: f32, intensity: f32) -> Self
  {
    Self {
      position,
      ambient: Vec3::splat(ambient),
      diffuse: Vec3::splat(intensity),
      specular: Vec3::splat(intensity),
      spot_direction: Vec3::NEG_Z,
      spot_exponent: 0.0,
      spot_cutoff: CUTOFF_MAX,
      constant: 1.0,
      linear: 0.0,
      quadratic: 0.0,
    }
  }

  fn with_attenuation(mut self, constant: f32, linear: f32, quadratic: f32) -> Self
  {
    self.constant = constant;
    self.linear = linear;
    self.quadratic = quadratic;
    self
  }

  fn with_spot(mut self, direction: Vec3, exponent: f32, cutoff_deg: f32) -> Self
  {
    self.spot_direction = direction;
    self.spot_exponent = exponent;
    self.spot_cutoff = cutoff_deg.to_radians();
    self
  }

  /// `1 / (c + l·d + q·d²)`, never brighter than the unattenuated light.
  pub fn attenuation(&self, distance: f32) -> f32
  {
    let denom = self.constant + self.linear * distance + self.quadratic * distance * distance;
    if denom <= 0.0
    {
      return 1.0;
    }
    (1.0 / denom).min(1.0)
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Light rig
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct LightRig
{
  pub lights: [Light; 3],
  pub active: LightKind,
}

impl LightRig
{
  /// Plain white rig for untextured models.
  pub fn shading() -> Self
  {
    Self {
      lights: [
        Light::white(Vec4::new(1.0, 1.0, 1.0, 0.0), 0.15, 1.0),
        Light::white(Vec4::new(0.0, 2.0, 1.0, 1.0), 0.15, 1.0).with_attenuation(0.01, 0.8, 0.1),
        spot_light(),
      ],
      active: LightKind::Directional,
    }
  }

  /// Brighter rig; textured albedo is darker than flat materials.
  pub fn textured() -> Self
  {
    Self {
      lights: [
        Light::white(Vec4::new(1.0, 1.0, 1.0, 0.0), 1.15, 3.0),
        Light::white(Vec4::new(0.0, 2.0, 1.0, 1.0), 1.15, 3.0).with_attenuation(0.01, 0.8, 0.1),
        spot_light(),
      ],
      active: LightKind::Point,
    }
  }

  pub fn light(&self, kind: LightKind) -> &Light
  {
    &self.lights[kind.index()]
  }

  pub fn active_light(&self) -> &Light
  {
    self.light(self.active)
  }

  pub fn cycle(&mut self) -> LightKind
  {
    self.active = self.active.next();
    self.active
  }

  /// Translate the active light in its local X/Y plane.
  pub fn move_active(&mut self, dx: f32, dy: f32)
  {
    let light = &mut self.lights[self.active.index()];
    light.position.x += dx;
    light.position.y += dy;
  }

  /// Brighten or dim the diffuse term of the active light.
  pub fn adjust_diffuse(&mut self, delta: f32)
  {
    let light = &mut self.lights[self.active.index()];
    light.diffuse = (light.diffuse + Vec3::splat(delta)).max(Vec3::ZERO);
  }

  /// Widen or narrow the spot cone, kept within a hemisphere.
  pub fn adjust_cutoff(&mut self, delta_rad: f32)
  {
    let spot = &mut self.lights[LightKind::Spot.index()];
    spot.spot_cutoff = (spot.spot_cutoff + delta_rad).clamp(0.0, CUTOFF_MAX);
  }
}

fn spot_light() -> Light
{
  Light::white(Vec4::new(0.0, 0.0, 2.0, 1.0), 0.15, 1.0)
    .with_attenuation(0.5, 0.3, 0.6)
    .with_spot(Vec3::NEG_Z, 50.0, 30.0)
}

//
// ──────────────────────────────────────────────────────────────
//   Phong shading (CPU reference)
// ──────────────────────────────────────────────────────────────
//

/// Lighting split so that texture colour can modulate only the
/// ambient + diffuse part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading
{
  pub diffuse: Vec3,
  pub specular: Vec3,
}

impl Shading
{
  pub fn combined(&self, albedo: Vec3) -> Vec3
  {
    self.diffuse * albedo + self.specular
  }
}

/// Evaluate one light at a surface point. All vectors share one space.
pub fn shade(
  light: &Light,
  kind: LightKind,
  material: &PhongMaterial,
  shininess: f32,
  position: Vec3,
  normal: Vec3,
  eye: Vec3,
) -> Shading
{
  let ambient = light.ambient * material.ka;
  let n = normal.normalize_or_zero();

  let (l, factor) = match kind
  {
    LightKind::Directional => (light.position.truncate().normalize_or_zero(), 1.0),
    LightKind::Point =>
    {
      let to_light = light.position.truncate() - position;
      (to_light.normalize_or_zero(), light.attenuation(to_light.length()))
    }
    LightKind::Spot =>
    {
      let to_light = light.position.truncate() - position;
      let l = to_light.normalize_or_zero();
      let cos_theta = (-l).dot(light.spot_direction.normalize_or_zero());

      if cos_theta < light.spot_cutoff.cos()
      {
        return Shading { diffuse: ambient, specular: Vec3::ZERO };
      }

      let spot = cos_theta.max(0.0).powf(light.spot_exponent);
      (l, light.attenuation(to_light.length()) * spot)
    }
  };

  let n_dot_l = n.dot(l);
  if n_dot_l <= 0.0
  {
    return Shading { diffuse: ambient, specular: Vec3::ZERO };
  }

  let diffuse = light.diffuse * material.kd * n_dot_l;

  let v = (eye - position).normalize_or_zero();
  let r = reflect(-l, n);
  let specular = light.specular * material.ks * r.dot(v).max(0.0).powf(shininess);

  Shading { diffuse: ambient + diffuse * factor, specular: specular * factor }
}

fn reflect(incident: Vec3, normal: Vec3) -> Vec3
{
  incident - 2.0 * normal.dot(incident) * normal
}

#[cfg(test)]
mod tests
{
  use super::*;

  fn matte() -> PhongMaterial
  {
    PhongMaterial { ka: Vec3::splat(0.2), kd: Vec3::ONE, ks: Vec3::ONE, ..PhongMaterial::default() }
  }

  #[test]
  fn cycle_order()
  {
    let mut rig = LightRig::shading();
    assert_eq!(rig.active, LightKind::Directional);
    assert_eq!(rig.cycle(), LightKind::Point);
    assert_eq!(rig.cycle(), LightKind::Spot);
    assert_eq!(rig.cycle(), LightKind::Directional);
  }

  #[test]
  fn presets()
  {
    let textured = LightRig::textured();
    assert_eq!(textured.active, LightKind::Point);
    assert_eq!(textured.light(LightKind::Point).diffuse, Vec3::splat(3.0));

    let spot = LightRig::shading().lights[2];
    assert!((spot.spot_cutoff - 30f32.to_radians()).abs() < 1e-6);
    assert_eq!(spot.spot_exponent, 50.0);
    assert_eq!(spot.spot_direction, Vec3::NEG_Z);
  }

  #[test]
  fn directional_head_on()
  {
    let mut light = LightRig::shading().lights[0];
    light.position = Vec4::new(0.0, 0.0, 1.0, 0.0);

    let s = shade(&light, LightKind::Directional, &matte(), 64.0, Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0));

    // ambient 0.15*0.2 + diffuse 1*1*1
    assert!(s.diffuse.abs_diff_eq(Vec3::splat(1.03), 1e-5));
    // reflection points straight at the eye
    assert!(s.specular.abs_diff_eq(Vec3::ONE, 1e-5));
  }

  #[test]
  fn back_facing_gets_ambient_only()
  {
    let light = LightRig::shading().lights[0];
    let s = shade(&light, LightKind::Directional, &matte(), 64.0, Vec3::ZERO, -Vec3::ONE, Vec3::Z);
    assert!(s.diffuse.abs_diff_eq(Vec3::splat(0.03), 1e-6));
    assert_eq!(s.specular, Vec3::ZERO);
  }

  #[test]
  fn zero_length_light_vector_gives_ambient()
  {
    let mut sun = LightRig::shading().lights[0];
    sun.position = Vec4::ZERO;
    let s = shade(&sun, LightKind::Directional, &matte(), 64.0, Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0));
    assert!(s.diffuse.abs_diff_eq(Vec3::splat(0.03), 1e-6));
    assert_eq!(s.specular, Vec3::ZERO);

    // point light sitting on the shaded surface
    let bulb = LightRig::shading().lights[1];
    let at = bulb.position.truncate();
    let s = shade(&bulb, LightKind::Point, &matte(), 8.0, at, Vec3::Z, Vec3::new(0.0, 0.0, 5.0));
    assert!(s.diffuse.is_finite() && s.specular.is_finite());
    assert_eq!(s.specular, Vec3::ZERO);
  }

  #[test]
  fn point_light_attenuates_with_distance()
  {
    let light = LightRig::shading().lights[1];
    let near = shade(&light, LightKind::Point, &matte(), 8.0, Vec3::new(0.0, 1.5, 1.0), Vec3::Y, Vec3::Z);
    let far = shade(&light, LightKind::Point, &matte(), 8.0, Vec3::new(0.0, -3.0, 1.0), Vec3::Y, Vec3::Z);
    assert!(near.diffuse.x > far.diffuse.x);
  }

  #[test]
  fn attenuation_never_amplifies()
  {
    let light = LightRig::shading().lights[1];
    assert_eq!(light.attenuation(0.0), 1.0);
    assert!(light.attenuation(2.0) < 1.0);
  }

  #[test]
  fn spot_cone_cuts_off()
  {
    let spot = LightRig::shading().lights[2];
    let m = matte();

    // directly below the spot, inside the cone
    let inside = shade(&spot, LightKind::Spot, &m, 16.0, Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 2.0));
    assert!(inside.diffuse.x > 0.03);

    // 45° off-axis, outside the 30° cone
    let outside = shade(&spot, LightKind::Spot, &m, 16.0, Vec3::new(2.0, 0.0, 0.0), Vec3::Z, Vec3::new(0.0, 0.0, 2.0));
    assert!(outside.diffuse.abs_diff_eq(Vec3::splat(0.03), 1e-6));
    assert_eq!(outside.specular, Vec3::ZERO);
  }

  #[test]
  fn edits_are_clamped()
  {
    let mut rig = LightRig::shading();
    rig.adjust_diffuse(-5.0);
    assert_eq!(rig.active_light().diffuse, Vec3::ZERO);

    rig.adjust_cutoff(10.0);
    assert_eq!(rig.light(LightKind::Spot).spot_cutoff, CUTOFF_MAX);
    rig.adjust_cutoff(-10.0);
    assert_eq!(rig.light(LightKind::Spot).spot_cutoff, 0.0);
  }

  #[test]
  fn move_active_only_touches_active_slot()
  {
    let mut rig = LightRig::shading();
    rig.cycle();
    rig.move_active(0.5, -0.5);
    assert_eq!(rig.lights[1].position, Vec4::new(0.5, 1.5, 1.0, 1.0));
    assert_eq!(rig.lights[0].position, Vec4::new(1.0, 1.0, 1.0, 0.0));
  }

  #[test]
  fn combined_modulates_diffuse_only()
  {
    let s = Shading { diffuse: Vec3::splat(0.5), specular: Vec3::splat(0.25) };
    assert!(s.combined(Vec3::new(1.0, 0.0, 0.5)).abs_diff_eq(Vec3::new(0.75, 0.25, 0.5), 1e-6));
  }
}
