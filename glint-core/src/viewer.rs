use std::fmt;

use glam::{Mat4, Vec3};
use log::{debug, info, warn};

use crate::camera::{Projection, ProjectionMode, ViewCamera};
use crate::controls::{Action, Outcome, TransformMode};
use crate::lighting::{LightKind, LightRig};
use crate::material::EYE_FRAME_COUNT;
use crate::mesh::LoadedModel;
use crate::texture::TextureFilters;
use crate::transform::{model_matrix, normal_matrix};

//
// ──────────────────────────────────────────────────────────────
//   Sensitivity constants
// ──────────────────────────────────────────────────────────────
//

// drag, per pixel
const TRANSLATE_PER_PX: f32 = 0.01;
const SCALE_PER_PX: f32 = 0.01;
const ROTATE_DEG_PER_PX: f32 = 0.2;
const LIGHT_PER_PX: f32 = 0.01;
const VIEW_PER_PX: f32 = 1.0 / 400.0;
const UP_PER_PX: f32 = 0.1;

// scroll, per wheel line
const TRANSLATE_PER_LINE: f32 = 0.01;
const SCALE_PER_LINE: f32 = 0.01;
const ROTATE_DEG_PER_LINE: f32 = 0.2;
const SHININESS_PER_LINE: f32 = 2.0;
const CUTOFF_DEG_PER_LINE: f32 = 0.5;
const DIFFUSE_PER_LINE: f32 = 0.1;
const EYE_PER_LINE: f32 = 0.025;
const CENTER_PER_LINE: f32 = 0.1;
const UP_PER_LINE: f32 = 0.33;

const SHININESS_MIN: f32 = 1.0;
const DEFAULT_SHININESS: f32 = 64.0;

//
// ──────────────────────────────────────────────────────────────
//   Model instance: loaded geometry + its editable transform
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct ModelInstance
{
  pub model: LoadedModel,
  pub position: Vec3,
  /// Euler angles, radians.
  pub rotation: Vec3,
  pub scale: Vec3,
  pub eye_frame: usize,
}

impl ModelInstance
{
  pub fn new(model: LoadedModel) -> Self
  {
    Self { model, position: Vec3::ZERO, rotation: Vec3::ZERO, scale: Vec3::ONE, eye_frame: 0 }
  }

  pub fn matrix(&self) -> Mat4
  {
    model_matrix(self.position, self.rotation, self.scale)
  }
}

/// Everything a frame needs to place the current model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices
{
  pub model: Mat4,
  pub view: Mat4,
  pub projection: Mat4,
  pub model_view: Mat4,
  pub mvp: Mat4,
  pub normal: Mat4,
}

//
// ──────────────────────────────────────────────────────────────
//   Viewer
// ──────────────────────────────────────────────────────────────
//

pub struct Viewer
{
  pub models: Vec<ModelInstance>,
  pub current: usize,
  pub mode: TransformMode,

  pub camera: ViewCamera,
  pub projection: Projection,
  pub lights: LightRig,
  pub shininess: f32,
  pub filters: TextureFilters,
  pub hud_visible: bool,

  // last non-degenerate view matrix
  view: Mat4,
}

impl Viewer
{
  pub fn new(models: Vec<LoadedModel>, lights: LightRig, width: u32, height: u32) -> Self
  {
    let camera = ViewCamera::default();
    let view = camera.view_matrix().unwrap_or(Mat4::IDENTITY);

    Self {
      models: models.into_iter().map(ModelInstance::new).collect(),
      current: 0,
      mode: TransformMode::Translation,
      camera,
      projection: Projection::new(width, height),
      lights,
      shininess: DEFAULT_SHININESS,
      filters: TextureFilters::default(),
      hud_visible: true,
      view,
    }
  }

  pub fn current_model(&self) -> Option<&ModelInstance>
  {
    self.models.get(self.current)
  }

  pub fn view_matrix(&self) -> Mat4
  {
    self.view
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    self.projection.set_viewport(width, height);
  }

  pub fn frame(&self) -> FrameMatrices
  {
    let model = self.current_model().map(ModelInstance::matrix).unwrap_or(Mat4::IDENTITY);
    let view = self.view;
    let projection = self.projection.matrix();
    let model_view = view * model;

    FrameMatrices {
      model,
      view,
      projection,
      model_view,
      mvp: projection * model_view,
      normal: normal_matrix(model_view),
    }
  }

  //
  // ── keyboard ─────────────────────────────────────────────────
  //

  pub fn apply(&mut self, action: Action) -> Outcome
  {
    match action
    {
      Action::Quit => return Outcome::Quit,
      Action::PrevModel => self.step_model(-1),
      Action::NextModel => self.step_model(1),
      Action::Orthographic => self.set_projection(ProjectionMode::Orthographic),
      Action::Perspective => self.set_projection(ProjectionMode::Perspective),
      Action::SetMode(mode) =>
      {
        self.mode = mode;
        debug!("Mode: {}", mode.name());
      }
      Action::CycleLight =>
      {
        let kind = self.lights.cycle();
        info!("Light Mode: {} Light", kind.name());
      }
      Action::ToggleMagFilter =>
      {
        self.filters.mag_linear = !self.filters.mag_linear;
        info!("Magfilter mode: {}", self.filters.mag_name());
      }
      Action::ToggleMinFilter =>
      {
        self.filters.min_linear = !self.filters.min_linear;
        info!("Minfilter mode: {}", self.filters.min_name());
      }
      Action::PrevEyeFrame => self.step_eye_frame(EYE_FRAME_COUNT - 1),
      Action::NextEyeFrame => self.step_eye_frame(1),
      Action::PrintInfo => self.log_info(),
      Action::ToggleHud => self.hud_visible = !self.hud_visible,
    }

    Outcome::Continue
  }

  fn step_model(&mut self, step: isize)
  {
    let count = self.models.len() as isize;
    if count == 0
    {
      return;
    }

    self.current = (self.current as isize + step).rem_euclid(count) as usize;
    debug!("Model {}/{}: {}", self.current + 1, count, self.models[self.current].model.name);
  }

  fn step_eye_frame(&mut self, step: usize)
  {
    if let Some(inst) = self.models.get_mut(self.current)
    {
      inst.eye_frame = (inst.eye_frame + step) % EYE_FRAME_COUNT;
    }
  }

  fn set_projection(&mut self, mode: ProjectionMode)
  {
    self.projection.mode = mode;
    debug!("Projection: {}", mode.name());
  }

  //
  // ── mouse ───────────────────────────────────────────────────
  //

  /// Left-button drag; `dy` is positive when the cursor moves up.
  pub fn drag(&mut self, dx: f32, dy: f32)
  {
    match self.mode
    {
      TransformMode::Translation =>
      {
        if let Some(inst) = self.models.get_mut(self.current)
        {
          inst.position.x += dx * TRANSLATE_PER_PX;
          inst.position.y += dy * TRANSLATE_PER_PX;
        }
      }
      TransformMode::Scaling =>
      {
        if let Some(inst) = self.models.get_mut(self.current)
        {
          inst.scale.x -= dx * SCALE_PER_PX;
          inst.scale.y += dy * SCALE_PER_PX;
        }
      }
      TransformMode::Rotation =>
      {
        if let Some(inst) = self.models.get_mut(self.current)
        {
          inst.rotation.x += (dy * ROTATE_DEG_PER_PX).to_radians();
          inst.rotation.y -= (dx * ROTATE_DEG_PER_PX).to_radians();
        }
      }
      TransformMode::LightEdit => self.lights.move_active(dx * LIGHT_PER_PX, dy * LIGHT_PER_PX),
      TransformMode::ViewEye =>
      {
        self.camera.eye.x -= dx * VIEW_PER_PX;
        self.camera.eye.y += dy * VIEW_PER_PX;
        self.refresh_view();
      }
      TransformMode::ViewCenter =>
      {
        self.camera.center.x -= dx * VIEW_PER_PX;
        self.camera.center.y -= dy * VIEW_PER_PX;
        self.refresh_view();
      }
      TransformMode::ViewUp =>
      {
        self.camera.up.x -= dx * UP_PER_PX;
        self.camera.up.y += dy * UP_PER_PX;
        self.refresh_view();
      }
      TransformMode::ShininessEdit =>
      {}
    }
  }

  /// Mouse wheel, in lines; positive scrolls up.
  pub fn scroll(&mut self, dy: f32)
  {
    match self.mode
    {
      TransformMode::Translation =>
      {
        if let Some(inst) = self.models.get_mut(self.current)
        {
          inst.position.z += dy * TRANSLATE_PER_LINE;
        }
      }
      TransformMode::Scaling =>
      {
        if let Some(inst) = self.models.get_mut(self.current)
        {
          inst.scale.z += dy * SCALE_PER_LINE;
        }
      }
      TransformMode::Rotation =>
      {
        if let Some(inst) = self.models.get_mut(self.current)
        {
          inst.rotation.z += (dy * ROTATE_DEG_PER_LINE).to_radians();
        }
      }
      TransformMode::ShininessEdit =>
      {
        self.shininess = (self.shininess + dy * SHININESS_PER_LINE).max(SHININESS_MIN);
      }
      TransformMode::LightEdit => match self.lights.active
      {
        LightKind::Spot => self.lights.adjust_cutoff((dy * CUTOFF_DEG_PER_LINE).to_radians()),
        LightKind::Directional | LightKind::Point => self.lights.adjust_diffuse(dy * DIFFUSE_PER_LINE),
      },
      TransformMode::ViewEye =>
      {
        self.camera.eye.z -= dy * EYE_PER_LINE;
        self.refresh_view();
      }
      TransformMode::ViewCenter =>
      {
        self.camera.center.z += dy * CENTER_PER_LINE;
        self.refresh_view();
      }
      TransformMode::ViewUp =>
      {
        self.camera.up.z += dy * UP_PER_LINE;
        self.refresh_view();
      }
    }
  }

  fn refresh_view(&mut self)
  {
    match self.camera.view_matrix()
    {
      Some(view) => self.view = view,
      None => warn!("Degenerate camera {:?}, keeping previous view", self.camera),
    }

    debug!(
      "Camera eye = {:.3?} center = {:.3?} up = {:.3?}",
      self.camera.eye.to_array(),
      self.camera.center.to_array(),
      self.camera.up.to_array()
    );
  }

  //
  // ── status ──────────────────────────────────────────────────
  //

  pub fn status(&self) -> Status
  {
    let inst = self.current_model();

    Status {
      model_name: inst.map(|m| m.model.name.clone()).unwrap_or_default(),
      model_index: self.current,
      model_count: self.models.len(),
      mode: self.mode,
      light: self.lights.active,
      projection: self.projection.mode,
      shininess: self.shininess,
      filters: self.filters,
      eye_frame: inst.map(|m| m.eye_frame).unwrap_or(0),
      has_eye: inst.map(|m| m.model.has_eye).unwrap_or(false),
    }
  }

  fn log_info(&self)
  {
    let frame = self.frame();
    info!("{}", self.status());
    info!("Camera eye = {:?} center = {:?} up = {:?}", self.camera.eye, self.camera.center, self.camera.up);
    info!("Model matrix = {:?}", frame.model);
    info!("View matrix = {:?}", frame.view);
    info!("Projection matrix = {:?}", frame.projection);
  }
}

/// Snapshot of the interactive state, for the HUD and the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Status
{
  pub model_name: String,
  pub model_index: usize,
  pub model_count: usize,
  pub mode: TransformMode,
  pub light: LightKind,
  pub projection: ProjectionMode,
  pub shininess: f32,
  pub filters: TextureFilters,
  pub eye_frame: usize,
  pub has_eye: bool,
}

impl fmt::Display for Status
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
  {
    write!(
      f,
      "model {}/{} ({}) | mode {} | {} light | {} | shininess {:.0} | mag {} min {}",
      self.model_index + 1,
      self.model_count,
      self.model_name,
      self.mode.name(),
      self.light.name(),
      self.projection.name(),
      self.shininess,
      self.filters.mag_name(),
      self.filters.min_name(),
    )?;

    if self.has_eye
    {
      write!(f, " | eye frame {}", self.eye_frame)?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::material::PhongMaterial;
  use crate::mesh::Shape;

  fn model(name: &str) -> LoadedModel
  {
    LoadedModel::new(name, vec![Shape { vertices: vec![], material: PhongMaterial::default() }])
  }

  fn viewer(count: usize) -> Viewer
  {
    let models = (0..count).map(|i| model(&format!("m{}", i))).collect();
    Viewer::new(models, LightRig::shading(), 800, 800)
  }

  #[test]
  fn model_cycling_wraps_both_ways()
  {
    let mut v = viewer(3);
    v.apply(Action::PrevModel);
    assert_eq!(v.current, 2);
    v.apply(Action::NextModel);
    assert_eq!(v.current, 0);
    v.apply(Action::NextModel);
    v.apply(Action::NextModel);
    v.apply(Action::NextModel);
    assert_eq!(v.current, 0);
  }

  #[test]
  fn cycling_without_models_is_noop()
  {
    let mut v = viewer(0);
    assert_eq!(v.apply(Action::NextModel), Outcome::Continue);
    assert_eq!(v.current, 0);
    assert_eq!(v.frame().model, Mat4::IDENTITY);
    v.drag(10.0, 10.0);
    v.scroll(1.0);
  }

  #[test]
  fn quit_is_reported()
  {
    let mut v = viewer(1);
    assert_eq!(v.apply(Action::Quit), Outcome::Quit);
  }

  #[test]
  fn drag_translation_and_scroll_depth()
  {
    let mut v = viewer(1);
    v.drag(10.0, -20.0);
    v.scroll(3.0);

    let inst = v.current_model().unwrap();
    assert!(inst.position.abs_diff_eq(Vec3::new(0.1, -0.2, 0.03), 1e-6));
  }

  #[test]
  fn drag_scaling_signs()
  {
    let mut v = viewer(1);
    v.apply(Action::SetMode(TransformMode::Scaling));
    v.drag(10.0, 10.0);
    v.scroll(-1.0);

    let inst = v.current_model().unwrap();
    assert!(inst.scale.abs_diff_eq(Vec3::new(0.9, 1.1, 0.99), 1e-6));
  }

  #[test]
  fn drag_rotation_in_degrees()
  {
    let mut v = viewer(1);
    v.apply(Action::SetMode(TransformMode::Rotation));
    v.drag(50.0, 100.0);
    v.scroll(5.0);

    let inst = v.current_model().unwrap();
    assert!((inst.rotation.x - 20f32.to_radians()).abs() < 1e-6);
    assert!((inst.rotation.y + 10f32.to_radians()).abs() < 1e-6);
    assert!((inst.rotation.z - 1f32.to_radians()).abs() < 1e-6);
  }

  #[test]
  fn shininess_floor()
  {
    let mut v = viewer(1);
    v.apply(Action::SetMode(TransformMode::ShininessEdit));
    v.scroll(3.0);
    assert_eq!(v.shininess, 70.0);
    v.scroll(-100.0);
    assert_eq!(v.shininess, 1.0);

    // drag has no effect on shininess
    v.drag(100.0, 100.0);
    assert_eq!(v.shininess, 1.0);
  }

  #[test]
  fn light_edit_depends_on_active_light()
  {
    let mut v = viewer(1);
    v.apply(Action::SetMode(TransformMode::LightEdit));

    v.scroll(2.0);
    assert!(v.lights.lights[0].diffuse.abs_diff_eq(Vec3::splat(1.2), 1e-6));

    v.apply(Action::CycleLight);
    v.apply(Action::CycleLight);
    let before = v.lights.lights[2].spot_cutoff;
    v.scroll(-4.0);
    assert!((v.lights.lights[2].spot_cutoff - (before - 2f32.to_radians())).abs() < 1e-6);

    v.drag(100.0, 0.0);
    assert!((v.lights.lights[2].position.x - 1.0).abs() < 1e-6);
  }

  #[test]
  fn camera_edits_update_view()
  {
    let mut v = viewer(1);
    v.apply(Action::SetMode(TransformMode::ViewEye));
    v.scroll(-40.0);
    assert!((v.camera.eye.z - 3.0).abs() < 1e-5);

    let expected = Mat4::look_at_rh(v.camera.eye, v.camera.center, v.camera.up);
    assert!(v.view_matrix().abs_diff_eq(expected, 1e-5));

    v.apply(Action::SetMode(TransformMode::ViewCenter));
    v.drag(400.0, 400.0);
    assert!(v.camera.center.abs_diff_eq(Vec3::new(-1.0, -1.0, 0.0), 1e-6));
  }

  #[test]
  fn degenerate_camera_keeps_last_view()
  {
    let mut v = viewer(1);
    let before = v.view_matrix();

    // eye at z = 2 dragged onto the center
    v.apply(Action::SetMode(TransformMode::ViewEye));
    v.scroll(80.0);
    assert!(v.camera.is_degenerate());
    assert_eq!(v.view_matrix(), before);
  }

  #[test]
  fn eye_frames_cycle_per_model()
  {
    let mut v = viewer(2);
    v.apply(Action::PrevEyeFrame);
    assert_eq!(v.models[0].eye_frame, 6);
    v.apply(Action::NextEyeFrame);
    v.apply(Action::NextEyeFrame);
    assert_eq!(v.models[0].eye_frame, 1);
    assert_eq!(v.models[1].eye_frame, 0);
  }

  #[test]
  fn filters_and_hud_toggle()
  {
    let mut v = viewer(1);
    v.apply(Action::ToggleMagFilter);
    assert!(v.filters.mag_linear && !v.filters.min_linear);
    v.apply(Action::ToggleMinFilter);
    assert_eq!(v.filters.index(), 3);

    assert!(v.hud_visible);
    v.apply(Action::ToggleHud);
    assert!(!v.hud_visible);
  }

  #[test]
  fn projection_switch_and_frame()
  {
    let mut v = viewer(1);
    v.apply(Action::Orthographic);
    assert_eq!(v.projection.mode, ProjectionMode::Orthographic);

    let frame = v.frame();
    assert_eq!(frame.projection, v.projection.orthographic());
    assert!(frame.mvp.abs_diff_eq(frame.projection * frame.view * frame.model, 1e-6));
  }

  #[test]
  fn status_line()
  {
    let v = viewer(2);
    let s = v.status();
    assert_eq!(s.model_name, "m0");
    assert_eq!(s.model_count, 2);
    assert!(s.to_string().starts_with("model 1/2 (m0) | mode Translation | Directional light"));
  }
}
