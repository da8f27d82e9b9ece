use glam::Vec2;

//
// ──────────────────────────────────────────────────────────────
//   What the mouse edits
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode
{
  Translation,
  Rotation,
  Scaling,
  ViewEye,
  ViewCenter,
  ViewUp,
  LightEdit,
  ShininessEdit,
}

impl TransformMode
{
  pub fn name(self) -> &'static str
  {
    match self
    {
      TransformMode::Translation => "Translation",
      TransformMode::Rotation => "Rotation",
      TransformMode::Scaling => "Scaling",
      TransformMode::ViewEye => "Edit eye",
      TransformMode::ViewCenter => "Edit center",
      TransformMode::ViewUp => "Edit up vector",
      TransformMode::LightEdit => "Edit light",
      TransformMode::ShininessEdit => "Edit shininess",
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Discrete commands, independent of the windowing library
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action
{
  PrevModel,
  NextModel,
  Orthographic,
  Perspective,
  SetMode(TransformMode),
  CycleLight,
  ToggleMagFilter,
  ToggleMinFilter,
  PrevEyeFrame,
  NextEyeFrame,
  PrintInfo,
  ToggleHud,
  Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome
{
  Continue,
  Quit,
}

//
// ──────────────────────────────────────────────────────────────
//   Drag tracking
//
//   Pressing arms the tracker; the first cursor sample after that
//   only records an anchor. Every later sample reports the motion
//   since the previous one with Y pointing up.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker
{
  pressed: bool,
  anchor: Option<Vec2>,
}

impl DragTracker
{
  pub fn press(&mut self)
  {
    self.pressed = true;
  }

  pub fn release(&mut self)
  {
    self.pressed = false;
    self.anchor = None;
  }

  pub fn is_pressed(&self) -> bool
  {
    self.pressed
  }

  /// Feed a cursor position in window pixels (Y down). Returns
  /// `(dx, dy)` with `dy` positive when moving up.
  pub fn cursor(&mut self, x: f32, y: f32) -> Option<Vec2>
  {
    if !self.pressed
    {
      return None;
    }

    let pos = Vec2::new(x, y);
    let delta = self.anchor.map(|prev| Vec2::new(pos.x - prev.x, -(pos.y - prev.y)));
    self.anchor = Some(pos);

    delta
  }
}
