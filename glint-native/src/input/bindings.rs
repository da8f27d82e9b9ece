use glint_core::controls::{Action, TransformMode};
use winit::keyboard::KeyCode;

//
// ──────────────────────────────────────────────────────────────
//   Keyboard bindings (physical keys, layout independent)
// ──────────────────────────────────────────────────────────────
//

pub fn action_for(key: KeyCode) -> Option<Action>
{
  let action = match key
  {
    KeyCode::Escape => Action::Quit,

    KeyCode::KeyZ => Action::PrevModel,
    KeyCode::KeyX => Action::NextModel,

    KeyCode::KeyO => Action::Orthographic,
    KeyCode::KeyP => Action::Perspective,

    KeyCode::KeyT => Action::SetMode(TransformMode::Translation),
    KeyCode::KeyS => Action::SetMode(TransformMode::Scaling),
    KeyCode::KeyR => Action::SetMode(TransformMode::Rotation),
    KeyCode::KeyE => Action::SetMode(TransformMode::ViewEye),
    KeyCode::KeyC => Action::SetMode(TransformMode::ViewCenter),
    KeyCode::KeyU => Action::SetMode(TransformMode::ViewUp),
    KeyCode::KeyK => Action::SetMode(TransformMode::LightEdit),
    KeyCode::KeyJ => Action::SetMode(TransformMode::ShininessEdit),

    KeyCode::KeyL => Action::CycleLight,
    KeyCode::KeyG => Action::ToggleMagFilter,
    KeyCode::KeyB => Action::ToggleMinFilter,

    KeyCode::ArrowLeft => Action::PrevEyeFrame,
    KeyCode::ArrowRight => Action::NextEyeFrame,

    KeyCode::KeyI => Action::PrintInfo,
    KeyCode::KeyH => Action::ToggleHud,

    _ => return None,
  };

  Some(action)
}
