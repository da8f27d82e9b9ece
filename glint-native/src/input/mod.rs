mod bindings;

use glam::Vec2;
use glint_core::controls::{Action, DragTracker};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

// Trackpads report pixels; one wheel line is roughly this many.
const PIXELS_PER_LINE: f32 = 20.0;

/// What a single window event asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command
{
  Action(Action),
  Drag(Vec2),
  Scroll(f32),
}

#[derive(Default)]
pub struct InputState
{
  drag: DragTracker,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self::default()
  }

  pub fn handle_event(&mut self, event: &WindowEvent) -> Option<Command>
  {
    match event
    {
      WindowEvent::CursorMoved { position, .. } =>
      {
        self.drag.cursor(position.x as f32, position.y as f32).map(Command::Drag)
      }

      WindowEvent::MouseInput { state, button: MouseButton::Left, .. } =>
      {
        match state
        {
          ElementState::Pressed => self.drag.press(),
          ElementState::Released => self.drag.release(),
        }
        None
      }

      WindowEvent::MouseWheel { delta, .. } => match delta
      {
        MouseScrollDelta::LineDelta(_, y) => Some(Command::Scroll(*y)),
        MouseScrollDelta::PixelDelta(p) => Some(Command::Scroll(p.y as f32 / PIXELS_PER_LINE)),
      },

      WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed && !event.repeat =>
      {
        match event.physical_key
        {
          PhysicalKey::Code(code) => bindings::action_for(code).map(Command::Action),
          PhysicalKey::Unidentified(_) => None,
        }
      }

      // a drag that leaves the window ends there
      WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) =>
      {
        self.drag.release();
        None
      }

      _ => None,
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use winit::dpi::PhysicalPosition;
  use winit::event::{DeviceId, TouchPhase};

  fn device() -> DeviceId
  {
    // SAFETY: only used as an opaque id in synthetic events
    unsafe { DeviceId::dummy() }
  }

  fn cursor(x: f64, y: f64) -> WindowEvent
  {
    WindowEvent::CursorMoved { device_id: device(), position: PhysicalPosition::new(x, y) }
  }

  fn left(state: ElementState) -> WindowEvent
  {
    WindowEvent::MouseInput { device_id: device(), state, button: MouseButton::Left }
  }

  fn wheel(delta: MouseScrollDelta) -> WindowEvent
  {
    WindowEvent::MouseWheel { device_id: device(), delta, phase: TouchPhase::Moved }
  }

  #[test]
  fn left_drag_reports_upward_positive_deltas()
  {
    let mut input = InputState::new();

    assert_eq!(input.handle_event(&cursor(10.0, 10.0)), None);
    input.handle_event(&left(ElementState::Pressed));
    assert_eq!(input.handle_event(&cursor(10.0, 10.0)), None);
    assert_eq!(input.handle_event(&cursor(14.0, 7.0)), Some(Command::Drag(Vec2::new(4.0, 3.0))));

    input.handle_event(&left(ElementState::Released));
    assert_eq!(input.handle_event(&cursor(20.0, 20.0)), None);
  }

  #[test]
  fn wheel_lines_and_pixels()
  {
    let mut input = InputState::new();

    assert_eq!(input.handle_event(&wheel(MouseScrollDelta::LineDelta(0.0, -2.0))), Some(Command::Scroll(-2.0)));
    assert_eq!(
      input.handle_event(&wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)))),
      Some(Command::Scroll(2.0))
    );
  }

  #[test]
  fn losing_focus_ends_drag()
  {
    let mut input = InputState::new();
    input.handle_event(&left(ElementState::Pressed));
    input.handle_event(&cursor(0.0, 0.0));
    input.handle_event(&WindowEvent::Focused(false));
    assert_eq!(input.handle_event(&cursor(5.0, 5.0)), None);
  }
}
