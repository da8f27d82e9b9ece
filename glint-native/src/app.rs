use std::sync::Arc;

use anyhow::{bail, Context};
use glint_core::config::ViewerConfig;
use glint_core::controls::Outcome;
use glint_core::mesh::{load_models, LoadedModel};
use glint_core::viewer::Viewer;
use log::{error, info};
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::WindowEvent,
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{Window, WindowId},
};

use crate::input::{Command, InputState};
use crate::renderer::Renderer;

pub fn run(config: ViewerConfig) -> anyhow::Result<()>
{
  let models = load_models(&config.models);
  if models.is_empty()
  {
    bail!("none of the {} configured models could be loaded", config.models.len());
  }
  info!("{} of {} models loaded", models.len(), config.models.len());

  let event_loop = EventLoop::new().context("failed to create event loop")?;
  let mut app = GlintApp::new(config, models);

  event_loop.run_app(&mut app).context("event loop failed")?;

  match app.error.take()
  {
    Some(e) => Err(e),
    None => Ok(()),
  }
}

struct GlintApp
{
  config: ViewerConfig,
  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,
  viewer: Viewer,
  input: InputState,

  // fatal error raised inside the event loop, returned from `run`
  error: Option<anyhow::Error>,
}

impl GlintApp
{
  fn new(config: ViewerConfig, models: Vec<LoadedModel>) -> Self
  {
    let mut viewer = Viewer::new(models, config.preset.lights(), config.window.width, config.window.height);
    viewer.hud_visible = config.hud;

    Self { config, window: None, renderer: None, viewer, input: InputState::new(), error: None }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let attrs = Window::default_attributes()
      .with_title(self.config.window.title.as_str())
      .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));
    let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

    let size = window.inner_size();
    self.viewer.resize(size.width, size.height);

    let renderer = pollster::block_on(Renderer::new(window.clone(), &self.viewer))?;

    self.window = Some(window);
    self.renderer = Some(renderer);
    Ok(())
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    match &self.window
    {
      Some(w) if w.id() == window_id =>
      {}
      _ => return,
    }

    let hud_consumed = match &mut self.renderer
    {
      Some(renderer) => offer_to_hud(self.viewer.hud_visible, || renderer.gui_event(&event)),
      None => false,
    };

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
        return;
      }

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }
        self.viewer.resize(size.width, size.height);
        return;
      }

      _ =>
      {}
    }

    if hud_consumed
    {
      return;
    }

    match self.input.handle_event(&event)
    {
      Some(Command::Action(action)) =>
      {
        if self.viewer.apply(action) == Outcome::Quit
        {
          elwt.exit();
        }
      }
      Some(Command::Drag(delta)) => self.viewer.drag(delta.x, delta.y),
      Some(Command::Scroll(dy)) => self.viewer.scroll(dy),
      None =>
      {}
    }
  }

  fn frame(&mut self, elwt: &ActiveEventLoop)
  {
    let Some(renderer) = &mut self.renderer
    else
    {
      return;
    };

    match renderer.render(&self.viewer)
    {
      Ok(()) =>
      {
        if let Some(window) = &self.window
        {
          window.request_redraw();
        }
      }
      Err(e) => self.fail(elwt, e),
    }
  }

  fn fail(&mut self, elwt: &ActiveEventLoop, e: anyhow::Error)
  {
    error!("{:#}", e);
    self.error = Some(e);
    elwt.exit();
  }
}

/// egui queues every event it is given until the next HUD frame drains it,
/// so a hidden HUD must not be fed.
fn offer_to_hud(hud_visible: bool, forward: impl FnOnce() -> bool) -> bool
{
  hud_visible && forward()
}

impl ApplicationHandler for GlintApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Wait);

    if let Err(e) = self.init_window_and_renderer(event_loop)
    {
      self.fail(event_loop, e.context("GPU initialisation failed"));
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn about_to_wait(&mut self, event_loop: &ActiveEventLoop)
  {
    if self.error.is_none()
    {
      self.frame(event_loop);
    }
  }
}
