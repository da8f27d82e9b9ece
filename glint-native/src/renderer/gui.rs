use egui_wgpu::{Renderer, RendererOptions, ScreenDescriptor};
use egui_winit::State;
use glint_core::viewer::Status;
use winit::event::WindowEvent;
use winit::window::Window;

const KEYS: [(&str, &str); 11] = [
  ("Z / X", "previous / next model"),
  ("O / P", "orthographic / perspective"),
  ("T / S / R", "translate / scale / rotate"),
  ("E / C / U", "edit eye / center / up"),
  ("L", "cycle light"),
  ("K / J", "edit light / shininess"),
  ("G / B", "mag / min filter"),
  ("← / →", "eye frame"),
  ("I", "log status"),
  ("H", "hide this panel"),
  ("Esc", "quit"),
];

/// egui overlay showing the viewer status.
pub struct GuiRenderer
{
  pub context: egui::Context,
  pub state: State,
  pub renderer: Renderer,
}

impl GuiRenderer
{
  pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self
  {
    let context = egui::Context::default();
    let state = State::new(
      context.clone(),
      egui::viewport::ViewportId::ROOT,
      window,
      Some(window.scale_factor() as f32),
      None,
      None,
    );

    let renderer = Renderer::new(
      device,
      output_format,
      RendererOptions { depth_stencil_format: None, msaa_samples: 1, predictable_texture_filtering: false, dithering: true },
    );

    Self { context, state, renderer }
  }

  /// Returns true when egui wants the event for itself.
  pub fn on_event(&mut self, window: &Window, event: &WindowEvent) -> bool
  {
    self.state.on_window_event(window, event).consumed
  }

  pub fn discard_input(&mut self, window: &Window)
  {
    let _ = self.state.take_egui_input(window);
  }

  pub fn build(&mut self, window: &Window, status: &Status) -> egui::FullOutput
  {
    let raw = self.state.take_egui_input(window);

    let mut output = self.context.run(raw, |ctx| {
      egui::Window::new("glint").default_pos([10.0, 10.0]).resizable(false).show(ctx, |ui| {
        status_grid(ui, status);
        ui.separator();
        ui.label("left: vertex lighting    right: pixel lighting");
        ui.collapsing("Keys", |ui| {
          egui::Grid::new("keys").striped(true).show(ui, |ui| {
            for (key, what) in KEYS
            {
              ui.monospace(key);
              ui.label(what);
              ui.end_row();
            }
          });
        });
      });
    });

    let platform = std::mem::take(&mut output.platform_output);
    self.state.handle_platform_output(window, platform);

    output
  }

  pub fn render(
    &mut self,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    encoder: &mut wgpu::CommandEncoder,
    window: &Window,
    view: &wgpu::TextureView,
    full_output: egui::FullOutput,
  )
  {
    let size = window.inner_size();
    let ppp = window.scale_factor() as f32;
    let screen_descriptor = ScreenDescriptor { size_in_pixels: [size.width, size.height], pixels_per_point: ppp };

    for (id, delta) in full_output.textures_delta.set
    {
      self.renderer.update_texture(device, queue, id, &delta);
    }

    let tris = self.context.tessellate(full_output.shapes, ppp);
    self.renderer.update_buffers(device, queue, encoder, &tris, &screen_descriptor);

    {
      let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Egui Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
          view,
          resolve_target: None,
          ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
          depth_slice: None,
        })],
        ..Default::default()
      });

      // egui-wgpu wants a 'static pass; it is dropped before the encoder is reused.
      let mut pass = pass.forget_lifetime();

      self.renderer.render(&mut pass, &tris, &screen_descriptor);
    }

    for id in full_output.textures_delta.free
    {
      self.renderer.free_texture(&id);
    }
  }
}

fn status_grid(ui: &mut egui::Ui, status: &Status)
{
  egui::Grid::new("status").num_columns(2).show(ui, |ui| {
    ui.label("Model");
    ui.label(format!("{}/{}  {}", status.model_index + 1, status.model_count, status.model_name));
    ui.end_row();

    ui.label("Mode");
    ui.label(status.mode.name());
    ui.end_row();

    ui.label("Light");
    ui.label(status.light.name());
    ui.end_row();

    ui.label("Projection");
    ui.label(status.projection.name());
    ui.end_row();

    ui.label("Shininess");
    ui.label(format!("{:.0}", status.shininess));
    ui.end_row();

    ui.label("Filters");
    ui.label(format!("mag {}, min {}", status.filters.mag_name(), status.filters.min_name()));
    ui.end_row();

    if status.has_eye
    {
      ui.label("Eye frame");
      ui.label(status.eye_frame.to_string());
      ui.end_row();
    }
  });
}
