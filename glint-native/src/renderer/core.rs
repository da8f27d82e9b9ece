use std::sync::Arc;

use anyhow::{bail, Context};
use glint_core::viewer::Viewer;
use log::{info, warn};
use winit::event::WindowEvent;
use winit::window::Window;

use super::depth::{DepthBuffer, DEPTH_FORMAT};
use super::gui::GuiRenderer;
use super::mesh::{create_material_layout, GpuModel, GpuVertex};
use super::texture::SamplerSet;
use super::uniforms::FrameUniform;

const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };

pub struct Renderer
{
  window: Arc<Window>,
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  depth: DepthBuffer,
  frame_buffer: wgpu::Buffer,
  frame_bind_group: wgpu::BindGroup,
  samplers: SamplerSet,

  gouraud: wgpu::RenderPipeline,
  phong: wgpu::RenderPipeline,

  models: Vec<GpuModel>,
  gui: GuiRenderer,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>, viewer: &Viewer) -> anyhow::Result<Self>
  {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone()).context("failed to create surface")?;

    let adapter = request_adapter(&instance, &surface).await?;
    let (device, queue) = request_device(&adapter).await?;
    info!("GPU: {}", adapter.get_info().name);

    let config = configure_surface(&window, &surface, &adapter, &device)?;
    let depth = DepthBuffer::create(&device, &config);

    let (frame_buffer, frame_bind_group, frame_bgl) = create_frame_resources(&device);
    let material_bgl = create_material_layout(&device);
    let samplers = SamplerSet::create(&device);

    let layouts = [&frame_bgl, &material_bgl, &samplers.layout];
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
      label: Some("Phong Shader"),
      source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/phong.wgsl").into()),
    });

    let gouraud = create_pipeline(&device, &config, &shader, &layouts, "Gouraud", ("vs_gouraud", "fs_gouraud"));
    let phong = create_pipeline(&device, &config, &shader, &layouts, "Phong", ("vs_phong", "fs_phong"));

    let models = viewer.models.iter().map(|inst| GpuModel::upload(&device, &queue, &material_bgl, &inst.model)).collect();

    let gui = GuiRenderer::new(&device, config.format, &window);

    Ok(Self {
      window,
      surface,
      device,
      queue,
      config,
      depth,
      frame_buffer,
      frame_bind_group,
      samplers,
      gouraud,
      phong,
      models,
      gui,
    })
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);
    self.depth = DepthBuffer::create(&self.device, &self.config);
  }

  /// Forward a window event to the HUD; true if it consumed it.
  pub fn gui_event(&mut self, event: &WindowEvent) -> bool
  {
    self.gui.on_event(&self.window, event)
  }

  pub fn render(&mut self, viewer: &Viewer) -> anyhow::Result<()>
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        self.surface.configure(&self.device, &self.config);
        return Ok(());
      }
      Err(wgpu::SurfaceError::OutOfMemory) => bail!("surface out of memory"),
      Err(e) =>
      {
        warn!("Skipping frame: {}", e);
        return Ok(());
      }
    };

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let uniform = FrameUniform::new(&viewer.frame(), &viewer.lights, viewer.shininess);
    self.queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniform));

    let model = viewer.current_model().zip(self.models.get(viewer.current));
    if let Some((inst, gpu)) = model
    {
      for shape in &gpu.shapes
      {
        shape.update(&self.queue, inst.eye_frame);
      }
    }

    let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    {
      let mut pass = begin_scene_pass(&mut encoder, &view, &self.depth.view);

      if let Some((_, gpu)) = model
      {
        let half = self.config.width as f32 / 2.0;
        let height = self.config.height as f32;

        // left: per-vertex lighting, right: per-pixel lighting
        for (pipeline, x) in [(&self.gouraud, 0.0), (&self.phong, half)]
        {
          pass.set_viewport(x, 0.0, half, height, 0.0, 1.0);
          pass.set_pipeline(pipeline);
          pass.set_bind_group(0, &self.frame_bind_group, &[]);
          pass.set_bind_group(2, self.samplers.bind_group(viewer.filters), &[]);

          for shape in &gpu.shapes
          {
            pass.set_bind_group(1, &shape.bind_group, &[]);
            pass.set_vertex_buffer(0, shape.vertex_buffer.slice(..));
            pass.draw(0..shape.vertex_count, 0..1);
          }
        }
      }
    }

    if viewer.hud_visible
    {
      let output = self.gui.build(&self.window, &viewer.status());
      self.gui.render(&self.device, &self.queue, &mut encoder, &self.window, &view, output);
    }
    else
    {
      // events queued just before the HUD was hidden
      self.gui.discard_input(&self.window);
    }

    self.queue.submit(Some(encoder.finish()));
    self.window.pre_present_notify();
    frame.present();

    Ok(())
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(instance: &wgpu::Instance, surface: &wgpu::Surface<'_>) -> anyhow::Result<wgpu::Adapter>
{
  instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await
    .context("no suitable GPU adapter found")
}

async fn request_device(adapter: &wgpu::Adapter) -> anyhow::Result<(wgpu::Device, wgpu::Queue)>
{
  adapter
    .request_device(&wgpu::DeviceDescriptor { label: Some("Glint Device"), ..Default::default() })
    .await
    .context("failed to create device")
}

fn configure_surface(
  window: &Window,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> anyhow::Result<wgpu::SurfaceConfiguration>
{
  let size = window.inner_size();
  let caps = surface.get_capabilities(adapter);

  // Shading maths outputs display values directly; avoid implicit sRGB encoding.
  let format = caps
    .formats
    .iter()
    .copied()
    .find(|f| !f.is_srgb())
    .or_else(|| caps.formats.first().copied())
    .context("surface reports no supported formats")?;

  let config = wgpu::SurfaceConfiguration {
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    format,
    width: size.width.max(1),
    height: size.height.max(1),
    present_mode: wgpu::PresentMode::Fifo,
    alpha_mode: wgpu::CompositeAlphaMode::Auto,
    view_formats: vec![],
    desired_maximum_frame_latency: 2,
  };

  surface.configure(device, &config);
  Ok(config)
}

fn create_frame_resources(device: &wgpu::Device) -> (wgpu::Buffer, wgpu::BindGroup, wgpu::BindGroupLayout)
{
  let buffer = device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Frame Buffer"),
    size: std::mem::size_of::<FrameUniform>() as u64,
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  });

  let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Frame BGL"),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
      },
      count: None,
    }],
  });

  let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Frame BG"),
    layout: &layout,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: buffer.as_entire_binding() }],
  });

  (buffer, bind_group, layout)
}

fn create_pipeline(
  device: &wgpu::Device,
  config: &wgpu::SurfaceConfiguration,
  shader: &wgpu::ShaderModule,
  bind_group_layouts: &[&wgpu::BindGroupLayout],
  label: &str,
  (vs, fs): (&str, &str),
) -> wgpu::RenderPipeline
{
  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some(label),
    bind_group_layouts,
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some(label),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: shader,
      entry_point: Some(vs),
      buffers: &[GpuVertex::layout()],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: shader,
      entry_point: Some(fs),
      targets: &[Some(wgpu::ColorTargetState {
        format: config.format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    // OBJ winding varies between models; draw both faces
    primitive: wgpu::PrimitiveState { cull_mode: None, ..Default::default() },
    depth_stencil: Some(wgpu::DepthStencilState {
      format: DEPTH_FORMAT,
      depth_write_enabled: true,
      depth_compare: wgpu::CompareFunction::Less,
      stencil: wgpu::StencilState::default(),
      bias: wgpu::DepthBiasState::default(),
    }),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}

//
// ──────────────────────────────────────────────────────────────
//   Render Pass
// ──────────────────────────────────────────────────────────────
//

fn begin_scene_pass<'e>(
  encoder: &'e mut wgpu::CommandEncoder,
  color_view: &wgpu::TextureView,
  depth_view: &wgpu::TextureView,
) -> wgpu::RenderPass<'e>
{
  encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
    label: Some("Scene Pass"),
    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
      view: color_view,
      resolve_target: None,
      ops: wgpu::Operations { load: wgpu::LoadOp::Clear(CLEAR_COLOR), store: wgpu::StoreOp::Store },
      depth_slice: None,
    })],
    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
      view: depth_view,
      depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
      stencil_ops: None,
    }),
    occlusion_query_set: None,
    timestamp_writes: None,
  })
}
