use std::path::Path;

use glint_core::material::PhongMaterial;
use glint_core::mesh::{LoadedModel, Vertex};
use glint_core::texture::TextureImage;
use wgpu::util::DeviceExt;

use super::texture::GpuTexture;
use super::uniforms::MaterialUniform;

//
// ──────────────────────────────────────────────────────────────
//   Vertex (GPU side)
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex
{
  pub position: [f32; 3],
  pub normal: [f32; 3],
  pub uv: [f32; 2],
}

impl GpuVertex
{
  const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

  pub fn layout() -> wgpu::VertexBufferLayout<'static>
  {
    wgpu::VertexBufferLayout {
      array_stride: std::mem::size_of::<GpuVertex>() as u64,
      step_mode: wgpu::VertexStepMode::Vertex,
      attributes: &Self::ATTRIBS,
    }
  }
}

impl From<&Vertex> for GpuVertex
{
  fn from(v: &Vertex) -> Self
  {
    Self { position: v.position.to_array(), normal: v.normal.to_array(), uv: v.uv.to_array() }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Per-material bind group: uniform + diffuse texture
// ──────────────────────────────────────────────────────────────
//

pub fn create_material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout
{
  device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Material BGL"),
    entries: &[
      wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
          ty: wgpu::BufferBindingType::Uniform,
          has_dynamic_offset: false,
          min_binding_size: None,
        },
        count: None,
      },
      wgpu::BindGroupLayoutEntry {
        binding: 1,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
          sample_type: wgpu::TextureSampleType::Float { filterable: true },
          view_dimension: wgpu::TextureViewDimension::D2,
          multisampled: false,
        },
        count: None,
      },
    ],
  })
}

pub struct GpuShape
{
  pub vertex_buffer: wgpu::Buffer,
  pub vertex_count: u32,
  pub material: PhongMaterial,
  pub material_buffer: wgpu::Buffer,
  pub bind_group: wgpu::BindGroup,
}

impl GpuShape
{
  pub fn update(&self, queue: &wgpu::Queue, eye_frame: usize)
  {
    let uniform = MaterialUniform::new(&self.material, eye_frame);
    queue.write_buffer(&self.material_buffer, 0, bytemuck::bytes_of(&uniform));
  }
}

pub struct GpuModel
{
  pub shapes: Vec<GpuShape>,
}

impl GpuModel
{
  pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, layout: &wgpu::BindGroupLayout, model: &LoadedModel) -> Self
  {
    let (sources, slots) = texture_slots(model);
    let textures: Vec<GpuTexture> = sources
      .into_iter()
      .map(|path| GpuTexture::upload(device, queue, &TextureImage::load_or_white(path), "Diffuse Texture"))
      .collect();

    let shapes = model
      .shapes
      .iter()
      .zip(slots)
      .map(|(shape, slot)| {
        let vertices: Vec<GpuVertex> = shape.vertices.iter().map(GpuVertex::from).collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
          label: Some(&model.name),
          contents: bytemuck::cast_slice(&vertices),
          usage: wgpu::BufferUsages::VERTEX,
        });

        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
          label: Some("Material Uniform Buffer"),
          contents: bytemuck::bytes_of(&MaterialUniform::new(&shape.material, 0)),
          usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
          label: Some("Material BG"),
          layout,
          entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: material_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&textures[slot].view) },
          ],
        });

        GpuShape {
          vertex_buffer,
          vertex_count: vertices.len() as u32,
          material: shape.material.clone(),
          material_buffer,
          bind_group,
        }
      })
      .collect();

    Self { shapes }
  }
}

/// Distinct diffuse textures of a model (`None` is the white fallback) and,
/// per shape, the index of the one it samples. Shapes sharing a file share
/// one GPU texture.
fn texture_slots(model: &LoadedModel) -> (Vec<Option<&Path>>, Vec<usize>)
{
  let mut sources: Vec<Option<&Path>> = Vec::new();

  let slots = model
    .shapes
    .iter()
    .map(|shape| {
      let path = shape.material.diffuse_texture.as_deref();
      match sources.iter().position(|known| *known == path)
      {
        Some(slot) => slot,
        None =>
        {
          sources.push(path);
          sources.len() - 1
        }
      }
    })
    .collect();

  (sources, slots)
}
