use glint_core::texture::{TextureFilters, TextureImage};

//
// ──────────────────────────────────────────────────────────────
//   Diffuse textures
// ──────────────────────────────────────────────────────────────
//

pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct GpuTexture
{
  pub view: wgpu::TextureView,
}

impl GpuTexture
{
  /// Upload every mip level of a decoded image.
  pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &TextureImage, label: &str) -> Self
  {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
      label: Some(label),
      size: wgpu::Extent3d { width: image.width(), height: image.height(), depth_or_array_layers: 1 },
      mip_level_count: image.mip_level_count(),
      sample_count: 1,
      dimension: wgpu::TextureDimension::D2,
      format: TEXTURE_FORMAT,
      usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
      view_formats: &[],
    });

    for (level, pixels) in image.levels.iter().enumerate()
    {
      let (width, height) = pixels.dimensions();

      queue.write_texture(
        wgpu::TexelCopyTextureInfo {
          texture: &texture,
          mip_level: level as u32,
          origin: wgpu::Origin3d::ZERO,
          aspect: wgpu::TextureAspect::All,
        },
        pixels.as_raw(),
        wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(4 * width), rows_per_image: Some(height) },
        wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
      );
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    Self { view }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Samplers: one bind group per (mag, min) filter pair
// ──────────────────────────────────────────────────────────────
//

pub struct SamplerSet
{
  pub layout: wgpu::BindGroupLayout,
  bind_groups: Vec<wgpu::BindGroup>,
}

impl SamplerSet
{
  pub fn create(device: &wgpu::Device) -> Self
  {
    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
      label: Some("Sampler BGL"),
      entries: &[wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
      }],
    });

    let mut bind_groups = Vec::with_capacity(4);

    for min_linear in [false, true]
    {
      for mag_linear in [false, true]
      {
        let filters = TextureFilters { mag_linear, min_linear };
        debug_assert_eq!(filters.index(), bind_groups.len());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
          label: Some("Diffuse Sampler"),
          address_mode_u: wgpu::AddressMode::Repeat,
          address_mode_v: wgpu::AddressMode::Repeat,
          address_mode_w: wgpu::AddressMode::Repeat,
          mag_filter: filter_mode(mag_linear),
          min_filter: filter_mode(min_linear),
          mipmap_filter: wgpu::FilterMode::Linear,
          ..Default::default()
        });

        bind_groups.push(device.create_bind_group(&wgpu::BindGroupDescriptor {
          label: Some("Sampler BG"),
          layout: &layout,
          entries: &[wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::Sampler(&sampler) }],
        }));
      }
    }

    Self { layout, bind_groups }
  }

  pub fn bind_group(&self, filters: TextureFilters) -> &wgpu::BindGroup
  {
    &self.bind_groups[filters.index()]
  }
}

fn filter_mode(linear: bool) -> wgpu::FilterMode
{
  if linear { wgpu::FilterMode::Linear } else { wgpu::FilterMode::Nearest }
}
