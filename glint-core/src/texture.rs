use std::path::Path;

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use log::warn;

use crate::error::TextureError;

/// Decoded RGBA8 texture plus its full mip chain (level 0 first).
#[derive(Debug, Clone)]
pub struct TextureImage
{
  pub levels: Vec<RgbaImage>,
}

impl TextureImage
{
  /// Decode an image file. Rows are flipped so that UV (0, 0) addresses
  /// the bottom-left texel, as OBJ texture coordinates expect.
  pub fn load(path: &Path) -> Result<Self, TextureError>
  {
    let decoded = image::open(path).map_err(|source| TextureError::Decode { path: path.to_path_buf(), source })?;
    Ok(Self::from_rgba(decoded.flipv().to_rgba8()))
  }

  /// Texture for materials without one, or whose image failed to decode.
  pub fn load_or_white(path: Option<&Path>) -> Self
  {
    match path
    {
      Some(path) => Self::load(path).unwrap_or_else(|e| {
        warn!("{}", e);
        Self::white()
      }),
      None => Self::white(),
    }
  }

  pub fn white() -> Self
  {
    Self::from_rgba(RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])))
  }

  pub fn from_rgba(base: RgbaImage) -> Self
  {
    let mut levels = vec![base];

    loop
    {
      let last = &levels[levels.len() - 1];
      let (w, h) = last.dimensions();
      if w <= 1 && h <= 1
      {
        break;
      }

      let next = image::imageops::resize(last, (w / 2).max(1), (h / 2).max(1), FilterType::Triangle);
      levels.push(next);
    }

    Self { levels }
  }

  pub fn width(&self) -> u32
  {
    self.levels[0].width()
  }

  pub fn height(&self) -> u32
  {
    self.levels[0].height()
  }

  pub fn mip_level_count(&self) -> u32
  {
    self.levels.len() as u32
  }
}

/// Sampler filter choices toggled at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureFilters
{
  /// false: nearest, true: linear (texture magnified)
  pub mag_linear: bool,
  /// false: nearest-mipmap-linear, true: linear-mipmap-linear (texture minified)
  pub min_linear: bool,
}

impl TextureFilters
{
  /// Index into the four pre-built samplers.
  pub fn index(self) -> usize
  {
    (self.mag_linear as usize) | ((self.min_linear as usize) << 1)
  }

  pub fn mag_name(self) -> &'static str
  {
    if self.mag_linear { "Linear" } else { "Nearest" }
  }

  pub fn min_name(self) -> &'static str
  {
    if self.min_linear { "Linear_mipmap_linear" } else { "Nearest_mipmap_linear" }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn mip_chain_reaches_one_by_one()
  {
    let tex = TextureImage::from_rgba(RgbaImage::new(8, 2));
    let dims: Vec<_> = tex.levels.iter().map(|l| l.dimensions()).collect();
    assert_eq!(dims, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    assert_eq!(tex.mip_level_count(), 4);
  }

  #[test]
  fn white_is_single_level()
  {
    let tex = TextureImage::white();
    assert_eq!((tex.width(), tex.height()), (1, 1));
    assert_eq!(tex.mip_level_count(), 1);
    assert_eq!(tex.levels[0].get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
  }

  #[test]
  fn missing_file_falls_back_to_white()
  {
    let tex = TextureImage::load_or_white(Some(Path::new("/definitely/not/here.png")));
    assert_eq!(tex.width(), 1);
  }

  #[test]
  fn filter_indices_are_distinct()
  {
    let mut seen = Vec::new();
    for mag_linear in [false, true]
    {
      for min_linear in [false, true]
      {
        seen.push(TextureFilters { mag_linear, min_linear }.index());
      }
    }
    seen.sort();
    assert_eq!(seen, vec![0, 1, 2, 3]);
  }
}
