use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError
{
  #[error("model file not found: {0}")]
  NotFound(PathBuf),

  #[error("failed to parse {path}: {source}")]
  Obj
  {
    path: PathBuf,
    #[source]
    source: tobj::LoadError,
  },
}

#[derive(Debug, Error)]
pub enum TextureError
{
  #[error("failed to decode texture {path}: {source}")]
  Decode
  {
    path: PathBuf,
    #[source]
    source: image::ImageError,
  },
}

#[derive(Debug, Error)]
pub enum ConfigError
{
  #[error("failed to read config {path}: {source}")]
  Read
  {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config {path}: {source}")]
  Parse
  {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
