mod app;
mod input;
mod renderer;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_core::config::{Preset, ViewerConfig};

const DEFAULT_LOG_FILTER: &str = "info,wgpu_hal=off,naga=warn";

/// Interactive OBJ viewer comparing per-vertex and per-pixel Phong lighting.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about)]
struct Args
{
  /// JSON viewer config
  #[arg(short, long, conflicts_with = "preset")]
  config: Option<PathBuf>,

  /// Built-in defaults to start from when no config file is given
  #[arg(short, long, value_enum)]
  preset: Option<PresetArg>,

  /// OBJ files to view, replacing the configured list
  models: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg
{
  Shading,
  Textured,
}

impl From<PresetArg> for Preset
{
  fn from(arg: PresetArg) -> Self
  {
    match arg
    {
      PresetArg::Shading => Preset::Shading,
      PresetArg::Textured => Preset::Textured,
    }
  }
}

impl Args
{
  fn into_config(self) -> anyhow::Result<ViewerConfig>
  {
    let config = match &self.config
    {
      Some(path) => ViewerConfig::load(path)?,
      None => ViewerConfig::preset(self.preset.map(Preset::from).unwrap_or_default()),
    };

    Ok(config.with_models(self.models))
  }
}

fn main() -> anyhow::Result<()>
{
  // RUST_LOG overrides; wgpu_hal is too chatty at info.
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();

  let config = Args::parse().into_config()?;
  app::run(config)
}
