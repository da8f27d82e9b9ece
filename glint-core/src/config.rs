use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lighting::LightRig;

//
// ──────────────────────────────────────────────────────────────
//   Viewer configuration (JSON)
//
//   {
//     "preset": "textured",
//     "window": { "width": 800, "height": 600, "title": "glint" },
//     "models": ["TextureModels/Mew.obj"],
//     "hud": true
//   }
//
//   Every field is optional, window fields included; missing ones
//   come from the preset.
// ──────────────────────────────────────────────────────────────
//

const NORMAL_MODELS: [&str; 5] = [
  "assets/NormalModels/bunny5KN.obj",
  "assets/NormalModels/dragon10KN.obj",
  "assets/NormalModels/lucy25KN.obj",
  "assets/NormalModels/teapot4KN.obj",
  "assets/NormalModels/dolphinN.obj",
];

const TEXTURE_MODELS: [&str; 7] = [
  "assets/TextureModels/Fushigidane.obj",
  "assets/TextureModels/Mew.obj",
  "assets/TextureModels/Nyarth.obj",
  "assets/TextureModels/Zenigame.obj",
  "assets/TextureModels/laurana500.obj",
  "assets/TextureModels/Nala.obj",
  "assets/TextureModels/Square.obj",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset
{
  /// Untextured models under a white light rig.
  #[default]
  Shading,
  /// Textured models with eye sprites and a brighter rig.
  Textured,
}

impl Preset
{
  pub fn lights(self) -> LightRig
  {
    match self
    {
      Preset::Shading => LightRig::shading(),
      Preset::Textured => LightRig::textured(),
    }
  }

  fn default_window(self) -> WindowConfig
  {
    match self
    {
      Preset::Shading => WindowConfig { width: 800, height: 800, title: "glint — shading".into() },
      Preset::Textured => WindowConfig { width: 800, height: 600, title: "glint — textured".into() },
    }
  }

  fn default_models(self) -> Vec<PathBuf>
  {
    let list: &[&str] = match self
    {
      Preset::Shading => &NORMAL_MODELS,
      Preset::Textured => &TEXTURE_MODELS,
    };
    list.iter().map(PathBuf::from).collect()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig
{
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerConfig
{
  pub preset: Preset,
  pub window: WindowConfig,
  pub models: Vec<PathBuf>,
  pub hud: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWindow
{
  width: Option<u32>,
  height: Option<u32>,
  title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig
{
  #[serde(default)]
  preset: Preset,
  #[serde(default)]
  window: RawWindow,
  #[serde(default)]
  models: Vec<PathBuf>,
  hud: Option<bool>,
}

impl ViewerConfig
{
  pub fn preset(preset: Preset) -> Self
  {
    Self::from_raw(RawConfig { preset, ..RawConfig::default() }, None)
  }

  /// Read a JSON config; relative model paths resolve against the
  /// directory holding the file.
  pub fn load(path: &Path) -> Result<Self, ConfigError>
  {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    Self::parse(&text, Some(path))
  }

  /// Parse JSON text; `origin` is the file it came from, if any.
  pub fn parse(text: &str, origin: Option<&Path>) -> Result<Self, ConfigError>
  {
    let raw: RawConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
      path: origin.map(Path::to_path_buf).unwrap_or_default(),
      source,
    })?;
    Ok(Self::from_raw(raw, origin.and_then(Path::parent)))
  }

  /// Replace the model list (e.g. from the command line).
  pub fn with_models(mut self, models: Vec<PathBuf>) -> Self
  {
    if !models.is_empty()
    {
      self.models = models;
    }
    self
  }

  fn from_raw(raw: RawConfig, base_dir: Option<&Path>) -> Self
  {
    let preset = raw.preset;

    // Only paths written in the file are relative to it; preset lists
    // stay relative to the working directory.
    let models: Vec<PathBuf> = match base_dir
    {
      Some(dir) => raw.models.into_iter().map(|p| if p.is_relative() { dir.join(p) } else { p }).collect(),
      None => raw.models,
    };
    let models = if models.is_empty() { preset.default_models() } else { models };

    let defaults = preset.default_window();
    let window = WindowConfig {
      width: raw.window.width.unwrap_or(defaults.width),
      height: raw.window.height.unwrap_or(defaults.height),
      title: raw.window.title.unwrap_or(defaults.title),
    };

    Self { preset, window, models, hud: raw.hud.unwrap_or(true) }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn presets_fill_everything()
  {
    let shading = ViewerConfig::preset(Preset::Shading);
    assert_eq!((shading.window.width, shading.window.height), (800, 800));
    assert_eq!(shading.models.len(), 5);
    assert!(shading.hud);

    let textured = ViewerConfig::preset(Preset::Textured);
    assert_eq!((textured.window.width, textured.window.height), (800, 600));
    assert_eq!(textured.models.len(), 7);
  }

  #[test]
  fn parse_partial_config()
  {
    let cfg = ViewerConfig::parse(r#"{ "preset": "textured", "models": ["a.obj", "/abs/b.obj"], "hud": false }"#, Some(Path::new("/cfg/viewer.json")))
      .unwrap();

    assert_eq!(cfg.preset, Preset::Textured);
    assert_eq!(cfg.window.height, 600);
    assert_eq!(cfg.models, vec![PathBuf::from("/cfg/a.obj"), PathBuf::from("/abs/b.obj")]);
    assert!(!cfg.hud);
  }

  #[test]
  fn empty_object_is_shading_preset()
  {
    let cfg = ViewerConfig::parse("{}", None).unwrap();
    assert_eq!(cfg, ViewerConfig::preset(Preset::Shading));
  }

  #[test]
  fn preset_models_ignore_config_directory()
  {
    let origin = Path::new("/home/u/cfg/viewer.json");

    let cfg = ViewerConfig::parse(r#"{ "preset": "textured" }"#, Some(origin)).unwrap();
    assert_eq!(cfg.models[0], PathBuf::from("assets/TextureModels/Fushigidane.obj"));

    let cfg = ViewerConfig::parse("{}", Some(origin)).unwrap();
    assert_eq!(cfg, ViewerConfig::preset(Preset::Shading));
  }

  #[test]
  fn partial_window_keeps_preset_fields()
  {
    let cfg = ViewerConfig::parse(r#"{ "preset": "textured", "window": { "width": 1024 } }"#, None).unwrap();
    assert_eq!(cfg.window.width, 1024);
    assert_eq!(cfg.window.height, 600);
    assert_eq!(cfg.window.title, ViewerConfig::preset(Preset::Textured).window.title);

    let err = ViewerConfig::parse(r#"{ "window": { "depth": 3 } }"#, None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
  }

  #[test]
  fn unknown_fields_are_rejected()
  {
    let err = ViewerConfig::parse(r#"{ "presets": "textured" }"#, None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
  }

  #[test]
  fn command_line_models_override()
  {
    let cfg = ViewerConfig::preset(Preset::Shading).with_models(vec![PathBuf::from("x.obj")]);
    assert_eq!(cfg.models, vec![PathBuf::from("x.obj")]);

    let unchanged = ViewerConfig::preset(Preset::Shading).with_models(Vec::new());
    assert_eq!(unchanged.models.len(), 5);
  }
}
