use std::path::Path;

use glam::{Vec2, Vec3};
use log::{info, warn};

use crate::error::LoadError;
use crate::material::PhongMaterial;

//
// ──────────────────────────────────────────────────────────────
//   Mesh data (CPU side, flat triangle lists)
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex
{
  pub position: Vec3,
  pub normal: Vec3,
  pub uv: Vec2,
}

/// One draw call: every triangle sharing a material.
#[derive(Debug, Clone)]
pub struct Shape
{
  pub vertices: Vec<Vertex>,
  pub material: PhongMaterial,
}

#[derive(Debug, Clone)]
pub struct LoadedModel
{
  pub name: String,
  pub shapes: Vec<Shape>,
  pub has_eye: bool,
}

impl LoadedModel
{
  pub fn new(name: impl Into<String>, shapes: Vec<Shape>) -> Self
  {
    let has_eye = shapes.iter().any(|s| s.material.eye);
    Self { name: name.into(), shapes, has_eye }
  }

  pub fn vertex_count(&self) -> usize
  {
    self.shapes.iter().map(|s| s.vertices.len()).sum()
  }
}

//
// ──────────────────────────────────────────────────────────────
//   OBJ loading
// ──────────────────────────────────────────────────────────────
//

/// Load an OBJ (and its MTL), fitted into the `[-1, 1]` cube.
pub fn load_model(path: &Path) -> Result<LoadedModel, LoadError>
{
  if !path.is_file()
  {
    return Err(LoadError::NotFound(path.to_path_buf()));
  }

  let options = tobj::LoadOptions { triangulate: true, single_index: true, ..Default::default() };
  let (meshes, materials) =
    tobj::load_obj(path, &options).map_err(|source| LoadError::Obj { path: path.to_path_buf(), source })?;

  let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
  let materials = match materials
  {
    Ok(list) => list.iter().map(|m| convert_material(m, base_dir)).collect(),
    Err(e) =>
    {
      warn!("{}: materials unavailable ({}), using defaults", path.display(), e);
      Vec::new()
    }
  };

  let fit = Normalization::of(&meshes);

  let shapes: Vec<Shape> = meshes
    .iter()
    .map(|m| {
      let material = m.mesh.material_id.and_then(|id| materials.get(id)).cloned().unwrap_or_default();
      Shape { vertices: flatten_mesh(&m.mesh, &fit), material }
    })
    .filter(|s| !s.vertices.is_empty())
    .collect();

  let name = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

  info!("Loaded {}: {} shapes, {} materials", name, shapes.len(), materials.len());

  Ok(LoadedModel::new(name, shapes))
}

/// Load every path, logging and skipping the ones that fail.
pub fn load_models<P: AsRef<Path>>(paths: &[P]) -> Vec<LoadedModel>
{
  paths
    .iter()
    .filter_map(|p| match load_model(p.as_ref())
    {
      Ok(model) => Some(model),
      Err(e) =>
      {
        warn!("Skipping model: {}", e);
        None
      }
    })
    .collect()
}

fn convert_material(m: &tobj::Material, base_dir: &Path) -> PhongMaterial
{
  let defaults = PhongMaterial::default();

  let material = PhongMaterial {
    ka: m.ambient.map(Vec3::from).unwrap_or(defaults.ka),
    kd: m.diffuse.map(Vec3::from).unwrap_or(defaults.kd),
    ks: m.specular.map(Vec3::from).unwrap_or(defaults.ks),
    ..defaults
  };

  match m.diffuse_texture.as_deref()
  {
    Some(name) if !name.is_empty() => material.with_texture(base_dir.join(name)),
    _ => material,
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Normalisation: center the bounding box, scale the longest
//   axis to a length of 2
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
struct Normalization
{
  center: Vec3,
  inv_scale: f32,
}

impl Normalization
{
  fn of(meshes: &[tobj::Model]) -> Self
  {
    let points = meshes.iter().flat_map(|m| m.mesh.positions.chunks_exact(3)).map(|p| Vec3::new(p[0], p[1], p[2]));
    Self::from_points(points)
  }

  fn from_points(points: impl Iterator<Item = Vec3>) -> Self
  {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);

    for p in points
    {
      min = min.min(p);
      max = max.max(p);
    }

    if !min.is_finite() || !max.is_finite()
    {
      return Self { center: Vec3::ZERO, inv_scale: 1.0 };
    }

    let half_extent = (max - min).max_element() / 2.0;
    let inv_scale = if half_extent > 0.0 { 1.0 / half_extent } else { 1.0 };

    Self { center: (min + max) / 2.0, inv_scale }
  }

  fn apply(&self, p: Vec3) -> Vec3
  {
    (p - self.center) * self.inv_scale
  }
}

//
// ──────────────────────────────────────────────────────────────
//   De-indexing
// ──────────────────────────────────────────────────────────────
//

fn flatten_mesh(mesh: &tobj::Mesh, fit: &Normalization) -> Vec<Vertex>
{
  let has_normals = mesh.normals.len() == mesh.positions.len();
  let has_uvs = mesh.texcoords.len() / 2 == mesh.positions.len() / 3;

  let position = |i: usize| fit.apply(Vec3::new(mesh.positions[3 * i], mesh.positions[3 * i + 1], mesh.positions[3 * i + 2]));

  let mut vertices = Vec::with_capacity(mesh.indices.len());

  for tri in mesh.indices.chunks_exact(3)
  {
    let idx = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
    let corners = idx.map(position);
    let face_normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]).normalize_or_zero();

    for (k, &i) in idx.iter().enumerate()
    {
      let normal = if has_normals
      {
        Vec3::new(mesh.normals[3 * i], mesh.normals[3 * i + 1], mesh.normals[3 * i + 2])
      }
      else
      {
        face_normal
      };

      let uv = if has_uvs { Vec2::new(mesh.texcoords[2 * i], mesh.texcoords[2 * i + 1]) } else { Vec2::ZERO };

      vertices.push(Vertex { position: corners[k], normal, uv });
    }
  }

  vertices
}
