//! Scene state, lighting maths and asset loading for the glint viewer.
//!
//! Nothing here touches the GPU; `glint-native` uploads what this crate
//! computes.

pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod texture;
pub mod transform;
pub mod viewer;

pub use config::{Preset, ViewerConfig};
pub use controls::{Action, DragTracker, Outcome, TransformMode};
pub use viewer::{FrameMatrices, Status, Viewer};
