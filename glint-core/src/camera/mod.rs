mod projection;
mod view;

pub use projection::{Projection, ProjectionMode, CLIP_GL_TO_WGPU};
pub use view::ViewCamera;
