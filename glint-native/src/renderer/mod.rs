mod core;
mod depth;
mod gui;
mod mesh;
mod texture;
mod uniforms;

pub use self::core::Renderer;
