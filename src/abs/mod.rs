//! Core components of the rendering harness: application setup, shader
//! management and mesh upload.

pub mod app;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use mesh::*;
pub use shader::*;
