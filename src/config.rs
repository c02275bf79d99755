//! Shader path configuration.
//!
//! The harness takes no command-line arguments; the two shader source paths
//! default to the `shaders/` directory and may be overridden through the
//! environment.

use std::path::PathBuf;

/// Environment variable overriding the vertex shader path.
pub const VERTEX_SHADER_ENV: &str = "TRISHADE_VERTEX_SHADER";
/// Environment variable overriding the fragment shader path.
pub const FRAGMENT_SHADER_ENV: &str = "TRISHADE_FRAGMENT_SHADER";

const DEFAULT_VERTEX_PATH: &str = "shaders/vertex.glsl";
const DEFAULT_FRAGMENT_PATH: &str = "shaders/fragment.glsl";

/// Resolved locations of the two shader source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    /// Resolves the shader paths from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var(VERTEX_SHADER_ENV).ok(),
            std::env::var(FRAGMENT_SHADER_ENV).ok(),
        )
    }

    fn resolve(vertex: Option<String>, fragment: Option<String>) -> Self {
        Self {
            vertex: vertex
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VERTEX_PATH)),
            fragment: fragment
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FRAGMENT_PATH)),
        }
    }
}
