//! OpenGL shaders.
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for
//! compiling and linking OpenGL shaders, and the [`Uniform`] trait for
//! setting uniform variables in shader programs.

use std::fmt;
use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;
use thiserror::Error;

/// The two programmable pipeline stages the harness uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    /// The matching OpenGL shader object kind.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderKind::Vertex => glow::VERTEX_SHADER,
            ShaderKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => write!(f, "vertex"),
            ShaderKind::Fragment => write!(f, "fragment"),
        }
    }
}

/// Errors raised while compiling shaders or linking a program.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to create {kind} shader object: {message}")]
    CreateShader { kind: ShaderKind, message: String },
    #[error("{kind} shader failed to compile:\n{log}")]
    Compile { kind: ShaderKind, log: String },
    #[error("failed to create program object: {0}")]
    CreateProgram(String),
    #[error("shader program failed to link:\n{log}")]
    Link { log: String },
}

/// Represents an individual compiled OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    _kind: ShaderKind,
}

impl Shader {
    /// Compiles a new shader of the given kind from GLSL source.
    pub fn new(
        gl: &Arc<glow::Context>,
        kind: ShaderKind,
        source: &str,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl
                .create_shader(kind.gl_enum())
                .map_err(|message| ShaderError::CreateShader { kind, message })?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile { kind, log });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                _kind: kind,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w);
            }
        }
    }
}

/// Represents a linked, executable OpenGL shader program.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a vertex/fragment shader pair into an executable program.
    ///
    /// Both shaders are consumed: their GPU objects are deleted once the
    /// link attempt finishes, whatever the outcome.
    pub fn new(
        gl: &Arc<glow::Context>,
        vertex: Shader,
        fragment: Shader,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::CreateProgram)?;

            gl.attach_shader(program, vertex.id);
            gl.attach_shader(program, fragment.id);
            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }

            gl.detach_shader(program, vertex.id);
            gl.detach_shader(program, fragment.id);

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    ///
    /// The location is resolved by name on every call.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_to_gl_enums() {
        assert_eq!(ShaderKind::Vertex.gl_enum(), glow::VERTEX_SHADER);
        assert_eq!(ShaderKind::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn kind_displays_as_stage_name() {
        assert_eq!(ShaderKind::Vertex.to_string(), "vertex");
        assert_eq!(ShaderKind::Fragment.to_string(), "fragment");
    }

    #[test]
    fn compile_error_carries_stage_and_log() {
        let err = ShaderError::Compile {
            kind: ShaderKind::Fragment,
            log: "0:3(1): error: syntax error".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("fragment"));
        assert!(text.contains("0:3(1): error: syntax error"));
    }

    #[test]
    fn link_error_carries_log() {
        let err = ShaderError::Link {
            log: "undefined reference".to_string(),
        };
        assert!(err.to_string().contains("undefined reference"));
    }
}
