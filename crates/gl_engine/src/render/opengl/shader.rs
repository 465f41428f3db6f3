//! Shader program loading and uniform upload
//!
//! GLSL sources are read from disk in one piece, compiled per stage and linked
//! into a program. A stage that fails to compile is logged and left out; the
//! link step then fails and reports the driver's log.

use gl::types::{GLchar, GLenum, GLint, GLuint};
use std::ffi::{CStr, CString};
use std::path::Path;
use thiserror::Error;

use super::buffer::{ATTRIBUTE_LOCATION, POSITION_LOCATION};
use crate::config::ShaderConfig;
use crate::foundation::math::{Matrix, Matrix3};

/// Shader loading errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// The source file could not be opened or read
    #[error("Can't read shader source {path}: {source}")]
    Read {
        /// Path that failed
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The source contains an interior NUL byte
    #[error("Shader source {0} contains a NUL byte")]
    InvalidSource(String),

    /// A stage failed to compile
    #[error("Compile error in {stage}:\n{log}")]
    Compile {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver info log
        log: String,
    },

    /// The program failed to link
    #[error("Link error:\n{0}")]
    Link(String),
}

/// Result type for shader operations
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    const fn gl_enum(self) -> GLenum {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex shader"),
            Self::Fragment => f.write_str("fragment shader"),
        }
    }
}

/// Attribute names bound before linking.
///
/// `color` and `normal` alias slot 1; a program may use only one of them.
const ATTRIBUTE_BINDINGS: [(GLuint, &CStr); 3] = [
    (POSITION_LOCATION, c"position"),
    (ATTRIBUTE_LOCATION, c"color"),
    (ATTRIBUTE_LOCATION, c"normal"),
];

/// Fragment shader output bound to draw buffer 0
const FRAGMENT_OUTPUT: &CStr = c"fragment";

/// Read a whole shader source file
pub fn read_shader_source(path: impl AsRef<Path>) -> ShaderResult<CString> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| {
        log::error!("Can't open source file: {}", path.display());
        ShaderError::Read {
            path: path.display().to_string(),
            source,
        }
    })?;

    CString::new(bytes).map_err(|_| ShaderError::InvalidSource(path.display().to_string()))
}

/// Convert a raw info log buffer to text, dropping the trailing NUL
pub fn info_log_to_string(mut buffer: Vec<u8>) -> String {
    if let Some(end) = buffer.iter().position(|&b| b == 0) {
        buffer.truncate(end);
    }
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

fn shader_info_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    unsafe {
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    }
    if len <= 1 {
        return String::new();
    }

    let mut buffer = vec![0u8; len as usize];
    unsafe {
        gl::GetShaderInfoLog(
            shader,
            len,
            std::ptr::null_mut(),
            buffer.as_mut_ptr().cast::<GLchar>(),
        );
    }
    info_log_to_string(buffer)
}

fn program_info_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    }
    if len <= 1 {
        return String::new();
    }

    let mut buffer = vec![0u8; len as usize];
    unsafe {
        gl::GetProgramInfoLog(
            program,
            len,
            std::ptr::null_mut(),
            buffer.as_mut_ptr().cast::<GLchar>(),
        );
    }
    info_log_to_string(buffer)
}

/// Compile one stage, returning the shader name on success
fn compile(stage: ShaderStage, source: &CStr) -> ShaderResult<GLuint> {
    let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
    let mut status: GLint = 0;
    unsafe {
        gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
    }

    let log = shader_info_log(shader);
    if status == GLint::from(gl::FALSE) {
        unsafe {
            gl::DeleteShader(shader);
        }
        return Err(ShaderError::Compile { stage, log });
    }

    if !log.is_empty() {
        log::warn!("{stage}: {log}");
    }
    Ok(shader)
}

/// Linked GLSL program
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Build a program from in-memory sources
    ///
    /// Either stage may be omitted. Stages that fail to compile are logged and
    /// not attached.
    pub fn from_sources(vertex: Option<&CStr>, fragment: Option<&CStr>) -> ShaderResult<Self> {
        let program = unsafe { gl::CreateProgram() };

        let stages = [
            (ShaderStage::Vertex, vertex),
            (ShaderStage::Fragment, fragment),
        ];
        for (stage, source) in stages {
            let Some(source) = source else { continue };
            match compile(stage, source) {
                Ok(shader) => unsafe {
                    gl::AttachShader(program, shader);
                    // Flagged for deletion, freed together with the program
                    gl::DeleteShader(shader);
                },
                Err(e) => log::error!("{e}"),
            }
        }

        let mut status: GLint = 0;
        unsafe {
            for (location, name) in ATTRIBUTE_BINDINGS {
                gl::BindAttribLocation(program, location, name.as_ptr());
            }
            gl::BindFragDataLocation(program, 0, FRAGMENT_OUTPUT.as_ptr());
            gl::LinkProgram(program);
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        }

        let log = program_info_log(program);
        if status == GLint::from(gl::FALSE) {
            log::error!("Link error: {log}");
            unsafe {
                gl::DeleteProgram(program);
            }
            return Err(ShaderError::Link(log));
        }

        if !log.is_empty() {
            log::warn!("Program {program}: {log}");
        }
        log::debug!("Linked shader program {program}");
        Ok(Self { id: program })
    }

    /// Read both sources from disk and build the program
    pub fn load(config: &ShaderConfig) -> ShaderResult<Self> {
        log::info!(
            "Loading shader program {} + {}",
            config.vertex_shader_path,
            config.fragment_shader_path
        );
        let vertex = read_shader_source(&config.vertex_shader_path)?;
        let fragment = read_shader_source(&config.fragment_shader_path)?;
        Self::from_sources(Some(&vertex), Some(&fragment))
    }

    /// Raw program name
    pub const fn id(&self) -> GLuint {
        self.id
    }

    /// Install this program for subsequent draw calls and uniform uploads
    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    /// Location of a uniform variable, `-1` if it is not active
    pub fn uniform_location(&self, name: &str) -> GLint {
        let Ok(c_name) = CString::new(name) else {
            return -1;
        };
        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };
        if location < 0 {
            log::warn!("Uniform {name} is not active in program {}", self.id);
        }
        location
    }

    /// Index of a uniform block, `None` if it is not active
    pub fn uniform_block_index(&self, name: &str) -> Option<GLuint> {
        let c_name = CString::new(name).ok()?;
        let index = unsafe { gl::GetUniformBlockIndex(self.id, c_name.as_ptr()) };
        (index != gl::INVALID_INDEX).then_some(index)
    }

    /// Attach the uniform block `name` to `binding_point`
    ///
    /// Returns false (and logs) when the block is not active.
    pub fn bind_uniform_block(&self, name: &str, binding_point: GLuint) -> bool {
        match self.uniform_block_index(name) {
            Some(index) => {
                unsafe {
                    gl::UniformBlockBinding(self.id, index, binding_point);
                }
                true
            }
            None => {
                log::warn!("Uniform block {name} is not active in program {}", self.id);
                false
            }
        }
    }

    // The setters below write to the currently bound program.

    /// Upload a 4x4 matrix
    pub fn set_matrix4(&self, location: GLint, matrix: &Matrix) {
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, matrix.data().as_ptr());
        }
    }

    /// Upload a 3x3 matrix
    pub fn set_matrix3(&self, location: GLint, matrix: &Matrix3<f32>) {
        unsafe {
            gl::UniformMatrix3fv(location, 1, gl::FALSE, matrix.as_slice().as_ptr());
        }
    }

    /// Upload an array of `vec3`
    pub fn set_vec3_array(&self, location: GLint, values: &[[f32; 3]]) {
        unsafe {
            gl::Uniform3fv(location, values.len() as GLint, values.as_ptr().cast());
        }
    }

    /// Upload an array of `vec4`
    pub fn set_vec4_array(&self, location: GLint, values: &[[f32; 4]]) {
        unsafe {
            gl::Uniform4fv(location, values.len() as GLint, values.as_ptr().cast());
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_shader_source() {
        let path =
            std::env::temp_dir().join(format!("gl_engine_{}_point.vert", std::process::id()));
        std::fs::write(&path, "#version 150 core\nvoid main() {}\n").unwrap();

        let source = read_shader_source(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(source.to_str().unwrap(), "#version 150 core\nvoid main() {}\n");
    }

    #[test]
    fn test_read_missing_shader_source() {
        let result = read_shader_source("no/such/shader.frag");
        assert!(matches!(result, Err(ShaderError::Read { .. })));
    }

    #[test]
    fn test_read_shader_source_with_nul() {
        let path = std::env::temp_dir().join(format!("gl_engine_{}_nul.frag", std::process::id()));
        std::fs::write(&path, b"void main()\0{}").unwrap();

        let result = read_shader_source(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ShaderError::InvalidSource(_))));
    }

    #[test]
    fn test_info_log_to_string() {
        let log = info_log_to_string(b"0(3) : error C0000: syntax error\n\0\0".to_vec());
        assert_eq!(log, "0(3) : error C0000: syntax error");
        assert_eq!(info_log_to_string(Vec::new()), "");
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex shader");
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }
}
