//! OpenGL rendering backend
//!
//! Thin RAII wrappers over the raw `gl` bindings. Every type here assumes the
//! context created by [`WindowHandle`](crate::render::WindowHandle) is current
//! on the calling thread, and must be dropped before that window is.

pub mod buffer;
pub mod shader;
pub mod uniform_buffer;

pub use buffer::{AttributeLayout, BufferError, BufferResult, Object};
pub use shader::{ShaderError, ShaderProgram, ShaderResult};
pub use uniform_buffer::{aligned_stride, UniformBuffer};

use gl::types::GLbitfield;

/// Buffers cleared at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMask {
    /// Color buffer only, for 2D samples
    Color,
    /// Color and depth buffers
    ColorDepth,
}

impl ClearMask {
    /// Raw `glClear` bitmask
    pub const fn bits(self) -> GLbitfield {
        match self {
            Self::Color => gl::COLOR_BUFFER_BIT,
            Self::ColorDepth => gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT,
        }
    }
}

/// Set the color used by [`clear`]
pub fn set_clear_color(rgba: [f32; 4]) {
    unsafe {
        gl::ClearColor(rgba[0], rgba[1], rgba[2], rgba[3]);
    }
}

/// Clear the framebuffer
pub fn clear(mask: ClearMask) {
    unsafe {
        gl::Clear(mask.bits());
    }
}

/// Enable depth testing with the default `LESS` comparison
pub fn enable_depth_test() {
    unsafe {
        gl::ClearDepth(1.0);
        gl::DepthFunc(gl::LESS);
        gl::Enable(gl::DEPTH_TEST);
    }
}

/// Cull back faces of counter-clockwise wound triangles
pub fn enable_back_face_culling() {
    unsafe {
        gl::FrontFace(gl::CCW);
        gl::CullFace(gl::BACK);
        gl::Enable(gl::CULL_FACE);
    }
}

/// Set the viewport to cover `width` x `height` pixels from the origin
pub fn set_viewport(width: i32, height: i32) {
    unsafe {
        gl::Viewport(0, 0, width, height);
    }
}
