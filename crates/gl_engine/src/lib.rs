//! # GL Engine
//!
//! Small OpenGL 3.2 core-profile toolkit behind the sample programs: a
//! column-major transform matrix, vertex and uniform buffers, shapes,
//! materials, lights and a GLFW window with polled input.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     logging::init();
//!     let config = ApplicationConfig::new("Hello", "point.vert", "point.frag");
//!
//!     let mut window = WindowHandle::new(&config.window)?;
//!     let program = ShaderProgram::load(&config.shaders)?;
//!     let shape = Shape::line_loop(2, &primitives::rectangle())?;
//!
//!     while window.should_continue() {
//!         opengl::clear(ClearMask::Color);
//!         program.bind();
//!         shape.draw();
//!         window.swap_buffers();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::many_single_char_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod config;
pub mod foundation;
pub mod render;

mod error;

pub use error::{EngineError, EngineResult};

/// Common imports for the sample programs
pub mod prelude {
    pub use crate::{
        config::{ApplicationConfig, Config, ShaderConfig, WindowConfig},
        foundation::{
            logging,
            math::{Matrix, Vector},
        },
        render::{
            material::presets,
            opengl::{self, ClearMask},
            primitives, DrawMode, Drawable, Light, LightSet, LightUniforms, Material, Object,
            ShaderProgram, Shape, UniformBuffer, Vertex, WindowHandle,
        },
        EngineError, EngineResult,
    };
}
