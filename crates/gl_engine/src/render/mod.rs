//! # Rendering
//!
//! OpenGL resources and the drawables built on them:
//! - **`window`**: GLFW window, context and polled input
//! - **`opengl`**: vertex buffers, shader programs, uniform blocks and GL state
//! - **`shape`**: one drawable type tagged by primitive and indexing
//! - **`material`** / **`lighting`**: uniform data for the lit programs
//! - **`primitives`**: vertex and index data for the sample solids

pub mod lighting;
pub mod material;
pub mod opengl;
pub mod primitives;
pub mod shape;
pub mod vertex;
pub mod window;

pub use lighting::{Light, LightSet, LightUniforms};
pub use material::Material;
pub use opengl::{Object, ShaderProgram, UniformBuffer};
pub use shape::{DrawMode, Drawable, Shape};
pub use vertex::Vertex;
pub use window::{InputState, WindowError, WindowHandle};
