//! Window management subsystem
//!
//! - **`handle`**: the GLFW window and OpenGL context the sample programs draw into
//! - **`input`**: window size, wheel zoom and pointer location, kept free of
//!   any GLFW calls so it can be tested without a display

pub mod handle;
pub mod input;

pub use handle::{WindowError, WindowHandle, WindowResult};
pub use input::InputState;
