//! GLFW window with an OpenGL core-profile context
//!
//! [`WindowHandle`] owns the GLFW library handle, the window and its event
//! receiver. Events are routed into an [`InputState`] owned by the handle
//! instead of through a user pointer stored on the native window.

use glfw::{Action, Context, Glfw, GlfwReceiver, Key, MouseButton, PWindow, WindowEvent};
use thiserror::Error;

use super::input::InputState;
use crate::config::WindowConfig;
use crate::render::opengl;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Window creation failed ({width}x{height}, OpenGL {major}.{minor})")]
    CreationFailed {
        width: u32,
        height: u32,
        major: u32,
        minor: u32,
    },

    #[error("OpenGL function loading failed")]
    LoaderFailed,
}

pub type WindowResult<T> = Result<T, WindowError>;

/// Application window and its OpenGL context
///
/// GL objects must be dropped before the handle, since dropping it destroys
/// the context they live in.
pub struct WindowHandle {
    glfw: Glfw,
    window: PWindow,
    events: GlfwReceiver<(f64, WindowEvent)>,
    input: InputState,
}

impl WindowHandle {
    /// Open a window and make its context current
    ///
    /// Requests a forward-compatible core profile of the configured OpenGL
    /// version, loads the GL entry points and sets the initial viewport.
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors).map_err(|e| {
            log::error!("Can't initialize GLFW: {}", e);
            WindowError::InitializationFailed(e.to_string())
        })?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                log::error!("Can't create GLFW window");
                WindowError::CreationFailed {
                    width: config.width,
                    height: config.height,
                    major,
                    minor,
                }
            })?;

        window.make_current();
        window.set_size_polling(true);
        window.set_scroll_polling(true);
        window.set_key_polling(true);

        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
        if !gl::Viewport::is_loaded() {
            log::error!("Can't load OpenGL functions");
            return Err(WindowError::LoaderFailed);
        }

        let interval = if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        };
        glfw.set_swap_interval(interval);

        let (width, height) = window.get_size();
        let mut handle = Self {
            glfw,
            window,
            events,
            input: InputState::new(width, height),
        };
        handle.update_viewport();

        log::info!(
            "Opened \"{}\" ({}x{}, OpenGL {}.{} core)",
            config.title,
            width,
            height,
            major,
            minor
        );

        Ok(handle)
    }

    /// Process input and report whether the render loop should go on
    ///
    /// Blocks until the next event while no key is held and polls otherwise,
    /// so held arrow keys keep moving the location every frame.
    pub fn should_continue(&mut self) -> bool {
        if self.input.is_key_held() {
            self.glfw.poll_events();
        } else {
            self.glfw.wait_events();
        }

        let mut resized = false;
        for (_, event) in glfw::flush_messages(&self.events) {
            resized |= self.input.handle_event(&event);
        }
        if resized {
            self.update_viewport();
        }

        let held = |key| self.window.get_key(key) != Action::Release;
        let arrows = (held(Key::Left), held(Key::Right), held(Key::Down), held(Key::Up));
        self.input.apply_arrows(arrows.0, arrows.1, arrows.2, arrows.3);

        if self.window.get_mouse_button(MouseButton::Button1) != Action::Release {
            let (x, y) = self.window.get_cursor_pos();
            self.input.cursor_to_location(x, y);
        }

        !self.window.should_close() && self.window.get_key(Key::Escape) == Action::Release
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Window size in screen coordinates
    pub fn size(&self) -> [f32; 2] {
        self.input.size()
    }

    /// Normalized device extent of the zoom in pixels, `None` when minimized
    pub fn pixel_scale(&self) -> Option<[f32; 2]> {
        self.input.pixel_scale()
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.input.aspect()
    }

    /// Accumulated wheel zoom
    pub fn scale(&self) -> f32 {
        self.input.scale()
    }

    /// Pointer or arrow-key location in normalized device coordinates
    pub fn location(&self) -> [f32; 2] {
        self.input.location()
    }

    /// Seconds since GLFW was initialized
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Full input state
    pub fn input(&self) -> &InputState {
        &self.input
    }

    fn update_viewport(&self) {
        let (width, height) = self.window.get_framebuffer_size();
        opengl::set_viewport(width, height);
    }
}
