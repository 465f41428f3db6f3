//! Polled input state
//!
//! GLFW delivers resize, wheel and key events through the window's event
//! receiver. [`InputState`] is the context those events are folded into; the
//! render loop reads it back once per frame.

use glfw::{Action, WindowEvent};

/// Wheel zoom before any scroll event arrives
pub const INITIAL_SCALE: f32 = 100.0;

/// Window size, zoom and pointer location as seen by the render loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    size: [f32; 2],
    aspect: f32,
    scale: f32,
    location: [f32; 2],
    key_status: Action,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            size: [0.0; 2],
            aspect: 1.0,
            scale: INITIAL_SCALE,
            location: [0.0; 2],
            key_status: Action::Release,
        }
    }
}

impl InputState {
    /// Input state for a window of the given size
    pub fn new(width: i32, height: i32) -> Self {
        let mut state = Self::default();
        state.resize(width, height);
        state
    }

    /// Fold one window event into the state
    ///
    /// Returns `true` for a resize, in which case the caller should update
    /// the viewport.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match *event {
            WindowEvent::Size(width, height) => {
                self.resize(width, height);
                true
            }
            WindowEvent::Scroll(_, y) => {
                self.scale += y as f32;
                false
            }
            WindowEvent::Key(_, _, action, _) => {
                self.key_status = action;
                false
            }
            _ => false,
        }
    }

    /// Record a new window size in screen coordinates
    ///
    /// A zero height (minimized window) keeps the previous aspect ratio.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.size = [width as f32, height as f32];
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
        log::debug!("Window resized to {}x{}", width, height);
    }

    /// Whether the last key event left a key pressed or repeating
    pub fn is_key_held(&self) -> bool {
        self.key_status != Action::Release
    }

    /// Step the location by one pixel's worth of normalized device space
    ///
    /// Left takes precedence over right, down over up.
    pub fn apply_arrows(&mut self, left: bool, right: bool, down: bool, up: bool) {
        let [width, height] = self.size;

        if width > 0.0 {
            if left {
                self.location[0] -= 2.0 / width;
            } else if right {
                self.location[0] += 2.0 / width;
            }
        }

        if height > 0.0 {
            if down {
                self.location[1] -= 2.0 / height;
            } else if up {
                self.location[1] += 2.0 / height;
            }
        }
    }

    /// Move the location to a cursor position given in window coordinates
    ///
    /// Window y grows downwards, normalized device y grows upwards.
    pub fn cursor_to_location(&mut self, x: f64, y: f64) {
        let [width, height] = self.size;
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        self.location = [
            x as f32 * 2.0 / width - 1.0,
            1.0 - y as f32 * 2.0 / height,
        ];
    }

    /// Window size in screen coordinates
    pub const fn size(&self) -> [f32; 2] {
        self.size
    }

    /// Width over height
    pub const fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Accumulated wheel zoom
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Normalized device extent of `scale` pixels along x and y
    ///
    /// `None` while either dimension is zero, as when minimized.
    pub fn pixel_scale(&self) -> Option<[f32; 2]> {
        let [width, height] = self.size;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some([self.scale * 2.0 / width, self.scale * 2.0 / height])
    }

    /// Location in normalized device coordinates
    pub const fn location(&self) -> [f32; 2] {
        self.location
    }

    /// Action of the most recent key event
    pub const fn key_status(&self) -> Action {
        self.key_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glfw::{Key, Modifiers};

    #[test]
    fn test_initial_state() {
        let input = InputState::new(640, 480);

        assert_eq!(input.size(), [640.0, 480.0]);
        assert_relative_eq!(input.aspect(), 640.0 / 480.0);
        assert_eq!(input.scale(), INITIAL_SCALE);
        assert_eq!(input.location(), [0.0, 0.0]);
        assert!(!input.is_key_held());
    }

    #[test]
    fn test_scroll_accumulates_scale() {
        let mut input = InputState::new(640, 480);

        assert!(!input.handle_event(&WindowEvent::Scroll(0.0, 3.0)));
        input.handle_event(&WindowEvent::Scroll(0.0, -1.0));

        assert_relative_eq!(input.scale(), 102.0);
    }

    #[test]
    fn test_size_event_requests_viewport_update() {
        let mut input = InputState::new(640, 480);

        assert!(input.handle_event(&WindowEvent::Size(800, 400)));
        assert_eq!(input.size(), [800.0, 400.0]);
        assert_relative_eq!(input.aspect(), 2.0);

        input.handle_event(&WindowEvent::Size(800, 0));
        assert_relative_eq!(input.aspect(), 2.0);
    }

    #[test]
    fn test_key_events_track_last_action() {
        let mut input = InputState::new(640, 480);

        input.handle_event(&WindowEvent::Key(Key::Left, 0, Action::Press, Modifiers::empty()));
        assert!(input.is_key_held());

        input.handle_event(&WindowEvent::Key(Key::Left, 0, Action::Repeat, Modifiers::empty()));
        assert!(input.is_key_held());

        input.handle_event(&WindowEvent::Key(Key::Left, 0, Action::Release, Modifiers::empty()));
        assert!(!input.is_key_held());
    }

    #[test]
    fn test_arrows_move_one_pixel() {
        let mut input = InputState::new(200, 100);

        input.apply_arrows(false, true, false, true);
        assert_relative_eq!(input.location()[0], 0.01);
        assert_relative_eq!(input.location()[1], 0.02);

        // left beats right, down beats up
        input.apply_arrows(true, true, true, true);
        assert_relative_eq!(input.location()[0], 0.0);
        assert_relative_eq!(input.location()[1], 0.0);
    }

    #[test]
    fn test_cursor_maps_to_device_coordinates() {
        let mut input = InputState::new(640, 480);

        input.cursor_to_location(0.0, 0.0);
        assert_eq!(input.location(), [-1.0, 1.0]);

        input.cursor_to_location(640.0, 480.0);
        assert_eq!(input.location(), [1.0, -1.0]);

        input.cursor_to_location(320.0, 120.0);
        assert_relative_eq!(input.location()[0], 0.0);
        assert_relative_eq!(input.location()[1], 0.5);
    }

    #[test]
    fn test_zero_size_ignores_movement() {
        let mut input = InputState::new(0, 0);

        input.apply_arrows(true, false, true, false);
        input.cursor_to_location(10.0, 10.0);

        assert_eq!(input.location(), [0.0, 0.0]);
        assert_relative_eq!(input.aspect(), 1.0);
    }

    #[test]
    fn test_pixel_scale_skips_minimized_window() {
        let mut input = InputState::new(400, 200);
        let [x, y] = input.pixel_scale().unwrap();
        assert_relative_eq!(x, 0.5);
        assert_relative_eq!(y, 1.0);

        input.handle_event(&WindowEvent::Size(0, 0));
        assert_eq!(input.pixel_scale(), None);

        input.handle_event(&WindowEvent::Size(400, 0));
        assert_eq!(input.pixel_scale(), None);
    }
}
