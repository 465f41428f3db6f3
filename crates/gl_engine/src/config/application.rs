//! # Sample program configuration
//!
//! Window creation parameters and shader source locations. Every field has a
//! default so a partial file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Config, ConfigError};

/// # Shader Configuration
///
/// Paths to the GLSL sources of one shader program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the vertex shader source
    pub vertex_shader_path: String,
    /// Path to the fragment shader source
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Create shader config with automatic path resolution
    ///
    /// Tries the common shader locations in order, so the samples can be run
    /// from the workspace root as well as from the application directory.
    pub fn with_path_resolution(base_vertex: &str, base_fragment: &str) -> Self {
        let shader_dirs = ["shaders/", "sample_app/shaders/", "../shaders/", "./"];

        let resolve = |base: &str| {
            shader_dirs
                .iter()
                .map(|dir| format!("{dir}{base}"))
                .find(|candidate| Path::new(candidate).exists())
                .unwrap_or_else(|| format!("shaders/{base}"))
        };

        Self {
            vertex_shader_path: resolve(base_vertex),
            fragment_shader_path: resolve(base_fragment),
        }
    }

    /// Validate that shader files exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.vertex_shader_path, &self.fragment_shader_path] {
            if !Path::new(path).exists() {
                return Err(ConfigError::Invalid(format!("Shader not found: {path}")));
            }
        }
        Ok(())
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution("point.vert", "point.frag")
    }
}

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Client area width in screen coordinates
    pub width: u32,
    /// Client area height in screen coordinates
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Requested OpenGL context version (major, minor)
    pub gl_version: (u32, u32),
    /// Wait for vertical sync before swapping buffers
    pub vsync: bool,
}

impl WindowConfig {
    /// Window of the given size and title with default context settings
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        // Uniform blocks need 3.1, core profiles need 3.2
        if self.gl_version < (3, 2) {
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} is too old, 3.2 core is required",
                self.gl_version.0, self.gl_version.1
            )));
        }

        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "Hello".to_string(),
            gl_version: (3, 2),
            vsync: true,
        }
    }
}

/// # Application Configuration
///
/// Everything one sample program needs to start up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Window creation parameters
    pub window: WindowConfig,
    /// Shader program sources
    pub shaders: ShaderConfig,
    /// Background color (RGBA)
    pub clear_color: ClearColor,
}

/// Background color wrapper so the default is white rather than black
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClearColor(pub [f32; 4]);

impl Default for ClearColor {
    fn default() -> Self {
        Self([1.0, 1.0, 1.0, 0.0])
    }
}

impl ApplicationConfig {
    /// Configuration with the given window title and shader sources
    pub fn new(title: &str, vertex_shader: &str, fragment_shader: &str) -> Self {
        Self {
            window: WindowConfig::new(640, 480, title),
            shaders: ShaderConfig::with_path_resolution(vertex_shader, fragment_shader),
            clear_color: ClearColor::default(),
        }
    }

    /// Load `path`, or build [`ApplicationConfig::new`] from the given
    /// title and shader names when the file is missing or unreadable
    pub fn load_or_new(
        path: impl AsRef<Path>,
        title: &str,
        vertex_shader: &str,
        fragment_shader: &str,
    ) -> Self {
        let path = path.as_ref();
        Self::load_from_file(path).unwrap_or_else(|e| {
            log::warn!("Using built-in configuration ({}): {}", path.display(), e);
            Self::new(title, vertex_shader, fragment_shader)
        })
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.shaders.validate()
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gl_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_window_defaults() {
        let window = WindowConfig::default();

        assert_eq!((window.width, window.height), (640, 480));
        assert_eq!(window.title, "Hello");
        assert_eq!(window.gl_version, (3, 2));
        assert!(window.vsync);
        assert!(window.validate().is_ok());
    }

    #[test]
    fn test_window_validation() {
        assert!(WindowConfig::new(0, 480, "zero").validate().is_err());

        let mut old = WindowConfig::default();
        old.gl_version = (2, 1);
        assert!(old.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ApplicationConfig = toml::from_str(
            r#"
            clear_color = [0.0, 0.0, 0.0, 1.0]

            [window]
            title = "Cube"
            width = 800
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Cube");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.clear_color, ClearColor([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = temp_path("config.ron");
        let config = ApplicationConfig::new("Sphere", "lambert.vert", "lambert.frag");

        config.save_to_file(&path).unwrap();
        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ApplicationConfig::load_from_file("settings.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        let path = temp_path("config.json");
        std::fs::write(&path, "{}").unwrap();
        let result = ApplicationConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = ApplicationConfig::load_or_default(temp_path("missing.toml"));
        assert_eq!(config, ApplicationConfig::default());
    }

    #[test]
    fn test_missing_file_builds_named_config() {
        let config =
            ApplicationConfig::load_or_new(temp_path("absent.toml"), "Cube", "a.vert", "a.frag");

        assert_eq!(config.window.title, "Cube");
        assert!(config.shaders.vertex_shader_path.ends_with("a.vert"));
        assert!(config.shaders.fragment_shader_path.ends_with("a.frag"));
    }

    #[test]
    fn test_shader_validation_reports_missing_file() {
        let shaders = ShaderConfig::new("does/not/exist.vert", "does/not/exist.frag");
        assert!(shaders.validate().is_err());
    }
}
