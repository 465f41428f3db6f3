//! Material system for rendering
//!
//! [`Material`] matches a std140 uniform block:
//!
//! ```glsl
//! layout (std140) uniform Material
//! {
//!   vec3 Kamb;
//!   vec3 Kdiff;
//!   vec3 Kspec;
//!   float Kshi;
//! };
//! ```

/// Reflectance of a surface under Phong lighting
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    /// Ambient reflectance (RGB)
    pub ambient: [f32; 3],
    _pad0: f32,
    /// Diffuse reflectance (RGB)
    pub diffuse: [f32; 3],
    _pad1: f32,
    /// Specular reflectance (RGB)
    pub specular: [f32; 3],
    /// Specular exponent
    pub shininess: f32,
}

unsafe impl bytemuck::Pod for Material {}
unsafe impl bytemuck::Zeroable for Material {}

impl Material {
    /// Create a material from its reflectances
    pub const fn new(
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            ambient,
            _pad0: 0.0,
            diffuse,
            _pad1: 0.0,
            specular,
            shininess,
        }
    }

    /// Matte material of a single color
    pub fn matte(color: [f32; 3]) -> Self {
        Self::new(
            [color[0] * 0.2, color[1] * 0.2, color[2] * 0.2],
            color,
            [0.0; 3],
            1.0,
        )
    }

    /// Set the specular reflectance and exponent
    #[must_use]
    pub fn with_specular(mut self, specular: [f32; 3], shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }
}

/// A few named materials for the lit samples
pub mod presets {
    use super::Material;

    /// Shiny red plastic
    pub const RED_PLASTIC: Material =
        Material::new([0.6, 0.6, 0.2], [0.6, 0.1, 0.1], [0.3, 0.3, 0.3], 30.0);

    /// Polished gold
    pub const GOLD: Material = Material::new(
        [0.24725, 0.1995, 0.0745],
        [0.75164, 0.60648, 0.22648],
        [0.628281, 0.555802, 0.366065],
        51.2,
    );

    /// Dull green rubber
    pub const GREEN_RUBBER: Material =
        Material::new([0.0, 0.05, 0.0], [0.4, 0.5, 0.4], [0.04, 0.7, 0.04], 10.0);

    /// All presets, in display order
    pub const ALL: [Material; 3] = [RED_PLASTIC, GOLD, GREEN_RUBBER];
}
