//! Lighting system
//!
//! Point lights uploaded as parallel uniform arrays (`Lpos`, `Lamb`, `Ldiff`,
//! `Lspec`). Positions are transformed into eye space on upload so the shader
//! can light in the same space as its normals.

use gl::types::GLint;

use super::opengl::ShaderProgram;
use crate::foundation::math::{Matrix, Vector};

/// Number of lights the lit shaders declare
pub const MAX_LIGHTS: usize = 2;

/// Point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// World-space position (`w = 0` for a directional light)
    pub position: Vector,
    /// Ambient intensity (RGB)
    pub ambient: [f32; 3],
    /// Diffuse intensity (RGB)
    pub diffuse: [f32; 3],
    /// Specular intensity (RGB)
    pub specular: [f32; 3],
}

impl Light {
    /// White light at `position`
    pub const fn white(position: Vector) -> Self {
        Self {
            position,
            ambient: [0.2, 0.2, 0.2],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
        }
    }
}

/// Uniform locations of the light arrays in one program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightUniforms {
    position: GLint,
    ambient: GLint,
    diffuse: GLint,
    specular: GLint,
}

impl LightUniforms {
    /// Look up `Lpos`, `Lamb`, `Ldiff` and `Lspec`
    pub fn locate(program: &ShaderProgram) -> Self {
        Self {
            position: program.uniform_location("Lpos"),
            ambient: program.uniform_location("Lamb"),
            diffuse: program.uniform_location("Ldiff"),
            specular: program.uniform_location("Lspec"),
        }
    }
}

/// Fixed set of lights
#[derive(Debug, Clone, PartialEq)]
pub struct LightSet {
    lights: Vec<Light>,
}

impl LightSet {
    /// Take up to [`MAX_LIGHTS`] lights; extras are dropped with a warning
    pub fn new(mut lights: Vec<Light>) -> Self {
        if lights.len() > MAX_LIGHTS {
            log::warn!("{} lights given, only {} are used", lights.len(), MAX_LIGHTS);
            lights.truncate(MAX_LIGHTS);
        }
        Self { lights }
    }

    /// The lights in upload order
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Light positions transformed by `view`
    pub fn eye_positions(&self, view: &Matrix) -> Vec<[f32; 4]> {
        self.lights
            .iter()
            .map(|light| (*view * light.position).to_array())
            .collect()
    }

    /// Upload all arrays to the bound `program`
    pub fn upload(&self, program: &ShaderProgram, uniforms: &LightUniforms, view: &Matrix) {
        let ambient: Vec<_> = self.lights.iter().map(|l| l.ambient).collect();
        let diffuse: Vec<_> = self.lights.iter().map(|l| l.diffuse).collect();
        let specular: Vec<_> = self.lights.iter().map(|l| l.specular).collect();

        program.set_vec4_array(uniforms.position, &self.eye_positions(view));
        program.set_vec3_array(uniforms.ambient, &ambient);
        program.set_vec3_array(uniforms.diffuse, &diffuse);
        program.set_vec3_array(uniforms.specular, &specular);
    }
}

impl Default for LightSet {
    fn default() -> Self {
        Self::new(vec![
            Light::white(Vector::point(0.0, 0.0, 5.0)),
            Light {
                position: Vector::point(8.0, 0.0, 0.0),
                ambient: [0.1, 0.1, 0.1],
                diffuse: [0.5, 0.5, 0.5],
                specular: [0.5, 0.5, 0.5],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_light_set_truncates() {
        let light = Light::white(Vector::point(1.0, 2.0, 3.0));
        let set = LightSet::new(vec![light; MAX_LIGHTS + 2]);

        assert_eq!(set.lights().len(), MAX_LIGHTS);
    }

    #[test]
    fn test_eye_positions_follow_view() {
        let set = LightSet::new(vec![
            Light::white(Vector::point(1.0, 2.0, 3.0)),
            Light::white(Vector::direction(0.0, 0.0, 1.0)),
        ]);
        let view = Matrix::translate(0.0, 0.0, -10.0);

        let positions = set.eye_positions(&view);
        assert_relative_eq!(positions[0][2], -7.0);
        assert_eq!(positions[0][3], 1.0);
        // directional lights are not moved
        assert_eq!(positions[1], [0.0, 0.0, 1.0, 0.0]);
    }
}
