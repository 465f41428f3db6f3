//! Row of lit spheres, one per material preset
//!
//! A single sphere shape is drawn once per material; each draw selects its
//! material block from a single uniform buffer.

use gl_engine::prelude::*;

const CONFIG_PATH: &str = "sample_app/config/lit_sphere.toml";

/// Uniform block binding point of `Material`
const MATERIAL_BINDING: u32 = 0;

/// Distance between neighbouring sphere centres
const SPACING: f32 = 2.2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting lit sphere sample");

    let config = ApplicationConfig::load_or_new(CONFIG_PATH, "Lit Sphere", "lit.vert", "lit.frag");
    config.validate()?;

    let mut window = WindowHandle::new(&config.window)?;
    opengl::set_clear_color(config.clear_color.0);
    opengl::enable_back_face_culling();
    opengl::enable_depth_test();

    let program = ShaderProgram::load(&config.shaders)?;
    let projection_loc = program.uniform_location("projection");
    let modelview_loc = program.uniform_location("modelview");
    let normal_matrix_loc = program.uniform_location("normalMatrix");
    let light_uniforms = LightUniforms::locate(&program);
    if !program.bind_uniform_block("Material", MATERIAL_BINDING) {
        log::warn!("Program has no Material block, spheres will be unlit");
    }

    let materials = UniformBuffer::new(&presets::ALL)?;
    log::info!("{} materials, {} bytes apart", materials.len(), materials.stride());

    let (vertices, indices) = primitives::sphere(32, 16);
    let sphere = Shape::indexed_triangles(3, &vertices, &indices)?;

    let lights = LightSet::default();
    let view = Matrix::lookat(3.0, 4.0, 5.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0);
    let first_offset = -(presets::ALL.len() as f32 - 1.0) * SPACING * 0.5;

    while window.should_continue() {
        opengl::clear(ClearMask::ColorDepth);
        program.bind();

        let fovy = window.scale() * 0.01;
        let projection = Matrix::perspective(fovy, window.aspect(), 1.0, 10.0);
        program.set_matrix4(projection_loc, &projection);
        lights.upload(&program, &light_uniforms, &view);

        let [x, y] = window.location();
        let spin = Matrix::rotate(window.time() as f32, 0.0, 1.0, 0.0);

        for index in 0..materials.len() {
            let offset = first_offset + index as f32 * SPACING;
            let model = Matrix::translate(x + offset, y, 0.0) * spin;
            let modelview = view * model;

            program.set_matrix4(modelview_loc, &modelview);
            program.set_matrix3(normal_matrix_loc, &modelview.normal_matrix());

            materials.select(MATERIAL_BINDING, index)?;
            sphere.draw();
        }

        window.swap_buffers();
    }

    log::info!("Lit sphere sample finished");
    Ok(())
}
