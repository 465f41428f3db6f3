//! Depth-tested cube with one color per face

use gl_engine::prelude::*;

const CONFIG_PATH: &str = "sample_app/config/solid_cube.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting solid cube sample");

    let config =
        ApplicationConfig::load_or_new(CONFIG_PATH, "Solid Cube", "color.vert", "color.frag");
    config.validate()?;

    let mut window = WindowHandle::new(&config.window)?;
    opengl::set_clear_color(config.clear_color.0);
    opengl::enable_back_face_culling();
    opengl::enable_depth_test();

    let program = ShaderProgram::load(&config.shaders)?;
    let projection_loc = program.uniform_location("projection");
    let modelview_loc = program.uniform_location("modelview");

    let (vertices, indices) = primitives::solid_cube_colored();
    let cube = Shape::indexed_triangles(3, &vertices, &indices)?;
    log::debug!("Solid cube: {} vertices, {} indices", vertices.len(), indices.len());

    let view = Matrix::lookat(3.0, 4.0, 5.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    while window.should_continue() {
        opengl::clear(ClearMask::ColorDepth);
        program.bind();

        let fovy = window.scale() * 0.01;
        let projection = Matrix::perspective(fovy, window.aspect(), 1.0, 10.0);

        let [x, y] = window.location();
        let spin = Matrix::rotate(window.time() as f32, 0.0, 1.0, 0.0);
        let modelview = view * Matrix::translate(x, y, 0.0) * spin;

        program.set_matrix4(projection_loc, &projection);
        program.set_matrix4(modelview_loc, &modelview);

        cube.draw();
        window.swap_buffers();
    }

    log::info!("Solid cube sample finished");
    Ok(())
}
