//! Spinning wireframe cube around an octahedron
//!
//! Wheel zoom changes the field of view, the mouse and the arrow keys move
//! the cube.

use gl_engine::prelude::*;

const CONFIG_PATH: &str = "sample_app/config/wire_cube.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting wire cube sample");

    let config =
        ApplicationConfig::load_or_new(CONFIG_PATH, "Wire Cube", "color.vert", "color.frag");
    config.validate()?;

    let mut window = WindowHandle::new(&config.window)?;
    opengl::set_clear_color(config.clear_color.0);

    let program = ShaderProgram::load(&config.shaders)?;
    let projection_loc = program.uniform_location("projection");
    let modelview_loc = program.uniform_location("modelview");

    let cube = Shape::indexed_lines(
        3,
        &primitives::wire_cube_vertices(),
        &primitives::WIRE_CUBE_INDICES,
    )?;
    let octahedron = Shape::line_loop(3, &primitives::octahedron())?;
    let shapes = [cube, octahedron];

    let view = Matrix::lookat(3.0, 4.0, 5.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    while window.should_continue() {
        opengl::clear(ClearMask::Color);
        program.bind();

        let fovy = window.scale() * 0.01;
        let projection = Matrix::perspective(fovy, window.aspect(), 1.0, 10.0);

        let [x, y] = window.location();
        let spin = Matrix::rotate(window.time() as f32, 0.0, 1.0, 0.0);
        let model = Matrix::translate(x, y, 0.0) * spin;
        let modelview = view * model;

        program.set_matrix4(projection_loc, &projection);
        program.set_matrix4(modelview_loc, &modelview);

        for shape in &shapes {
            shape.draw();
        }
        window.swap_buffers();
    }

    log::info!("Wire cube sample finished");
    Ok(())
}
