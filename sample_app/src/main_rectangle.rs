//! Filled rectangle with a surrounding outline that follows the mouse and
//! the arrow keys
//!
//! The mouse wheel zooms; the rectangle keeps its pixel size when the window
//! is resized. Fill and outline draw the same vertex buffer.

use gl_engine::prelude::*;

const CONFIG_PATH: &str = "sample_app/config/rectangle.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting rectangle sample");

    let config =
        ApplicationConfig::load_or_new(CONFIG_PATH, "Rectangle", "point.vert", "point.frag");
    config.validate()?;

    // Must outlive every GL object below
    let mut window = WindowHandle::new(&config.window)?;
    opengl::set_clear_color(config.clear_color.0);

    let program = ShaderProgram::load(&config.shaders)?;
    let modelview_loc = program.uniform_location("modelview");

    let fill = Shape::new(
        2,
        &primitives::rectangle(),
        &primitives::RECTANGLE_INDICES,
        DrawMode::IndexedTriangles,
    )?;
    let outline = Shape::from_object(fill.object(), DrawMode::LineLoop)?;
    let frame = Matrix::scale(1.25, 1.25, 1.0);

    let view = Matrix::lookat(0.0, 0.0, 0.0, -1.0, -1.0, -1.0, 0.0, 1.0, 0.0);

    while window.should_continue() {
        opengl::clear(ClearMask::Color);
        program.bind();

        // Nothing to draw while minimized
        let Some([scale_x, scale_y]) = window.pixel_scale() else {
            window.swap_buffers();
            continue;
        };
        let scaling = Matrix::scale(scale_x, scale_y, 1.0);

        let [x, y] = window.location();
        let translation = Matrix::translate(x, y, 0.0);

        let modelview = view * translation * scaling;
        program.set_matrix4(modelview_loc, &modelview);
        fill.draw();

        program.set_matrix4(modelview_loc, &(modelview * frame));
        outline.draw();

        window.swap_buffers();
    }

    log::info!("Rectangle sample finished");
    Ok(())
}
