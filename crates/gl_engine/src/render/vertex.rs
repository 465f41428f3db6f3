//! Vertex attribute record shared by every shape

/// One vertex: a position plus a 3-component attribute
///
/// The attribute is a color for the unlit samples and a normal for the lit
/// ones. Positions may use only two components; the object that uploads the
/// data decides how many are read.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// Position (x, y, z)
    pub position: [f32; 3],
    /// Color or normal, bound to attribute slot 1
    pub attribute: [f32; 3],
}

unsafe impl bytemuck::Pod for Vertex {}
unsafe impl bytemuck::Zeroable for Vertex {}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], attribute: [f32; 3]) -> Self {
        Self { position, attribute }
    }

    /// A 2D vertex with no attribute data
    pub const fn flat(x: f32, y: f32) -> Self {
        Self::new([x, y, 0.0], [0.0; 3])
    }

    /// A vertex whose attribute is a color
    pub const fn colored(position: [f32; 3], color: [f32; 3]) -> Self {
        Self::new(position, color)
    }
}
