//! Drawable shapes
//!
//! A [`Shape`] pairs a shared vertex buffer [`Object`] with a [`DrawMode`]
//! that decides the primitive and whether the index list is used. Several
//! shapes may draw the same object; it is deleted with the last of them.

use gl::types::{GLenum, GLsizei, GLuint};
use std::rc::Rc;

use super::opengl::buffer::{BufferError, BufferResult, Object};
use super::vertex::Vertex;

/// Primitive topology and indexing of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Closed outline through every vertex in order
    LineLoop,
    /// Separate line segments, two indices each
    IndexedLines,
    /// Independent triangles, three vertices each
    Triangles,
    /// Independent triangles, three indices each
    IndexedTriangles,
}

impl DrawMode {
    /// OpenGL primitive enum
    pub const fn primitive(self) -> GLenum {
        match self {
            Self::LineLoop => gl::LINE_LOOP,
            Self::IndexedLines => gl::LINES,
            Self::Triangles | Self::IndexedTriangles => gl::TRIANGLES,
        }
    }

    /// Whether draws go through the element buffer
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::IndexedLines | Self::IndexedTriangles)
    }
}

/// Draw call derived from a shape, without touching GL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// `glDrawArrays(mode, 0, count)`
    Arrays {
        /// Primitive
        mode: GLenum,
        /// Vertices to draw
        count: GLsizei,
    },
    /// `glDrawElements(mode, count, GL_UNSIGNED_INT, 0)`
    Elements {
        /// Primitive
        mode: GLenum,
        /// Indices to draw
        count: GLsizei,
    },
}

/// Something that can be drawn
pub trait Drawable {
    /// Bind resources and issue the draw call
    fn draw(&self);
}

/// Vertex object drawn with a fixed primitive
pub struct Shape {
    object: Rc<Object>,
    vertex_count: GLsizei,
    index_count: GLsizei,
    mode: DrawMode,
}

impl Shape {
    /// Upload geometry into a new object and wrap it
    ///
    /// `indices` is ignored by the non-indexed modes.
    pub fn new(
        position_size: i32,
        vertices: &[Vertex],
        indices: &[GLuint],
        mode: DrawMode,
    ) -> BufferResult<Self> {
        let indices: &[GLuint] = if mode.is_indexed() { indices } else { &[] };
        let object = Rc::new(Object::new(position_size, vertices, indices)?);
        Self::from_object(object, mode)
    }

    /// Draw an existing, possibly shared, object
    ///
    /// Fails when `mode` is indexed but the object has no element buffer.
    pub fn from_object(object: Rc<Object>, mode: DrawMode) -> BufferResult<Self> {
        let (vertex_count, index_count) =
            draw_counts(mode, object.vertex_count(), object.index_count())?;
        Ok(Self {
            object,
            vertex_count,
            index_count,
            mode,
        })
    }

    /// Closed outline through all vertices
    pub fn line_loop(position_size: i32, vertices: &[Vertex]) -> BufferResult<Self> {
        Self::new(position_size, vertices, &[], DrawMode::LineLoop)
    }

    /// Line segments picked out by `indices`
    pub fn indexed_lines(
        position_size: i32,
        vertices: &[Vertex],
        indices: &[GLuint],
    ) -> BufferResult<Self> {
        Self::new(position_size, vertices, indices, DrawMode::IndexedLines)
    }

    /// Triangles picked out by `indices`
    pub fn indexed_triangles(
        position_size: i32,
        vertices: &[Vertex],
        indices: &[GLuint],
    ) -> BufferResult<Self> {
        Self::new(position_size, vertices, indices, DrawMode::IndexedTriangles)
    }

    /// The underlying object, for sharing with another shape
    pub fn object(&self) -> Rc<Object> {
        Rc::clone(&self.object)
    }

    /// Primitive and indexing
    pub const fn mode(&self) -> DrawMode {
        self.mode
    }

    /// The draw call [`Drawable::draw`] will issue
    pub const fn draw_call(&self) -> DrawCall {
        draw_call(self.mode, self.vertex_count, self.index_count)
    }
}

/// Vertex and index counts of an object as GL draw counts
///
/// An indexed `mode` needs at least one index.
pub fn draw_counts(
    mode: DrawMode,
    vertex_count: usize,
    index_count: usize,
) -> BufferResult<(GLsizei, GLsizei)> {
    if mode.is_indexed() && index_count == 0 {
        return Err(BufferError::MissingIndices);
    }

    let convert =
        |count: usize| GLsizei::try_from(count).map_err(|_| BufferError::CountTooLarge(count));
    Ok((convert(vertex_count)?, convert(index_count)?))
}

/// Draw call for `mode` over the given counts
pub const fn draw_call(mode: DrawMode, vertex_count: GLsizei, index_count: GLsizei) -> DrawCall {
    if mode.is_indexed() {
        DrawCall::Elements {
            mode: mode.primitive(),
            count: index_count,
        }
    } else {
        DrawCall::Arrays {
            mode: mode.primitive(),
            count: vertex_count,
        }
    }
}

impl Drawable for Shape {
    fn draw(&self) {
        self.object.bind();

        match self.draw_call() {
            DrawCall::Arrays { mode, count } => unsafe {
                gl::DrawArrays(mode, 0, count);
            },
            DrawCall::Elements { mode, count } => unsafe {
                gl::DrawElements(mode, count, gl::UNSIGNED_INT, std::ptr::null());
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_mode_primitives() {
        assert_eq!(DrawMode::LineLoop.primitive(), gl::LINE_LOOP);
        assert_eq!(DrawMode::IndexedLines.primitive(), gl::LINES);
        assert_eq!(DrawMode::Triangles.primitive(), gl::TRIANGLES);
        assert_eq!(DrawMode::IndexedTriangles.primitive(), gl::TRIANGLES);
    }

    #[test]
    fn test_draw_mode_indexing() {
        assert!(!DrawMode::LineLoop.is_indexed());
        assert!(DrawMode::IndexedLines.is_indexed());
        assert!(!DrawMode::Triangles.is_indexed());
        assert!(DrawMode::IndexedTriangles.is_indexed());
    }

    #[test]
    fn test_draw_call_uses_matching_count() {
        assert_eq!(
            draw_call(DrawMode::LineLoop, 4, 0),
            DrawCall::Arrays {
                mode: gl::LINE_LOOP,
                count: 4,
            }
        );
        assert_eq!(
            draw_call(DrawMode::IndexedLines, 8, 24),
            DrawCall::Elements {
                mode: gl::LINES,
                count: 24,
            }
        );
        assert_eq!(
            draw_call(DrawMode::Triangles, 36, 0),
            DrawCall::Arrays {
                mode: gl::TRIANGLES,
                count: 36,
            }
        );
        assert_eq!(
            draw_call(DrawMode::IndexedTriangles, 4, 6),
            DrawCall::Elements {
                mode: gl::TRIANGLES,
                count: 6,
            }
        );
    }

    #[test]
    fn test_draw_counts_require_indices_for_indexed_modes() {
        assert_eq!(draw_counts(DrawMode::LineLoop, 4, 0), Ok((4, 0)));
        assert_eq!(draw_counts(DrawMode::Triangles, 36, 0), Ok((36, 0)));
        assert_eq!(draw_counts(DrawMode::LineLoop, 4, 6), Ok((4, 6)));
        assert_eq!(draw_counts(DrawMode::IndexedTriangles, 4, 6), Ok((4, 6)));
        assert_eq!(draw_counts(DrawMode::IndexedLines, 8, 0), Err(BufferError::MissingIndices));
        assert_eq!(draw_counts(DrawMode::IndexedTriangles, 4, 0), Err(BufferError::MissingIndices));
    }

    #[test]
    fn test_draw_counts_reject_oversized_counts() {
        let too_many = GLsizei::MAX as usize + 1;
        assert_eq!(
            draw_counts(DrawMode::LineLoop, too_many, 0),
            Err(BufferError::CountTooLarge(too_many))
        );
        assert_eq!(
            draw_counts(DrawMode::IndexedLines, 8, too_many),
            Err(BufferError::CountTooLarge(too_many))
        );
        assert_eq!(
            draw_counts(DrawMode::Triangles, GLsizei::MAX as usize, 0),
            Ok((GLsizei::MAX, 0))
        );
    }
}
