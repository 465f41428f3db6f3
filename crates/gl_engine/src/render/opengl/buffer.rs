//! Vertex buffer management
//!
//! An [`Object`] owns one vertex array object, its vertex buffer and an
//! optional element buffer. Data is uploaded once with `STATIC_DRAW` and never
//! changed afterwards.

use gl::types::{GLint, GLsizei, GLsizeiptr, GLuint};
use std::ffi::c_void;
use std::mem::{offset_of, size_of};
use thiserror::Error;

use crate::render::vertex::Vertex;

/// Attribute slot of the vertex position
pub const POSITION_LOCATION: GLuint = 0;

/// Attribute slot of the color or normal
pub const ATTRIBUTE_LOCATION: GLuint = 1;

/// Buffer creation and update errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// Positions must have two or three components
    #[error("Position size must be 2 or 3, got {0}")]
    InvalidPositionSize(GLint),

    /// An index refers past the end of the vertex data
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: GLuint,
        /// Number of vertices available
        vertex_count: usize,
    },

    /// A uniform block write does not fit in the buffer
    #[error("Blocks {start}..{end} out of range for {count} blocks")]
    BlockOutOfRange {
        /// First block written
        start: usize,
        /// One past the last block written
        end: usize,
        /// Number of blocks in the buffer
        count: usize,
    },

    /// An indexed draw mode over an object without an element buffer
    #[error("Indexed draw requested but the object has no indices")]
    MissingIndices,

    /// A vertex or index count does not fit in `GLsizei`
    #[error("Count {0} exceeds the GL draw limit")]
    CountTooLarge(usize),
}

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Arguments of one `glVertexAttribPointer` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    /// Attribute slot
    pub index: GLuint,
    /// Number of float components
    pub size: GLint,
    /// Distance in bytes between consecutive vertices
    pub stride: GLsizei,
    /// Byte offset of the first component
    pub offset: usize,
}

impl AttributeLayout {
    /// Layout of [`Vertex`] with `position_size` position components
    pub fn for_vertex(position_size: GLint) -> [Self; 2] {
        let stride = size_of::<Vertex>() as GLsizei;
        [
            Self {
                index: POSITION_LOCATION,
                size: position_size,
                stride,
                offset: offset_of!(Vertex, position),
            },
            Self {
                index: ATTRIBUTE_LOCATION,
                size: 3,
                stride,
                offset: offset_of!(Vertex, attribute),
            },
        ]
    }

    fn apply(&self) {
        unsafe {
            gl::VertexAttribPointer(
                self.index,
                self.size,
                gl::FLOAT,
                gl::FALSE,
                self.stride,
                self.offset as *const c_void,
            );
            gl::EnableVertexAttribArray(self.index);
        }
    }
}

/// Check the construction parameters of an [`Object`]
pub fn validate_geometry(
    position_size: GLint,
    vertices: &[Vertex],
    indices: &[GLuint],
) -> BufferResult<()> {
    if !(2..=3).contains(&position_size) {
        return Err(BufferError::InvalidPositionSize(position_size));
    }

    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
        return Err(BufferError::IndexOutOfRange {
            index,
            vertex_count: vertices.len(),
        });
    }

    Ok(())
}

/// GPU-resident vertex data with an optional index list
pub struct Object {
    vao: GLuint,
    vbo: GLuint,
    ibo: Option<GLuint>,
    vertex_count: usize,
    index_count: usize,
}

impl Object {
    /// Upload `vertices` (and `indices` when non-empty)
    ///
    /// `position_size` is the number of position components the shader reads
    /// from each vertex, 2 or 3.
    pub fn new(
        position_size: GLint,
        vertices: &[Vertex],
        indices: &[GLuint],
    ) -> BufferResult<Self> {
        validate_geometry(position_size, vertices, indices)?;

        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(vertices) as GLsizeiptr,
                vertices.as_ptr().cast(),
                gl::STATIC_DRAW,
            );
        }

        for layout in AttributeLayout::for_vertex(position_size) {
            layout.apply();
        }

        let ibo = (!indices.is_empty()).then(|| {
            let mut ibo = 0;
            unsafe {
                gl::GenBuffers(1, &mut ibo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as GLsizeiptr,
                    indices.as_ptr().cast(),
                    gl::STATIC_DRAW,
                );
            }
            ibo
        });

        log::debug!(
            "Created vertex array {} ({} vertices, {} indices)",
            vao,
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            vao,
            vbo,
            ibo,
            vertex_count: vertices.len(),
            index_count: indices.len(),
        })
    }

    /// Make this the current vertex array
    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
        }
    }

    /// Number of vertices uploaded
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of indices uploaded, zero without an element buffer
    pub const fn index_count(&self) -> usize {
        self.index_count
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            if let Some(ibo) = self.ibo {
                gl::DeleteBuffers(1, &ibo);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_layout() {
        let [position, attribute] = AttributeLayout::for_vertex(2);

        assert_eq!(position.index, 0);
        assert_eq!(position.size, 2);
        assert_eq!(position.offset, 0);
        assert_eq!(attribute.index, 1);
        assert_eq!(attribute.size, 3);
        assert_eq!(attribute.offset, 12);
        assert_eq!(position.stride, 24);
        assert_eq!(attribute.stride, 24);
    }

    #[test]
    fn test_validate_geometry() {
        let vertices = [
            Vertex::flat(0.0, 0.0),
            Vertex::flat(1.0, 0.0),
            Vertex::flat(0.0, 1.0),
        ];

        assert_eq!(validate_geometry(3, &vertices, &[0, 1, 2]), Ok(()));
        assert_eq!(validate_geometry(2, &vertices, &[]), Ok(()));
        assert_eq!(validate_geometry(4, &vertices, &[]), Err(BufferError::InvalidPositionSize(4)));
        assert_eq!(
            validate_geometry(3, &vertices, &[0, 3]),
            Err(BufferError::IndexOutOfRange {
                index: 3,
                vertex_count: 3,
            })
        );
    }
}
