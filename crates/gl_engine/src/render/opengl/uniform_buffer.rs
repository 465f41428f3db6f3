//! Uniform block buffers
//!
//! One GL buffer holding `count` copies of a block type `T`. Each copy starts
//! at a multiple of the driver's `GL_UNIFORM_BUFFER_OFFSET_ALIGNMENT` so any
//! single block can be bound to a binding point with `glBindBufferRange`.

use gl::types::{GLint, GLintptr, GLsizeiptr, GLuint};
use std::marker::PhantomData;
use std::mem::size_of;

use super::buffer::{BufferError, BufferResult};

/// Smallest multiple of `alignment` that can hold `size` bytes
///
/// An alignment of zero is treated as one.
pub const fn aligned_stride(size: usize, alignment: usize) -> usize {
    let alignment = if alignment == 0 { 1 } else { alignment };
    if size == 0 {
        return alignment;
    }
    ((size - 1) / alignment + 1) * alignment
}

/// Byte range `(offset, len)` of every block in `start..start + count`
///
/// Fails when the range reaches past `capacity` blocks.
pub fn block_ranges(
    stride: usize,
    block_size: usize,
    start: usize,
    count: usize,
    capacity: usize,
) -> BufferResult<impl Iterator<Item = (usize, usize)>> {
    let Some(end) = start.checked_add(count).filter(|&end| end <= capacity) else {
        return Err(BufferError::BlockOutOfRange {
            start,
            end: start.saturating_add(count),
            count: capacity,
        });
    };
    Ok((start..end).map(move |i| (i * stride, block_size)))
}

/// GPU uniform buffer holding aligned copies of `T`
pub struct UniformBuffer<T: bytemuck::Pod> {
    buffer: GLuint,
    stride: usize,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    /// Allocate one block per element of `data` and upload them
    pub fn new(data: &[T]) -> BufferResult<Self> {
        let mut alignment: GLint = 0;
        unsafe {
            gl::GetIntegerv(gl::UNIFORM_BUFFER_OFFSET_ALIGNMENT, &mut alignment);
        }

        let stride = aligned_stride(size_of::<T>(), usize::try_from(alignment).unwrap_or(1));
        let count = data.len();

        let mut buffer = 0;
        unsafe {
            gl::GenBuffers(1, &mut buffer);
            gl::BindBuffer(gl::UNIFORM_BUFFER, buffer);
            gl::BufferData(
                gl::UNIFORM_BUFFER,
                (count * stride) as GLsizeiptr,
                std::ptr::null(),
                gl::STATIC_DRAW,
            );
        }

        log::debug!(
            "Created uniform buffer {} ({} blocks, stride {} bytes, alignment {})",
            buffer,
            count,
            stride,
            alignment
        );

        let uniform = Self {
            buffer,
            stride,
            count,
            _marker: PhantomData,
        };
        uniform.set(data, 0)?;
        Ok(uniform)
    }

    /// Overwrite blocks `start..start + data.len()`
    pub fn set(&self, data: &[T], start: usize) -> BufferResult<()> {
        let ranges = block_ranges(self.stride, size_of::<T>(), start, data.len(), self.count)?;

        unsafe {
            gl::BindBuffer(gl::UNIFORM_BUFFER, self.buffer);
            for (value, (offset, len)) in data.iter().zip(ranges) {
                gl::BufferSubData(
                    gl::UNIFORM_BUFFER,
                    offset as GLintptr,
                    len as GLsizeiptr,
                    bytemuck::bytes_of(value).as_ptr().cast(),
                );
            }
        }

        Ok(())
    }

    /// Bind block `index` to uniform binding point `binding_point`
    pub fn select(&self, binding_point: GLuint, index: usize) -> BufferResult<()> {
        let mut ranges = block_ranges(self.stride, size_of::<T>(), index, 1, self.count)?;

        if let Some((offset, len)) = ranges.next() {
            unsafe {
                gl::BindBufferRange(
                    gl::UNIFORM_BUFFER,
                    binding_point,
                    self.buffer,
                    offset as GLintptr,
                    len as GLsizeiptr,
                );
            }
        }

        Ok(())
    }

    /// Bytes between the starts of consecutive blocks
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Number of blocks
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether the buffer holds no blocks
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<T: bytemuck::Pod> Drop for UniformBuffer<T> {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_stride() {
        assert_eq!(aligned_stride(48, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(257, 256), 512);
        assert_eq!(aligned_stride(48, 16), 48);
        assert_eq!(aligned_stride(52, 16), 64);
        assert_eq!(aligned_stride(12, 0), 12);
    }

    #[test]
    fn test_block_ranges_follow_stride() {
        let ranges: Vec<_> = block_ranges(256, 48, 1, 3, 4).unwrap().collect();
        assert_eq!(ranges, vec![(256, 48), (512, 48), (768, 48)]);
    }

    #[test]
    fn test_block_ranges_reject_overflow() {
        assert!(matches!(
            block_ranges(256, 48, 3, 2, 4),
            Err(BufferError::BlockOutOfRange { start: 3, end: 5, count: 4 })
        ));
        assert!(block_ranges(256, 48, 4, 0, 4).is_ok());
    }

    #[test]
    fn test_block_ranges_reject_wrapping_start() {
        assert!(matches!(
            block_ranges(256, 48, usize::MAX, 1, 3),
            Err(BufferError::BlockOutOfRange { start: usize::MAX, end: usize::MAX, count: 3 })
        ));
        assert!(matches!(
            block_ranges(256, 48, 1, usize::MAX, 3),
            Err(BufferError::BlockOutOfRange { start: 1, .. })
        ));
    }
}
