use thiserror::Error;

use ultraviolet::vec::Vec3;

/// Errors raised by [`Cursor`] read and positioning primitives.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum CursorError {
	#[error("Input truncated: {needed} bytes needed at offset {offset}")]
	Truncated {
		offset: usize,
		needed: usize,
	},
	#[error("Offset out of bounds: {0}")]
	Offset(usize),
}

/// A positionable reader over a fixed byte buffer.
///
/// Sequential reads only ever move forward; [`Cursor::jump_to`] is the one
/// way to reposition absolutely. The buffer itself is never mutated.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
	data: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	pub fn new(data: &'a [u8]) -> Cursor<'a> {
		Cursor {
			data: data,
			pos: 0,
		}
	}

	/// Current position, measured from the start of the buffer
	pub fn pos(&self) -> usize {
		self.pos
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Bytes left between the current position and the end of the buffer
	pub fn remaining(&self) -> usize {
		self.data.len() - self.pos
	}

	fn take(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
		if n > self.remaining() {
			return Err(CursorError::Truncated {
				offset: self.pos,
				needed: n,
			});
		}

		let bytes = &self.data[self.pos..self.pos + n];
		self.pos += n;

		Ok(bytes)
	}

	pub fn read_u8(&mut self) -> Result<u8, CursorError> {
		Ok(self.take(1)?[0])
	}

	/// Reads a little endian signed 32-bit integer
	pub fn read_i32(&mut self) -> Result<i32, CursorError> {
		let b = self.take(4)?;

		Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
	}

	/// Reads a little endian unsigned 32-bit integer
	pub fn read_u32(&mut self) -> Result<u32, CursorError> {
		let b = self.take(4)?;

		Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
	}

	/// Reads a little endian 32-bit float
	pub fn read_f32(&mut self) -> Result<f32, CursorError> {
		let b = self.take(4)?;

		Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
	}

	/// Reads three consecutive little endian floats as an XYZ triple
	pub fn read_vec3(&mut self) -> Result<Vec3, CursorError> {
		let x = self.read_f32()?;
		let y = self.read_f32()?;
		let z = self.read_f32()?;

		Ok(Vec3::new(x, y, z))
	}

	/// Reads exactly `n` bytes and decodes the prefix before the first NUL,
	/// discarding the trailing padding
	pub fn read_fixed_str(&mut self, n: usize) -> Result<String, CursorError> {
		let bytes = self.take(n)?;
		let end = bytes.iter().position(|&b| b == 0).unwrap_or(n);

		Ok(bytes[..end].iter().map(|&b| b as char).collect())
	}

	/// Advances the position by `n` bytes without reading
	pub fn skip(&mut self, n: usize) -> Result<(), CursorError> {
		self.take(n)?;

		Ok(())
	}

	/// Repositions to `offset`, measured from the start of the buffer
	pub fn jump_to(&mut self, offset: usize) -> Result<(), CursorError> {
		if offset > self.data.len() {
			return Err(CursorError::Offset(offset));
		}

		self.pos = offset;

		Ok(())
	}
}
