// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: heap.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Heap buffer backed by a `Vec<u8>`, optionally windowed at a non-zero
//! offset into its storage.

use super::{
	zeroed, BackingArray, BufferError, BufferErrorKind, ByteView, Cursor,
	ReadOnlyBuffer,
};

#[derive(Debug, Clone)]
pub struct HeapBuffer {
	storage: Vec<u8>,
	offset: usize,
	cursor: Cursor,
}

impl HeapBuffer {
	pub fn allocate(capacity: usize) -> Result<Self, BufferError> {
		Ok(Self::wrap(zeroed(capacity)?))
	}

	pub fn wrap(storage: Vec<u8>) -> Self {
		let cursor = Cursor::new(storage.len());
		Self {
			storage,
			offset: 0,
			cursor,
		}
	}

	/// Narrows the buffer to its current readable region. The returned
	/// buffer keeps the same storage; its element zero sits at
	/// `array_offset()`.
	pub fn slice(self) -> Self {
		let offset = self.offset + self.cursor.position();
		let cursor = Cursor::new(self.cursor.remaining());
		Self {
			storage: self.storage,
			offset,
			cursor,
		}
	}

	pub fn array_offset(&self) -> usize {
		self.offset
	}

	/// Relative bulk put at the current position.
	pub fn put(&mut self, src: &[u8]) -> Result<(), BufferError> {
		if src.len() > self.cursor.remaining() {
			return Err(BufferError::new(
				BufferErrorKind::Overflow,
				format!(
					"cannot write {} bytes with only {} remaining",
					src.len(),
					self.cursor.remaining()
				),
			));
		}
		let start = self.offset + self.cursor.advance(src.len());
		self.storage[start..start + src.len()].copy_from_slice(src);
		Ok(())
	}

	/// Read-only view over the same window with an independent cursor
	/// starting from this buffer's position and limit.
	pub fn as_read_only(&self) -> ReadOnlyBuffer<'_> {
		ReadOnlyBuffer::with_cursor(self.window(), self.cursor)
	}

	fn window(&self) -> &[u8] {
		&self.storage[self.offset..self.offset + self.cursor.capacity()]
	}
}

impl ByteView for HeapBuffer {
	fn capacity(&self) -> usize {
		self.cursor.capacity()
	}

	fn position(&self) -> usize {
		self.cursor.position()
	}

	fn limit(&self) -> usize {
		self.cursor.limit()
	}

	fn set_position(
		&mut self,
		position: usize,
	) -> Result<(), BufferError> {
		self.cursor.set_position(position)
	}

	fn set_limit(&mut self, limit: usize) -> Result<(), BufferError> {
		self.cursor.set_limit(limit)
	}

	fn is_read_only(&self) -> bool {
		false
	}

	fn backing_array(&self) -> Option<BackingArray<'_>> {
		Some(BackingArray::new(&self.storage, self.offset))
	}

	fn read(&mut self, dst: &mut [u8]) -> usize {
		let n = dst.len().min(self.cursor.remaining());
		let start = self.offset + self.cursor.advance(n);
		dst[..n].copy_from_slice(&self.storage[start..start + n]);
		n
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slice_shifts_array_offset() {
		let mut buffer = HeapBuffer::allocate(32).unwrap();
		buffer.set_position(7).unwrap();
		buffer.set_limit(19).unwrap();
		let mut slice = buffer.slice();
		assert_eq!(slice.array_offset(), 7);
		assert_eq!(slice.capacity(), 12);
		assert_eq!(slice.position(), 0);

		slice.put(b"abc").unwrap();
		let array = slice.backing_array().unwrap();
		assert_eq!(&array.bytes()[7..10], b"abc");
		assert_eq!(array.bytes()[6], 0);
	}

	#[test]
	fn put_rejects_overflow_without_writing() {
		let mut buffer = HeapBuffer::allocate(2).unwrap();
		let err = buffer.put(b"abc").unwrap_err();
		assert_eq!(err.kind(), BufferErrorKind::Overflow);
		assert_eq!(buffer.position(), 0);
	}
}
