// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: direct.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Direct buffer whose bytes live in an anonymous memory mapping outside the
//! Rust heap. The mapping is never handed out as a slice; callers go through
//! the cursor API.

use memmap2::MmapMut;

use super::{
	BackingArray, BufferError, BufferErrorKind, ByteView, Cursor,
};

pub struct DirectBuffer {
	map: MmapMut,
	cursor: Cursor,
}

impl DirectBuffer {
	pub fn allocate(capacity: usize) -> Result<Self, BufferError> {
		// Zero-length anonymous mappings are rejected by the kernel.
		let map = MmapMut::map_anon(capacity.max(1)).map_err(|err| {
			BufferError::new(
				BufferErrorKind::Allocation,
				format!(
					"failed to map {} bytes for direct buffer: {}",
					capacity, err
				),
			)
		})?;
		Ok(Self {
			map,
			cursor: Cursor::new(capacity),
		})
	}

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
		let start = self.cursor.advance(src.len());
		self.map[start..start + src.len()].copy_from_slice(src);
		Ok(())
	}
}

impl std::fmt::Debug for DirectBuffer {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		f.debug_struct("DirectBuffer")
			.field("cursor", &self.cursor)
			.finish_non_exhaustive()
	}
}

impl ByteView for DirectBuffer {
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
		None
	}

	fn read(&mut self, dst: &mut [u8]) -> usize {
		let n = dst.len().min(self.cursor.remaining());
		let start = self.cursor.advance(n);
		dst[..n].copy_from_slice(&self.map[start..start + n]);
		n
	}
}
