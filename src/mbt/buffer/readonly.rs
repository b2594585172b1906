// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: readonly.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Read-only view that hides its storage behind the cursor API.

use super::{BackingArray, BufferError, ByteView, Cursor};

#[derive(Debug, Clone)]
pub struct ReadOnlyBuffer<'a> {
	window: &'a [u8],
	cursor: Cursor,
}

impl<'a> ReadOnlyBuffer<'a> {
	pub fn new(window: &'a [u8]) -> Self {
		Self::with_cursor(window, Cursor::new(window.len()))
	}

	pub(crate) fn with_cursor(window: &'a [u8], cursor: Cursor) -> Self {
		debug_assert_eq!(window.len(), cursor.capacity());
		Self { window, cursor }
	}
}

impl ByteView for ReadOnlyBuffer<'_> {
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
		true
	}

	fn backing_array(&self) -> Option<BackingArray<'_>> {
		None
	}

	fn read(&mut self, dst: &mut [u8]) -> usize {
		let n = dst.len().min(self.cursor.remaining());
		let start = self.cursor.advance(n);
		dst[..n].copy_from_slice(&self.window[start..start + n]);
		n
	}
}
