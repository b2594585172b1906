// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// Module: buffer (cursor-addressed byte views)
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Cursor-addressed byte views with position/limit bookkeeping.
//!
//! A view exposes the readable region `[position, limit)` of some storage of
//! fixed `capacity`. The invariant `0 <= position <= limit <= capacity` holds
//! at all times; lowering the limit below the position clamps the position.
//! Whether the storage is reachable as a plain slice is optional and is
//! reported through [`ByteView::backing_array`].

pub mod direct;
pub mod heap;
pub mod readonly;

pub use direct::DirectBuffer;
pub use heap::HeapBuffer;
pub use readonly::ReadOnlyBuffer;

use std::borrow::Cow;

/// Whole backing storage of an array-backed view plus the index at which
/// the view's element zero lives.
#[derive(Clone, Copy, Debug)]
pub struct BackingArray<'a> {
	bytes: &'a [u8],
	offset: usize,
}

impl<'a> BackingArray<'a> {
	pub fn new(bytes: &'a [u8], offset: usize) -> Self {
		Self { bytes, offset }
	}

	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}

	pub fn offset(&self) -> usize {
		self.offset
	}
}

pub trait ByteView {
	fn capacity(&self) -> usize;
	fn position(&self) -> usize;
	fn limit(&self) -> usize;
	fn set_position(
		&mut self,
		position: usize,
	) -> Result<(), BufferError>;
	fn set_limit(&mut self, limit: usize) -> Result<(), BufferError>;
	fn is_read_only(&self) -> bool;

	/// `None` when the storage must be reached through the cursor API.
	fn backing_array(&self) -> Option<BackingArray<'_>>;

	/// Copies up to `dst.len()` readable bytes and advances the position.
	/// Returns the number of bytes copied.
	fn read(&mut self, dst: &mut [u8]) -> usize;

	fn remaining(&self) -> usize {
		self.limit().saturating_sub(self.position())
	}

	fn has_remaining(&self) -> bool {
		self.remaining() > 0
	}

	fn has_array(&self) -> bool {
		self.backing_array().is_some()
	}

	/// Resets the cursor to cover the whole capacity.
	fn clear(&mut self) {
		let capacity = self.capacity();
		if self.set_limit(capacity).is_ok() {
			let _ = self.set_position(0);
		}
	}

	/// Relative bulk get: fills `dst` completely or fails without moving.
	fn get(&mut self, dst: &mut [u8]) -> Result<(), BufferError> {
		if dst.len() > self.remaining() {
			return Err(BufferError::new(
				BufferErrorKind::Underflow,
				format!(
					"cannot read {} bytes with only {} remaining",
					dst.len(),
					self.remaining()
				),
			));
		}
		self.read(dst);
		Ok(())
	}

	/// Drains the readable region into a fresh vector.
	fn read_to_vec(&mut self) -> Vec<u8> {
		let mut out = vec![0u8; self.remaining()];
		let n = self.read(&mut out);
		out.truncate(n);
		out
	}
}

/// Zero-filled storage of `len` bytes; a failed reservation is reported
/// instead of aborting.
pub fn zeroed(len: usize) -> Result<Vec<u8>, BufferError> {
	let mut storage = Vec::new();
	storage.try_reserve_exact(len).map_err(|err| {
		BufferError::new(
			BufferErrorKind::Allocation,
			format!("cannot allocate {} bytes: {}", len, err),
		)
	})?;
	storage.resize(len, 0);
	Ok(storage)
}

/// Position/limit bookkeeping shared by every view implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
	capacity: usize,
	position: usize,
	limit: usize,
}

impl Cursor {
	pub(crate) fn new(capacity: usize) -> Self {
		Self {
			capacity,
			position: 0,
			limit: capacity,
		}
	}

	pub(crate) fn capacity(&self) -> usize {
		self.capacity
	}

	pub(crate) fn position(&self) -> usize {
		self.position
	}

	pub(crate) fn limit(&self) -> usize {
		self.limit
	}

	pub(crate) fn remaining(&self) -> usize {
		self.limit - self.position
	}

	pub(crate) fn set_position(
		&mut self,
		position: usize,
	) -> Result<(), BufferError> {
		if position > self.limit {
			return Err(BufferError::new(
				BufferErrorKind::PositionOutOfBounds,
				format!(
					"position {} exceeds limit {}",
					position, self.limit
				),
			));
		}
		self.position = position;
		Ok(())
	}

	pub(crate) fn set_limit(
		&mut self,
		limit: usize,
	) -> Result<(), BufferError> {
		if limit > self.capacity {
			return Err(BufferError::new(
				BufferErrorKind::LimitOutOfBounds,
				format!(
					"limit {} exceeds capacity {}",
					limit, self.capacity
				),
			));
		}
		self.limit = limit;
		if self.position > limit {
			self.position = limit;
		}
		Ok(())
	}

	/// Moves the position forward by `n` readable bytes, returning the
	/// position the step started from.
	pub(crate) fn advance(&mut self, n: usize) -> usize {
		let start = self.position;
		self.position += n.min(self.remaining());
		start
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferErrorKind {
	PositionOutOfBounds,
	LimitOutOfBounds,
	Overflow,
	Underflow,
	Allocation,
}

#[derive(Debug)]
pub struct BufferError {
	kind: BufferErrorKind,
	message: Cow<'static, str>,
}

impl BufferError {
	pub fn new(
		kind: BufferErrorKind,
		message: impl Into<Cow<'static, str>>,
	) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}

	pub fn kind(&self) -> BufferErrorKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		self.message.as_ref()
	}
}

impl std::fmt::Display for BufferError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for BufferError {}
