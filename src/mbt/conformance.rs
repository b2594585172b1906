// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: conformance.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Split-feed conformance run: a reference tag over the flat message is
//! compared against tags computed by feeding the same bytes through heap,
//! direct and read-only views in two chunks.

use std::borrow::Cow;

use rand::Rng;
use rand_core::RngCore;
use strum::{Display, IntoStaticStr};

use crate::mbt::buffer::{
	zeroed, BufferError, BufferErrorKind, ByteView, DirectBuffer,
	HeapBuffer,
};
use crate::mbt::mac::executor::{consume_bytes, digest_to_hex};
use crate::mbt::mac::key::{generate_key, resolve_key_length};
use crate::mbt::mac::registry::{
	self, MacAlgorithmMetadata, MacError, MacErrorKind, MacExecutor,
};

pub const DEFAULT_MESSAGE_LEN: usize = 10 * 1024;
pub const DEFAULT_MAX_OFFSET: usize = 256;
/// Upper bound on the heap view's backing storage (message plus offset room).
pub const MAX_STORAGE_LEN: usize = 1 << 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ViewKind {
	HeapSlice,
	Direct,
	ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConformanceConfig {
	pub message_len: usize,
	/// `None` picks the algorithm's fixed length or the default.
	pub key_len: Option<usize>,
	/// Exclusive upper bound for the heap slice's array offset.
	pub max_offset: usize,
}

impl Default for ConformanceConfig {
	fn default() -> Self {
		Self {
			message_len: DEFAULT_MESSAGE_LEN,
			key_len: None,
			max_offset: DEFAULT_MAX_OFFSET,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOutcome {
	pub kind: ViewKind,
	pub array_offset: Option<usize>,
	pub split: usize,
	pub length: usize,
}

#[derive(Debug, Clone)]
pub struct ConformanceReport {
	pub metadata: MacAlgorithmMetadata,
	pub message_len: usize,
	pub key_len: usize,
	pub reference_tag: Vec<u8>,
	pub views: Vec<ViewOutcome>,
}

impl ConformanceReport {
	pub fn reference_hex(&self) -> String {
		digest_to_hex(&self.reference_tag)
	}
}

/// Runs the full scenario for `identifier`: random message and key, one-shot
/// reference tag, then split-feed verification through every view kind.
pub fn run_conformance<R: RngCore + ?Sized>(
	identifier: &str,
	config: &ConformanceConfig,
	rng: &mut R,
) -> Result<ConformanceReport, ConformanceError> {
	let algorithm = registry::lookup(identifier)?;
	let key_len =
		resolve_key_length(&algorithm.metadata, config.key_len)?;
	heap_storage_len(config.message_len, config.max_offset)?;

	let mut message = zeroed(config.message_len)?;
	rng.fill_bytes(&mut message);
	let key = generate_key(rng, key_len);

	let mut executor = algorithm.create(&key)?;
	let reference_tag = consume_bytes(&message, executor.as_mut());
	let views = verify_all_views(
		executor.as_mut(),
		&reference_tag,
		&message,
		config.max_offset,
		rng,
	)?;

	Ok(ConformanceReport {
		metadata: algorithm.metadata,
		message_len: config.message_len,
		key_len,
		reference_tag,
		views,
	})
}

/// Verifies `expected` against all three view kinds built over `message`,
/// reusing the same executor.
pub fn verify_all_views<R: RngCore + ?Sized>(
	executor: &mut dyn MacExecutor,
	expected: &[u8],
	message: &[u8],
	max_offset: usize,
	rng: &mut R,
) -> Result<Vec<ViewOutcome>, ConformanceError> {
	let mut outcomes = Vec::with_capacity(3);

	let offset = random_below(rng, max_offset);
	let mut heap = build_heap_view(message, offset, max_offset)?;
	let split = verify_view(executor, expected, &mut heap, rng)
		.map_err(|err| err.in_view(ViewKind::HeapSlice))?;
	outcomes.push(ViewOutcome {
		kind: ViewKind::HeapSlice,
		array_offset: Some(heap.array_offset()),
		split,
		length: heap.capacity(),
	});

	let mut direct = build_direct_view(message)?;
	let split = verify_view(executor, expected, &mut direct, rng)
		.map_err(|err| err.in_view(ViewKind::Direct))?;
	outcomes.push(ViewOutcome {
		kind: ViewKind::Direct,
		array_offset: None,
		split,
		length: direct.capacity(),
	});

	heap.clear();
	let mut read_only = heap.as_read_only();
	let split = verify_view(executor, expected, &mut read_only, rng)
		.map_err(|err| err.in_view(ViewKind::ReadOnly))?;
	outcomes.push(ViewOutcome {
		kind: ViewKind::ReadOnly,
		array_offset: None,
		split,
		length: read_only.capacity(),
	});

	Ok(outcomes)
}

/// Heap buffer of `message.len() + max_offset` bytes, sliced so the
/// message starts at array offset `offset`.
pub fn build_heap_view(
	message: &[u8],
	offset: usize,
	max_offset: usize,
) -> Result<HeapBuffer, BufferError> {
	let mut outer =
		HeapBuffer::allocate(heap_storage_len(message.len(), max_offset)?)?;
	outer.set_position(offset)?;
	outer.set_limit(offset + message.len())?;
	let mut slice = outer.slice();
	slice.put(message)?;
	slice.clear();
	Ok(slice)
}

/// Size of the heap view's backing storage, rejected when it overflows or
/// exceeds [`MAX_STORAGE_LEN`].
pub fn heap_storage_len(
	message_len: usize,
	max_offset: usize,
) -> Result<usize, BufferError> {
	match message_len.checked_add(max_offset) {
		Some(total) if total <= MAX_STORAGE_LEN => Ok(total),
		_ => Err(BufferError::new(
			BufferErrorKind::Overflow,
			format!(
				"message of {} bytes plus offset room of {} bytes exceeds the {}-byte storage limit",
				message_len, max_offset, MAX_STORAGE_LEN
			),
		)),
	}
}

pub fn build_direct_view(
	message: &[u8],
) -> Result<DirectBuffer, BufferError> {
	let mut direct = DirectBuffer::allocate(message.len())?;
	direct.put(message)?;
	direct.clear();
	Ok(direct)
}

/// Feeds `view` in two updates split at a random limit, checks each update
/// drained the view, then compares the finalized tag with `expected`.
/// Returns the split point.
pub fn verify_view<R: RngCore + ?Sized>(
	executor: &mut dyn MacExecutor,
	expected: &[u8],
	view: &mut dyn ByteView,
	rng: &mut R,
) -> Result<usize, ConformanceError> {
	let limit = view.limit();
	let split = random_below(rng, limit);

	view.set_limit(split)?;
	executor.update_view(view)?;
	ensure_consumed(view, "first")?;

	view.set_limit(limit)?;
	executor.update_view(view)?;
	ensure_consumed(view, "second")?;

	let tag = executor.finalize_reset();
	if tag != expected {
		return Err(ConformanceError::new(
			ConformanceErrorKind::TagMismatch,
			format!(
				"MAC did not verify: expected {} but computed {}",
				digest_to_hex(expected),
				digest_to_hex(&tag)
			),
		));
	}
	Ok(split)
}

fn ensure_consumed(
	view: &dyn ByteView,
	pass: &str,
) -> Result<(), ConformanceError> {
	if view.has_remaining() {
		return Err(ConformanceError::new(
			ConformanceErrorKind::IncompleteConsumption,
			format!(
				"buffer not consumed: {} bytes left at position {} (limit {}) after {} update",
				view.remaining(),
				view.position(),
				view.limit(),
				pass
			),
		));
	}
	Ok(())
}

fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: usize) -> usize {
	if bound == 0 {
		0
	} else {
		rng.gen_range(0..bound)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConformanceErrorKind {
	IncompleteConsumption,
	TagMismatch,
	Mac,
	Buffer,
}

#[derive(Debug)]
enum Cause {
	Mac(MacError),
	Buffer(BufferError),
}

#[derive(Debug)]
pub struct ConformanceError {
	kind: ConformanceErrorKind,
	message: Cow<'static, str>,
	cause: Option<Cause>,
}

impl ConformanceError {
	pub fn new(
		kind: ConformanceErrorKind,
		message: impl Into<Cow<'static, str>>,
	) -> Self {
		Self {
			kind,
			message: message.into(),
			cause: None,
		}
	}

	pub fn kind(&self) -> ConformanceErrorKind {
		self.kind
	}

	pub fn mac_kind(&self) -> Option<MacErrorKind> {
		match &self.cause {
			Some(Cause::Mac(err)) => Some(err.kind()),
			_ => None,
		}
	}

	pub fn buffer_kind(&self) -> Option<BufferErrorKind> {
		match &self.cause {
			Some(Cause::Buffer(err)) => Some(err.kind()),
			_ => None,
		}
	}

	pub fn message(&self) -> &str {
		self.message.as_ref()
	}

	fn in_view(self, view: ViewKind) -> Self {
		let label: &'static str = view.into();
		Self {
			kind: self.kind,
			message: format!("{} view: {}", label, self.message).into(),
			cause: self.cause,
		}
	}
}

impl std::fmt::Display for ConformanceError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for ConformanceError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match &self.cause {
			Some(Cause::Mac(err)) => Some(err),
			Some(Cause::Buffer(err)) => Some(err),
			None => None,
		}
	}
}

impl From<MacError> for ConformanceError {
	fn from(err: MacError) -> Self {
		Self {
			kind: ConformanceErrorKind::Mac,
			message: err.message().to_string().into(),
			cause: Some(Cause::Mac(err)),
		}
	}
}

impl From<BufferError> for ConformanceError {
	fn from(err: BufferError) -> Self {
		Self {
			kind: ConformanceErrorKind::Buffer,
			message: err.message().to_string().into(),
			cause: Some(Cause::Buffer(err)),
		}
	}
}
