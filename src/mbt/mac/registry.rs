// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: registry.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025

//! Registry definitions for MAC algorithms, including factory dispatch and
//! the executor interface the conformance harness drives.

use std::borrow::Cow;

use super::{blake3, hmac, kmac};
use crate::mbt::buffer::{BufferError, ByteView};

/// Chunk size used when a view has to be drained through its cursor.
pub const VIEW_CHUNK_SIZE: usize = 4096;

pub trait MacExecutor: Send + 'static {
	fn update(&mut self, data: &[u8]);

	/// Returns the tag and puts the executor back into its freshly keyed
	/// state.
	fn finalize_reset(&mut self) -> Vec<u8>;

	/// Feeds the readable region of `view` and leaves its position at the
	/// limit.
	fn update_view(
		&mut self,
		view: &mut dyn ByteView,
	) -> Result<(), BufferError> {
		let position = view.position();
		let limit = view.limit();
		if position >= limit {
			return Ok(());
		}
		match view.backing_array() {
			Some(array) => {
				let start = array.offset() + position;
				let end = array.offset() + limit;
				self.update(&array.bytes()[start..end]);
			}
			None => {
				let mut chunk = [0u8; VIEW_CHUNK_SIZE];
				while view.has_remaining() {
					let n = view.read(&mut chunk);
					if n == 0 {
						break;
					}
					self.update(&chunk[..n]);
				}
				return Ok(());
			}
		}
		view.set_position(limit)
	}
}

#[derive(Clone, Copy, Debug)]
pub struct MacAlgorithmMetadata {
	pub identifier: &'static str,
	pub display_name: &'static str,
	pub legacy: bool,
	/// Fixed key length in bytes, `None` when any non-empty key works.
	pub key_length: Option<usize>,
}

impl MacAlgorithmMetadata {
	pub const fn new(
		identifier: &'static str,
		display_name: &'static str,
		legacy: bool,
	) -> Self {
		Self {
			identifier,
			display_name,
			legacy,
			key_length: None,
		}
	}

	pub const fn legacy(
		identifier: &'static str,
		display_name: &'static str,
	) -> Self {
		Self::new(identifier, display_name, true)
	}

	pub const fn current(
		identifier: &'static str,
		display_name: &'static str,
	) -> Self {
		Self::new(identifier, display_name, false)
	}

	pub const fn with_key_length(self, key_length: usize) -> Self {
		Self {
			key_length: Some(key_length),
			..self
		}
	}

	pub fn is_legacy(&self) -> bool {
		self.legacy
	}
}

pub type MacFactory =
	fn(&[u8]) -> Result<Box<dyn MacExecutor>, MacError>;

#[derive(Clone, Copy, Debug)]
pub struct MacAlgorithm {
	pub metadata: MacAlgorithmMetadata,
	pub factory: MacFactory,
}

impl MacAlgorithm {
	pub const fn new(
		metadata: MacAlgorithmMetadata,
		factory: MacFactory,
	) -> Self {
		Self { metadata, factory }
	}

	pub fn create(
		&self,
		key: &[u8],
	) -> Result<Box<dyn MacExecutor>, MacError> {
		(self.factory)(key)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacErrorKind {
	UnsupportedAlgorithm,
	InvalidKey,
	InvalidKeyLength,
}

#[derive(Debug)]
pub struct MacError {
	kind: MacErrorKind,
	message: Cow<'static, str>,
}

impl MacError {
	pub fn new(
		kind: MacErrorKind,
		message: impl Into<Cow<'static, str>>,
	) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}

	pub fn kind(&self) -> MacErrorKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		self.message.as_ref()
	}
}

impl std::fmt::Display for MacError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for MacError {}

pub fn algorithms() -> impl Iterator<Item = &'static MacAlgorithm> {
	hmac::catalog()
		.iter()
		.chain(kmac::catalog().iter())
		.chain(blake3::catalog().iter())
}

pub fn metadata() -> Vec<MacAlgorithmMetadata> {
	algorithms().map(|alg| alg.metadata).collect()
}

/// Looks up an algorithm ignoring case and punctuation, so `HmacSHA256`,
/// `hmac-sha256` and `HMAC_SHA256` all resolve to the same entry.
pub fn find_algorithm(
	identifier: &str,
) -> Option<&'static MacAlgorithm> {
	let wanted = normalize(identifier);
	algorithms().find(|alg| normalize(alg.metadata.identifier) == wanted)
}

pub fn lookup(
	identifier: &str,
) -> Result<&'static MacAlgorithm, MacError> {
	find_algorithm(identifier).ok_or_else(|| {
		MacError::new(
			MacErrorKind::UnsupportedAlgorithm,
			format!("unsupported MAC algorithm `{}`", identifier),
		)
	})
}

pub fn create_executor(
	identifier: &str,
	key: &[u8],
) -> Result<(Box<dyn MacExecutor>, MacAlgorithmMetadata), MacError> {
	let algorithm = lookup(identifier)?;
	let executor = algorithm.create(key)?;
	Ok((executor, algorithm.metadata))
}

fn normalize(identifier: &str) -> String {
	identifier
		.chars()
		.filter(char::is_ascii_alphanumeric)
		.map(|c| c.to_ascii_lowercase())
		.collect()
}
