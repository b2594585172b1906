// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: key.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Key sizing and random key material for conformance runs.

use rand_core::RngCore;
use zeroize::Zeroizing;

use super::registry::{MacAlgorithmMetadata, MacError, MacErrorKind};

pub const DEFAULT_KEY_LENGTH: usize = 16;

/// Picks the key length for `metadata`, honouring an explicit request
/// unless the algorithm pins a different length.
pub fn resolve_key_length(
	metadata: &MacAlgorithmMetadata,
	requested: Option<usize>,
) -> Result<usize, MacError> {
	match (metadata.key_length, requested) {
		(Some(fixed), Some(len)) if len != fixed => Err(MacError::new(
			MacErrorKind::InvalidKeyLength,
			format!(
				"{} requires a {}-byte key but {} bytes were requested",
				metadata.display_name, fixed, len
			),
		)),
		(Some(fixed), _) => Ok(fixed),
		(None, Some(0)) => Err(MacError::new(
			MacErrorKind::InvalidKey,
			format!("{} key must not be empty", metadata.display_name),
		)),
		(None, Some(len)) => Ok(len),
		(None, None) => Ok(DEFAULT_KEY_LENGTH),
	}
}

pub fn generate_key<R: RngCore + ?Sized>(
	rng: &mut R,
	length: usize,
) -> Zeroizing<Vec<u8>> {
	let mut key = Zeroizing::new(vec![0u8; length]);
	rng.fill_bytes(&mut key);
	key
}
