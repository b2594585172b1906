// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: executor.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! One-shot and view-driven helpers around a keyed executor.

use super::registry::MacExecutor;
use crate::mbt::buffer::{BufferError, ByteView};
use hex::encode;

/// One-shot MAC over `data`; the executor is reset afterwards.
pub fn consume_bytes(
	data: &[u8],
	executor: &mut dyn MacExecutor,
) -> Vec<u8> {
	executor.update(data);
	executor.finalize_reset()
}

/// Drains `view` into the executor and finalizes.
pub fn consume_view(
	view: &mut dyn ByteView,
	executor: &mut dyn MacExecutor,
) -> Result<Vec<u8>, BufferError> {
	executor.update_view(view)?;
	Ok(executor.finalize_reset())
}

pub fn digest_to_hex(bytes: &[u8]) -> String {
	encode(bytes)
}
