// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: kmac.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! KMAC (NIST SP 800-185) executors for 128- and 256-bit variants.

use super::registry::{
	MacAlgorithm, MacAlgorithmMetadata, MacError, MacErrorKind,
	MacExecutor,
};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{CShake128, CShake128Core, CShake256, CShake256Core};

const KMAC128_RATE: usize = 168; // bytes
const KMAC256_RATE: usize = 136; // bytes
const CUSTOMIZATION: &[u8] = b"";
const FUNCTION_NAME: &[u8] = b"KMAC";
const OUTPUT_LEN_128: usize = 32;
const OUTPUT_LEN_256: usize = 64;

pub fn catalog() -> &'static [MacAlgorithm] {
	const ALGORITHMS: &[MacAlgorithm] = &[
		MacAlgorithm::new(
			MacAlgorithmMetadata::current("kmac128", "KMAC128"),
			create_kmac128,
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current("kmac256", "KMAC256"),
			create_kmac256,
		),
	];
	ALGORITHMS
}

/// Keeps the keyed sponge around so finalization can restart from it.
struct KmacExecutor<H> {
	keyed: H,
	state: H,
	output_len: usize,
}

impl<H> KmacExecutor<H>
where
	H: Update + Clone,
{
	fn new(mut keyed: H, key: &[u8], rate: usize, output_len: usize) -> Self {
		keyed.update(&bytepad(&encode_string(key), rate));
		Self {
			state: keyed.clone(),
			keyed,
			output_len,
		}
	}
}

impl<H> MacExecutor for KmacExecutor<H>
where
	H: Update + ExtendableOutput + Clone + Send + 'static,
{
	fn update(&mut self, data: &[u8]) {
		self.state.update(data);
	}

	fn finalize_reset(&mut self) -> Vec<u8> {
		let mut hasher =
			std::mem::replace(&mut self.state, self.keyed.clone());
		hasher.update(&right_encode((self.output_len as u64) * 8));
		let mut reader = hasher.finalize_xof();
		let mut out = vec![0u8; self.output_len];
		reader.read(&mut out);
		out
	}
}

fn create_kmac128(
	key: &[u8],
) -> Result<Box<dyn MacExecutor>, MacError> {
	ensure_key("KMAC128", key)?;
	let core = CShake128Core::new_with_function_name(
		FUNCTION_NAME,
		CUSTOMIZATION,
	);
	Ok(Box::new(KmacExecutor::new(
		CShake128::from_core(core),
		key,
		KMAC128_RATE,
		OUTPUT_LEN_128,
	)))
}

fn create_kmac256(
	key: &[u8],
) -> Result<Box<dyn MacExecutor>, MacError> {
	ensure_key("KMAC256", key)?;
	let core = CShake256Core::new_with_function_name(
		FUNCTION_NAME,
		CUSTOMIZATION,
	);
	Ok(Box::new(KmacExecutor::new(
		CShake256::from_core(core),
		key,
		KMAC256_RATE,
		OUTPUT_LEN_256,
	)))
}

fn ensure_key(name: &str, key: &[u8]) -> Result<(), MacError> {
	if key.is_empty() {
		return Err(MacError::new(
			MacErrorKind::InvalidKey,
			format!("{} key must not be empty", name),
		));
	}
	Ok(())
}

fn encode_string(input: &[u8]) -> Vec<u8> {
	let mut result = left_encode((input.len() * 8) as u64);
	result.extend_from_slice(input);
	result
}

fn left_encode(value: u64) -> Vec<u8> {
	let encoded = trim_be_bytes(value);
	let mut out = Vec::with_capacity(1 + encoded.len());
	out.push(encoded.len() as u8);
	out.extend_from_slice(&encoded);
	out
}

fn right_encode(value: u64) -> Vec<u8> {
	let encoded = trim_be_bytes(value);
	let mut out = Vec::with_capacity(1 + encoded.len());
	out.extend_from_slice(&encoded);
	out.push(encoded.len() as u8);
	out
}

fn bytepad(encoded: &[u8], w: usize) -> Vec<u8> {
	let mut result = left_encode(w as u64);
	result.extend_from_slice(encoded);
	let padded = result.len().div_ceil(w) * w;
	result.resize(padded, 0);
	result
}

fn trim_be_bytes(value: u64) -> Vec<u8> {
	if value == 0 {
		return vec![0];
	}
	let bytes = value.to_be_bytes();
	let first = bytes.iter().position(|&b| b != 0).unwrap_or(7);
	bytes[first..].to_vec()
}
