// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: hmac.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! HMAC executors covering MD5 and SHA-1 (legacy) and SHA-2/SHA-3 variants.

use super::registry::{
	MacAlgorithm, MacAlgorithmMetadata, MacError, MacErrorKind,
	MacExecutor,
};
use digest::{FixedOutputReset, KeyInit};
use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_256, Sha3_512};

type HmacMd5 = Hmac<Md5>;
type HmacSha1 = Hmac<Sha1>;
type HmacSha224 = Hmac<Sha224>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;
type HmacSha3_256 = Hmac<Sha3_256>;
type HmacSha3_512 = Hmac<Sha3_512>;

pub fn catalog() -> &'static [MacAlgorithm] {
	const ALGORITHMS: &[MacAlgorithm] = &[
		MacAlgorithm::new(
			MacAlgorithmMetadata::legacy("hmac-md5", "HMAC-MD5"),
			create_hmac::<HmacMd5>,
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::legacy("hmac-sha1", "HMAC-SHA1"),
			create_hmac::<HmacSha1>,
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				"hmac-sha224",
				"HMAC-SHA224",
			),
			create_hmac::<HmacSha224>,
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				"hmac-sha256",
				"HMAC-SHA256",
			),
			create_hmac::<HmacSha256>,
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				"hmac-sha384",
				"HMAC-SHA384",
			),
			create_hmac::<HmacSha384>,
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				"hmac-sha512",
				"HMAC-SHA512",
			),
			create_hmac::<HmacSha512>,
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				"hmac-sha3-256",
				"HMAC-SHA3-256",
			),
			create_hmac::<HmacSha3_256>,
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				"hmac-sha3-512",
				"HMAC-SHA3-512",
			),
			create_hmac::<HmacSha3_512>,
		),
	];
	ALGORITHMS
}

struct HmacExecutor<M> {
	mac: M,
}

impl<M> MacExecutor for HmacExecutor<M>
where
	M: Mac + FixedOutputReset + Send + 'static,
{
	fn update(&mut self, data: &[u8]) {
		Mac::update(&mut self.mac, data);
	}

	fn finalize_reset(&mut self) -> Vec<u8> {
		Mac::finalize_reset(&mut self.mac).into_bytes().to_vec()
	}
}

fn create_hmac<M>(key: &[u8]) -> Result<Box<dyn MacExecutor>, MacError>
where
	M: Mac + KeyInit + FixedOutputReset + Send + 'static,
{
	if key.is_empty() {
		return Err(MacError::new(
			MacErrorKind::InvalidKeyLength,
			"HMAC key length must be at least one byte",
		));
	}
	let mac = <M as Mac>::new_from_slice(key).map_err(|_| {
		MacError::new(
			MacErrorKind::InvalidKeyLength,
			"HMAC rejected the provided key",
		)
	})?;
	Ok(Box::new(HmacExecutor { mac }))
}
