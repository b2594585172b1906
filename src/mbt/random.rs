// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: random.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

//! Seedable generators for test data. Every run is driven by a single
//! `u64` seed so a failing run can be replayed exactly.

use getrandom::getrandom;
use rand_core::{RngCore, SeedableRng};
use std::io;

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RngType {
	#[default]
	#[value(name = "chacha")]
	ChaCha,
	Pcg32,
	XorShift,
}

impl std::fmt::Display for RngType {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{:?}", self)
	}
}

impl RngType {
	pub fn iter() -> impl Iterator<Item = RngType> {
		[RngType::ChaCha, RngType::Pcg32, RngType::XorShift].into_iter()
	}

	pub fn seeded(self, seed: u64) -> Box<dyn RngCore> {
		match self {
			RngType::ChaCha => {
				Box::new(rand_chacha::ChaCha20Rng::seed_from_u64(seed))
			}
			RngType::Pcg32 => {
				Box::new(rand_pcg::Pcg32::seed_from_u64(seed))
			}
			RngType::XorShift => Box::new(
				rand_xorshift::XorShiftRng::seed_from_u64(seed),
			),
		}
	}
}

/// Draws a fresh seed from the operating system.
pub fn fresh_seed() -> io::Result<u64> {
	let mut bytes = [0u8; 8];
	getrandom(&mut bytes).map_err(|err| {
		io::Error::other(format!(
			"failed to draw a seed from OS entropy: {}",
			err
		))
	})?;
	Ok(u64::from_le_bytes(bytes))
}
