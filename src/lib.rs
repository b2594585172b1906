// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: lib.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

pub mod mbt {
	pub mod app;
	pub mod buffer;
	pub mod conformance;
	pub mod mac;
	pub mod random;
	pub mod report;
}
