// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// Module: mac (message authentication codes)
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Keyed message authentication code (MAC) support.
//! Submodules provide the registry, key sizing and algorithm executors.

pub mod blake3;
pub mod executor;
pub mod hmac;
pub mod key;
pub mod kmac;
pub mod registry;
