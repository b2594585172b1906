// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: report.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Text and JSON rendering of conformance results.

use colored::*;
use serde_json::{json, Value};

use crate::mbt::conformance::ConformanceReport;
use crate::mbt::mac::registry::MacAlgorithmMetadata;
use crate::mbt::random::RngType;

pub const SUCCESS_MARKER: &str = "All tests passed";

pub fn legacy_warning_message(
	metadata: &MacAlgorithmMetadata,
) -> String {
	format!(
		"warning: {} is considered legacy per NIST SP 800-131A Rev.2 §3; prefer SHA-2, SHA-3, KMAC, or BLAKE3 keyed alternatives",
		metadata.display_name
	)
}

pub fn print_legacy_banner(metadata: &MacAlgorithmMetadata) {
	if metadata.is_legacy() {
		eprintln!("{}", legacy_warning_message(metadata));
	}
}

pub fn seed_line(rng: RngType, seed: u64) -> String {
	format!("rng {} seed {}", rng, seed)
}

pub fn report_lines(report: &ConformanceReport) -> Vec<String> {
	let mut lines = Vec::with_capacity(report.views.len() + 1);
	lines.push(format!(
		"{} ({}): {}-byte message, {}-byte key, reference {}",
		report.metadata.display_name,
		report.metadata.identifier,
		report.message_len,
		report.key_len,
		report.reference_hex()
	));
	for view in &report.views {
		let offset = view
			.array_offset
			.map(|offset| format!(" offset {}", offset))
			.unwrap_or_default();
		lines.push(format!(
			"  {:<10}{} split {}/{} {}",
			view.kind.to_string(),
			offset,
			view.split,
			view.length,
			"ok".green()
		));
	}
	lines
}

pub fn report_json(
	report: &ConformanceReport,
	rng: RngType,
	seed: u64,
) -> Value {
	let views: Vec<Value> = report
		.views
		.iter()
		.map(|view| {
			json!({
				"view": view.kind.to_string(),
				"array_offset": view.array_offset,
				"split": view.split,
				"length": view.length,
				"status": "ok",
			})
		})
		.collect();
	json!({
		"algorithm": report.metadata.identifier,
		"display_name": report.metadata.display_name,
		"legacy": report.metadata.is_legacy(),
		"message_bytes": report.message_len,
		"key_bytes": report.key_len,
		"reference_tag": report.reference_hex(),
		"rng": rng.to_string(),
		"seed": seed,
		"views": views,
	})
}

pub fn catalog_lines(entries: &[MacAlgorithmMetadata]) -> Vec<String> {
	entries
		.iter()
		.map(|meta| {
			let mut line =
				format!("{:<14} {}", meta.identifier, meta.display_name);
			if let Some(len) = meta.key_length {
				line.push_str(&format!(" ({}-byte key)", len));
			}
			if meta.is_legacy() {
				line.push_str(" [legacy]");
			}
			line
		})
		.collect()
}
