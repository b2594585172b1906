// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers

use macbuffers::mbt::buffer::{BackingArray, BufferError, ByteView};
use macbuffers::mbt::conformance::{
	build_direct_view, run_conformance, verify_all_views, verify_view,
	ConformanceConfig, ConformanceErrorKind, ViewKind,
};
use macbuffers::mbt::mac::executor::consume_bytes;
use macbuffers::mbt::mac::registry::{self, MacErrorKind, MacExecutor};
use macbuffers::mbt::random::RngType;

/// Feeds the view's bytes but puts the position back where it was.
struct StalledExecutor {
	inner: Box<dyn MacExecutor>,
}

impl MacExecutor for StalledExecutor {
	fn update(&mut self, data: &[u8]) {
		self.inner.update(data);
	}

	fn finalize_reset(&mut self) -> Vec<u8> {
		self.inner.finalize_reset()
	}

	fn update_view(
		&mut self,
		view: &mut dyn ByteView,
	) -> Result<(), BufferError> {
		let position = view.position();
		let bytes = view.read_to_vec();
		view.set_position(position)?;
		self.update(&bytes);
		Ok(())
	}
}

/// Drains the view correctly but feeds one extra byte.
struct PaddingExecutor {
	inner: Box<dyn MacExecutor>,
}

impl MacExecutor for PaddingExecutor {
	fn update(&mut self, data: &[u8]) {
		self.inner.update(data);
	}

	fn finalize_reset(&mut self) -> Vec<u8> {
		self.inner.finalize_reset()
	}

	fn update_view(
		&mut self,
		view: &mut dyn ByteView,
	) -> Result<(), BufferError> {
		self.inner.update_view(view)?;
		self.inner.update(&[0]);
		Ok(())
	}
}

/// Cursor-only view whose reads never make progress.
struct StuckView {
	position: usize,
	limit: usize,
	capacity: usize,
}

impl ByteView for StuckView {
	fn capacity(&self) -> usize {
		self.capacity
	}

	fn position(&self) -> usize {
		self.position
	}

	fn limit(&self) -> usize {
		self.limit
	}

	fn set_position(
		&mut self,
		position: usize,
	) -> Result<(), BufferError> {
		self.position = position.min(self.limit);
		Ok(())
	}

	fn set_limit(&mut self, limit: usize) -> Result<(), BufferError> {
		self.limit = limit.min(self.capacity);
		self.position = self.position.min(self.limit);
		Ok(())
	}

	fn is_read_only(&self) -> bool {
		true
	}

	fn backing_array(&self) -> Option<BackingArray<'_>> {
		None
	}

	fn read(&mut self, _dst: &mut [u8]) -> usize {
		0
	}
}

fn keyed(identifier: &str) -> Box<dyn MacExecutor> {
	let (executor, _) =
		registry::create_executor(identifier, b"0123456789abcdef")
			.unwrap();
	executor
}

#[test]
fn reference_scenario_passes_for_md5_and_sha256() {
	let mut rng = RngType::ChaCha.seeded(4_844_847);
	for name in ["HmacMD5", "HmacSha256"] {
		let report =
			run_conformance(name, &ConformanceConfig::default(), rng.as_mut())
				.unwrap();
		assert_eq!(report.message_len, 10 * 1024);
		assert_eq!(report.key_len, 16);
		let kinds: Vec<ViewKind> =
			report.views.iter().map(|view| view.kind).collect();
		assert_eq!(
			kinds,
			[ViewKind::HeapSlice, ViewKind::Direct, ViewKind::ReadOnly]
		);
		for view in &report.views {
			assert_eq!(view.length, report.message_len);
			assert!(view.split < view.length);
		}
		let offset = report.views[0].array_offset.unwrap();
		assert!(offset < 256);
	}
}

#[test]
fn every_registered_algorithm_passes() {
	let config = ConformanceConfig {
		message_len: 3000,
		..ConformanceConfig::default()
	};
	for rng_type in RngType::iter() {
		let mut rng = rng_type.seeded(11);
		for algorithm in registry::algorithms() {
			let report = run_conformance(
				algorithm.metadata.identifier,
				&config,
				rng.as_mut(),
			)
			.unwrap_or_else(|err| {
				panic!("{} ({}): {}", algorithm.metadata.identifier, rng_type, err)
			});
			assert_eq!(report.views.len(), 3);
			if let Some(len) = algorithm.metadata.key_length {
				assert_eq!(report.key_len, len);
			}
		}
	}
}

#[test]
fn same_seed_reproduces_report() {
	let config = ConformanceConfig::default();
	let first = run_conformance(
		"hmac-sha3-256",
		&config,
		RngType::Pcg32.seeded(99).as_mut(),
	)
	.unwrap();
	let second = run_conformance(
		"hmac-sha3-256",
		&config,
		RngType::Pcg32.seeded(99).as_mut(),
	)
	.unwrap();
	assert_eq!(first.reference_tag, second.reference_tag);
	assert_eq!(first.views, second.views);
}

#[test]
fn stalled_update_is_reported_as_incomplete_consumption() {
	let message = vec![0x5au8; 512];
	let mut executor = StalledExecutor {
		inner: keyed("hmac-sha256"),
	};
	let expected = consume_bytes(&message, &mut executor);
	let mut view = build_direct_view(&message).unwrap();
	let mut rng = RngType::ChaCha.seeded(5);

	let err =
		verify_view(&mut executor, &expected, &mut view, rng.as_mut())
			.unwrap_err();
	assert_eq!(err.kind(), ConformanceErrorKind::IncompleteConsumption);
	assert!(err.message().starts_with("buffer not consumed"));
}

#[test]
fn incomplete_consumption_names_the_view() {
	let message = vec![0xa5u8; 256];
	let mut executor = StalledExecutor {
		inner: keyed("hmac-md5"),
	};
	let expected = consume_bytes(&message, &mut executor);
	let mut rng = RngType::ChaCha.seeded(6);

	let err = verify_all_views(
		&mut executor,
		&expected,
		&message,
		256,
		rng.as_mut(),
	)
	.unwrap_err();
	assert_eq!(err.kind(), ConformanceErrorKind::IncompleteConsumption);
	assert!(err.message().starts_with("heap-slice view: "));
}

#[test]
fn extra_input_is_reported_as_tag_mismatch() {
	let message = vec![0x11u8; 1024];
	let mut executor = PaddingExecutor {
		inner: keyed("kmac128"),
	};
	let expected = consume_bytes(&message, &mut executor);
	let mut view = build_direct_view(&message).unwrap();
	let mut rng = RngType::XorShift.seeded(7);

	let err =
		verify_view(&mut executor, &expected, &mut view, rng.as_mut())
			.unwrap_err();
	assert_eq!(err.kind(), ConformanceErrorKind::TagMismatch);
	assert!(err.message().starts_with("MAC did not verify"));
	assert!(!view.has_remaining());
}

#[test]
fn conflicting_key_length_aborts_before_feeding() {
	let config = ConformanceConfig {
		key_len: Some(16),
		..ConformanceConfig::default()
	};
	let err = run_conformance(
		"blake3-keyed",
		&config,
		RngType::ChaCha.seeded(1).as_mut(),
	)
	.unwrap_err();
	assert_eq!(err.kind(), ConformanceErrorKind::Mac);
	assert_eq!(err.mac_kind(), Some(MacErrorKind::InvalidKeyLength));
	assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn unknown_algorithm_is_a_mac_error() {
	let err = run_conformance(
		"HmacWhirlpool",
		&ConformanceConfig::default(),
		RngType::ChaCha.seeded(1).as_mut(),
	)
	.unwrap_err();
	assert_eq!(err.kind(), ConformanceErrorKind::Mac);
	assert_eq!(err.mac_kind(), Some(MacErrorKind::UnsupportedAlgorithm));
	assert!(err.to_string().contains("HmacWhirlpool"));
}

#[test]
fn view_that_stops_reading_is_reported_not_spun_on() {
	let mut executor = keyed("hmac-sha256");
	let expected = consume_bytes(&[0u8; 64], executor.as_mut());
	let mut view = StuckView {
		position: 0,
		limit: 64,
		capacity: 64,
	};
	let mut rng = RngType::ChaCha.seeded(9);

	let err =
		verify_view(executor.as_mut(), &expected, &mut view, rng.as_mut())
			.unwrap_err();
	assert_eq!(err.kind(), ConformanceErrorKind::IncompleteConsumption);
	assert_eq!(err.mac_kind(), None);
}
