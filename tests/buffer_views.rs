// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers

use macbuffers::mbt::buffer::{
	BufferErrorKind, ByteView, HeapBuffer, ReadOnlyBuffer,
};
use macbuffers::mbt::conformance::{build_direct_view, build_heap_view};
use macbuffers::mbt::mac::executor::{consume_bytes, consume_view};
use macbuffers::mbt::mac::registry;
use proptest::collection::vec;
use proptest::prelude::*;

fn pattern(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i * 31 % 251) as u8).collect()
}

#[test]
fn heap_view_exposes_backing_array_at_offset() {
	let message = pattern(100);
	let view = build_heap_view(&message, 42, 256).unwrap();
	assert!(view.has_array());
	assert!(!view.is_read_only());
	let array = view.backing_array().unwrap();
	assert_eq!(array.offset(), 42);
	assert_eq!(array.bytes().len(), 100 + 256);
	assert_eq!(&array.bytes()[42..142], message.as_slice());
}

#[test]
fn direct_view_hides_storage_and_round_trips() {
	let message = pattern(10 * 1024);
	let mut view = build_direct_view(&message).unwrap();
	assert!(!view.has_array());
	assert!(!view.is_read_only());
	assert_eq!(view.remaining(), message.len());
	assert_eq!(view.read_to_vec(), message);
	assert!(!view.has_remaining());
}

#[test]
fn read_only_view_has_independent_cursor() {
	let message = pattern(64);
	let mut heap = build_heap_view(&message, 9, 16).unwrap();
	heap.set_position(10).unwrap();
	let mut read_only = heap.as_read_only();
	assert!(read_only.is_read_only());
	assert!(!read_only.has_array());
	assert_eq!(read_only.position(), 10);

	read_only.set_limit(20).unwrap();
	assert_eq!(read_only.read_to_vec(), &message[10..20]);
	assert_eq!(heap.position(), 10);
	assert_eq!(heap.limit(), 64);
}

#[test]
fn bulk_get_fails_without_moving_on_underflow() {
	let mut view = ReadOnlyBuffer::new(b"abcdef");
	view.set_position(4).unwrap();
	let mut dst = [0u8; 3];
	let err = view.get(&mut dst).unwrap_err();
	assert_eq!(err.kind(), BufferErrorKind::Underflow);
	assert_eq!(view.position(), 4);

	let mut dst = [0u8; 2];
	view.get(&mut dst).unwrap();
	assert_eq!(&dst, b"ef");
	assert!(!view.has_remaining());
}

#[test]
fn update_view_drains_each_kind_exactly_to_limit() {
	let message = pattern(5000);
	let (mut executor, _) =
		registry::create_executor("hmac-sha256", b"key").unwrap();
	let expected = consume_bytes(&message, executor.as_mut());

	let mut heap = build_heap_view(&message, 200, 256).unwrap();
	let mut direct = build_direct_view(&message).unwrap();
	let wrapped = HeapBuffer::wrap(message.clone());
	let mut read_only = wrapped.as_read_only();
	let views: [&mut dyn ByteView; 3] =
		[&mut heap, &mut direct, &mut read_only];

	for view in views {
		view.set_limit(4097).unwrap();
		executor.update_view(view).unwrap();
		assert_eq!(view.position(), 4097);
		assert!(!view.has_remaining());
		view.set_limit(message.len()).unwrap();
		assert_eq!(consume_view(view, executor.as_mut()).unwrap(), expected);
		assert!(!view.has_remaining());
	}
}

proptest! {
	#[test]
	fn heap_view_round_trips_at_any_offset(
		message in vec(any::<u8>(), 0..2048),
		offset in 0usize..256,
	) {
		let mut view = build_heap_view(&message, offset, 256).unwrap();
		prop_assert_eq!(view.array_offset(), offset);
		prop_assert_eq!(view.read_to_vec(), message);
	}

	#[test]
	fn split_feed_matches_one_shot_at_any_offset(
		message in vec(any::<u8>(), 1..1024),
		offset in 0usize..256,
		split_seed in any::<usize>(),
	) {
		let split = split_seed % message.len();
		let (mut executor, _) =
			registry::create_executor("hmac-md5", b"0123456789abcdef")
				.unwrap();
		let expected = consume_bytes(&message, executor.as_mut());

		let mut heap = build_heap_view(&message, offset, 256).unwrap();
		heap.set_limit(split).unwrap();
		executor.update_view(&mut heap).unwrap();
		prop_assert!(!heap.has_remaining());
		heap.set_limit(message.len()).unwrap();
		executor.update_view(&mut heap).unwrap();
		prop_assert!(!heap.has_remaining());
		prop_assert_eq!(executor.finalize_reset(), expected);
	}
}
