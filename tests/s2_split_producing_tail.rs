//! Scenario S2 (spec §8): freeing a large block and requesting a much
//! smaller one must split, leaving exactly one free-list block holding
//! the tail.

use rallocator::{alloc_bf, data_segment_free_space_size, free_bf, HEADER_SIZE};

#[test]
fn split_producing_tail() {
  let p1 = alloc_bf(4096);
  assert!(!p1.is_null());

  free_bf(p1);
  let p2 = alloc_bf(64);
  assert!(!p2.is_null());
  assert_eq!(p2, p1, "the split should carve the new allocation off the front of the freed block");

  assert_eq!(data_segment_free_space_size(), 4096 - 64 - HEADER_SIZE);

  free_bf(p2);
}
