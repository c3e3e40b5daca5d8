//! Scenario S3 (spec §8): freeing three adjacent blocks out of address
//! order must still fully coalesce into one block.

use rallocator::{alloc_bf, data_segment_free_space_size, free_bf, HEADER_SIZE};

#[test]
fn three_way_coalesce() {
  let a = alloc_bf(64);
  let b = alloc_bf(64);
  let c = alloc_bf(64);
  assert!(!a.is_null() && !b.is_null() && !c.is_null());

  // a, b, c are allocated back-to-back by sequential growth in a process
  // that has touched the allocator for the first time, so they are
  // physically adjacent in memory despite being freed out of order.
  free_bf(a);
  free_bf(c);
  free_bf(b);

  let expected = 3 * 64 + 2 * HEADER_SIZE;
  assert_eq!(data_segment_free_space_size(), expected);

  // A request for exactly that size should now be satisfied without
  // growing the heap, confirming it really is one merged block.
  let reused = alloc_bf(expected);
  assert_eq!(reused, a, "the merged block should start at a's old address");
}
