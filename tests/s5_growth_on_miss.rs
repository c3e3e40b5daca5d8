//! Scenario S5 (spec §8): the very first allocation in a process must
//! grow the break by exactly header size plus the (aligned) payload, with
//! nothing pre-existing to satisfy it from a free list.

use rallocator::{alloc_bf, data_segment_size, HEADER_SIZE};

#[test]
fn first_allocation_grows_the_break_by_exactly_what_it_needs() {
  assert_eq!(data_segment_size(), 0, "no growth should have happened yet in this fresh process");

  let p = alloc_bf(1000);
  assert!(!p.is_null());

  assert_eq!(data_segment_size(), HEADER_SIZE + 1000);
}
