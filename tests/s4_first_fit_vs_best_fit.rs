//! Scenario S4 (spec §8): with a free list ordered `[128, 64, 256]`,
//! `alloc_ff` must return the first (128-byte) block while `alloc_bf`
//! must return the smallest sufficient (64-byte) block, for the same
//! request size.
//!
//! Both halves of the comparison run in one `#[test]` fn, each against its
//! own freshly built list, so the two never race on the shared canonical
//! free list the way separate `#[test]` fns in the same binary would.

use rallocator::{alloc_bf, alloc_ff, free_bf, free_ff};

fn build_list_and_free_in_order() -> (*mut u8, *mut u8, *mut u8) {
  let a = alloc_ff(128);
  let spacer1 = alloc_ff(8);
  let b = alloc_ff(64);
  let spacer2 = alloc_ff(8);
  let c = alloc_ff(256);
  assert!(!a.is_null() && !spacer1.is_null() && !b.is_null() && !spacer2.is_null() && !c.is_null());

  free_ff(a);
  free_ff(b);
  free_ff(c);
  // spacer1 and spacer2 are deliberately leaked (kept allocated) so a, b,
  // and c remain non-adjacent free blocks in address order.
  (a, b, c)
}

#[test]
fn first_fit_and_best_fit_pick_different_blocks_for_the_same_request() {
  let (a, _b, _c) = build_list_and_free_in_order();
  let found_ff = alloc_ff(32);
  assert_eq!(found_ff, a, "first-fit should return the first block in address order that fits");
  free_ff(found_ff);

  let (_a, b, _c) = build_list_and_free_in_order();
  let found_bf = alloc_bf(32);
  assert_eq!(found_bf, b, "best-fit should return the smallest block that still satisfies the request");
  free_bf(found_bf);
}
