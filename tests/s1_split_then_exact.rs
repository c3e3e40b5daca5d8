//! Scenario S1 (spec §8): single-thread best-fit, split-then-exact reuse.
//!
//! Compiled as its own test binary (its own process) so the canonical
//! free list and heap bounds statics start from a blank slate.

use rallocator::{alloc_bf, free_bf};

#[test]
fn split_then_exact_reuse() {
  let p1 = alloc_bf(800);
  assert!(!p1.is_null());

  let p2 = alloc_bf(800);
  assert!(!p2.is_null());
  assert_ne!(p1, p2);

  free_bf(p1);

  let p3 = alloc_bf(800);
  assert_eq!(p3, p1, "freeing and re-requesting the same size should reuse the exact block, no split");

  free_bf(p2);
  free_bf(p3);
}
