//! Single-threaded allocator: first-fit and best-fit.
//!
//! Both variants share one free list (the "canonical" list also read by
//! [`data_segment_free_space_size`], and also reused — behind a mutex —
//! by the locked multi-threaded variant in [`crate::locked`]). They
//! differ only in their placement search, exactly as spec'd: "Two
//! variants differ only in Search... and share every other operation."
//!
//! Neither function takes any lock. Per spec: "No synchronisation; caller
//! must not share the allocator across threads." Using these two
//! functions from more than one thread concurrently is undefined
//! behaviour, same as mixing them with [`crate::locked`] or
//! [`crate::nolock`] concurrently.

use std::cell::UnsafeCell;
use std::ptr;

use crate::align::align8;
use crate::block::Block;
use crate::free_list::{insert_sorted, maybe_split, remove_node, search_best_fit, search_first_fit, sum_free};
use crate::heap;

/// Wraps the canonical free-list head in an `UnsafeCell` so it can live
/// in a `static` without an actual lock. Safety here is the caller's
/// responsibility, same as the raw `static mut` globals the original
/// implementation this crate is based on used for the same purpose.
struct CanonicalHead(UnsafeCell<*mut Block>);

// SAFETY: access is only ever sound under the documented caller
// discipline (single-threaded use, or external mutual exclusion as
// `crate::locked` provides). The cell itself performs no synchronisation.
unsafe impl Sync for CanonicalHead {}

static CANONICAL: CanonicalHead = CanonicalHead(UnsafeCell::new(ptr::null_mut()));

/// Pointer to the canonical free-list head cell, shared with
/// [`crate::locked`].
pub(crate) fn canonical_head() -> *mut *mut Block {
  CANONICAL.0.get()
}

fn alloc_with(size: usize, search: unsafe fn(*mut Block, usize) -> *mut Block) -> *mut u8 {
  if size == 0 {
    return ptr::null_mut();
  }
  let need = align8(size);
  let head = canonical_head();

  unsafe {
    let found = search(*head, need);
    if !found.is_null() {
      remove_node(head, found);
      (*found).free = false;
      maybe_split(found, need, head);
      return Block::payload_ptr(found);
    }
  }

  match heap::grow(need) {
    Ok(block) => unsafe { Block::payload_ptr(block) },
    Err(_) => ptr::null_mut(),
  }
}

fn free_into_canonical(ptr: *mut u8) {
  if ptr.is_null() {
    return;
  }
  unsafe {
    let block = Block::from_payload(ptr);
    insert_sorted(canonical_head(), block);
  }
}

/// First-fit allocation. Returns null for a size-0 request or on growth
/// failure.
pub fn alloc_ff(size: usize) -> *mut u8 {
  alloc_with(size, search_first_fit)
}

/// Frees a pointer returned by [`alloc_ff`] or [`alloc_bf`]. Tolerates
/// null.
pub fn free_ff(ptr: *mut u8) {
  free_into_canonical(ptr)
}

/// Best-fit allocation. Returns null for a size-0 request or on growth
/// failure.
pub fn alloc_bf(size: usize) -> *mut u8 {
  alloc_with(size, search_best_fit)
}

/// Identical semantics to [`free_ff`].
pub fn free_bf(ptr: *mut u8) {
  free_into_canonical(ptr)
}

/// Sum of sizes of every block currently on the canonical free list (the
/// one shared by [`alloc_ff`]/[`alloc_bf`]/[`crate::locked::alloc_locked`]).
///
/// Per spec §9's open question, this reads only the canonical list; it
/// does not see per-thread lists or the reclamation stack used by
/// [`crate::nolock`] — see [`crate::nolock::nolock_free_space_size`] for
/// that variant's own diagnostic.
pub fn data_segment_free_space_size() -> usize {
  unsafe { sum_free(*canonical_head()) }
}
