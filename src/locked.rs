//! Multi-threaded allocator, variant (a): one global lock guarding the
//! canonical free list (the same list [`crate::single`]'s first-fit and
//! best-fit functions operate on) plus every growth call made through
//! this variant.
//!
//! Per spec §4.5: "Allocate: acquire lock, Search (best-fit), on hit
//! Remove + Split, on miss Grow while still holding the lock, release
//! lock, return." One lock, no nesting, so there is no deadlock risk.

use std::ptr;
use std::sync::Mutex;

use crate::align::align8;
use crate::block::Block;
use crate::free_list::{insert_sorted, maybe_split, remove_node, search_best_fit};
use crate::heap;
use crate::single::canonical_head;

static LOCKED_LOCK: Mutex<()> = Mutex::new(());

/// Thread-safe best-fit allocation over the canonical free list.
pub fn alloc_locked(size: usize) -> *mut u8 {
  if size == 0 {
    return ptr::null_mut();
  }
  let need = align8(size);

  let _guard = LOCKED_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
  let head = canonical_head();

  unsafe {
    let found = search_best_fit(*head, need);
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

/// Thread-safe counterpart to [`alloc_locked`]. Tolerates null.
pub fn free_locked(ptr: *mut u8) {
  if ptr.is_null() {
    return;
  }

  let _guard = LOCKED_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
  unsafe {
    let block = Block::from_payload(ptr);
    insert_sorted(canonical_head(), block);
  }
}
