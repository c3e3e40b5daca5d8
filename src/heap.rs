//! The OS growth primitive and the heap-bounds bookkeeping built on it.
//!
//! This is layer 1 of the design: a thin wrapper around `libc::sbrk` that
//! never shrinks the break and records the total span ever obtained from
//! the OS. Every allocator variant in this crate funnels its "miss" path
//! through [`grow`]; none of them call `sbrk` directly.

use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

use libc::{c_void, intptr_t, sbrk};

use crate::block::{Block, HEADER_SIZE};
use crate::error::AllocError;

/// 0 means "no growth has happened yet".
static HEAP_START: AtomicUsize = AtomicUsize::new(0);
static HEAP_END: AtomicUsize = AtomicUsize::new(0);

fn record_heap_bounds(old_brk: usize, increment: usize) {
  // Only the very first successful growth sets heap_start; every growth
  // call afterwards only pushes heap_end forward.
  HEAP_START
    .compare_exchange(0, old_brk, Ordering::SeqCst, Ordering::SeqCst)
    .ok();
  HEAP_END.store(old_brk + increment, Ordering::SeqCst);
}

/// Extends the program break by `header size + payload` bytes and
/// initialises a new in-use block over the freshly obtained memory.
///
/// The returned block is handed straight to the caller — it is never
/// first threaded through a free list. Returns `Err` without touching any
/// bookkeeping if `sbrk` fails; `heap_start`/`heap_end` are therefore only
/// ever updated on success, per spec: "No partial state: the free list
/// and heap bounds are unchanged."
///
/// Callers that need growth serialised across threads (the locked and
/// lock-free-reclamation variants) must hold their own lock around this
/// call; single-threaded callers call it unguarded.
pub(crate) fn grow(payload: usize) -> Result<*mut Block, AllocError> {
  let total = HEADER_SIZE + payload;

  unsafe {
    let raw = sbrk(total as intptr_t);
    if raw == usize::MAX as *mut c_void {
      log::warn!("sbrk failed while requesting {total} bytes");
      return Err(AllocError::Growth { requested: total });
    }

    let old_brk = raw as usize;
    record_heap_bounds(old_brk, total);

    let block = raw as *mut Block;
    (*block).size = payload;
    (*block).free = false;
    (*block).next = ptr::null_mut();

    log::trace!("grew heap by {total} bytes at {raw:p} (payload {payload})");
    Ok(block)
  }
}

/// `heap_end - heap_start`, or 0 before the first successful growth.
pub fn data_segment_size() -> usize {
  let start = HEAP_START.load(Ordering::SeqCst);
  let end = HEAP_END.load(Ordering::SeqCst);
  if start == 0 || end == 0 { 0 } else { end - start }
}
