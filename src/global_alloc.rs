//! `GlobalAlloc` adapters over the four allocation strategies.
//!
//! These are thin wrappers, not a new allocation policy: each one forwards
//! straight to the corresponding free functions in [`crate::single`],
//! [`crate::locked`], or [`crate::nolock`], so a consumer can register one
//! with `#[global_allocator]` the same way any `GlobalAlloc` impl is
//! registered — a raw strategy plus a thin adapter over it.
//!
//! Per the alignment non-goal (§1, "alignment larger than 8 bytes" is out
//! of scope), a `Layout` requesting more than 8-byte alignment is refused
//! with a null pointer rather than silently under-aligning the result.

use std::alloc::{GlobalAlloc, Layout};

use crate::{locked, nolock, single};

fn alignment_supported(layout: Layout) -> bool {
  layout.align() <= 8
}

/// Registers [`crate::alloc_ff`]/[`crate::free_ff`] as the process's
/// global allocator.
pub struct FirstFitGlobal;

unsafe impl GlobalAlloc for FirstFitGlobal {
  unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
    if !alignment_supported(layout) {
      return std::ptr::null_mut();
    }
    single::alloc_ff(layout.size())
  }

  unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
    single::free_ff(ptr)
  }
}

/// Registers [`crate::alloc_bf`]/[`crate::free_bf`] as the process's
/// global allocator.
pub struct BestFitGlobal;

unsafe impl GlobalAlloc for BestFitGlobal {
  unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
    if !alignment_supported(layout) {
      return std::ptr::null_mut();
    }
    single::alloc_bf(layout.size())
  }

  unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
    single::free_bf(ptr)
  }
}

/// Registers [`crate::alloc_locked`]/[`crate::free_locked`] as the
/// process's global allocator.
pub struct LockedGlobal;

unsafe impl GlobalAlloc for LockedGlobal {
  unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
    if !alignment_supported(layout) {
      return std::ptr::null_mut();
    }
    locked::alloc_locked(layout.size())
  }

  unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
    locked::free_locked(ptr)
  }
}

/// Registers [`crate::alloc_nolock`]/[`crate::free_nolock`] as the
/// process's global allocator.
pub struct NoLockGlobal;

unsafe impl GlobalAlloc for NoLockGlobal {
  unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
    if !alignment_supported(layout) {
      return std::ptr::null_mut();
    }
    nolock::alloc_nolock(layout.size())
  }

  unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
    nolock::free_nolock(ptr)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn overaligned_request_is_refused_rather_than_under_aligned() {
    let layout = Layout::from_size_align(64, 16).unwrap();
    let adapter = FirstFitGlobal;
    unsafe {
      assert!(adapter.alloc(layout).is_null());
    }
  }
}
