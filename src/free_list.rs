//! Address-ordered free-list operations.
//!
//! Every function here is parameterised over the list head it operates
//! on — a `*mut *mut Block`, i.e. a pointer to whichever cell is holding
//! the head pointer (a module-level static, a mutex-guarded cell, or a
//! thread-local cell). This is the same shape as the original C's
//! `BlockHeader **head` parameter, and it is what lets the single-threaded,
//! locked, and per-thread allocators in this crate share one
//! implementation of insert/remove/coalesce/search instead of three.
//!
//! None of these functions take any lock themselves; callers serialise
//! access however their variant requires (or not at all, for the
//! single-threaded variants).

use std::ptr;

use crate::block::{Block, HEADER_SIZE};

/// Inserts `b` into the address-ordered list rooted at `*head`, then
/// coalesces it with its physical successor and (if it was linked after
/// some predecessor) with that predecessor too.
///
/// # Safety
///
/// `head` must point at a valid head cell and `b` must not already be
/// linked into any list.
pub unsafe fn insert_sorted(head: *mut *mut Block, b: *mut Block) {
  unsafe {
    (*b).free = true;

    if (*head).is_null() || (b as usize) < (*head as usize) {
      (*b).next = *head;
      *head = b;
      coalesce_forward(b);
      return;
    }

    let mut p = *head;
    while !(*p).next.is_null() && ((*p).next as usize) < (b as usize) {
      p = (*p).next;
    }

    (*b).next = (*p).next;
    (*p).next = b;

    // b might absorb its new successor, and p might now be adjacent to
    // the (possibly grown) b.
    coalesce_forward(b);
    coalesce_forward(p);
  }
}

/// Unlinks `b` from the list rooted at `*head` and clears `b.next`.
///
/// No-op if `b` is not found on the list.
///
/// # Safety
///
/// `head` must point at a valid head cell.
pub unsafe fn remove_node(head: *mut *mut Block, b: *mut Block) {
  unsafe {
    if *head == b {
      *head = (*b).next;
      (*b).next = ptr::null_mut();
      return;
    }

    let mut p = *head;
    while !p.is_null() {
      if (*p).next == b {
        (*p).next = (*b).next;
        (*b).next = ptr::null_mut();
        return;
      }
      p = (*p).next;
    }
  }
}

/// Absorbs `b`'s immediate list successor for as long as it is physically
/// adjacent to `b`. Forward-only: there is no block footer, so a block can
/// only ever detect and merge with the neighbour that follows it in the
/// list, never the one before it (the predecessor-side fusion is instead
/// handled by the second `coalesce_forward` call in `insert_sorted`).
///
/// # Safety
///
/// `b` must be a valid, currently-free block.
pub unsafe fn coalesce_forward(b: *mut Block) {
  unsafe {
    while !(*b).next.is_null() {
      let end_of_b = Block::payload_ptr(b).add((*b).size) as *mut Block;
      if end_of_b == (*b).next {
        let n = (*b).next;
        (*b).size += HEADER_SIZE + (*n).size;
        (*b).next = (*n).next;
      } else {
        break;
      }
    }
  }
}

/// Returns the first free block whose size is at least `need`, or null.
///
/// # Safety
///
/// `head` must be a valid (possibly null) list head.
pub unsafe fn search_first_fit(head: *mut Block, need: usize) -> *mut Block {
  unsafe {
    let mut b = head;
    while !b.is_null() {
      if (*b).free && (*b).size >= need {
        return b;
      }
      b = (*b).next;
    }
    ptr::null_mut()
  }
}

/// Returns the smallest free block whose size is at least `need`,
/// breaking ties by first occurrence and stopping early on an exact-size
/// match. Null if no block is large enough.
///
/// # Safety
///
/// `head` must be a valid (possibly null) list head.
pub unsafe fn search_best_fit(head: *mut Block, need: usize) -> *mut Block {
  unsafe {
    let mut best: *mut Block = ptr::null_mut();
    let mut best_size = usize::MAX;

    let mut b = head;
    while !b.is_null() {
      if (*b).free && (*b).size >= need && (*b).size < best_size {
        best = b;
        best_size = (*b).size;
        if best_size == need {
          break;
        }
      }
      b = (*b).next;
    }

    best
  }
}

/// Splits `b` (already removed from every list, sized for `need`) if the
/// remainder would hold at least `HEADER_SIZE + 8` bytes, inserting the
/// tail back into the list rooted at `*head`. Otherwise `b` keeps its
/// full size and the caller absorbs the extra bytes as internal
/// fragmentation.
///
/// # Safety
///
/// `b` must be a live, currently in-use block with `size >= need`, and
/// `head` must point at a valid head cell — the same list `b` was drawn
/// from, so a fragment never leaks to a different free list.
pub unsafe fn maybe_split(b: *mut Block, need: usize, head: *mut *mut Block) {
  unsafe {
    if (*b).size < need + HEADER_SIZE + 8 {
      return;
    }

    let tail = Block::payload_ptr(b).add(need) as *mut Block;
    (*tail).size = (*b).size - need - HEADER_SIZE;
    (*tail).free = true;
    (*tail).next = ptr::null_mut();

    (*b).size = need;

    insert_sorted(head, tail);
  }
}

/// Sums the sizes of every block on the list rooted at `*head`.
///
/// # Safety
///
/// `head` must be a valid (possibly null) list head.
pub unsafe fn sum_free(head: *mut Block) -> usize {
  unsafe {
    let mut total = 0usize;
    let mut b = head;
    while !b.is_null() {
      total += (*b).size;
      b = (*b).next;
    }
    total
  }
}

/// Test-only introspection: asserts the invariants of §8 — sorted and
/// disjoint neighbours, no duplicate addresses, every size 8-byte aligned
/// — over the list rooted at `head`.
#[cfg(test)]
pub(crate) unsafe fn assert_invariants(head: *mut Block) {
  use std::collections::HashSet;

  unsafe {
    let mut seen = HashSet::new();
    let mut b = head;
    let mut prev: *mut Block = ptr::null_mut();

    while !b.is_null() {
      assert!((*b).free, "every free-list node must be marked free");
      assert_eq!((*b).size % 8, 0, "block size must be 8-byte aligned");
      assert!(
        seen.insert(b as usize),
        "duplicate block address {:p} on free list",
        b
      );

      if !prev.is_null() {
        assert!((prev as usize) < (b as usize), "free list must be address-ordered");
        let prev_end = Block::payload_ptr(prev).add((*prev).size) as usize;
        assert!(
          prev_end < (b as usize),
          "physically adjacent free blocks must have been coalesced"
        );
      }

      prev = b;
      b = (*b).next;
    }
  }
}
