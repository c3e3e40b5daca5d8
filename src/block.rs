use std::mem;

/// Header placed immediately before every payload.
///
/// `size` is the payload length in bytes (always a positive multiple of
/// 8), `free` is redundant with list membership but kept for diagnostic
/// assertions, and `next` is only meaningful while the block sits on some
/// free list or on the reclamation stack — it is undefined once the block
/// has been handed out to a caller.
#[repr(C)]
pub struct Block {
  pub size: usize,
  pub free: bool,
  pub next: *mut Block,
}

/// Size in bytes of a `Block` header; already a multiple of 8 on every
/// platform this crate targets.
pub const HEADER_SIZE: usize = mem::size_of::<Block>();

impl Block {
  /// Address of the payload that follows `block`'s header.
  ///
  /// # Safety
  ///
  /// `block` must point at a live `Block` header.
  pub unsafe fn payload_ptr(block: *mut Block) -> *mut u8 {
    unsafe { (block as *mut u8).add(HEADER_SIZE) }
  }

  /// Recovers the header address given a payload pointer previously
  /// returned by one of the `alloc_*` functions.
  ///
  /// # Safety
  ///
  /// `payload` must have been produced by `Block::payload_ptr` on a block
  /// allocated by this crate.
  pub unsafe fn from_payload(payload: *mut u8) -> *mut Block {
    unsafe { payload.sub(HEADER_SIZE) as *mut Block }
  }
}
