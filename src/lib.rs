//! # rallocator — a user-space allocator built directly on `sbrk`
//!
//! This crate implements the classic project-2-style malloc exercise:
//! four allocation strategies, all laid out directly on top of the
//! process data segment, with no help from the system allocator.
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                     HEAP MEMORY (via sbrk)                    │
//!   │  ┌────────┬─────────┬────────┬─────────────┬────────────┐    │
//!   │  │ Header │ Payload │ Header │   Payload   │    ...     │    │
//!   │  │(in use)│         │ (free) │             │            │    │
//!   │  └────────┴─────────┴────────┴─────────────┴────────────┘    │
//!   │                              ▲                                │
//!   │                     free-list node, reachable from             │
//!   │                     whichever list currently owns it           │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Strategies
//!
//! | function | concurrency | placement |
//! |---|---|---|
//! | [`alloc_ff`] / [`free_ff`] | single-threaded | first-fit |
//! | [`alloc_bf`] / [`free_bf`] | single-threaded | best-fit |
//! | [`alloc_locked`] / [`free_locked`] | one global lock | best-fit |
//! | [`alloc_nolock`] / [`free_nolock`] | per-thread list + lock-free reclamation stack | best-fit |
//!
//! `alloc_ff`/`alloc_bf`/`alloc_locked` all operate on one canonical free
//! list; `alloc_nolock` is entirely separate (its own per-thread lists and
//! reclamation stack) — see [`nolock`] for why it has its own diagnostic
//! query instead of sharing [`data_segment_free_space_size`].
//!
//! ## Layout
//!
//! ```text
//!   rallocator
//!   ├── align        - fixed 8-byte size rounding
//!   ├── block        - the Block header and payload<->header conversions
//!   ├── error        - internal-only AllocError (never reaches callers)
//!   ├── heap         - sbrk wrapper, heap_start/heap_end bookkeeping
//!   ├── free_list    - insert/remove/coalesce/search, parameterised over
//!   │                  whichever list head a caller passes in
//!   ├── single       - alloc_ff/free_ff, alloc_bf/free_bf
//!   ├── locked       - alloc_locked/free_locked
//!   ├── nolock       - alloc_nolock/free_nolock, the reclamation stack
//!   └── global_alloc - GlobalAlloc adapters over all four strategies
//! ```
//!
//! ## What this crate does not do
//!
//! No size classes, no thread-caching beyond the one per-thread list in
//! `nolock`, no large-allocation fallback via `mmap`, no returning memory
//! to the OS (the break only ever grows), no alignment above 8 bytes, no
//! double-free or use-after-free detection, no in-place realloc. Each of
//! these trades a real but bounded feature for the simplicity of a single,
//! predictable allocation path; none of them are needed to satisfy this
//! crate's contract with its callers.
//!
//! ## Safety
//!
//! Every public allocation/free function is safe to *call* (they take
//! plain `usize`/`*mut u8`, not references, and never reference
//! uninitialised caller memory) but each one is, in spirit, as unsafe as
//! `malloc`/`free`: passing a pointer that was not returned by the
//! matching `alloc_*` function, double-freeing, or using a pointer after
//! it has been freed is undefined behaviour that this crate makes no
//! attempt to detect.

mod align;
mod block;
mod error;
mod free_list;
mod global_alloc;
mod heap;
mod locked;
mod nolock;
mod single;

pub use block::HEADER_SIZE;
pub use error::AllocError;
pub use global_alloc::{BestFitGlobal, FirstFitGlobal, LockedGlobal, NoLockGlobal};
pub use heap::data_segment_size;
pub use locked::{alloc_locked, free_locked};
pub use nolock::{alloc_nolock, free_nolock, nolock_free_space_size};
pub use single::{alloc_bf, alloc_ff, data_segment_free_space_size, free_bf, free_ff};

/// Serialises tests that touch this crate's process-wide statics (the
/// canonical free list, the reclamation stack, heap bounds) so that
/// `cargo test`'s default multi-threaded test runner — which runs every
/// `#[test]` function in this binary concurrently unless told
/// otherwise — doesn't let two unrelated tests race on the same shared
/// allocator state. Each literal scenario from spec §8 that needs a
/// *blank* heap instead lives in its own file under `tests/`, since Cargo
/// compiles each of those into a separate process.
#[cfg(test)]
pub(crate) mod test_support {
  use std::sync::{Mutex, MutexGuard};

  static SERIAL: Mutex<()> = Mutex::new(());

  pub(crate) fn serialize() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}
