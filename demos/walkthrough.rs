//! A guided walkthrough of all four allocation strategies.
//!
//! Run with `cargo run --example walkthrough`. Pauses between steps so
//! you can inspect the process with `pmap`, `htop`, or `gdb` and watch
//! the program break move.

use std::io::Read;
use std::sync::Arc;
use std::thread;

use libc::sbrk;
use rallocator::{
  alloc_bf, alloc_ff, alloc_locked, alloc_nolock, data_segment_free_space_size, data_segment_size,
  free_bf, free_ff, free_locked, free_nolock, nolock_free_space_size,
};

fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn print_program_break(label: &str) {
  println!(
    "[{}] PID = {}, program break (sbrk(0)) = {:?}",
    label,
    std::process::id(),
    unsafe { sbrk(0) },
  );
}

fn main() {
  env_logger::init();

  print_program_break("start");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 1) First-fit vs best-fit on the same canonical free list.
  // --------------------------------------------------------------------
  println!("\n[1] First-fit and best-fit share one free list");
  let a = alloc_ff(128);
  let b = alloc_ff(64);
  let c = alloc_ff(256);
  println!("    allocated a={a:?} ({}), b={b:?} ({}), c={c:?} ({})", 128, 64, 256);

  free_ff(a);
  free_ff(c);
  println!(
    "    freed a and c (not adjacent in memory) — free space now {} bytes",
    data_segment_free_space_size()
  );

  let small = alloc_bf(32);
  println!("    alloc_bf(32) picked the smallest block that still fits: {small:?}");
  free_bf(small);
  free_ff(b);

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 2) Splitting and exact reuse.
  // --------------------------------------------------------------------
  println!("\n[2] Split then reuse");
  let big = alloc_bf(4096);
  free_bf(big);
  let tail = alloc_bf(64);
  println!(
    "    after freeing a 4096-byte block and requesting 64, free space = {} bytes",
    data_segment_free_space_size()
  );
  free_bf(tail);

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 3) The locked multi-threaded variant under real contention.
  // --------------------------------------------------------------------
  println!("\n[3] Locked variant, 4 threads hammering the same free list");
  print_program_break("before locked section");

  let handles: Vec<_> = (0..4)
    .map(|t| {
      thread::spawn(move || {
        let mut ptrs = Vec::new();
        for i in 0..256 {
          let p = alloc_locked(48);
          assert!(!p.is_null());
          ptrs.push(p);
          if i % 3 == 0 {
            if let Some(p) = ptrs.pop() {
              free_locked(p);
            }
          }
        }
        for p in ptrs {
          free_locked(p);
        }
        println!("    thread {t} done");
      })
    })
    .collect();
  for h in handles {
    h.join().unwrap();
  }

  print_program_break("after locked section");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 4) The lock-free-reclamation variant: cross-thread free.
  // --------------------------------------------------------------------
  println!("\n[4] Per-thread lists + reclamation stack: thread 0 allocates, thread 1 frees");
  let produced = Arc::new(std::sync::Mutex::new(Vec::<usize>::new()));

  let producer = {
    let produced = Arc::clone(&produced);
    thread::spawn(move || {
      let mut ptrs = Vec::with_capacity(2000);
      for _ in 0..2000 {
        let p = alloc_nolock(40);
        assert!(!p.is_null());
        ptrs.push(p as usize);
      }
      *produced.lock().unwrap() = ptrs;
    })
  };
  producer.join().unwrap();

  let consumer = {
    let produced = Arc::clone(&produced);
    thread::spawn(move || {
      for &addr in produced.lock().unwrap().iter() {
        free_nolock(addr as *mut u8);
      }
    })
  };
  consumer.join().unwrap();

  println!(
    "    variant-B free space visible right now (this thread's list + reclaim stack) = {} bytes",
    nolock_free_space_size()
  );

  let drained = alloc_nolock(40);
  println!("    a fresh alloc_nolock drained one of the freed blocks: {drained:?}");
  free_nolock(drained);

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 5) Final bookkeeping.
  // --------------------------------------------------------------------
  println!("\n[5] data_segment_size() = {} bytes total ever obtained from the OS", data_segment_size());
  println!("[5] End of walkthrough. The OS reclaims everything when this process exits.");
}
