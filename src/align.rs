//! Fixed 8-byte alignment helper.
//!
//! Every payload size handed to a placement search or split is rounded up
//! to the next multiple of 8 first. This allocator's alignment contract is
//! a fixed 8 bytes regardless of target pointer size, so a plain function
//! is enough; there is no need to track `mem::size_of::<usize>()`.

/// Rounds `n` up to the next multiple of 8.
pub fn align8(n: usize) -> usize {
  (n + 7) & !7usize
}

#[cfg(test)]
mod tests {
  use super::align8;

  #[test]
  fn rounds_up_to_next_multiple_of_eight() {
    let cases = [
      (0, 0),
      (1, 8),
      (7, 8),
      (8, 8),
      (9, 16),
      (15, 16),
      (16, 16),
      (17, 24),
      (4096, 4096),
      (4097, 4104),
    ];

    for (input, expected) in cases {
      assert_eq!(align8(input), expected, "align8({input})");
    }
  }

  #[test]
  fn result_is_always_a_multiple_of_eight() {
    for n in 0..256usize {
      assert_eq!(align8(n) % 8, 0);
    }
  }
}
