
//! Resize policy for [`Stack`](super::Stack).
//!
//! A stack doubles its storage when it is full and halves it when
//! occupancy falls below a quarter of the capacity.

/// Capacity of a newly-constructed stack.
pub const INITIAL_CAPACITY: usize = 2;

pub const GROWTH_FACTOR: usize = 2;

pub const SHRINK_DIVISOR: usize = 2;

/// A stack shrinks once `SHRINK_OCCUPANCY_RATIO * length` drops below
/// its capacity.
pub const SHRINK_OCCUPANCY_RATIO: usize = 4;

/// True if there is no free slot left for another element.
pub fn needs_growth(length: usize, capacity: usize) -> bool {
  length == capacity
}

/// True if the stack should shrink before removing its top element.
///
/// `length` is the count *including* the element about to be removed,
/// so a stack shrinks one pop earlier than a check against the
/// remaining occupancy would.
pub fn needs_shrink(length: usize, capacity: usize) -> bool {
  length.saturating_mul(SHRINK_OCCUPANCY_RATIO) < capacity
}

/// The capacity after growing, or `None` on overflow.
pub fn grown(capacity: usize) -> Option<usize> {
  capacity.checked_mul(GROWTH_FACTOR)
}

/// The capacity after shrinking. Note that this is zero for a
/// capacity of one.
pub fn shrunk(capacity: usize) -> usize {
  capacity / SHRINK_DIVISOR
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_needs_growth() {
    assert!(needs_growth(2, 2));
    assert!(!needs_growth(1, 2));
    assert!(!needs_growth(0, 2));
  }

  #[test]
  fn test_needs_shrink_counts_outgoing_element() {
    // One element in a capacity of four is exactly a quarter.
    assert!(!needs_shrink(1, 4));
    assert!(needs_shrink(1, 8));
    assert!(needs_shrink(3, 16));
    assert!(!needs_shrink(4, 16));
    assert!(!needs_shrink(usize::MAX, 16));
  }

  #[test]
  fn test_grown() {
    assert_eq!(grown(INITIAL_CAPACITY), Some(4));
    assert_eq!(grown(8), Some(16));
    assert_eq!(grown(usize::MAX), None);
  }

  #[test]
  fn test_shrunk() {
    assert_eq!(shrunk(16), 8);
    assert_eq!(shrunk(2), 1);
    assert_eq!(shrunk(1), 0);
  }
}
