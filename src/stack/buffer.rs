
use super::error::Fault;

use std::mem;
use std::ops::{Deref, DerefMut};

/// An exclusively-owned, fixed-size block of slots. Every slot always
/// holds a value; unused slots hold `T::default()`.
///
/// The buffer is released exactly once, when it is dropped.
#[derive(Debug)]
pub(crate) struct SlotBuffer<T> {
  slots: Box<[T]>,
}

impl<T: Default> SlotBuffer<T> {

  /// Allocates `capacity` default-initialized slots. Reports
  /// [`Fault::AllocationFailed`] rather than aborting if the
  /// allocator refuses the request.
  pub fn allocate(capacity: usize) -> Result<Self, Fault> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)
      .map_err(|_| Fault::AllocationFailed { requested: capacity })?;
    slots.resize_with(capacity, T::default);
    Ok(Self { slots: slots.into_boxed_slice() })
  }

  /// Allocates a buffer of `capacity` slots and moves the first
  /// `length` elements of `self` into it, in order. The vacated slots
  /// of `self` are left holding `T::default()`.
  ///
  /// Elements beyond `capacity` are not carried over.
  pub fn relocate(&mut self, length: usize, capacity: usize) -> Result<Self, Fault> {
    let mut target = Self::allocate(capacity)?;
    for (dest, src) in target.slots.iter_mut().zip(&mut self.slots[..length]) {
      *dest = mem::take(src);
    }
    Ok(target)
  }

  /// Allocates a buffer of the same capacity as `self` and clones the
  /// first `length` elements into it.
  pub fn duplicate(&self, length: usize) -> Result<Self, Fault>
  where T: Clone {
    let mut target = Self::allocate(self.slots.len())?;
    target.slots[..length].clone_from_slice(&self.slots[..length]);
    Ok(target)
  }

}

impl<T> Deref for SlotBuffer<T> {
  type Target = [T];

  fn deref(&self) -> &[T] {
    &self.slots
  }
}

impl<T> DerefMut for SlotBuffer<T> {
  fn deref_mut(&mut self) -> &mut [T] {
    &mut self.slots
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_allocate_default_slots() {
    let buffer = SlotBuffer::<i32>::allocate(4).unwrap();
    assert_eq!(&*buffer, &[0, 0, 0, 0]);
  }

  #[test]
  fn test_allocate_empty() {
    let buffer = SlotBuffer::<String>::allocate(0).unwrap();
    assert!(buffer.is_empty());
  }

  #[test]
  fn test_allocate_too_large() {
    let err = SlotBuffer::<u64>::allocate(usize::MAX).unwrap_err();
    assert_eq!(err, Fault::AllocationFailed { requested: usize::MAX });
  }

  #[test]
  fn test_relocate_grows_in_order() {
    let mut buffer = SlotBuffer::allocate(2).unwrap();
    buffer[0] = String::from("a");
    buffer[1] = String::from("b");
    let relocated = buffer.relocate(2, 4).unwrap();
    assert_eq!(&*relocated, &["a", "b", "", ""]);
    assert_eq!(&*buffer, &["", ""]);
  }

  #[test]
  fn test_relocate_shrinks_live_prefix() {
    let mut buffer = SlotBuffer::allocate(8).unwrap();
    buffer[0] = 10;
    buffer[1] = 20;
    let relocated = buffer.relocate(2, 4).unwrap();
    assert_eq!(&*relocated, &[10, 20, 0, 0]);
  }

  #[test]
  fn test_duplicate_is_independent() {
    let mut buffer = SlotBuffer::allocate(4).unwrap();
    buffer[0] = vec![1];
    buffer[1] = vec![2];
    buffer[2] = vec![3];
    // Only the live prefix is copied.
    let mut copy = buffer.duplicate(2).unwrap();
    assert_eq!(&*copy, &[vec![1], vec![2], vec![], vec![]]);
    copy[0].push(100);
    assert_eq!(buffer[0], vec![1]);
  }
}
