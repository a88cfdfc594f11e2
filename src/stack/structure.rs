
use super::buffer::SlotBuffer;
use super::capacity;
use super::error::{Fault, Operation};
use super::policy::{FaultPolicy, PanicOnFault};

use tracing::{debug, trace};

use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;

/// LIFO stack over a single contiguous, exclusively-owned buffer.
///
/// The stack checks its own consistency before and after every
/// operation. A stack is valid when its storage is allocated, its
/// length does not exceed its capacity, and its capacity is nonzero.
/// Any violation, including use of a stack that has been moved out of
/// with [`Stack::take`] or [`Stack::assign_from`], is handed to the
/// fault policy `P` and never returned to the caller.
pub struct Stack<T, P = PanicOnFault> {
  storage: Option<SlotBuffer<T>>,
  length: usize,
  capacity: usize,
  policy: PhantomData<P>,
}

impl<T: Default> Stack<T> {

  /// An empty stack with room for
  /// [`INITIAL_CAPACITY`](capacity::INITIAL_CAPACITY) elements, which
  /// panics on any fault.
  pub fn new() -> Self {
    Self::with_policy()
  }

}

impl<T: Default, P: FaultPolicy> Stack<T, P> {

  /// As [`Stack::new`], but faults are handed to the policy `P`.
  pub fn with_policy() -> Self {
    let storage = Self::or_raise(SlotBuffer::allocate(capacity::INITIAL_CAPACITY));
    let stack = Self {
      storage: Some(storage),
      length: 0,
      capacity: capacity::INITIAL_CAPACITY,
      policy: PhantomData,
    };
    stack.ensure_ok(Operation::Construct);
    stack
  }

  /// Pushes a value onto the top of the stack, taking ownership of
  /// it.
  pub fn push(&mut self, element: T) {
    *self.vacant_top(Operation::Push) = element;
    self.commit_top(Operation::Push);
  }

  /// Pushes a copy of `element` onto the top of the stack. The copy
  /// is made with [`Clone::clone_from`], so the vacant slot's
  /// resources may be reused.
  pub fn push_cloned(&mut self, element: &T)
  where T: Clone {
    self.vacant_top(Operation::Push).clone_from(element);
    self.commit_top(Operation::Push);
  }

  /// Builds a new top element from `args` via [`From`].
  pub fn emplace<A>(&mut self, args: A)
  where T: From<A> {
    self.emplace_with(|| T::from(args));
  }

  /// Builds a new top element with the given constructor function. If
  /// `make` panics, the stack is left as it was (though it may have
  /// grown).
  pub fn emplace_with<F>(&mut self, make: F)
  where F: FnOnce() -> T {
    let slot = self.vacant_top(Operation::Emplace);
    *slot = make();
    self.commit_top(Operation::Emplace);
  }

  /// Removes and returns the top element. Popping an empty stack is
  /// not a fault; it does nothing and returns `None`.
  pub fn pop(&mut self) -> Option<T> {
    self.require_ok(Operation::Pop);
    if self.length == 0 {
      return None;
    }
    if capacity::needs_shrink(self.length, self.capacity) {
      self.shrink();
    }
    self.length -= 1;
    let index = self.length;
    let element = mem::take(&mut self.slots_mut(Operation::Pop)[index]);
    self.ensure_ok(Operation::Pop);
    Some(element)
  }

  /// Returns the slot one past the top, growing first if the stack is
  /// full. The caller fills the slot and then calls
  /// [`commit_top`](Stack::commit_top).
  fn vacant_top(&mut self, operation: Operation) -> &mut T {
    self.require_ok(operation);
    if capacity::needs_growth(self.length, self.capacity) {
      self.grow();
    }
    let index = self.length;
    &mut self.slots_mut(operation)[index]
  }

  fn commit_top(&mut self, operation: Operation) {
    self.length += 1;
    self.ensure_ok(operation);
  }

  fn grow(&mut self) {
    self.require_ok(Operation::Grow);
    let Some(new_capacity) = capacity::grown(self.capacity) else {
      P::raise(Fault::CapacityOverflow { capacity: self.capacity });
    };
    self.resize(Operation::Grow, new_capacity);
  }

  fn shrink(&mut self) {
    self.require_ok(Operation::Shrink);
    self.resize(Operation::Shrink, capacity::shrunk(self.capacity));
  }

  fn resize(&mut self, operation: Operation, new_capacity: usize) {
    let length = self.length;
    let relocated = self.slots_mut(operation).relocate(length, new_capacity);
    let relocated = Self::or_raise(relocated);
    debug!(%operation, from = self.capacity, to = new_capacity, length, "resized stack storage");
    // Replacing the buffer releases the old one.
    self.storage = Some(relocated);
    self.capacity = new_capacity;
    self.ensure_ok(operation);
  }

}

impl<T, P: FaultPolicy> Stack<T, P> {

  /// The number of elements on the stack.
  pub fn size(&self) -> usize {
    self.require_ok(Operation::Size);
    self.length
  }

  /// The number of elements the stack can hold before it must grow.
  pub fn capacity(&self) -> usize {
    self.require_ok(Operation::Capacity);
    self.capacity
  }

  pub fn is_empty(&self) -> bool {
    self.size() == 0
  }

  /// The most recently pushed element. Faults if the stack is empty.
  pub fn top(&self) -> &T {
    self.require_nonempty(Operation::Top);
    &self.slots(Operation::Top)[self.length - 1]
  }

  /// As [`Stack::top`], but the element may be modified in place.
  pub fn top_mut(&mut self) -> &mut T {
    self.require_nonempty(Operation::Top);
    let index = self.length - 1;
    &mut self.slots_mut(Operation::Top)[index]
  }

  /// Moves the whole stack out of `self` without copying any
  /// elements, leaving `self` drained. A drained stack may only be
  /// dropped or assigned to; any other use is a fault.
  pub fn take(&mut self) -> Self {
    self.require_ok(Operation::Move);
    let taken = Self {
      storage: self.storage.take(),
      length: mem::take(&mut self.length),
      capacity: mem::take(&mut self.capacity),
      policy: PhantomData,
    };
    trace!(length = taken.length, capacity = taken.capacity, "moved stack storage");
    taken.ensure_ok(Operation::Move);
    taken
  }

  /// Replaces the contents of `self` with those of `source`, without
  /// copying any elements. The previous storage of `self` is released
  /// and `source` is left drained.
  ///
  /// Both stacks must be valid. The borrow rules guarantee that
  /// `source` is not `self`.
  pub fn assign_from(&mut self, source: &mut Self) {
    self.require_ok(Operation::MoveAssign);
    source.require_ok(Operation::MoveAssign);
    self.storage = source.storage.take();
    self.length = mem::take(&mut source.length);
    self.capacity = mem::take(&mut source.capacity);
    trace!(length = self.length, capacity = self.capacity, "move-assigned stack storage");
    self.ensure_ok(Operation::MoveAssign);
    if source.ok() {
      P::raise(Fault::NonDestructiveMove);
    }
  }

  /// True if the stack has been moved out of and holds no storage.
  pub fn is_drained(&self) -> bool {
    self.storage.is_none() && self.length == 0 && self.capacity == 0
  }

  fn ok(&self) -> bool {
    match &self.storage {
      None => false,
      Some(storage) => {
        storage.len() == self.capacity && self.length <= self.capacity && self.capacity > 0
      }
    }
  }

  fn require_ok(&self, operation: Operation) {
    if !self.ok() {
      P::raise(Fault::InvalidState { operation });
    }
  }

  fn require_nonempty(&self, operation: Operation) {
    self.require_ok(operation);
    if self.length == 0 {
      P::raise(Fault::EmptyTop);
    }
  }

  fn ensure_ok(&self, operation: Operation) {
    if !self.ok() {
      P::raise(Fault::Postcondition { operation });
    }
  }

  fn slots(&self, operation: Operation) -> &SlotBuffer<T> {
    match &self.storage {
      Some(storage) => storage,
      None => P::raise(Fault::InvalidState { operation }),
    }
  }

  fn slots_mut(&mut self, operation: Operation) -> &mut SlotBuffer<T> {
    match &mut self.storage {
      Some(storage) => storage,
      None => P::raise(Fault::InvalidState { operation }),
    }
  }

  fn or_raise<U>(result: Result<U, Fault>) -> U {
    match result {
      Ok(value) => value,
      Err(fault) => P::raise(fault),
    }
  }

}

impl<T: Default, P: FaultPolicy> Default for Stack<T, P> {
  fn default() -> Self {
    Self::with_policy()
  }
}

/// Copying a stack duplicates its live elements into fresh storage of
/// the same capacity. The two stacks are fully independent afterward.
impl<T: Clone + Default, P: FaultPolicy> Clone for Stack<T, P> {

  fn clone(&self) -> Self {
    self.require_ok(Operation::Copy);
    let storage = Self::or_raise(self.slots(Operation::Copy).duplicate(self.length));
    let copy = Self {
      storage: Some(storage),
      length: self.length,
      capacity: self.capacity,
      policy: PhantomData,
    };
    copy.ensure_ok(Operation::Copy);
    copy
  }

  fn clone_from(&mut self, source: &Self) {
    self.require_ok(Operation::CopyAssign);
    source.require_ok(Operation::CopyAssign);
    let storage = Self::or_raise(source.slots(Operation::CopyAssign).duplicate(source.length));
    self.storage = Some(storage);
    self.length = source.length;
    self.capacity = source.capacity;
    self.ensure_ok(Operation::CopyAssign);
  }

}

impl<T: Debug, P> Debug for Stack<T, P> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.storage {
      None => write!(f, "Stack(<drained>)"),
      Some(storage) => {
        let live = &storage[..self.length.min(storage.len())];
        f.debug_struct("Stack")
          .field("elements", &live)
          .field("length", &self.length)
          .field("capacity", &self.capacity)
          .finish()
      }
    }
  }
}
