
use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// An unrecoverable violation of a [`Stack`](super::Stack)'s
/// contract.
///
/// Faults are never returned to the caller as a `Result`. They are
/// handed to the stack's [`FaultPolicy`](super::FaultPolicy), which
/// must not return.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Fault {
  #[error("cannot {operation}: the stack is invalid")]
  InvalidState {
    operation: Operation,
  },
  #[error("cannot read the top element of an empty stack")]
  EmptyTop,
  #[error("unable to allocate storage for {requested} elements")]
  AllocationFailed {
    requested: usize,
  },
  #[error("cannot grow a stack of capacity {capacity} any further")]
  CapacityOverflow {
    capacity: usize,
  },
  #[error("{operation} failed, the resulting stack is invalid")]
  Postcondition {
    operation: Operation,
  },
  #[error("move assignment is not destructive for its source")]
  NonDestructiveMove,
}

/// The stack operation during which a [`Fault`] was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
  Construct,
  Copy,
  Move,
  CopyAssign,
  MoveAssign,
  Size,
  Capacity,
  Push,
  Emplace,
  Pop,
  Top,
  Grow,
  Shrink,
}

impl Operation {
  pub fn name(self) -> &'static str {
    match self {
      Operation::Construct => "construct",
      Operation::Copy => "copy",
      Operation::Move => "move",
      Operation::CopyAssign => "copy-assign",
      Operation::MoveAssign => "move-assign",
      Operation::Size => "query size",
      Operation::Capacity => "query capacity",
      Operation::Push => "push",
      Operation::Emplace => "emplace",
      Operation::Pop => "pop",
      Operation::Top => "read top",
      Operation::Grow => "grow",
      Operation::Shrink => "shrink",
    }
  }
}

impl Display for Operation {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}
