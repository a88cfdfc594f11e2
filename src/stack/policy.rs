
use super::error::Fault;

use tracing::error;

use std::process;

/// The reaction of a [`Stack`](super::Stack) to a [`Fault`].
///
/// A policy is chosen per stack type, as the second type parameter of
/// [`Stack`](super::Stack). Whatever a policy does with the fault, it
/// must not return: the stack never continues past a broken
/// invariant.
pub trait FaultPolicy {
  fn raise(fault: Fault) -> !;
}

/// Panics with the fault's message. This is the default policy, and
/// it lets a caller (or a test) observe the fault by unwinding.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicOnFault;

/// Prints the fault to standard error and aborts the process
/// immediately, without unwinding.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbortOnFault;

impl FaultPolicy for PanicOnFault {
  fn raise(fault: Fault) -> ! {
    error!(%fault, "stack fault");
    panic!("stack fault: {fault}");
  }
}

impl FaultPolicy for AbortOnFault {
  fn raise(fault: Fault) -> ! {
    error!(%fault, "stack fault, aborting");
    // The process ends here, so the message must reach stderr even
    // when no subscriber is installed.
    eprintln!("stack fault: {fault}");
    process::abort();
  }
}
