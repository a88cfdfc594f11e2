
//! Growable LIFO stack with defensive consistency checking.

mod buffer;
pub mod capacity;
mod error;
mod policy;
mod structure;

pub use error::{Fault, Operation};
pub use policy::{AbortOnFault, FaultPolicy, PanicOnFault};
pub use structure::Stack;
