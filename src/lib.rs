
//! A generic, dynamically resizable LIFO container over contiguous
//! owned storage. See [`Stack`].

pub mod stack;

pub use stack::{AbortOnFault, Fault, FaultPolicy, Operation, PanicOnFault, Stack};
