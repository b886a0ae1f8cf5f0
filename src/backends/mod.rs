//! Backend cache implementations.

pub mod memory;
