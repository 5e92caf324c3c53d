//! Utility modules

pub mod number;

pub use number::*;
