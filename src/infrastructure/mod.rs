//! Concrete implementations of the domain ports.

pub mod clock;
pub mod focus;
