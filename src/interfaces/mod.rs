//! Adapters between the checkout pipeline and the outside world.

pub mod csv;
