//! Blocking synchronization primitives.

pub mod round_barrier;

pub use round_barrier::{Rendezvous, RoundBarrier};
