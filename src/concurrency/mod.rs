//! Concurrency building blocks for the round-based worker pool.
//!
//! The engine needs exactly two shared primitives: a reusable rendezvous
//! between persistent workers and their orchestrator, and lock-free per-node
//! flags. Both are built on the types re-exported from [`primitives`], which
//! resolve to `loom` under `--cfg loom` so model tests exercise the real code.

pub(crate) mod primitives;
pub mod sync;

pub use sync::{Rendezvous, RoundBarrier};
