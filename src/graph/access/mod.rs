//! Internal graph accessors shared by the traversal engines.
//!
//! This module is `pub(crate)`: the visited markers are an implementation
//! detail of the engines, not part of the graph API.

pub(crate) mod visited;
