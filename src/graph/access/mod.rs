//! Internal per-pass state shared by graph algorithms.
//!
//! This module is intentionally `pub(crate)`: marked sets and similar scratch
//! buffers are owned by a single call and never part of the public API.

pub(crate) mod marked;
