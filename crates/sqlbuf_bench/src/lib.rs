//! Shared helpers for the SQLBuf benchmarks.

pub mod utils;
