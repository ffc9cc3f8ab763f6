//! # SQLBuf Testkit
//!
//! Test utilities for SQLBuf.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - Fuzz harnesses for extraction and unquoting
//! - Test vectors shared with the bindings
//!
//! ## Usage
//!
//! ```rust
//! use sqlbuf_testkit::prelude::*;
//!
//! for vector in extract_vectors() {
//!     check_extract_vector(&vector).unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fuzz;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fuzz::*;
pub use generators::*;
pub use vectors::*;
