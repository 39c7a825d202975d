//! Integration test crate for ClipTools.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the library crates to verify they work together.

#[cfg(test)]
mod review;

#[cfg(test)]
mod descale;
