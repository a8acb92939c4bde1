//! # ragged-poly
//!
//! Solutions for two small exercises, driven by JSON challenge definitions:
//!
//! - [challenge::jagged]: sorting ragged matrices by the sum, maximum or minimum of their rows
//! - [challenge::polynomial]: a polynomial type with real coefficients and its arithmetic
pub mod challenge;
pub mod common;
pub mod error;
pub mod settings;
