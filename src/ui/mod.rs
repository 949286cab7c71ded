//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All output goes through this module so responses, errors, and
//! diagnostics are formatted the same way in every mode.

pub mod output;
