//! Foundation types for folio.
//!
//! This crate contains the types shared by every folio crate: the error
//! enum, the `Result` alias, and the rendering-agnostic output-message
//! taxonomy the interpreter hands back to whatever layer draws the
//! terminal.

pub mod error;
pub mod output;
