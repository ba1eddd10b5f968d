//! Oxicord model - Discord messages and gateway events that keep track of
//! what a payload left out.
//!
//! Partial payloads are decoded into [`domain::UndefinedOr`] fields, so
//! "not sent" never collapses into "empty" or "false". The crate also ships
//! `oxicord-inspect`, which decodes captured gateway traffic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing Discord decoding, config and output adapters.
pub mod infrastructure;

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Binary name.
pub const NAME: &str = "oxicord-inspect";
