//! Core abstractions for diagram script generation
//!
//! This module defines the declaration model, the graph generators read, and
//! the traits formatters and generators implement.

mod error;
mod formatter;
mod generator;
mod graph;
pub mod logging;
mod metadata;
mod options;
mod text;

pub use error::*;
pub use formatter::*;
pub use generator::*;
pub use graph::*;
pub use logging::*;
pub use metadata::*;
pub use options::*;
pub use text::*;
