//! PlantUML plugin
//!
//! Formats declarations as PlantUML class bodies and assembles them into
//! class diagram scripts.

mod encoding;
mod formatter;
mod generator;

pub use encoding::{decode, encode, server_url};
pub use formatter::{DefaultFormatter, UNKNOWN_DEFAULT};
pub use generator::{PlantUmlGenerator, DEFAULT_COMMAND, DEFAULT_EXECUTABLE, DEFAULT_FORMAT};
