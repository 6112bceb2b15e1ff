//! Generator implementations and the graph builder feeding them

pub mod builder;
pub mod plantuml;

pub use builder::*;
pub use plantuml::*;
