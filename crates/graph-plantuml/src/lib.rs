//! graph-plantuml - Turn type declarations into PlantUML class diagrams
//!
//! A library that formats classes, interfaces and extensions (their
//! constants, fields and operations) as PlantUML member blocks, and assembles
//! them with inheritance edges and clusters into a complete script.
//!
//! # Quick Start
//!
//! ```rust
//! use graph_plantuml::{render, Declaration, Field, FormatterOptions};
//!
//! let user = Declaration::class("App\\User")
//!     .with_field(Field::new("name", "App\\User").with_type("string"));
//!
//! let script = render(&[user], FormatterOptions::default());
//! assert!(script.starts_with("@startuml"));
//! assert!(script.contains("class User << class >> {"));
//! assert!(script.contains("+name : string"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, drive the builder and generator yourself:
//!
//! ```rust
//! use graph_plantuml::prelude::*;
//!
//! let generator = PlantUmlGenerator::new();
//! let mut builder = GraphBuilder::new(&generator);
//! builder.add_declaration(&Declaration::class("Dog").with_parent(Declaration::class("Animal")));
//! builder.set_graph_attribute("graph.rankdir", "LR");
//!
//! let graph = builder.into_graph();
//! assert_eq!(graph.edge_count(), 1);
//!
//! let script = generator.build_script(&graph, false);
//! assert!(script.contains("Dog --|> Animal"));
//! ```

pub mod core;
pub mod plugins;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Attributes, Constant, Declaration, DeclarationKind, DefaultValue, Field, Formatter,
        FormatterOptions, Generator, Graph, Operation, Parameter, Value, Vertex, Visibility,
    };
    pub use crate::plugins::builder::GraphBuilder;
    pub use crate::plugins::plantuml::{DefaultFormatter, PlantUmlGenerator};
}

/// Render declarations to a PlantUML script
///
/// The simplest way to get a script: every declaration (and its parents and
/// interfaces) becomes a vertex, formatted with `options`.
pub fn render(declarations: &[Declaration], options: FormatterOptions) -> String {
    use crate::plugins::builder::GraphBuilder;
    use crate::plugins::plantuml::PlantUmlGenerator;

    let generator = PlantUmlGenerator::with_options(options);
    let mut builder = GraphBuilder::new(&generator);
    builder.add_declarations(declarations);
    builder.build_script(false)
}

/// Render declarations to an encoded script, ready for a PlantUML server URL
pub fn render_encoded(declarations: &[Declaration], options: FormatterOptions) -> String {
    use crate::plugins::builder::GraphBuilder;
    use crate::plugins::plantuml::PlantUmlGenerator;

    let generator = PlantUmlGenerator::with_options(options);
    let mut builder = GraphBuilder::new(&generator);
    builder.add_declarations(declarations);
    builder.build_script(true)
}
