//! Core generator trait for diagram scripts

use anyhow::Result;
use std::path::PathBuf;

use super::formatter::Formatter;
use super::graph::Graph;

/// Core trait for script generators
///
/// A generator assembles a [`Graph`] of formatted vertices into a complete
/// script and can hand that script to an external rendering command.
pub trait Generator: Send + Sync {
    /// Formatter type producing the vertex labels this generator wraps
    type Formatter: Formatter;

    /// Formatter configured with this generator's options
    fn formatter(&self) -> &Self::Formatter;

    /// Assemble the script, optionally encoded for transport
    fn build_script(&self, graph: &Graph, encode: bool) -> String;

    /// Render the graph to an image file through the external command
    ///
    /// `command` overrides the default command template; see the
    /// implementation for the placeholders it understands.
    fn write_image_file(&self, graph: &Graph, command: Option<&str>) -> Result<PathBuf>;

    /// Name of this generator
    fn name(&self) -> &'static str;
}
