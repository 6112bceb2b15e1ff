//! Core formatter trait for vertex labels
//!
//! A formatter turns one declaration into the member block a generator wraps
//! into its notation.

use super::metadata::{Declaration, Operation};
use super::options::FormatterOptions;

/// Core trait for label formatters
///
/// Formatting is total: missing metadata renders as an empty clause and
/// unresolvable defaults degrade to a sentinel, so every method returns a
/// plain `String`.
///
/// # Example
/// ```
/// use graph_plantuml::core::{Declaration, Formatter, FormatterOptions};
/// use graph_plantuml::plugins::plantuml::DefaultFormatter;
///
/// let formatter = DefaultFormatter::new(FormatterOptions::default());
/// let label = formatter.format_class_label(&Declaration::class("Empty"));
/// assert_eq!(label, "    --\n");
/// ```
pub trait Formatter: Send + Sync {
    /// Label of an extension: name, stereotype, constants and functions
    fn format_extension_label(&self, extension: &Declaration) -> String;

    /// Member block of an extension: constants and functions, never fields
    fn format_extension_members(&self, extension: &Declaration) -> String;

    /// Member block of a class or interface
    fn format_class_label(&self, declaration: &Declaration) -> String;

    /// Operations block; `owning` names the declaration for class methods
    fn format_operations(&self, operations: &[Operation], owning: Option<&str>) -> String;

    /// Name of the label format, used as the vertex cache key suffix
    fn format(&self) -> &'static str;

    /// Options this formatter was built with
    fn options(&self) -> &FormatterOptions;

    /// Vertex attribute key holding cached labels of this format
    fn label_key(&self) -> String {
        format!("label_{}", self.format())
    }
}
