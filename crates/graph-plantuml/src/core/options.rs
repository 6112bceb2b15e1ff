//! Formatter and generator configuration
//!
//! [`FormatterOptions`] is built once and then only read. Every formatting
//! and assembly call borrows it, nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

use super::metadata::Visibility;

/// Options consulted while formatting labels and assembling scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterOptions {
    /// Render the constants block
    pub show_constants: bool,
    /// Render the fields block
    pub show_properties: bool,
    /// Render the operations block of classes
    pub show_methods: bool,
    /// Hide members inherited from ancestors
    pub only_self: bool,
    /// Members less visible than this are hidden
    pub min_visibility: Visibility,
    /// One level of indentation
    pub indent_string: String,
    /// Replacement for the `\` namespace delimiter in rendered names
    pub namespace_separator: String,
    /// Line terminator used in labels and scripts
    pub line_terminator: String,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            show_constants: true,
            show_properties: true,
            show_methods: true,
            only_self: false,
            min_visibility: Visibility::Private,
            indent_string: "  ".to_string(),
            namespace_separator: ".".to_string(),
            line_terminator: "\n".to_string(),
        }
    }
}

impl FormatterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only_self(mut self, only_self: bool) -> Self {
        self.only_self = only_self;
        self
    }

    pub fn with_min_visibility(mut self, visibility: Visibility) -> Self {
        self.min_visibility = visibility;
        self
    }

    pub fn with_constants(mut self, show: bool) -> Self {
        self.show_constants = show;
        self
    }

    pub fn with_properties(mut self, show: bool) -> Self {
        self.show_properties = show;
        self
    }

    pub fn with_methods(mut self, show: bool) -> Self {
        self.show_methods = show;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent_string = indent.into();
        self
    }

    pub fn with_namespace_separator(mut self, separator: impl Into<String>) -> Self {
        self.namespace_separator = separator.into();
        self
    }

    pub fn with_line_terminator(mut self, eol: impl Into<String>) -> Self {
        self.line_terminator = eol.into();
        self
    }

    /// Indentation used for member lines inside a vertex body
    pub fn member_indent(&self) -> String {
        self.indent_string.repeat(2)
    }
}
