//! Normalized declaration metadata
//!
//! These types describe classes, interfaces and extensions the way a
//! reflection or parsing tool reports them. Every optional piece of metadata
//! (types, defaults, parents) is resolved once when the model is built, so the
//! formatter never has to probe for capabilities.
//!
//! All types derive `serde` traits so any acquisition tool can hand the model
//! over as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used between namespace segments in qualified names
pub const NAMESPACE_DELIMITER: char = '\\';

/// Visibility of a class member
///
/// Ordered from the most restrictive to the most open, so a visibility filter
/// is a simple `>=` comparison. `Unknown` is reported by sources that cannot
/// tell; it never gets filtered out and renders without a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Protected,
    #[default]
    Public,
    Unknown,
}

impl Visibility {
    /// PlantUML marker for this visibility
    pub fn marker(self) -> &'static str {
        match self {
            Visibility::Public => "+",
            Visibility::Protected => "#",
            Visibility::Private => "-",
            Visibility::Unknown => "",
        }
    }

    /// Returns true if a member with this visibility passes a `minimum` filter
    pub fn passes(self, minimum: Visibility) -> bool {
        match self {
            Visibility::Unknown => true,
            _ => self >= minimum,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
            Visibility::Unknown => write!(f, "unknown"),
        }
    }
}

/// Runtime value of a constant or a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// An object instance, identified by its class name
    Object { class: String },
}

impl Value {
    /// Name of the runtime kind, as the source language reports it
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "double",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object { .. } => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Default value of an optional parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// Reference to a named constant, e.g. `self::LIMIT`
    Constant(String),
    /// A literal value
    Literal(Value),
    /// The source could not resolve the default to anything printable
    Unresolved,
}

/// A class constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring: Option<String>,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            declaring: None,
        }
    }

    pub fn declared_in(mut self, declaring: impl Into<String>) -> Self {
        self.declaring = Some(declaring.into());
        self
    }
}

/// A property (field) of a class
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub name: String,
    /// Qualified name of the declaration that declares this field
    pub declaring: String,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Type declared in the source language itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_type: Option<String>,
    /// Type taken from a documentation comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, declaring: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring: declaring.into(),
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.native_type = Some(type_name.into());
        self
    }

    pub fn with_doc_type(mut self, type_name: impl Into<String>) -> Self {
        self.doc_type = Some(type_name.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The best known type: native first, then the documented one
    pub fn type_name(&self) -> Option<&str> {
        self.native_type.as_deref().or(self.doc_type.as_deref())
    }
}

/// A parameter of an operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub by_reference: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn by_reference(mut self) -> Self {
        self.by_reference = true;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

/// Declared return type of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnType {
    pub name: String,
    #[serde(default)]
    pub nullable: bool,
}

/// A method of a declaration, or a free function of an extension
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    pub name: String,
    /// Declaring declaration; `None` for free functions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaring: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnType>,
}

impl Operation {
    /// A method bound to `declaring`
    pub fn method(name: impl Into<String>, declaring: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring: Some(declaring.into()),
            ..Self::default()
        }
    }

    /// A free function, as exposed by extensions
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returning(mut self, name: impl Into<String>, nullable: bool) -> Self {
        self.return_type = Some(ReturnType {
            name: name.into(),
            nullable,
        });
        self
    }

    pub fn is_class_bound(&self) -> bool {
        self.declaring.is_some()
    }
}

/// Kind of declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    #[default]
    Class,
    Interface,
    Extension,
}

/// A class, interface or extension with its members
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Declaration {
    /// Qualified name, namespace segments separated by `\`
    pub name: String,
    pub kind: DeclarationKind,
    pub is_abstract: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Declaration>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Declaration>,
    pub constants: Vec<Constant>,
    pub fields: Vec<Field>,
    pub operations: Vec<Operation>,
    /// Cluster this declaration is drawn in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Interface)
    }

    pub fn extension(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Extension)
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_parent(mut self, parent: Declaration) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn with_interface(mut self, interface: Declaration) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_constant(mut self, constant: Constant) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Last segment of the qualified name
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit(NAMESPACE_DELIMITER)
            .next()
            .unwrap_or(&self.name)
    }

    /// Stereotype tag rendered for this declaration
    pub fn stereotype(&self) -> &'static str {
        match self.kind {
            DeclarationKind::Class if self.is_abstract => "abstract",
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Extension => "extension",
        }
    }

    /// Look up a constant by name, inherited ones included
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name == name)
    }
}
