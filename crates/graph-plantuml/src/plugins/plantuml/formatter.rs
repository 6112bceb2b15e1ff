//! PlantUML label formatter
//!
//! Turns a declaration's constants, fields and operations into the member
//! lines of a PlantUML class body.

use tracing::{debug, span, trace, Level};

use crate::core::{
    escape, escape_type, Constant, Declaration, DefaultValue, Field, Formatter, FormatterOptions,
    Operation, Parameter, Value,
};

/// Rendered in place of a default value that cannot be printed
pub const UNKNOWN_DEFAULT: &str = "«unknown»";

/// Stereotype spot shown next to extension names
const EXTENSION_STEREOTYPE: &str = "<<(E,#FF7700) Extension >>";

/// Divider between fields and operations
const DIVIDER: &str = "--";

/// PlantUML formatter for class, interface and extension labels
#[derive(Debug, Clone, Default)]
pub struct DefaultFormatter {
    options: FormatterOptions,
}

impl DefaultFormatter {
    pub fn new(options: FormatterOptions) -> Self {
        Self { options }
    }

    /// Constants block, one indented line per constant, each line terminated
    pub fn format_constants(&self, declaration: &Declaration) -> String {
        if !self.options.show_constants {
            return String::new();
        }

        let indent = self.options.member_indent();
        let eol = &self.options.line_terminator;
        let parent = declaration.parent.as_deref();
        let mut label = String::new();

        for constant in &declaration.constants {
            if self.options.only_self && inherited_unchanged(constant, &declaration.name, parent) {
                trace!(constant = %constant.name, "Skipping constant inherited unchanged");
                continue;
            }

            label.push_str(&indent);
            label.push_str("+{static} ");
            label.push_str(&escape(&constant.name));
            label.push_str(" : ");
            label.push_str(&escape(type_of(&constant.value)));
            label.push_str(" = ");
            label.push_str(&cast(&constant.value, "\""));
            label.push_str(" {readOnly}");
            label.push_str(eol);
        }

        label
    }

    /// Fields block, entries joined by a line break and the member indent
    ///
    /// The first entry is not indented; [`Formatter::format_class_label`]
    /// adds that indentation.
    pub fn format_properties(&self, declaration: &Declaration) -> String {
        if !self.options.show_properties || declaration.fields.is_empty() {
            return String::new();
        }

        let fields: Vec<String> = declaration
            .fields
            .iter()
            .filter(|field| self.field_is_shown(field, &declaration.name))
            .map(|field| self.format_field(field))
            .collect();

        self.join_members(&fields)
    }

    fn field_is_shown(&self, field: &Field, owning: &str) -> bool {
        if self.options.only_self && field.declaring != owning {
            trace!(field = %field.name, declaring = %field.declaring, "Skipping inherited field");
            return false;
        }
        if !field.visibility.passes(self.options.min_visibility) {
            trace!(field = %field.name, visibility = %field.visibility, "Skipping hidden field");
            return false;
        }
        true
    }

    fn format_field(&self, field: &Field) -> String {
        let mut label = String::from(field.visibility.marker());
        if field.is_static {
            label.push_str("{static} ");
        }
        label.push_str(&escape(&field.name));

        if let Some(type_name) = field.type_name() {
            label.push_str(" : ");
            label.push_str(&escape_type(type_name, &self.options.namespace_separator));
        }

        // null defaults are not shown
        if let Some(default) = field.default.as_ref().filter(|v| !v.is_null()) {
            label.push_str(" = ");
            label.push_str(&cast(default, "\""));
        }

        label
    }

    fn operation_is_shown(&self, operation: &Operation, owning: &str) -> bool {
        if let (true, Some(declaring)) = (self.options.only_self, operation.declaring.as_deref()) {
            if declaring != owning {
                trace!(operation = %operation.name, declaring, "Skipping inherited operation");
                return false;
            }
        }
        if !operation.visibility.passes(self.options.min_visibility) {
            trace!(operation = %operation.name, visibility = %operation.visibility, "Skipping hidden operation");
            return false;
        }
        true
    }

    fn format_operation(&self, operation: &Operation, owned: bool) -> String {
        let mut label = String::new();

        if owned && operation.is_class_bound() {
            label.push_str(operation.visibility.marker());
            if operation.is_abstract {
                label.push_str("{abstract}");
            }
            if operation.is_static {
                label.push_str("{static}");
            }
        } else {
            // free functions have no visibility of their own
            label.push('+');
        }

        label.push_str(&escape(&operation.name));
        label.push('(');
        let parameters: Vec<String> = operation
            .parameters
            .iter()
            .map(|parameter| self.format_parameter(parameter))
            .collect();
        label.push_str(&parameters.join(", "));
        label.push(')');

        if let Some(return_type) = &operation.return_type {
            label.push_str(" : ");
            if return_type.nullable {
                label.push('?');
            }
            label.push_str(&escape_type(
                &return_type.name,
                &self.options.namespace_separator,
            ));
        }

        label
    }

    fn format_parameter(&self, parameter: &Parameter) -> String {
        let mut label = String::new();
        if parameter.by_reference {
            label.push_str("inout ");
        }
        label.push_str(&escape(&parameter.name));

        if let Some(type_name) = &parameter.type_name {
            label.push_str(" : ");
            label.push_str(&escape_type(type_name, &self.options.namespace_separator));
        }

        if let Some(default) = &parameter.default {
            label.push_str(" = ");
            match default {
                DefaultValue::Constant(name) => {
                    label.push_str(&escape(&name.replace("self::", "").replace("static::", "")))
                }
                DefaultValue::Literal(value) => label.push_str(&cast(value, "\"")),
                DefaultValue::Unresolved => {
                    debug!(parameter = %parameter.name, "Default value could not be resolved");
                    label.push_str(UNKNOWN_DEFAULT);
                }
            }
        }

        label
    }

    fn join_members(&self, members: &[String]) -> String {
        let separator = format!(
            "{}{}",
            self.options.line_terminator,
            self.options.member_indent()
        );
        members.join(&separator)
    }
}

impl Formatter for DefaultFormatter {
    fn format_extension_label(&self, extension: &Declaration) -> String {
        format!(
            "{} {}{}{}",
            escape(&extension.name),
            EXTENSION_STEREOTYPE,
            self.options.line_terminator,
            self.format_extension_members(extension)
        )
    }

    fn format_extension_members(&self, extension: &Declaration) -> String {
        let extension_span = span!(Level::DEBUG, "format_extension_members", extension = %extension.name);
        let _enter = extension_span.enter();

        let mut label = self.format_constants(extension);
        let operations = self.format_operations(&extension.operations, None);
        if !operations.is_empty() {
            label.push_str(&self.options.member_indent());
            label.push_str(&operations);
            label.push_str(&self.options.line_terminator);
        }

        debug!(
            constants = extension.constants.len(),
            functions = extension.operations.len(),
            "Formatted extension members"
        );
        label
    }

    fn format_class_label(&self, declaration: &Declaration) -> String {
        let class_span = span!(Level::DEBUG, "format_class_label", class = %declaration.name);
        let _enter = class_span.enter();

        let constants = self.format_constants(declaration);
        let fields = self.format_properties(declaration);
        let operations = self.format_operations(&declaration.operations, Some(declaration.name.as_str()));

        let indent = self.options.member_indent();
        let eol = &self.options.line_terminator;

        let mut label = String::new();
        if !constants.is_empty() {
            label.push_str(&constants);
            label.push_str(eol);
        }
        if !fields.is_empty() {
            label.push_str(&indent);
            label.push_str(&fields);
            label.push_str(eol);
        }
        label.push_str(&indent);
        label.push_str(DIVIDER);
        label.push_str(eol);
        if !operations.is_empty() {
            label.push_str(&indent);
            label.push_str(&operations);
            label.push_str(eol);
        }

        debug!(
            constants = declaration.constants.len(),
            fields = declaration.fields.len(),
            operations = declaration.operations.len(),
            "Formatted class label"
        );
        label
    }

    fn format_operations(&self, operations: &[Operation], owning: Option<&str>) -> String {
        if owning.is_some() && !self.options.show_methods {
            return String::new();
        }

        // without an owner every operation is a public free function
        let labels: Vec<String> = operations
            .iter()
            .filter(|operation| match owning {
                Some(owning) if operation.is_class_bound() => {
                    self.operation_is_shown(operation, owning)
                }
                _ => true,
            })
            .map(|operation| self.format_operation(operation, owning.is_some()))
            .collect();

        self.join_members(&labels)
    }

    fn format(&self) -> &'static str {
        "plantuml"
    }

    fn options(&self) -> &FormatterOptions {
        &self.options
    }
}

/// True when the parent declares a constant of the same name and value
///
/// A constant the declaration itself declares is never considered inherited.
fn inherited_unchanged(constant: &Constant, owning: &str, parent: Option<&Declaration>) -> bool {
    if constant.declaring.as_deref() == Some(owning) {
        return false;
    }
    parent
        .and_then(|parent| parent.constant(&constant.name))
        .is_some_and(|inherited| inherited.value == constant.value)
}

/// Notation type name for a runtime value
fn type_of(value: &Value) -> &'static str {
    match value.kind() {
        "integer" => "int",
        "boolean" => "bool",
        "double" => "float",
        "array" => "array",
        kind => kind,
    }
}

/// Printable form of a value; strings are wrapped in `quote`
fn cast(value: &Value, quote: &str) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => {
            let quoted = if quote.is_empty() {
                s.clone()
            } else {
                s.replace(quote, &format!("\\{}", quote))
            };
            format!("{}{}{}", quote, escape(&quoted), quote)
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(|item| cast(item, quote)).collect();
            format!("array ({})", items.join(", "))
        }
        Value::Object { .. } => "\"?\"".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Visibility;

    fn formatter() -> DefaultFormatter {
        DefaultFormatter::new(FormatterOptions::default())
    }

    fn formatter_with(options: FormatterOptions) -> DefaultFormatter {
        DefaultFormatter::new(options)
    }

    #[test]
    fn test_type_of() {
        assert_eq!(type_of(&Value::from(1)), "int");
        assert_eq!(type_of(&Value::from(true)), "bool");
        assert_eq!(type_of(&Value::from(0.5)), "float");
        assert_eq!(type_of(&Value::from(vec!["a"])), "array");
        assert_eq!(type_of(&Value::from("s")), "string");
        assert_eq!(type_of(&Value::Null), "NULL");
    }

    #[test]
    fn test_cast() {
        assert_eq!(cast(&Value::Null, "\""), "null");
        assert_eq!(cast(&Value::from(false), "\""), "false");
        assert_eq!(cast(&Value::from(42), "\""), "42");
        assert_eq!(cast(&Value::from(2.5), "\""), "2.5");
        assert_eq!(cast(&Value::from("hi"), "\""), "\"hi\"");
        assert_eq!(cast(&Value::from("say \"hi\""), "\""), "\"say \\\"hi\\\"\"");
        assert_eq!(cast(&Value::from(vec![1i64, 2]), "\""), "array (1, 2)");
        assert_eq!(cast(&Value::Array(vec![]), "\""), "array ()");
        assert_eq!(
            cast(
                &Value::Object {
                    class: "DateTime".to_string()
                },
                "\""
            ),
            "\"?\""
        );
    }

    #[test]
    fn test_constants_block() {
        let declaration = Declaration::class("Config")
            .with_constant(Constant::new("VERSION", "1.0"))
            .with_constant(Constant::new("LIMIT", 10));

        let label = formatter().format_constants(&declaration);
        assert_eq!(
            label,
            "    +{static} VERSION : string = \"1.0\" {readOnly}\n    +{static} LIMIT : int = 10 {readOnly}\n"
        );
    }

    #[test]
    fn test_constants_hidden() {
        let declaration = Declaration::class("Config").with_constant(Constant::new("A", 1));
        let label =
            formatter_with(FormatterOptions::default().with_constants(false)).format_constants(&declaration);
        assert!(label.is_empty());
    }

    #[test]
    fn test_constants_only_self_suppresses_unchanged() {
        let parent = Declaration::class("Base")
            .with_constant(Constant::new("SAME", 1))
            .with_constant(Constant::new("CHANGED", 1));
        let child = Declaration::class("Child")
            .with_parent(parent)
            .with_constant(Constant::new("SAME", 1))
            .with_constant(Constant::new("CHANGED", 2))
            .with_constant(Constant::new("OWN", 3));

        let label = formatter_with(FormatterOptions::default().with_only_self(true))
            .format_constants(&child);
        assert!(!label.contains("SAME"));
        assert!(label.contains("+{static} CHANGED : int = 2 {readOnly}"));
        assert!(label.contains("+{static} OWN : int = 3 {readOnly}"));

        // without only_self everything stays
        let label = formatter().format_constants(&child);
        assert!(label.contains("SAME"));
    }

    #[test]
    fn test_constant_object_value_does_not_fail() {
        let declaration = Declaration::class("Clock").with_constant(Constant::new(
            "EPOCH",
            Value::Object {
                class: "DateTimeImmutable".to_string(),
            },
        ));
        let label = formatter().format_constants(&declaration);
        assert!(label.contains("+{static} EPOCH : object = \"?\" {readOnly}"));
    }

    #[test]
    fn test_properties() {
        let declaration = Declaration::class("Counter")
            .with_field(
                Field::new("count", "Counter")
                    .with_static(true)
                    .with_type("int")
                    .with_default(5),
            )
            .with_field(
                Field::new("owner", "Counter")
                    .with_visibility(Visibility::Protected)
                    .with_doc_type("App\\User"),
            )
            .with_field(
                Field::new("cache", "Counter")
                    .with_visibility(Visibility::Private)
                    .with_default(Value::Null),
            );

        let label = formatter().format_properties(&declaration);
        assert_eq!(
            label,
            "+{static} count : int = 5\n    #owner : App.User\n    -cache"
        );
    }

    #[test]
    fn test_properties_filters() {
        let declaration = Declaration::class("Child")
            .with_field(Field::new("own", "Child"))
            .with_field(Field::new("inherited", "Base"))
            .with_field(Field::new("secret", "Child").with_visibility(Visibility::Private));

        let only_self = formatter_with(FormatterOptions::default().with_only_self(true))
            .format_properties(&declaration);
        assert!(only_self.contains("own"));
        assert!(!only_self.contains("inherited"));
        assert!(only_self.contains("secret"));

        let public_only =
            formatter_with(FormatterOptions::default().with_min_visibility(Visibility::Public))
                .format_properties(&declaration);
        assert!(public_only.contains("inherited"));
        assert!(!public_only.contains("secret"));
    }

    #[test]
    fn test_properties_all_filtered_is_empty() {
        let declaration = Declaration::class("Child").with_field(Field::new("inherited", "Base"));
        let label = formatter_with(FormatterOptions::default().with_only_self(true))
            .format_properties(&declaration);
        assert_eq!(label, "");
    }

    #[test]
    fn test_operation_markers() {
        let operations = vec![
            Operation::method("build", "Factory")
                .with_static(true)
                .returning("App\\Model\\Car", false),
            Operation::method("assemble", "Factory")
                .with_visibility(Visibility::Protected)
                .with_abstract(true),
        ];

        let label = formatter().format_operations(&operations, Some("Factory"));
        assert_eq!(
            label,
            "+{static}build() : App.Model.Car\n    #{abstract}assemble()"
        );
    }

    #[test]
    fn test_operation_parameters() {
        let operation = Operation::method("find", "Repo")
            .with_parameter(Parameter::new("id").with_type("int"))
            .with_parameter(Parameter::new("result").by_reference())
            .with_parameter(
                Parameter::new("limit")
                    .with_type("int")
                    .with_default(DefaultValue::Constant("self::LIMIT".to_string())),
            )
            .with_parameter(
                Parameter::new("mode").with_default(DefaultValue::Literal(Value::from("fast"))),
            )
            .with_parameter(Parameter::new("hint").with_default(DefaultValue::Unresolved))
            .returning("Entity", true);

        let label = formatter().format_operations(&[operation], Some("Repo"));
        assert_eq!(
            label,
            "+find(id : int, inout result, limit : int = LIMIT, mode = \"fast\", hint = «unknown») : ?Entity"
        );
    }

    #[test]
    fn test_free_functions_are_public() {
        let operations = vec![Operation::function("json_encode")
            .with_visibility(Visibility::Private)
            .with_parameter(Parameter::new("value"))];

        let label = formatter_with(FormatterOptions::default().with_min_visibility(Visibility::Public))
            .format_operations(&operations, None);
        assert_eq!(label, "+json_encode(value)");
    }

    #[test]
    fn test_operations_hidden_for_classes_only() {
        let options = FormatterOptions::default().with_methods(false);
        let methods = vec![Operation::method("run", "Job")];
        let functions = vec![Operation::function("strlen")];

        let formatter = formatter_with(options);
        assert_eq!(formatter.format_operations(&methods, Some("Job")), "");
        assert_eq!(formatter.format_operations(&functions, None), "+strlen()");
    }

    #[test]
    fn test_operations_only_self() {
        let operations = vec![
            Operation::method("own", "Child"),
            Operation::method("inherited", "Base"),
        ];
        let label = formatter_with(FormatterOptions::default().with_only_self(true))
            .format_operations(&operations, Some("Child"));
        assert_eq!(label, "+own()");
    }

    #[test]
    fn test_class_label_empty() {
        let label = formatter().format_class_label(&Declaration::class("Empty"));
        assert_eq!(label, "    --\n");
    }

    #[test]
    fn test_class_label_layout() {
        let declaration = Declaration::class("Shop")
            .with_constant(Constant::new("OPEN", true))
            .with_field(Field::new("name", "Shop").with_type("string"))
            .with_operation(Operation::method("sell", "Shop").returning("bool", false));

        let label = formatter().format_class_label(&declaration);
        assert_eq!(
            label,
            "    +{static} OPEN : bool = true {readOnly}\n\n    +name : string\n    --\n    +sell() : bool\n"
        );
    }

    #[test]
    fn test_class_label_custom_indent_and_eol() {
        let options = FormatterOptions::default()
            .with_indent("\t")
            .with_line_terminator("\r\n");
        let declaration = Declaration::class("A").with_field(Field::new("x", "A"));

        let label = formatter_with(options).format_class_label(&declaration);
        assert_eq!(label, "\t\t+x\r\n\t\t--\r\n");
    }

    #[test]
    fn test_extension_label() {
        let extension = Declaration::extension("json")
            .with_constant(Constant::new("JSON_ERROR_NONE", 0))
            .with_field(Field::new("ignored", "json"))
            .with_operation(
                Operation::function("json_decode")
                    .with_parameter(Parameter::new("json").with_type("string"))
                    .returning("mixed", false),
            );

        let label = formatter().format_extension_label(&extension);
        assert_eq!(
            label,
            "json <<(E,#FF7700) Extension >>\n    +{static} JSON_ERROR_NONE : int = 0 {readOnly}\n    +json_decode(json : string) : mixed\n"
        );
        assert!(!label.contains("ignored"));
    }

    #[test]
    fn test_extension_operations_ignore_visibility() {
        let options = FormatterOptions::default()
            .with_min_visibility(Visibility::Public)
            .with_only_self(true);
        let operations = vec![Operation::method("connect", "Driver")
            .with_visibility(Visibility::Private)
            .with_static(true)
            .with_abstract(true)];

        let label = formatter_with(options).format_operations(&operations, None);
        assert_eq!(label, "+connect()");
    }

    #[test]
    fn test_extension_members() {
        let extension = Declaration::extension("json")
            .with_field(Field::new("leaked", "json"))
            .with_operation(Operation::function("json_encode"));

        let formatter = formatter_with(FormatterOptions::default().with_methods(false));
        assert_eq!(formatter.format_extension_members(&extension), "    +json_encode()\n");
        assert_eq!(
            formatter.format_extension_label(&extension),
            "json <<(E,#FF7700) Extension >>\n    +json_encode()\n"
        );
    }

    #[test]
    fn test_constants_only_self_keeps_redeclared() {
        let parent = Declaration::class("Base").with_constant(Constant::new("LIMIT", 10));
        let child = Declaration::class("Child")
            .with_parent(parent)
            .with_constant(Constant::new("LIMIT", 10).declared_in("Child"));

        let label = formatter_with(FormatterOptions::default().with_only_self(true))
            .format_constants(&child);
        assert_eq!(label, "    +{static} LIMIT : int = 10 {readOnly}\n");
    }

    #[test]
    fn test_return_type_namespace_separator() {
        let options = FormatterOptions::default().with_namespace_separator("::");
        let operation = Operation::method("user", "Repo").returning("App\\User", true);
        let label = formatter_with(options).format_operations(&[operation], Some("Repo"));
        assert_eq!(label, "+user() : ?App::User");
    }

    #[test]
    fn test_label_key() {
        assert_eq!(formatter().label_key(), "label_plantuml");
    }
}
