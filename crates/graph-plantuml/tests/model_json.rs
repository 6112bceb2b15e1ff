//! Loading declaration models from JSON

use graph_plantuml::prelude::*;

const MODEL: &str = r#"{
    "name": "App\\Repository\\UserRepository",
    "parent": {
        "name": "App\\Repository\\Repository",
        "is_abstract": true,
        "constants": [{ "name": "PAGE_SIZE", "value": 20 }]
    },
    "interfaces": [{ "name": "Countable", "kind": "interface" }],
    "constants": [
        { "name": "PAGE_SIZE", "value": 20 },
        { "name": "TABLE", "value": "users" }
    ],
    "fields": [
        { "name": "connection", "declaring": "App\\Repository\\UserRepository",
          "visibility": "private", "native_type": "Doctrine\\DBAL\\Connection" }
    ],
    "operations": [
        { "name": "find", "declaring": "App\\Repository\\UserRepository",
          "parameters": [
              { "name": "id", "type_name": "int" },
              { "name": "limit", "default": { "constant": "self::PAGE_SIZE" } },
              { "name": "flags", "default": { "literal": [1, 2] } },
              { "name": "hint", "default": "unresolved" }
          ],
          "return_type": { "name": "App\\Entity\\User", "nullable": true } }
    ],
    "group": "Repositories"
}"#;

#[test]
fn test_deserialize_declaration() {
    let declaration: Declaration = serde_json::from_str(MODEL).unwrap();
    assert_eq!(declaration.short_name(), "UserRepository");
    assert_eq!(declaration.kind, DeclarationKind::Class);
    assert_eq!(declaration.interfaces[0].kind, DeclarationKind::Interface);
    assert_eq!(declaration.constants[0].value, Value::Int(20));
    assert_eq!(declaration.fields[0].visibility, Visibility::Private);
    assert_eq!(
        declaration.operations[0].parameters[1].default,
        Some(DefaultValue::Constant("self::PAGE_SIZE".to_string()))
    );
    assert_eq!(
        declaration.operations[0].parameters[3].default,
        Some(DefaultValue::Unresolved)
    );
}

#[test]
fn test_deserialized_model_formats() {
    let declaration: Declaration = serde_json::from_str(MODEL).unwrap();
    let formatter = DefaultFormatter::new(FormatterOptions::default().with_only_self(true));
    let label = formatter.format_class_label(&declaration);

    assert!(!label.contains("PAGE_SIZE : int"));
    assert!(label.contains("+{static} TABLE : string = \"users\" {readOnly}"));
    assert!(label.contains("-connection : Doctrine.DBAL.Connection"));
    assert!(label.contains(
        "+find(id : int, limit = PAGE_SIZE, flags = array (1, 2), hint = «unknown») : ?App.Entity.User"
    ));
}

#[test]
fn test_serialize_round_trip_keeps_model() {
    let declaration: Declaration = serde_json::from_str(MODEL).unwrap();
    let json = serde_json::to_string(&declaration).unwrap();
    let reloaded: Declaration = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, declaration);
}
