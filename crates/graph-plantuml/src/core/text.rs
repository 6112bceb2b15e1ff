//! Text helpers shared by formatters and generators

use super::metadata::NAMESPACE_DELIMITER;

/// Neutralize characters that would break a single notation line
///
/// Line breaks become the literal `\n` PlantUML understands inside a member
/// line, tabs become spaces and other control characters are dropped.
///
/// # Example
/// ```
/// use graph_plantuml::core::escape;
///
/// assert_eq!(escape("first\nsecond"), "first\\nsecond");
/// ```
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                escaped.push_str("\\n");
            }
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push(' '),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }

    escaped
}

/// Replace every namespace delimiter with `separator`
///
/// # Example
/// ```
/// use graph_plantuml::core::replace_namespace_separator;
///
/// assert_eq!(replace_namespace_separator("App\\Model", "."), "App.Model");
/// ```
pub fn replace_namespace_separator(name: &str, separator: &str) -> String {
    name.replace(NAMESPACE_DELIMITER, separator)
}

/// Render a type name: namespace substitution followed by escaping
pub fn escape_type(type_name: &str, separator: &str) -> String {
    escape(&replace_namespace_separator(type_name, separator))
}
