//! Naming convention utilities for generated items.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_pascal_case`] | `PascalCase` |
//! | `PascalCase` | [`to_snake_case`] | `pascal_case` |
//! | `word` | [`capitalize`] | `Word` |
//! | `get_name` / `is_active` | [`field_of_getter`] | `name` / `active` |
//! | `set_name` | [`field_of_setter`] | `Some("name")` |

/// Convert a string to PascalCase.
///
/// Handles snake_case, kebab-case, and already-capitalized input.
///
/// # Examples
///
/// ```
/// use blueprint_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("first_name"), "FirstName");
/// assert_eq!(to_pascal_case("first-name"), "FirstName");
/// assert_eq!(to_pascal_case("age"), "Age");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_']).map(capitalize).collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a PascalCase string to snake_case.
///
/// Runs of capitals stay together, so acronyms read naturally.
///
/// # Examples
///
/// ```
/// use blueprint_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("PersonSubclass"), "person_subclass");
/// assert_eq!(to_snake_case("HTTPRequest"), "http_request");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let previous = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let starts_word = match previous {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(_) => next.is_some_and(|n| n.is_lowercase()),
            };
            if starts_word {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Field name a getter reads: `get_` and `is_` prefixes are stripped.
pub fn field_of_getter(method: &str) -> &str {
    ["get_", "is_"]
        .iter()
        .find_map(|prefix| method.strip_prefix(prefix).filter(|rest| !rest.is_empty()))
        .unwrap_or(method)
}

/// Field name a setter writes, or `None` when the name lacks the `set_` prefix.
pub fn field_of_setter(method: &str) -> Option<&str> {
    method.strip_prefix("set_").filter(|rest| !rest.is_empty())
}
