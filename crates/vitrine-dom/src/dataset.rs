//! DOMStringMap (dataset)
//!
//! Maps camelCase dataset keys to `data-*` attribute names and back.

/// Convert a camelCase key to its `data-*` attribute name
pub fn attribute_name(key: &str) -> String {
    format!("data-{}", to_kebab_case(key))
}

/// Convert a `data-*` attribute name to its camelCase key
pub fn key_from_attribute(name: &str) -> Option<String> {
    name.strip_prefix("data-").map(to_camel_case)
}

/// Convert kebab-case to camelCase
fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase to kebab-case
fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
