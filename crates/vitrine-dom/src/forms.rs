//! Form controls
//!
//! Value collection and reset for `<form>` subtrees. An `<input>`'s current
//! value is its `value` attribute, a `<textarea>`'s is its text content, and
//! a `<select>`'s is the selected (or first) `<option>`.

use crate::{DomResult, DomTree, NodeId};

/// HTML input types the form helpers distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Checkbox,
    Radio,
    Hidden,
    Submit,
    Reset,
    Button,
    Image,
}

impl InputType {
    /// Parse the `type` attribute; unknown types behave as text
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "hidden" => Self::Hidden,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "button" => Self::Button,
            "image" => Self::Image,
            _ => Self::Text,
        }
    }

    /// Check if this is a button type
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Submit | Self::Reset | Self::Button | Self::Image)
    }

    /// Check if this is a checkable type
    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

/// Form data for submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the named, submittable controls under `form`
    pub fn collect(tree: &DomTree, form: NodeId) -> Self {
        let mut data = Self::new();
        for control in form_controls(tree, form) {
            let Some(name) = tree.get_attribute(control, "name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if tree.tag_name(control) == Some("input") {
                let kind = input_type(tree, control);
                if kind.is_button() {
                    continue;
                }
                if kind.is_checkable() && tree.get_attribute(control, "checked").is_none() {
                    continue;
                }
            }
            data.append(name, control_value(tree, control));
        }
        data
    }

    /// Append a text value
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Get the first value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn input_type(tree: &DomTree, input: NodeId) -> InputType {
    tree.get_attribute(input, "type")
        .map(InputType::parse)
        .unwrap_or_default()
}

/// `input`, `textarea` and `select` elements under `form`
pub fn form_controls(tree: &DomTree, form: NodeId) -> Vec<NodeId> {
    tree.descendants(form)
        .into_iter()
        .filter(|&n| matches!(tree.tag_name(n), Some("input" | "textarea" | "select")))
        .collect()
}

/// Current value of a form control
pub fn control_value(tree: &DomTree, control: NodeId) -> String {
    match tree.tag_name(control) {
        Some("textarea") => tree.text_content(control),
        Some("select") => {
            let options: Vec<NodeId> = tree
                .descendants(control)
                .into_iter()
                .filter(|&n| tree.tag_name(n) == Some("option"))
                .collect();
            options
                .iter()
                .copied()
                .find(|&o| tree.get_attribute(o, "selected").is_some())
                .or_else(|| options.first().copied())
                .map(|o| {
                    tree.get_attribute(o, "value")
                        .map(str::to_string)
                        .unwrap_or_else(|| tree.text_content(o))
                })
                .unwrap_or_default()
        }
        _ => match tree.get_attribute(control, "value") {
            Some(value) => value.to_string(),
            None if input_type(tree, control).is_checkable() => "on".to_string(),
            None => String::new(),
        },
    }
}

/// Empty every field under `form`. Buttons and hidden inputs keep their
/// values. Returns how many controls were touched.
pub fn reset_form(tree: &mut DomTree, form: NodeId) -> DomResult<usize> {
    let mut touched = 0;
    for control in form_controls(tree, form) {
        let tag = tree.tag_name(control).map(str::to_string);
        match tag.as_deref() {
            Some("textarea") => tree.set_text_content(control, "")?,
            Some("select") => {
                let options: Vec<NodeId> = tree
                    .descendants(control)
                    .into_iter()
                    .filter(|&n| tree.tag_name(n) == Some("option"))
                    .collect();
                for option in options {
                    tree.remove_attribute(option, "selected")?;
                }
            }
            _ => {
                let kind = input_type(tree, control);
                if kind.is_button() || kind == InputType::Hidden {
                    continue;
                }
                if kind.is_checkable() {
                    tree.remove_attribute(control, "checked")?;
                } else {
                    tree.set_attribute(control, "value", "")?;
                }
            }
        }
        touched += 1;
    }
    Ok(touched)
}
