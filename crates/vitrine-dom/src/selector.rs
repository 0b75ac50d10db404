//! Element queries
//!
//! Compound simple selectors (`tag`, `.class`, `#id`, `*` and combinations
//! like `article.card`). No combinators.

use crate::{DomTree, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

/// Parsed compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<SimpleSelector>,
}

impl Selector {
    /// Parse a selector string. Returns `None` for empty input or input
    /// containing combinators.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.contains(char::is_whitespace) {
            return None;
        }

        let mut parts = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            let (kind, body) = match rest.as_bytes()[0] {
                b'.' => ('.', &rest[1..]),
                b'#' => ('#', &rest[1..]),
                b'*' => {
                    parts.push(SimpleSelector::Universal);
                    rest = &rest[1..];
                    continue;
                }
                _ => (' ', rest),
            };
            let end = body.find(['.', '#', '*']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            parts.push(match kind {
                '.' => SimpleSelector::Class(name.to_string()),
                '#' => SimpleSelector::Id(name.to_string()),
                _ => SimpleSelector::Tag(name.to_ascii_lowercase()),
            });
            rest = &body[end..];
        }

        Some(Self { parts })
    }

    /// Check if an element matches every part of the selector
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(elem) = tree.get(id).and_then(|n| n.as_element()) else {
            return false;
        };
        self.parts.iter().all(|part| match part {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => elem.tag == *tag,
            SimpleSelector::Id(want) => elem.id() == Some(want.as_str()),
            SimpleSelector::Class(class) => elem.classes.contains(class),
        })
    }
}
