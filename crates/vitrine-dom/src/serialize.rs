//! HTML serialization

use crate::{DomTree, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape `&<>"'` for text and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a node and its subtree
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

/// Serialize the children of a node
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for child in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.data {
        NodeData::Document => {
            out.push_str("<!DOCTYPE html>");
            for child in tree.children(id) {
                write_node(tree, child, out);
            }
        }
        NodeData::Text(text) => out.push_str(&escape_html(text)),
        NodeData::Comment(text) => {
            out.push_str(&format!("<!--{text}-->"));
        }
        NodeData::Element(elem) => {
            out.push('<');
            out.push_str(&elem.tag);
            for attr in &elem.attrs {
                out.push_str(&format!(" {}=\"{}\"", attr.name, escape_html(&attr.value)));
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&elem.tag.as_str()) {
                return;
            }
            for child in tree.children(id) {
                write_node(tree, child, out);
            }
            out.push_str(&format!("</{}>", elem.tag));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_outer_html() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        tree.set_attribute(p, "class", "note").unwrap();
        let text = tree.create_text("1 < 2");
        tree.append_child(p, text).unwrap();
        let br = tree.create_element("br");
        tree.append_child(p, br).unwrap();

        assert_eq!(outer_html(&tree, p), r#"<p class="note">1 &lt; 2<br></p>"#);
    }
}
