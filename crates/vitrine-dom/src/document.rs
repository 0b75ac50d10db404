//! Document - High-level document API

use crate::{DomTree, Node, NodeId, Selector};

/// HTML Document
#[derive(Debug, Default)]
pub struct Document {
    tree: DomTree,
    url: String,
}

impl Document {
    /// Create a document with an `html > head + body` skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.link_last(NodeId::ROOT, html);
        tree.link_last(html, head);
        tree.link_last(html, body);

        Self {
            tree,
            url: url.to_string(),
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// First `<body>` element
    pub fn body(&self) -> Option<NodeId> {
        self.query_selector(NodeId::ROOT, "body")
    }

    /// Text of the first `<title>` element
    pub fn title(&self) -> String {
        self.query_selector(NodeId::ROOT, "title")
            .map(|t| self.tree.text_content(t).trim().to_string())
            .unwrap_or_default()
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(NodeId::ROOT)
            .into_iter()
            .find(|&n| {
                self.tree
                    .get(n)
                    .and_then(Node::as_element)
                    .is_some_and(|e| e.id() == Some(id))
            })
    }

    /// Elements under `root` carrying `class`, in document order
    pub fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| self.tree.has_class(n, class))
            .collect()
    }

    /// First element under `root` matching `selector`
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        self.tree
            .descendants(root)
            .into_iter()
            .find(|&n| selector.matches(&self.tree, n))
    }

    /// Every element under `root` matching `selector`
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| selector.matches(&self.tree, n))
            .collect()
    }
}
