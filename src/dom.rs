//! Document access.
//!
//! The switcher only needs to find elements, read and write attributes, and
//! replace text, so that is all `Document` exposes. `StaticDocument` is an
//! in-memory element tree that implements it for the preview binary and for
//! tests; a browser binding would implement the same trait over the real DOM.

use std::collections::BTreeMap;

/// Opaque handle to an element owned by a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Capability interface over a DOM-like tree.
pub trait Document: Send + 'static {
    /// Element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Elements carrying attribute `name`, in document order.
    ///
    /// With `root` set, only strict descendants of `root` are returned.
    fn elements_with_attribute(&self, root: Option<NodeId>, name: &str) -> Vec<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn text(&self, node: NodeId) -> Option<String>;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Add `class` if absent, remove it if present. Returns whether the
    /// class is present afterwards.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let classes = self.attribute(node, "class").unwrap_or_default();
        let updated = if classes.trim().is_empty() {
            class.to_string()
        } else {
            format!("{} {}", classes.trim(), class)
        };
        self.set_attribute(node, "class", &updated);
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(classes) = self.attribute(node, "class") else {
            return;
        };
        let updated = classes
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &updated);
    }
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
}

/// In-memory element tree. Insertion order is document order.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    elements: Vec<Element>,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or at the top level).
    pub fn append(&mut self, parent: Option<NodeId>, tag: &str, text: &str) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            text: text.to_string(),
            parent,
        });
        id
    }

    /// Builder-style attribute setter for freshly appended elements.
    pub fn with_attribute(&mut self, node: NodeId, name: &str, value: &str) -> NodeId {
        self.set_attribute(node, name, value);
        node
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.elements.get(node.0).map(|e| e.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build a page honoring the switcher's DOM contract:
    /// a `#language-button`, a hidden `#language-menu` holding one
    /// `<a data-lang>` per language, and one `<span data-translate-key>` per
    /// `(key, initial_text)` entry.
    pub fn language_page(languages: &[&str], entries: &[(&str, &str)]) -> Self {
        let mut doc = Self::new();

        let button = doc.append(None, "button", "Language");
        doc.set_attribute(button, "id", "language-button");

        let menu = doc.append(None, "div", "");
        doc.set_attribute(menu, "id", "language-menu");
        doc.set_attribute(menu, "class", "hidden");
        for lang in languages {
            let link = doc.append(Some(menu), "a", lang);
            doc.set_attribute(link, "href", "#");
            doc.set_attribute(link, "data-lang", lang);
        }

        let main = doc.append(None, "main", "");
        for (key, text) in entries {
            let node = doc.append(Some(main), "span", text);
            doc.set_attribute(node, "data-translate-key", key);
        }

        doc
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.elements.get(node.0).and_then(|e| e.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.elements.get(parent.0).and_then(|e| e.parent);
        }
        false
    }
}

impl Document for StaticDocument {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|e| e.attributes.get("id").map(String::as_str) == Some(id))
            .map(NodeId)
    }

    fn elements_with_attribute(&self, root: Option<NodeId>, name: &str) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.attributes.contains_key(name))
            .map(|(index, _)| NodeId(index))
            .filter(|node| root.map_or(true, |r| self.is_descendant(*node, r)))
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.elements
            .get(node.0)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.elements.get(node.0).map(|e| e.text.clone())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.text = text.to_string();
        }
    }
}
