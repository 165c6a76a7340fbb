//! Document interface used by the translation manager.
//!
//! The manager only needs a handful of DOM operations: find elements by
//! marker attribute or id, read and write text, markup and attributes, and
//! rebuild a list. [`Document`] captures exactly that, and [`MemoryDocument`]
//! is an in-memory element tree implementing it.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Handle to an element inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Minimal DOM surface.
pub trait Document {
    /// The root (`<html>`) element.
    fn document_element(&self) -> NodeId;

    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Attached elements carrying attribute `name`, in document order.
    fn query_by_attribute(&self, name: &str) -> Vec<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn text_content(&self, node: NodeId) -> String;

    /// Replace all children with a single text node.
    fn set_text_content(&mut self, node: NodeId, text: &str);

    fn inner_html(&self, node: NodeId) -> String;

    /// Replace all children with trusted markup.
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// Create a `tag` element and append it as the last child of `parent`.
    fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Current `lang` attribute on the root element.
    fn document_language(&self) -> Option<String> {
        self.attribute(self.document_element(), "lang")
    }

    fn set_document_language(&mut self, code: &str) {
        let root = self.document_element();
        self.set_attribute(root, "lang", code);
    }

    fn clear_children(&mut self, node: NodeId) {
        self.set_text_content(node, "");
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .map(|value| value.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let value = match self.attribute(node, "class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &value);
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(existing) = self.attribute(node, "class") else {
            return;
        };
        let value = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &value);
    }

    /// Toggle `class`; returns whether it is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// `node` itself or its nearest ancestor carrying attribute `name`.
    fn closest_with_attribute(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.attribute(id, name).is_some() {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

// ==================== In-memory Document ====================

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    /// Text of this element when it has no children
    text: String,
    /// Raw markup set through `set_inner_html`
    markup: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            text: String::new(),
            markup: None,
            parent,
            children: Vec::new(),
        }
    }
}

/// Arena-backed element tree.
///
/// Markup assigned with `set_inner_html` is stored verbatim and not parsed
/// into child elements; its text content is the markup with tags stripped.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    body: NodeId,
}

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn strip_tags(html: &str) -> String {
    let regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
    regex.replace_all(html, "").into_owned()
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

impl MemoryDocument {
    /// An empty `<html><body></body></html>` document.
    pub fn new() -> Self {
        let mut nodes = vec![Element::new("html", None)];
        let body = NodeId(1);
        nodes.push(Element::new("body", Some(NodeId(0))));
        nodes[0].children.push(body);
        Self { nodes, body }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append a child with attributes and text in one call.
    pub fn append_with(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let node = self.append_element(parent, tag);
        for (name, value) in attributes {
            self.set_attribute(node, name, value);
        }
        if !text.is_empty() {
            self.set_text_content(node, text);
        }
        node
    }

    pub fn tag_name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    /// Serialize an element and its subtree.
    pub fn outer_html(&self, node: NodeId) -> String {
        let element = &self.nodes[node.0];
        let attributes: String = element
            .attributes
            .iter()
            .map(|(name, value)| format!(" {}=\"{}\"", name, escape_attribute(value)))
            .collect();
        format!(
            "<{tag}{attributes}>{inner}</{tag}>",
            tag = element.tag,
            attributes = attributes,
            inner = self.inner_html(node)
        )
    }

    fn attached(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.document_element()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    fn detach_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn document_element(&self) -> NodeId {
        NodeId(0)
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.attached()
            .into_iter()
            .find(|node| self.nodes[node.0].attributes.get("id").map(String::as_str) == Some(id))
    }

    fn query_by_attribute(&self, name: &str) -> Vec<NodeId> {
        self.attached()
            .into_iter()
            .filter(|node| self.nodes[node.0].attributes.contains_key(name))
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn text_content(&self, node: NodeId) -> String {
        let element = &self.nodes[node.0];
        if let Some(markup) = &element.markup {
            return strip_tags(markup);
        }
        if element.children.is_empty() {
            return element.text.clone();
        }
        element
            .children
            .iter()
            .map(|child| self.text_content(*child))
            .collect()
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.detach_children(node);
        let element = &mut self.nodes[node.0];
        element.text = text.to_string();
        element.markup = None;
    }

    fn inner_html(&self, node: NodeId) -> String {
        let element = &self.nodes[node.0];
        if let Some(markup) = &element.markup {
            return markup.clone();
        }
        if element.children.is_empty() {
            return escape_text(&element.text);
        }
        element
            .children
            .iter()
            .map(|child| self.outer_html(*child))
            .collect()
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.detach_children(node);
        let element = &mut self.nodes[node.0];
        element.text.clear();
        element.markup = Some(html.to_string());
    }

    fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag, Some(parent)));

        let parent_element = &mut self.nodes[parent.0];
        parent_element.text.clear();
        parent_element.markup = None;
        parent_element.children.push(id);
        id
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }
}
