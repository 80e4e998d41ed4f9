//! Raw DOM node structure consumed by the classifier.
//!
//! This is the input contract of the conversion engine: any parser can map
//! its output onto this structure. It carries exactly what classification
//! needs - a tag name, an attribute lookup, ordered children, text
//! extraction with an optional fragment separator, and HTML
//! re-serialization (used only for code-block content).

/// Node kinds the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    /// Root container produced by a parser (treated like an element with
    /// no tag of its own)
    Fragment,
}

/// A raw DOM node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type
    pub node_type: NodeType,

    /// Lowercase tag name for elements, `#text` for text nodes
    pub name: String,

    /// Text content for text nodes
    pub value: Option<String>,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Child nodes
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            name: tag_name.to_lowercase(),
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: &[(&str, &str)]) -> Self {
        let mut node = Self::element(tag_name);
        node.attributes = attrs
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_string()))
            .collect();
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            name: "#text".to_string(),
            value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a root fragment node
    pub fn fragment() -> Self {
        Self {
            node_type: NodeType::Fragment,
            name: "#fragment".to_string(),
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Chaining variant of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Tag name (lowercase)
    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value by name (absent-safe)
    pub fn attr(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.attributes
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whitespace-separated tokens of the `class` attribute
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|c| c == class)
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// First descendant element with the given tag, depth-first
    pub fn find_descendant(&self, tag: &str) -> Option<&Node> {
        for child in self.children() {
            if child.is_element() && child.tag_name() == tag {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(tag) {
                return Some(found);
            }
        }
        None
    }

    /// First descendant element with the given tag carrying the given class
    pub fn find_by_class(&self, tag: &str, class: &str) -> Option<&Node> {
        for child in self.children() {
            if child.is_element() && child.tag_name() == tag && child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.find_by_class(tag, class) {
                return Some(found);
            }
        }
        None
    }

    /// All text content from this node and its descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.value.clone().unwrap_or_default(),
            _ => {
                let mut out = String::new();
                for child in self.children() {
                    out.push_str(&child.text_content());
                }
                out
            }
        }
    }

    /// Trimmed, non-empty text fragments joined with a separator.
    ///
    /// Used for link text, where nested markup splits the text into
    /// fragments that need an explicit boundary marker.
    pub fn text_joined(&self, separator: &str) -> String {
        let mut fragments = Vec::new();
        self.collect_text_fragments(&mut fragments);
        fragments.join(separator)
    }

    fn collect_text_fragments(&self, out: &mut Vec<String>) {
        match self.node_type {
            NodeType::Text => {
                if let Some(value) = &self.value {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        out.push(trimmed.to_string());
                    }
                }
            }
            _ => {
                for child in self.children() {
                    child.collect_text_fragments(out);
                }
            }
        }
    }

    /// Re-serialize this node to HTML (used for code-block extraction)
    pub fn outer_html(&self) -> String {
        match self.node_type {
            NodeType::Text => self
                .value
                .as_deref()
                .map(escape_html_text)
                .unwrap_or_default(),
            NodeType::Element => {
                let tag = self.tag_name();
                let attrs = self.attributes_string();
                if self.is_void_element() {
                    if attrs.is_empty() {
                        format!("<{tag}>")
                    } else {
                        format!("<{tag} {attrs}>")
                    }
                } else {
                    let inner = self.inner_html();
                    if attrs.is_empty() {
                        format!("<{tag}>{inner}</{tag}>")
                    } else {
                        format!("<{tag} {attrs}>{inner}</{tag}>")
                    }
                }
            }
            NodeType::Fragment => self.inner_html(),
        }
    }

    /// Re-serialize the children to HTML
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            out.push_str(&child.outer_html());
        }
        out
    }

    fn attributes_string(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, escape_html_attr(value))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_void_element(&self) -> bool {
        const VOID_ELEMENTS: &[&str] = &[
            "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
            "source", "track", "wbr",
        ];
        VOID_ELEMENTS.contains(&self.tag_name())
    }
}

fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
