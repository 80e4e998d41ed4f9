//! Semantic article tree.
//!
//! This module defines the fixed set of content variants the converter
//! recognizes. The tree is built once per document by the classifier in the
//! `zhidown` crate and rendered once by [`crate::render`].

/// Sub-kind of a font-styled span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// Heading level 1-6
    Heading(u8),
    /// Underlined text (marker carried by the enclosing container)
    Underline,
    /// List item (marker carried by the enclosing list)
    ListItem,
    /// Bold text (`em`, `strong`, `b`)
    Strong,
    /// Italic text (`i`)
    Italic,
}

impl FontKind {
    /// Emphasis-family kinds are wrapped in delimiters and take part in
    /// adjacency padding; the structural family is prefixed with a marker.
    pub fn is_emphasis(self) -> bool {
        matches!(self, FontKind::Strong | FontKind::Italic)
    }

    /// Marker string prepended by the structural family.
    pub fn marker(self) -> String {
        match self {
            FontKind::Heading(level) => {
                let mut marker = "#".repeat(level.clamp(1, 6) as usize);
                marker.push(' ');
                marker
            }
            _ => String::new(),
        }
    }
}

/// A node in the semantic article tree.
///
/// Containers exclusively own their ordered children; the input is a tree,
/// so there is no sharing and no cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Plain text run (already trimmed)
    Text(String),

    /// Hard line break (`<br>`)
    HardBreak,

    /// Horizontal rule
    ThematicBreak,

    /// Fenced code block with a resolved language tag
    CodeBlock { language: String, code: String },

    /// Image with an optional caption (empty if none)
    Figure { url: String, caption: String },

    /// Embedded video: link, thumbnail image and title
    Video {
        url: String,
        thumbnail: String,
        title: String,
    },

    /// Math expression. Inline vs block presentation is decided by the
    /// enclosing container at render time, not stored here.
    Math { expression: String },

    /// Inline link with resolved text and URL (either may be empty)
    Link { text: String, url: String },

    /// Inline footnote marker; the registry entry is recorded separately
    /// when the tree is built
    FootnoteRef { text: String, url: String },

    /// Unrecognized content, degraded to its bold-wrapped text
    Unsupported { text: String },

    /// Font-styled span (heading, underline, list item, emphasis)
    Styled { kind: FontKind, children: Vec<Node> },

    /// Paragraph of inline content
    Paragraph(Vec<Node>),

    /// Block quote with mixed inline/block children
    BlockQuote(Vec<Node>),

    /// Ordered or unordered list; item numbering is derived at render time
    List { ordered: bool, items: Vec<Node> },

    /// Top-level document body
    Body(Vec<Node>),
}
