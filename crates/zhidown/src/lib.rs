//! # zhidown
//!
//! Convert rich-content article DOM trees to Markdown.
//!
//! The engine takes an already-parsed tree of article content (text, code,
//! media, math, lists, quotes, footnote annotations), classifies every raw
//! node into a fixed set of semantic variants, and renders the resulting
//! tree into one well-formed Markdown document with a metadata header and a
//! footnote reference section.
//!
//! ## Design
//!
//! Conversion is two-phase. The [`classify::TreeBuilder`] performs a pure
//! construction pass over the raw tree, producing a `zhidown_core` semantic
//! tree; its only side effect is accumulating footnote references into a
//! per-conversion registry. Rendering is then a pure function of the tree
//! and the registry snapshot. Classification is total: unrecognized markup
//! degrades to bold text instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use zhidown::{Node, ZhidownService};
//!
//! let service = ZhidownService::new();
//!
//! let root = Node::fragment()
//!     .with_child(Node::element("h2").with_child(Node::text("Hello")))
//!     .with_child(Node::element("p").with_child(Node::text("World")));
//!
//! let markdown = service.convert(&root);
//! assert_eq!(markdown, "## Hello\n\nWorld\n\n");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use zhidown::ZhidownService;
//!
//! let service = ZhidownService::new();
//! let markdown = service.convert_html("<h2>Hello</h2>");
//! assert_eq!(markdown, "## Hello\n\n");
//! ```

use std::io;
use std::path::PathBuf;

pub mod classify;
pub mod document;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod service;

pub use classify::{ConvertOptions, TreeBuilder};
pub use document::{MarkdownDocument, Meta};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeType};
pub use service::ZhidownService;
pub use zhidown_core::{FontKind, Footnote, ReferenceRegistry, RenderOptions};

/// Error type for zhidown operations.
///
/// Classification and rendering are total by construction; the only
/// fallible operation is writing the assembled document.
#[derive(Debug, thiserror::Error)]
pub enum ZhidownError {
    #[error("failed to write markdown to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ZhidownError>;
