//! zhidown-core - semantic article tree and Markdown rendering
//!
//! This crate provides the data structures and rendering for the zhidown
//! conversion pipeline. The `zhidown` crate classifies a raw DOM tree into
//! the semantic [`Node`] tree defined here; this crate compiles that tree
//! (plus the footnote [`ReferenceRegistry`] populated during classification)
//! into Markdown text.
//!
//! # Architecture
//!
//! ```text
//! Raw DOM ──classify──▶ ┌───────────────┐
//!                       │ Semantic tree │ ──render──▶ Markdown body
//!        footnotes ────▶│  + registry   │
//!                       └───────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use zhidown_core::{render_body, FontKind, Node, ReferenceRegistry, RenderOptions};
//!
//! let body = Node::Body(vec![
//!     Node::Styled {
//!         kind: FontKind::Heading(2),
//!         children: vec![Node::Text("Hello".to_string())],
//!     },
//!     Node::Paragraph(vec![Node::Text("World".to_string())]),
//! ]);
//!
//! let markdown = render_body(&body, &ReferenceRegistry::new(), &RenderOptions::default());
//! assert_eq!(markdown, "## Hello\n\nWorld\n\n");
//! ```

mod ast;
mod options;
mod registry;
mod render;

pub use ast::{FontKind, Node};
pub use options::RenderOptions;
pub use registry::{Footnote, ReferenceRegistry};
pub use render::{render, render_body, MathStyle};
