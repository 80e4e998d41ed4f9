//! ZhidownService - the main entry point for article to Markdown conversion.

use zhidown_core::{render_body, ReferenceRegistry, RenderOptions};

use crate::classify::{ConvertOptions, TreeBuilder};
use crate::document::{MarkdownDocument, Meta};
use crate::node::Node;

/// The main service for converting article DOM trees to Markdown.
///
/// Conversion is two-phase: a pure construction pass building the semantic
/// tree (with the footnote registry as its only side effect), followed by a
/// pure render pass over the tree and a registry snapshot. Each call to
/// [`ZhidownService::convert`] uses a fresh registry, so repeated
/// conversions never leak footnotes across documents.
pub struct ZhidownService {
    convert_options: ConvertOptions,
    render_options: RenderOptions,
}

impl ZhidownService {
    /// Create a new service with default options
    pub fn new() -> Self {
        Self {
            convert_options: ConvertOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Create a service with custom options
    pub fn with_options(convert_options: ConvertOptions, render_options: RenderOptions) -> Self {
        Self {
            convert_options,
            render_options,
        }
    }

    pub fn convert_options(&self) -> &ConvertOptions {
        &self.convert_options
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Convert a raw DOM tree to a Markdown body (including the footnote
    /// reference section, when any footnotes were encountered).
    pub fn convert(&self, root: &Node) -> String {
        let mut registry = ReferenceRegistry::new();
        let body = TreeBuilder::new(&self.convert_options, &mut registry).build(root);
        render_body(&body, &registry, &self.render_options)
    }

    /// Convert a raw DOM tree and assemble the final document with its
    /// metadata header.
    pub fn convert_document(&self, meta: Meta, root: &Node) -> MarkdownDocument {
        let body = self.convert(root);
        MarkdownDocument::new(meta, &body)
    }

    /// Convert an HTML string to a Markdown body.
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> String {
        self.convert(&crate::html::parse_html(html))
    }
}

impl Default for ZhidownService {
    fn default() -> Self {
        Self::new()
    }
}
