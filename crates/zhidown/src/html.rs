//! HTML parsing support.
//!
//! This module bridges HTML strings to the raw [`Node`] structure consumed
//! by the classifier, so callers can go straight from fetched article
//! markup to a conversion.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a raw node tree.
///
/// The returned node is a root fragment whose children are the top-level
/// elements and text runs of the input.
///
/// # Example
///
/// ```rust
/// use zhidown::{parse_html, ZhidownService};
///
/// let root = parse_html("<h2>Hello</h2><p>World</p>");
/// let service = ZhidownService::new();
/// let markdown = service.convert(&root);
/// assert_eq!(markdown, "## Hello\n\nWorld\n\n");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    let mut root = Node::fragment();
    append_children(&mut root, document.root_element());
    root
}

fn append_children(target: &mut Node, element: ElementRef) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => target.add_child(Node::text(&text.text)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    target.add_child(element_to_node(child_element));
                }
            }
            _ => {}
        }
    }
}

fn element_to_node(element: ElementRef) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), &attrs);
    append_children(&mut node, element);
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZhidownService;

    #[test]
    fn test_parses_fragment_children() {
        let root = parse_html("<p>Hello</p>");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tag_name(), "p");
    }

    #[test]
    fn test_preserves_attributes() {
        let root = parse_html(r#"<a href="/q/1" class="internal">q</a>"#);
        let a = &root.children[0];
        assert_eq!(a.attr("href"), Some("/q/1"));
        assert!(a.has_class("internal"));
    }

    #[test]
    fn test_converts_parsed_article_snippet() {
        let service = ZhidownService::new();
        let markdown = service.convert_html(
            "<h2>Title</h2>\
             <p>Some <b>bold</b> prose.</p>\
             <blockquote>quoted<br>lines</blockquote>",
        );
        assert!(markdown.contains("## Title"));
        assert!(markdown.contains("**bold**"));
        assert!(markdown.contains("> quoted  \n> lines  \n"));
    }

    #[test]
    fn test_converts_parsed_list() {
        let service = ZhidownService::new();
        let markdown = service.convert_html("<ul><li>a</li><li>b</li></ul>");
        assert!(markdown.contains("- a\n- b\n"));
    }
}
