//! Compilation of the semantic tree into Markdown text.
//!
//! Rendering is a pure function of the tree and a registry snapshot: it
//! never mutates either, so a tree can be rendered repeatedly without
//! duplicating footnote entries.

use crate::ast::{FontKind, Node};
use crate::options::RenderOptions;
use crate::registry::ReferenceRegistry;

/// Presentation of a math expression, chosen by the enclosing container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathStyle {
    Inline,
    Block,
}

/// Render the document body followed by the reference section.
pub fn render_body(body: &Node, registry: &ReferenceRegistry, options: &RenderOptions) -> String {
    let children = match body {
        Node::Body(children) => children.as_slice(),
        other => std::slice::from_ref(other),
    };

    let mut out = String::with_capacity(4096);
    for child in children {
        // A bare math expression at the top level gets block presentation.
        let text = match child {
            Node::Math { expression } => math(expression, MathStyle::Block),
            other => render(other, options),
        };
        if !text.is_empty() {
            out.push_str(&text);
            out.push_str("\n\n");
        }
    }

    if !registry.is_empty() {
        out.push_str(&options.references_heading);
        out.push_str("\n\n");
        for entry in registry.entries() {
            out.push_str(&entry.to_reference());
            out.push('\n');
        }
    }

    out
}

/// Render one node in its default presentation.
pub fn render(node: &Node, options: &RenderOptions) -> String {
    match node {
        Node::Text(text) => text.clone(),
        Node::HardBreak => "  \n".to_string(),
        Node::ThematicBreak => options.hr.clone(),
        Node::CodeBlock { language, code } => code_block(language, code, options),
        Node::Figure { url, caption } => format!("![{caption}]({url} \"{caption}\")"),
        Node::Video {
            url,
            thumbnail,
            title,
        } => video(url, thumbnail, title, options),
        Node::Math { expression } => math(expression, MathStyle::Inline),
        Node::Link { text, url } => link(text, url),
        Node::FootnoteRef { text, url } => format!("[{text}]({url})"),
        Node::Unsupported { text } => format!("**{text}**"),
        Node::Styled { kind, children } => styled(*kind, children, options),
        Node::Paragraph(children) => paragraph(children, options),
        Node::BlockQuote(children) => blockquote(children, options),
        Node::List { ordered, items } => list(*ordered, items, false, options),
        Node::Body(_) => render_body(node, &ReferenceRegistry::default(), options),
    }
}

/// Adjacency padding: inline variants whose Markdown delimiters must not
/// fuse with neighboring text. Padding applies only when the node has a
/// following sibling and its own render is non-empty.
fn needs_padding(node: &Node) -> bool {
    match node {
        Node::Link { .. } | Node::FootnoteRef { .. } | Node::Unsupported { .. } => true,
        Node::Styled { kind, .. } => kind.is_emphasis(),
        _ => false,
    }
}

/// Concatenate sibling renders, applying adjacency padding.
fn concat_children(children: &[Node], options: &RenderOptions) -> String {
    let mut out = String::new();
    for (i, child) in children.iter().enumerate() {
        let rendered = render(child, options);
        let has_next = i + 1 < children.len();
        if needs_padding(child) && has_next && !rendered.is_empty() {
            out.push(' ');
            out.push_str(&rendered);
            out.push(' ');
        } else {
            out.push_str(&rendered);
        }
    }
    out
}

fn paragraph(children: &[Node], options: &RenderOptions) -> String {
    // A paragraph consisting of one math expression switches to block
    // presentation, padded so the delimiters stay isolated from prose.
    if let [Node::Math { expression }] = children {
        return format!(" {} ", math(expression, MathStyle::Block));
    }
    concat_children(children, options)
}

fn styled(kind: FontKind, children: &[Node], options: &RenderOptions) -> String {
    let content = paragraph(children, options);
    match kind {
        FontKind::Italic => format!("*{content}*"),
        FontKind::Strong => format!("**{content}**"),
        _ => format!("{}{}", kind.marker(), content),
    }
}

fn link(text: &str, url: &str) -> String {
    if text.is_empty() || url.is_empty() {
        String::new()
    } else {
        format!(" [{text}]({url}) ")
    }
}

fn math(expression: &str, style: MathStyle) -> String {
    match style {
        MathStyle::Inline => format!("${expression}$"),
        MathStyle::Block => format!("$$\n{expression}\n$$"),
    }
}

fn math_for_quote(expression: &str, style: MathStyle) -> String {
    match style {
        MathStyle::Inline => format!("> ${expression}$\n"),
        MathStyle::Block => format!("> $$\n> {expression}\n> $$\n"),
    }
}

fn code_block(language: &str, code: &str, options: &RenderOptions) -> String {
    format!(
        "{fence}{language}\n{code}\n{fence}",
        fence = options.fence,
        code = code.trim()
    )
}

fn code_block_for_quote(language: &str, code: &str, options: &RenderOptions) -> String {
    let block = code_block(language, code, options);
    let mut out = String::with_capacity(block.len() + 64);
    for line in block.lines() {
        out.push_str("> ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn video(url: &str, thumbnail: &str, title: &str, options: &RenderOptions) -> String {
    let title = if title.is_empty() {
        options.untitled_video.as_str()
    } else {
        title
    };
    let caption = format!("《{title}》");
    format!(
        "![{caption}]({thumbnail} \"{caption}\")\n**{caption}, watch the video at**: [{url}]({url})"
    )
}

fn list(ordered: bool, items: &[Node], for_quote: bool, options: &RenderOptions) -> String {
    let mut out = String::new();
    // Item numbering is per list instance, never stored in the tree.
    let mut index = 0u32;
    for item in items {
        let rendered = render(item, options);
        let prefix = if ordered {
            index += 1;
            format!("{index}. ")
        } else {
            format!("{} ", options.bullet_list_marker)
        };
        if for_quote {
            // An item render may span lines (hard breaks inside the item);
            // every physical line must carry the quote marker.
            let entry = format!("{prefix}{}", rendered.trim());
            let mut lines = entry.lines().peekable();
            while let Some(line) = lines.next() {
                out.push_str("> ");
                out.push_str(line);
                out.push_str(if lines.peek().is_some() { "\n" } else { "  \n" });
            }
        } else {
            out.push_str(&prefix);
            out.push_str(rendered.trim());
            out.push('\n');
        }
    }
    out
}

/// Blockquote re-flow.
///
/// Markdown requires every visual line of a quote to carry its own `> `
/// prefix. Consecutive inline children are grouped into a pending buffer
/// that is flushed as one quote line; block-level children flush the buffer
/// first and then emit their own standalone quote lines.
fn blockquote(children: &[Node], options: &RenderOptions) -> String {
    let mut lines = String::new();
    let mut pending = String::new();

    for (i, child) in children.iter().enumerate() {
        match child {
            Node::HardBreak => flush_pending(&mut lines, &mut pending),
            Node::Paragraph(children) => {
                flush_pending(&mut lines, &mut pending);
                // A lone-math paragraph switches to the quoted block form;
                // its normal render spans lines that would escape the
                // quote prefix.
                if let [Node::Math { expression }] = children.as_slice() {
                    lines.push_str(&math_for_quote(expression, MathStyle::Block));
                } else {
                    lines.push_str("> ");
                    lines.push_str(&render(child, options));
                    lines.push_str("  \n");
                }
            }
            Node::CodeBlock { language, code } => {
                flush_pending(&mut lines, &mut pending);
                lines.push_str(&code_block_for_quote(language, code, options));
            }
            Node::List { ordered, items } => {
                flush_pending(&mut lines, &mut pending);
                lines.push_str(&list(*ordered, items, true, options));
            }
            Node::Math { expression } => {
                flush_pending(&mut lines, &mut pending);
                lines.push_str(&math_for_quote(expression, MathStyle::Inline));
            }
            Node::BlockQuote(_) => {
                // A nested quote renders atomically; every one of its lines
                // gets an additional prefix level.
                flush_pending(&mut lines, &mut pending);
                for line in render(child, options).lines() {
                    lines.push_str("> ");
                    lines.push_str(line);
                    lines.push('\n');
                }
            }
            other => {
                let rendered = render(other, options);
                let has_next = i + 1 < children.len();
                if needs_padding(other) && has_next && !rendered.is_empty() {
                    pending.push(' ');
                    pending.push_str(&rendered);
                    pending.push(' ');
                } else {
                    pending.push_str(&rendered);
                }
            }
        }
    }

    flush_pending(&mut lines, &mut pending);
    lines
}

fn flush_pending(lines: &mut String, pending: &mut String) {
    if !pending.is_empty() {
        lines.push_str("> ");
        lines.push_str(pending);
        lines.push_str("  \n");
        pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Footnote;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_text_run_renders_literally() {
        assert_eq!(render(&text("hello"), &options()), "hello");
    }

    #[test]
    fn test_hard_break_and_rule() {
        assert_eq!(render(&Node::HardBreak, &options()), "  \n");
        assert_eq!(render(&Node::ThematicBreak, &options()), "---");
    }

    #[test]
    fn test_heading_level_two() {
        let node = Node::Styled {
            kind: FontKind::Heading(2),
            children: vec![text("Hi")],
        };
        assert_eq!(render(&node, &options()), "## Hi");
    }

    #[test]
    fn test_emphasis_templates() {
        let strong = Node::Styled {
            kind: FontKind::Strong,
            children: vec![text("bold")],
        };
        let italic = Node::Styled {
            kind: FontKind::Italic,
            children: vec![text("slant")],
        };
        assert_eq!(render(&strong, &options()), "**bold**");
        assert_eq!(render(&italic, &options()), "*slant*");
    }

    #[test]
    fn test_unordered_list() {
        let node = Node::List {
            ordered: false,
            items: vec![text("a"), text("b")],
        };
        assert_eq!(render(&node, &options()), "- a\n- b\n");
    }

    #[test]
    fn test_ordered_list_counts_from_one() {
        let node = Node::List {
            ordered: true,
            items: vec![text("a"), text("b")],
        };
        assert_eq!(render(&node, &options()), "1. a\n2. b\n");
    }

    #[test]
    fn test_list_counter_resets_per_instance() {
        let node = Node::List {
            ordered: true,
            items: vec![text("x")],
        };
        assert_eq!(render(&node, &options()), "1. x\n");
        assert_eq!(render(&node, &options()), "1. x\n");
    }

    #[test]
    fn test_code_block_is_fenced() {
        let node = Node::CodeBlock {
            language: "python".to_string(),
            code: "print('hi')".to_string(),
        };
        assert_eq!(render(&node, &options()), "```python\nprint('hi')\n```");
    }

    #[test]
    fn test_figure_with_caption() {
        let node = Node::Figure {
            url: "http://img".to_string(),
            caption: "cap".to_string(),
        };
        assert_eq!(render(&node, &options()), "![cap](http://img \"cap\")");
    }

    #[test]
    fn test_video_defaults_to_untitled() {
        let node = Node::Video {
            url: "http://v".to_string(),
            thumbnail: "http://t".to_string(),
            title: String::new(),
        };
        let rendered = render(&node, &options());
        assert_eq!(
            rendered,
            "![《untitled》](http://t \"《untitled》\")\n\
             **《untitled》, watch the video at**: [http://v](http://v)"
        );
    }

    #[test]
    fn test_link_is_padded_inline() {
        let node = Node::Link {
            text: "t".to_string(),
            url: "http://x".to_string(),
        };
        assert_eq!(render(&node, &options()), " [t](http://x) ");
    }

    #[test]
    fn test_link_without_url_renders_empty() {
        let node = Node::Link {
            text: "t".to_string(),
            url: String::new(),
        };
        assert_eq!(render(&node, &options()), "");
    }

    #[test]
    fn test_unsupported_degrades_to_bold() {
        let node = Node::Unsupported {
            text: "mystery".to_string(),
        };
        assert_eq!(render(&node, &options()), "**mystery**");
    }

    #[test]
    fn test_math_is_inline_by_default() {
        let node = Node::Math {
            expression: "x^2".to_string(),
        };
        assert_eq!(render(&node, &options()), "$x^2$");
    }

    #[test]
    fn test_lone_math_paragraph_uses_block_form() {
        let node = Node::Paragraph(vec![Node::Math {
            expression: "x^2".to_string(),
        }]);
        assert_eq!(render(&node, &options()), " $$\nx^2\n$$ ");
    }

    #[test]
    fn test_math_beside_text_stays_inline() {
        let node = Node::Paragraph(vec![
            text("where"),
            Node::Math {
                expression: "x^2".to_string(),
            },
        ]);
        assert_eq!(render(&node, &options()), "where$x^2$");
    }

    #[test]
    fn test_adjacency_pads_footnote_with_following_sibling() {
        let node = Node::Paragraph(vec![
            text("see"),
            Node::FootnoteRef {
                text: "[1]".to_string(),
                url: "http://x".to_string(),
            },
            text("for details"),
        ]);
        assert_eq!(render(&node, &options()), "see [[1]](http://x) for details");
    }

    #[test]
    fn test_adjacency_skips_last_child() {
        let node = Node::Paragraph(vec![
            text("see"),
            Node::FootnoteRef {
                text: "[1]".to_string(),
                url: "http://x".to_string(),
            },
        ]);
        assert_eq!(render(&node, &options()), "see[[1]](http://x)");
    }

    #[test]
    fn test_adjacency_skips_empty_renders() {
        let node = Node::Paragraph(vec![
            text("a"),
            Node::Link {
                text: String::new(),
                url: String::new(),
            },
            text("b"),
        ]);
        assert_eq!(render(&node, &options()), "ab");
    }

    #[test]
    fn test_blockquote_splits_on_hard_breaks() {
        let node = Node::BlockQuote(vec![text("first"), Node::HardBreak, text("second")]);
        assert_eq!(render(&node, &options()), "> first  \n> second  \n");
    }

    #[test]
    fn test_blockquote_leading_break_is_noop() {
        let node = Node::BlockQuote(vec![Node::HardBreak, text("only")]);
        assert_eq!(render(&node, &options()), "> only  \n");
    }

    #[test]
    fn test_blockquote_paragraph_gets_own_line() {
        let node = Node::BlockQuote(vec![
            text("intro"),
            Node::Paragraph(vec![text("body")]),
        ]);
        assert_eq!(render(&node, &options()), "> intro  \n> body  \n");
    }

    #[test]
    fn test_blockquote_code_lines_each_prefixed() {
        let node = Node::BlockQuote(vec![Node::CodeBlock {
            language: "text".to_string(),
            code: "a\nb".to_string(),
        }]);
        assert_eq!(
            render(&node, &options()),
            "> ```text\n> a\n> b\n> ```\n"
        );
    }

    #[test]
    fn test_blockquote_list_lines_each_prefixed() {
        let node = Node::BlockQuote(vec![Node::List {
            ordered: true,
            items: vec![text("a"), text("b")],
        }]);
        assert_eq!(render(&node, &options()), "> 1. a  \n> 2. b  \n");
    }

    #[test]
    fn test_blockquote_lone_math_paragraph_uses_quoted_block_form() {
        let node = Node::BlockQuote(vec![Node::Paragraph(vec![Node::Math {
            expression: "e".to_string(),
        }])]);
        assert_eq!(render(&node, &options()), "> $$\n> e\n> $$\n");
    }

    #[test]
    fn test_blockquote_list_item_with_hard_break_keeps_lines_quoted() {
        let node = Node::BlockQuote(vec![Node::List {
            ordered: false,
            items: vec![Node::Styled {
                kind: FontKind::ListItem,
                children: vec![text("a"), Node::HardBreak, text("b")],
            }],
        }]);
        assert_eq!(render(&node, &options()), "> - a  \n> b  \n");
    }

    #[test]
    fn test_blockquote_math_is_quoted() {
        let node = Node::BlockQuote(vec![Node::Math {
            expression: "e".to_string(),
        }]);
        assert_eq!(render(&node, &options()), "> $e$\n");
    }

    #[test]
    fn test_nested_blockquote_gains_prefix_level() {
        let node = Node::BlockQuote(vec![
            text("outer"),
            Node::BlockQuote(vec![text("inner")]),
        ]);
        assert_eq!(render(&node, &options()), "> outer  \n> > inner  \n");
    }

    #[test]
    fn test_every_blockquote_line_starts_with_quote_marker() {
        let node = Node::BlockQuote(vec![
            text("a"),
            Node::HardBreak,
            Node::List {
                ordered: false,
                items: vec![
                    text("item"),
                    Node::Styled {
                        kind: FontKind::ListItem,
                        children: vec![text("first"), Node::HardBreak, text("second")],
                    },
                ],
            },
            Node::CodeBlock {
                language: "text".to_string(),
                code: "x".to_string(),
            },
            Node::Paragraph(vec![text("p")]),
        ]);
        let rendered = render(&node, &options());
        assert!(!rendered.is_empty());
        for line in rendered.lines() {
            assert!(line.starts_with("> "), "line not quoted: {line:?}");
        }
    }

    #[test]
    fn test_body_separates_children_with_blank_lines() {
        let body = Node::Body(vec![
            Node::Paragraph(vec![text("one")]),
            Node::Paragraph(vec![text("two")]),
        ]);
        let rendered = render_body(&body, &ReferenceRegistry::new(), &options());
        assert_eq!(rendered, "one\n\ntwo\n\n");
    }

    #[test]
    fn test_body_skips_empty_renders() {
        let body = Node::Body(vec![
            Node::Paragraph(vec![Node::Link {
                text: String::new(),
                url: String::new(),
            }]),
            Node::Paragraph(vec![text("kept")]),
        ]);
        let rendered = render_body(&body, &ReferenceRegistry::new(), &options());
        assert_eq!(rendered, "kept\n\n");
    }

    #[test]
    fn test_top_level_math_uses_block_form() {
        let body = Node::Body(vec![Node::Math {
            expression: "x".to_string(),
        }]);
        let rendered = render_body(&body, &ReferenceRegistry::new(), &options());
        assert_eq!(rendered, "$$\nx\n$$\n\n");
    }

    #[test]
    fn test_references_section_lists_registered_entries() {
        let mut registry = ReferenceRegistry::new();
        registry.register(Footnote {
            index: "1".to_string(),
            label: "L".to_string(),
            url: "http://x".to_string(),
        });
        let body = Node::Body(vec![Node::Paragraph(vec![text("p")])]);
        let rendered = render_body(&body, &registry, &options());
        assert_eq!(rendered, "p\n\n**References**\n\n1. [L](http://x)\n");
    }

    #[test]
    fn test_no_references_section_when_registry_empty() {
        let body = Node::Body(vec![Node::Paragraph(vec![text("p")])]);
        let rendered = render_body(&body, &ReferenceRegistry::new(), &options());
        assert!(!rendered.contains("References"));
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let mut registry = ReferenceRegistry::new();
        registry.register(Footnote {
            index: "1".to_string(),
            label: "L".to_string(),
            url: "http://x".to_string(),
        });
        let body = Node::Body(vec![Node::Paragraph(vec![text("p")])]);
        let first = render_body(&body, &registry, &options());
        let second = render_body(&body, &registry, &options());
        assert_eq!(first, second);
        assert_eq!(second.matches("1. [L](http://x)").count(), 1);
    }
}
