//! Classification of raw DOM nodes into the semantic tree.
//!
//! The builder walks the raw tree once, mapping every node onto exactly one
//! semantic variant (or dropping it when it is structurally empty).
//! Classification is total: unrecognized tags degrade to `Unsupported`
//! instead of failing, and missing attributes fall back to defaults, so the
//! builder never rejects an input tree.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use zhidown_core as md;
use zhidown_core::{FontKind, Footnote, ReferenceRegistry};

use crate::node::Node;

/// Class marking a paragraph placeholder that carries no content
const EMPTY_PARAGRAPH_CLASS: &str = "ztext-empty-paragraph";

/// Class marking an anchor that is actually a video container
const VIDEO_BOX_CLASS: &str = "video-box";

/// Image source attributes, in resolution priority order
const IMAGE_SOURCE_ATTRS: [&str; 4] = [
    "data-original",
    "data-actualsrc",
    "data-default-watermark-src",
    "src",
];

/// Variants reachable through the fixed tag table (the tail of the
/// dispatch order, after the pattern-matched families).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableVariant {
    BlockQuote,
    Figure,
    Math,
    ThematicBreak,
    CodeBlock,
    FootnoteRef,
}

static TAG_TABLE: Lazy<IndexMap<&'static str, TableVariant>> = Lazy::new(|| {
    let table: IndexMap<&'static str, TableVariant> = [
        ("blockquote", TableVariant::BlockQuote),
        ("figure", TableVariant::Figure),
        ("img", TableVariant::Math),
        ("hr", TableVariant::ThematicBreak),
        ("div", TableVariant::CodeBlock),
        ("sup", TableVariant::FootnoteRef),
    ]
    .into_iter()
    .collect();
    // The enumerated tag set must be fully covered; everything else falls
    // back to Unsupported in `classify`.
    assert_eq!(table.len(), 6);
    table
});

static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(http)|(www)").unwrap());

/// A fragment boundary marker between two others collapses to an em-dash
static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("#.#").unwrap());

static LANGUAGE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r#""language-([^"]+)""#).unwrap());

static LANGUAGE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d\s]+").unwrap());

/// Inline markup tags or HTML entities inside serialized code
static MARKUP_OR_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(</?\w+[^<>]*>)|(&[\w#]+;)").unwrap());

/// Options consumed while the semantic tree is built.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Origin prepended to relative link hrefs
    pub origin: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            origin: "https://www.zhihu.com".to_string(),
        }
    }
}

/// Builds the semantic tree from a raw DOM tree.
///
/// The registry is the only side channel: footnote markers register
/// themselves exactly once, at construction time, in document order.
pub struct TreeBuilder<'a> {
    options: &'a ConvertOptions,
    registry: &'a mut ReferenceRegistry,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(options: &'a ConvertOptions, registry: &'a mut ReferenceRegistry) -> Self {
        Self { options, registry }
    }

    /// Build the top-level body from a raw container node.
    pub fn build(&mut self, root: &Node) -> md::Node {
        md::Node::Body(self.build_children(root))
    }

    fn build_children(&mut self, parent: &Node) -> Vec<md::Node> {
        let mut children = Vec::new();
        for child in parent.children() {
            if let Some(node) = self.classify(child) {
                children.push(node);
            }
        }
        children
    }

    /// Map one raw node onto a semantic variant. Returns `None` for
    /// whitespace-only text and empty-paragraph placeholders.
    fn classify(&mut self, raw: &Node) -> Option<md::Node> {
        if raw.is_text() {
            let text = raw.text_content();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            return Some(md::Node::Text(trimmed.to_string()));
        }

        let tag = raw.tag_name();
        match tag {
            // br is by far the most frequent element in article bodies
            "br" => return Some(md::Node::HardBreak),
            "p" | "span" => {
                if raw.has_class(EMPTY_PARAGRAPH_CLASS) {
                    return None;
                }
                return Some(md::Node::Paragraph(self.build_children(raw)));
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "em" | "strong" | "b" | "i" | "u"
            | "li" => {
                return Some(md::Node::Styled {
                    kind: font_kind(tag),
                    children: self.build_children(raw),
                });
            }
            "a" => {
                return Some(if raw.has_class(VIDEO_BOX_CLASS) {
                    video(raw)
                } else {
                    self.link(raw)
                });
            }
            "ul" | "ol" => {
                return Some(md::Node::List {
                    ordered: tag == "ol",
                    items: self.build_children(raw),
                });
            }
            _ => {}
        }

        Some(match TAG_TABLE.get(tag) {
            Some(TableVariant::BlockQuote) => md::Node::BlockQuote(self.build_children(raw)),
            Some(TableVariant::Figure) => figure(raw),
            Some(TableVariant::Math) => math(raw),
            Some(TableVariant::ThematicBreak) => md::Node::ThematicBreak,
            Some(TableVariant::CodeBlock) => code_block(raw),
            Some(TableVariant::FootnoteRef) => self.footnote(raw),
            None => {
                log::debug!("unsupported tag <{tag}>, degrading to bold text");
                unsupported(raw)
            }
        })
    }

    fn link(&self, raw: &Node) -> md::Node {
        let Some(href) = raw.attr("href") else {
            return md::Node::Link {
                text: String::new(),
                url: String::new(),
            };
        };
        let url = if ABSOLUTE_URL.is_match(href) {
            href.trim().to_string()
        } else {
            format!("{}{}", self.options.origin, href.trim())
        };
        let text = SEPARATOR_RUN
            .replace_all(&raw.text_joined("#"), "——")
            .into_owned();
        md::Node::Link { text, url }
    }

    fn footnote(&mut self, raw: &Node) -> md::Node {
        let (Some(index), Some(label), Some(url)) = (
            raw.attr("data-numero"),
            raw.attr("data-text"),
            raw.attr("data-url"),
        ) else {
            log::warn!("footnote marker missing data attributes, keeping as plain text");
            return unsupported(raw);
        };
        let url = url.to_string();
        self.registry.register(Footnote {
            index: index.to_string(),
            label: label.to_string(),
            url: url.clone(),
        });
        md::Node::FootnoteRef {
            text: raw.text_content().trim().to_string(),
            url,
        }
    }
}

fn font_kind(tag: &str) -> FontKind {
    match tag {
        "h1" => FontKind::Heading(1),
        "h2" => FontKind::Heading(2),
        "h3" => FontKind::Heading(3),
        "h4" => FontKind::Heading(4),
        "h5" => FontKind::Heading(5),
        "h6" => FontKind::Heading(6),
        "u" => FontKind::Underline,
        "li" => FontKind::ListItem,
        "i" => FontKind::Italic,
        // em, strong, b
        _ => FontKind::Strong,
    }
}

fn figure(raw: &Node) -> md::Node {
    let url = raw
        .find_descendant("img")
        .and_then(|img| IMAGE_SOURCE_ATTRS.iter().find_map(|attr| img.attr(attr)))
        .unwrap_or("")
        .to_string();
    let caption = raw
        .find_descendant("figcaption")
        .map(|c| c.text_content().trim().to_string())
        .unwrap_or_default();
    md::Node::Figure { url, caption }
}

fn video(raw: &Node) -> md::Node {
    let url = raw
        .find_by_class("span", "url")
        .map(|n| n.text_content().trim().to_string())
        .unwrap_or_default();
    let thumbnail = raw
        .find_by_class("img", "thumbnail")
        .and_then(|n| n.attr("src"))
        .unwrap_or("")
        .to_string();
    let title = raw
        .find_by_class("span", "title")
        .map(|n| n.text_content().trim().to_string())
        .unwrap_or_default();
    md::Node::Video {
        url,
        thumbnail,
        title,
    }
}

fn math(raw: &Node) -> md::Node {
    md::Node::Math {
        expression: raw.attr("alt").unwrap_or("").trim().to_string(),
    }
}

fn code_block(raw: &Node) -> md::Node {
    let html = raw.outer_html();
    let language = LANGUAGE_CLASS
        .captures(&html)
        .map(|caps| LANGUAGE_NOISE.replace_all(&caps[1], "").to_lowercase())
        .filter(|language| !language.is_empty())
        .unwrap_or_else(|| "text".to_string());
    md::Node::CodeBlock {
        language,
        code: decode_code(&html),
    }
}

/// Strip inline markup tags and decode HTML entities from serialized code.
fn decode_code(html: &str) -> String {
    MARKUP_OR_ENTITY
        .replace_all(html, |caps: &Captures| match &caps[0] {
            "&quot;" => "\"",
            "&#39;" => "'",
            "&lt;" => "<",
            "&gt;" => ">",
            "&amp;" => "&",
            _ => "",
        })
        .trim()
        .to_string()
}

fn unsupported(raw: &Node) -> md::Node {
    md::Node::Unsupported {
        text: raw.text_content().trim().to_string(),
    }
}
