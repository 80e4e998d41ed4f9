//! Final document assembly and persistence.

use std::fs;
use std::io;
use std::path::Path;

use crate::{Result, ZhidownError};

/// Article metadata supplied by the caller.
///
/// Acquisition (scraping, API calls) is out of scope; this is an opaque
/// input record.
#[derive(Debug, Clone, Default)]
pub struct Meta {
    pub author: String,
    pub author_avatar_url: String,
    pub author_page: String,
    pub title: String,
    pub original_url: String,
    pub created_date: String,
    pub voteup: u64,
    /// Full-width background image, when the article has one
    pub background: Option<String>,
}

/// An assembled Markdown document: header block plus rendered body.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    meta: Meta,
    markdown: String,
}

impl MarkdownDocument {
    /// Assemble the final text from metadata and an already-rendered body.
    pub fn new(meta: Meta, body: &str) -> Self {
        let markdown = assemble(&meta, body);
        Self { meta, markdown }
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// The complete Markdown text.
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Write the document to `path`.
    ///
    /// A write failing because the parent directory does not exist creates
    /// the directory and retries exactly once; any other failure
    /// propagates.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match fs::write(path, &self.markdown) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|source| ZhidownError::Write {
                        path: path.to_path_buf(),
                        source,
                    })?;
                }
                fs::write(path, &self.markdown).map_err(|source| ZhidownError::Write {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Err(source) => Err(ZhidownError::Write {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn assemble(meta: &Meta, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 256);

    if let Some(background) = meta.background.as_deref().filter(|b| !b.is_empty()) {
        out.push_str(&format!("![background]({background})\n\n"));
    }

    let title_line = format!("# [{}]({})", meta.title, meta.original_url);
    out.push_str(&title_line);
    out.push_str("\n\n");
    out.push_str(&"-".repeat(title_line.chars().count()));
    out.push_str("\n\n");

    out.push_str(&format!(
        "![{author}]({avatar} \"{author}\")&emsp;",
        author = meta.author,
        avatar = meta.author_avatar_url
    ));
    out.push_str(&format!(
        "**[{}]({}) / {}**\n\n",
        meta.author, meta.author_page, meta.created_date
    ));

    out.push_str(body);
    out
}
