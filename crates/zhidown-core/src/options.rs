//! Render options.

/// Options controlling the rendered Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Fence string for code blocks
    pub fence: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Horizontal rule string
    pub hr: String,

    /// Heading emitted above the footnote reference section
    pub references_heading: String,

    /// Title substituted for videos without one
    pub untitled_video: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fence: "```".to_string(),
            bullet_list_marker: '-',
            hr: "---".to_string(),
            references_heading: "**References**".to_string(),
            untitled_video: "untitled".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.fence, "```");
        assert_eq!(options.bullet_list_marker, '-');
        assert_eq!(options.hr, "---");
    }
}
