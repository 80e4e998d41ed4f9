//! Footnote accumulation.

/// One registered footnote reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    /// Display index as carried by the source document (e.g. `"1"`)
    pub index: String,
    /// Label shown in the reference section
    pub label: String,
    /// Target URL
    pub url: String,
}

impl Footnote {
    /// Reference-section line: `index. [label](url)`.
    pub fn to_reference(&self) -> String {
        format!("{}. [{}]({})", self.index, self.label, self.url)
    }
}

/// Per-conversion accumulator for footnote references.
///
/// Populated in document order while the tree is built and read once when
/// the body is rendered. Entries are never re-sorted. The registry is scoped
/// to a single conversion; it is deliberately not a process-wide global.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    entries: Vec<Footnote>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a footnote in document order.
    pub fn register(&mut self, footnote: Footnote) {
        self.entries.push(footnote);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Registered entries, in registration order.
    pub fn entries(&self) -> &[Footnote] {
        &self.entries
    }
}
