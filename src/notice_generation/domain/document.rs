use crate::notice_generation::domain::ResolvedRecord;

/// Per-status section counts for the document metadata block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub resolved: usize,
    pub partial: usize,
    pub failed: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.resolved + self.partial + self.failed
    }
}

/// DocumentMetadata value object describing one generation run
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    generated_at: String,
    tool_name: String,
    tool_version: String,
    input_description: String,
    counts: StatusCounts,
}

impl DocumentMetadata {
    pub fn new(
        generated_at: String,
        tool_name: String,
        tool_version: String,
        input_description: String,
        counts: StatusCounts,
    ) -> Self {
        Self {
            generated_at,
            tool_name,
            tool_version,
            input_description,
            counts,
        }
    }

    pub fn generated_at(&self) -> &str {
        &self.generated_at
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn input_description(&self) -> &str {
        &self.input_description
    }

    pub fn counts(&self) -> StatusCounts {
        self.counts
    }
}

/// The assembled notice document: run metadata plus one section per
/// unique package, already in canonical order.
///
/// Rendering a document is pure; two renders of the same document are
/// byte-identical regardless of discovery order or resolver timing.
#[derive(Debug, Clone)]
pub struct NoticeDocument {
    metadata: DocumentMetadata,
    sections: Vec<ResolvedRecord>,
}

impl NoticeDocument {
    /// Callers are expected to pass sections in canonical order;
    /// the assembler service is the only production constructor.
    pub fn new(metadata: DocumentMetadata, sections: Vec<ResolvedRecord>) -> Self {
        Self { metadata, sections }
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn sections(&self) -> &[ResolvedRecord] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
