/// Output encoding enumeration for notice generation
///
/// This enum represents the supported document encodings. It belongs
/// in the application layer as it represents an application-level
/// concern that both the CLI (inbound adapter) and renderers (outbound
/// adapters) need to understand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Plain-text notice document (default)
    #[default]
    Text,
    /// Self-contained HTML page
    Html,
    /// Machine-readable JSON
    Json,
}

impl std::str::FromStr for OutputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputEncoding::Text),
            "html" => Ok(OutputEncoding::Html),
            "json" => Ok(OutputEncoding::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'text', 'html' or 'json'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputEncoding::Text => write!(f, "text"),
            OutputEncoding::Html => write!(f, "html"),
            OutputEncoding::Json => write!(f, "json"),
        }
    }
}
