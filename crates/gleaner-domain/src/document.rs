//! Documents as the pipeline sees them: decoded text plus a filename

use std::path::Path;

/// A decoded document ready for extraction
///
/// The filename is unique within a batch and doubles as the document's
/// identity everywhere downstream (run metadata, aggregation instances,
/// output naming). How the text was decoded is the document source's
/// concern; by the time a `Document` exists the format no longer matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Source filename, e.g. `loan_application.txt`
    pub filename: String,

    /// Decoded text content
    pub text: String,
}

impl Document {
    /// Create a document from a filename and its decoded text
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }

    /// Filename without its final extension
    ///
    /// `file.with.dots.csv` stems to `file.with.dots`; a bare `data`
    /// stems to itself.
    pub fn stem(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.filename)
    }

    /// Final extension, without the dot, if the filename has one
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename)
            .extension()
            .and_then(|s| s.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_and_extension() {
        let doc = Document::new("loan_application.txt", "text");
        assert_eq!(doc.stem(), "loan_application");
        assert_eq!(doc.extension(), Some("txt"));
    }

    #[test]
    fn test_multiple_dots() {
        let doc = Document::new("file.with.dots.csv", "");
        assert_eq!(doc.stem(), "file.with.dots");
        assert_eq!(doc.extension(), Some("csv"));
    }

    #[test]
    fn test_no_extension() {
        let doc = Document::new("data", "");
        assert_eq!(doc.stem(), "data");
        assert_eq!(doc.extension(), None);
    }
}
