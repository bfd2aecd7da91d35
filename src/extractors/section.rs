// src/extractors/section.rs

use crate::document::DocumentIndex;

/// Extracts the text of a named section from an indexed document.
///
/// A section runs from the end of the first heading whose title matches the
/// requested title (case-insensitive prefix) to the start of the first later
/// heading whose title matches an entry of the caller's stop-set, or to end
/// of document if no stop heading follows.
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns the trimmed section text, or `None` when the heading is
    /// absent or the section body is empty.
    ///
    /// Duplicate headings: the first title match is authoritative; content
    /// under a later heading with the same title is invisible to extraction.
    pub fn extract(
        &self,
        index: &DocumentIndex,
        heading_title: &str,
        stop_titles: &[&str],
    ) -> Option<String> {
        let headings = index.headings();
        let pos = headings.iter().position(|h| h.title_matches(heading_title))?;
        let start = &headings[pos];
        tracing::trace!("Section '{}' starts at line {}", start.title, start.line);

        let end_line = headings[pos + 1..]
            .iter()
            .find(|h| stop_titles.iter().any(|s| h.title_matches(s)))
            .map(|h| h.line)
            .unwrap_or_else(|| index.line_count());

        index.text_between(start.line + 1, end_line)
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Title

## Context

Some project description.

## Forbidden Actions

- ❌ Never do the thing

## Documentation

docs here
";

    #[test]
    fn test_extract_between_headings() {
        let index = DocumentIndex::parse(DOC);
        let extractor = SectionExtractor::new();

        let section = extractor.extract(&index, "Context", &["Forbidden", "Documentation"]);
        assert_eq!(section.as_deref(), Some("Some project description."));
    }

    #[test]
    fn test_stop_prefix_matches_longer_title() {
        let index = DocumentIndex::parse(DOC);
        let extractor = SectionExtractor::new();

        // "Forbidden" must terminate the scan at "Forbidden Actions".
        let section = extractor.extract(&index, "Context", &["Forbidden"]);
        assert_eq!(section.as_deref(), Some("Some project description."));
    }

    #[test]
    fn test_runs_to_end_of_document_without_stop() {
        let index = DocumentIndex::parse(DOC);
        let extractor = SectionExtractor::new();

        let section = extractor.extract(&index, "Documentation", &["Nonexistent"]);
        assert_eq!(section.as_deref(), Some("docs here"));
    }

    #[test]
    fn test_missing_heading_is_absent() {
        let index = DocumentIndex::parse(DOC);
        let extractor = SectionExtractor::new();
        assert_eq!(extractor.extract(&index, "Project Management", &["Documentation"]), None);
    }

    #[test]
    fn test_empty_section_is_absent() {
        let doc = "## Empty\n\n## Next\nbody\n";
        let index = DocumentIndex::parse(doc);
        let extractor = SectionExtractor::new();
        assert_eq!(extractor.extract(&index, "Empty", &["Next"]), None);
    }

    #[test]
    fn test_duplicate_heading_first_match_wins() {
        let doc = "## Notes\nfirst body\n## Other\n\n## Notes\nsecond body\n";
        let index = DocumentIndex::parse(doc);
        let extractor = SectionExtractor::new();

        let section = extractor.extract(&index, "Notes", &["Other"]);
        assert_eq!(section.as_deref(), Some("first body"));
    }
}
