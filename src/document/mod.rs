// src/document/mod.rs

use once_cell::sync::Lazy;
use regex::Regex;

// A heading is 1 or 2 leading '#' markers, whitespace, then a non-empty
// title. Three or more markers never match (the '#' after the captured run
// is not whitespace), so `###` subsections stay inside their section body.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,2})\s+(.*\S)\s*$").expect("Failed to compile HEADING_RE")
});

/// One heading line of the document: position, nesting level, trimmed title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 0-based line number in the source document.
    pub line: usize,
    /// Nesting level, 1 or 2.
    pub level: u8,
    /// Title text, trimmed of surrounding whitespace.
    pub title: String,
}

impl Heading {
    /// Case-insensitive prefix match on the title. Prefix (not equality)
    /// matching is load-bearing: stop-sets contain entries like "Forbidden"
    /// that must terminate a section at "Forbidden Actions".
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().starts_with(&query.to_lowercase())
    }
}

/// Structural index over a document: the source lines plus every level-1/2
/// heading found in them. Built once per document; all section extraction
/// runs over this index instead of re-scanning raw text.
#[derive(Debug)]
pub struct DocumentIndex<'a> {
    lines: Vec<&'a str>,
    headings: Vec<Heading>,
}

impl<'a> DocumentIndex<'a> {
    /// Tokenizes the document into lines and heading records.
    pub fn parse(text: &'a str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let mut headings = Vec::new();

        for (line_no, line) in lines.iter().enumerate() {
            if let Some(caps) = HEADING_RE.captures(line) {
                let level = caps[1].len() as u8;
                let title = caps[2].trim().to_string();
                headings.push(Heading { line: line_no, level, title });
            }
        }

        tracing::trace!("Indexed {} headings over {} lines", headings.len(), lines.len());
        Self { lines, headings }
    }

    /// All headings, in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// Number of source lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of the lines in `[start, end)`, joined with newlines and trimmed.
    /// Returns `None` when the trimmed span is empty.
    pub fn text_between(&self, start: usize, end: usize) -> Option<String> {
        let end = end.min(self.lines.len());
        if start >= end {
            return None;
        }
        let text = self.lines[start..end].join("\n");
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_levels_and_order() {
        let doc = "# Title\n\ntext\n## Section A\nbody\n### Subsection\n## Section B\n";
        let index = DocumentIndex::parse(doc);

        let titles: Vec<(u8, &str)> = index
            .headings()
            .iter()
            .map(|h| (h.level, h.title.as_str()))
            .collect();

        // The ### line is body text, not a heading.
        assert_eq!(
            titles,
            vec![(1, "Title"), (2, "Section A"), (2, "Section B")]
        );
        assert_eq!(index.headings()[1].line, 3);
    }

    #[test]
    fn test_non_headings_skipped() {
        let doc = "#NoSpace\n##\n  ## indented\nplain\n";
        let index = DocumentIndex::parse(doc);
        assert!(index.headings().is_empty(), "none of these lines are headings");
    }

    #[test]
    fn test_title_prefix_match() {
        let h = Heading { line: 0, level: 2, title: "Forbidden Actions".to_string() };
        assert!(h.title_matches("Forbidden"));
        assert!(h.title_matches("forbidden actions"));
        assert!(!h.title_matches("Actions"));
    }

    #[test]
    fn test_text_between() {
        let doc = "## A\n\nline one\nline two\n\n## B\n";
        let index = DocumentIndex::parse(doc);
        assert_eq!(
            index.text_between(1, 5).as_deref(),
            Some("line one\nline two")
        );
        assert_eq!(index.text_between(1, 2), None, "blank span yields None");
    }
}
