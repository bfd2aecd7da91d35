// src/extractors/customizations.rs

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::DocumentIndex;
use crate::extractors::section::SectionExtractor;

// --- Regex Patterns (Lazy Static) ---
static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*-\s*Claude Code Configuration").expect("Failed to compile TITLE_RE")
});

static TECH_STACK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*Tech Stack\*\*:\s*(.+?)(?:\n|$)").expect("Failed to compile TECH_STACK_RE")
});

static CONFIGURED_TOOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\*\*Configured Tool\*\*:\s*(\w+)").expect("Failed to compile CONFIGURED_TOOL_RE")
});

// --- Exclusion Vocabularies ---
// Boilerplate phrases identifying unmodified template text. Kept as named
// constants (and injected through MinerPolicy) so the vocabulary can be
// tested and extended independently of the scanning logic.

/// Code-standards lines containing any of these phrases are template
/// boilerplate, not customizations. Substring match, case-sensitive.
pub const DEFAULT_CODE_STANDARDS: &[&str] = &[
    "KISS, DRY, SOLID",
    "TypeScript",
    "Strict mode",
    "Line Length",
    "Max 100",
    "Testing",
    "Framework-Specific",
    "General Standards",
    "Architecture",
];

/// Forbidden-action bullets containing any of these phrases ship with the
/// template and are not user customizations.
pub const DEFAULT_FORBIDDEN_ACTIONS: &[&str] = &[
    "NEVER wait for explicit commit",
    "NEVER leave tickets open",
    "NEVER skip documentation",
    "NEVER load all `.agent/`",
    "NEVER load all .agent",
    "NEVER skip reading DEVELOPMENT-README",
    "No Claude Code mentions",
    "No package.json modifications",
    "Never commit secrets",
    "Don't delete tests",
    "NEVER skip tests",
];

/// Level-2 headings belonging to the standard template. Anything else is a
/// custom section. Exact title match, unlike section extraction which is
/// prefix-based.
pub const STANDARD_SECTIONS: &[&str] = &[
    "Context",
    "Navigator",
    "Quick Start",
    "Code Standards",
    "Project-Specific Code Standards",
    "Forbidden Actions",
    "Documentation Structure",
    "Project Management",
    "Configuration",
    "Commit Guidelines",
    "Success Metrics",
];

// --- Stop-Title Lists ---
// Headings that terminate each mined section. Prefix-matched, so "Forbidden"
// stops at "Forbidden Actions".
const CONTEXT_STOPS: &[&str] = &[
    "Navigator Quick Start",
    "Quick Start",
    "Project-Specific",
    "Code Standards",
    "Forbidden Actions",
    "Documentation",
    "Project Management",
];

const STANDARDS_STOPS: &[&str] = &[
    "Forbidden",
    "Documentation",
    "Project Management",
    "Configuration",
    "Commit Guidelines",
    "Success Metrics",
];

const STANDARDS_FALLBACK_STOPS: &[&str] = &[
    "Forbidden",
    "Documentation",
    "Project Management",
    "Configuration",
];

const FORBIDDEN_STOPS: &[&str] = &[
    "Documentation",
    "Project Management",
    "Configuration",
    "Commit Guidelines",
    "Success Metrics",
];

const PM_STOPS: &[&str] = &["Configuration", "Commit Guidelines", "Success Metrics"];

// --- Data Structures ---

/// Project-management tool configured in the document. Anything outside the
/// recognized set collapses to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PmTool {
    #[default]
    None,
    Linear,
    Github,
    Jira,
    Gitlab,
}

impl PmTool {
    /// Parses a tool name, case-insensitively. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "linear" => PmTool::Linear,
            "github" => PmTool::Github,
            "jira" => PmTool::Jira,
            "gitlab" => PmTool::Gitlab,
            _ => PmTool::None,
        }
    }

    /// Lowercase name, as stored in configuration values.
    pub fn as_str(&self) -> &'static str {
        match self {
            PmTool::None => "none",
            PmTool::Linear => "linear",
            PmTool::Github => "github",
            PmTool::Jira => "jira",
            PmTool::Gitlab => "gitlab",
        }
    }

    /// Title-case name for display in the generated document.
    pub fn display_name(&self) -> &'static str {
        match self {
            PmTool::None => "None",
            PmTool::Linear => "Linear",
            PmTool::Github => "Github",
            PmTool::Jira => "Jira",
            PmTool::Gitlab => "Gitlab",
        }
    }
}

/// Project-specific deviations mined from a CLAUDE.md document.
///
/// Every field defaults to its empty value when its governing pattern is not
/// found; mining never fails and the record is always fully populated. The
/// serialized form uses exactly these field names and round-trips through
/// JSON without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomizationRecord {
    pub project_name: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub code_standards: Vec<String>,
    pub forbidden_actions: Vec<String>,
    pub pm_tool: PmTool,
    /// Heading title → raw section text, in order of appearance.
    pub custom_sections: IndexMap<String, String>,
}

/// Exclusion vocabularies the miner filters against. Swappable for tests or
/// future template revisions; defaults carry the v3.1 template phrases.
#[derive(Debug, Clone)]
pub struct MinerPolicy {
    pub code_standard_boilerplate: &'static [&'static str],
    pub forbidden_boilerplate: &'static [&'static str],
    pub standard_sections: &'static [&'static str],
}

impl Default for MinerPolicy {
    fn default() -> Self {
        Self {
            code_standard_boilerplate: DEFAULT_CODE_STANDARDS,
            forbidden_boilerplate: DEFAULT_FORBIDDEN_ACTIONS,
            standard_sections: STANDARD_SECTIONS,
        }
    }
}

// --- Miner ---

/// Mines a document for project-specific customizations.
///
/// Each field is extracted independently and best-effort: a missing or
/// malformed section leaves its field at the default without affecting the
/// rest of the record.
pub struct CustomizationMiner {
    policy: MinerPolicy,
    extractor: SectionExtractor,
}

impl CustomizationMiner {
    pub fn new() -> Self {
        Self::with_policy(MinerPolicy::default())
    }

    pub fn with_policy(policy: MinerPolicy) -> Self {
        Self { policy, extractor: SectionExtractor::new() }
    }

    /// Builds a fully populated record from the document text.
    pub fn mine(&self, document: &str) -> CustomizationRecord {
        let index = DocumentIndex::parse(document);
        let mut record = CustomizationRecord::default();

        self.mine_project_name(&index, &mut record);
        self.mine_context(&index, &mut record);
        self.mine_code_standards(&index, &mut record);
        self.mine_forbidden_actions(&index, &mut record);
        self.mine_pm_tool(&index, &mut record);
        self.mine_custom_sections(&index, &mut record);

        tracing::debug!(
            "Mined record: project '{}', {} standards, {} forbidden, {} custom sections",
            record.project_name,
            record.code_standards.len(),
            record.forbidden_actions.len(),
            record.custom_sections.len()
        );
        record
    }

    /// Project name from the first level-1 title matching
    /// "<name> - Claude Code Configuration".
    fn mine_project_name(&self, index: &DocumentIndex, record: &mut CustomizationRecord) {
        for heading in index.headings().iter().filter(|h| h.level == 1) {
            if let Some(caps) = TITLE_RE.captures(&heading.title) {
                record.project_name = caps[1].trim().to_string();
                return;
            }
        }
    }

    /// Description and tech stack, both from the Context section.
    fn mine_context(&self, index: &DocumentIndex, record: &mut CustomizationRecord) {
        let Some(context) = self.extractor.extract(index, "Context", CONTEXT_STOPS) else {
            return;
        };

        // Description: non-blank lines before the Tech Stack marker,
        // excluding marker lines and pure bracket placeholders.
        let mut desc_lines: Vec<&str> = Vec::new();
        for line in context.lines() {
            let line = line.trim();
            if !line.is_empty() && !line.starts_with("**Tech Stack") && !line.starts_with('[') {
                desc_lines.push(line);
            }
            if line.starts_with("**Tech Stack") {
                break;
            }
        }
        record.description = desc_lines.join(" ");

        if let Some(caps) = TECH_STACK_RE.captures(&context) {
            let tech_text = caps[1].trim().replace(['[', ']'], "");
            record.tech_stack = tech_text.split(',').map(|t| t.trim().to_string()).collect();
        }
    }

    /// Custom code-standards lines: bulleted or "key: value" lines that do
    /// not contain any boilerplate phrase.
    fn mine_code_standards(&self, index: &DocumentIndex, record: &mut CustomizationRecord) {
        let section = self
            .extractor
            .extract(index, "Project-Specific Code Standards", STANDARDS_STOPS)
            .or_else(|| self.extractor.extract(index, "Code Standards", STANDARDS_FALLBACK_STOPS));
        let Some(section) = section else {
            return;
        };

        for line in section.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("**") {
                continue;
            }
            let is_default = self
                .policy
                .code_standard_boilerplate
                .iter()
                .any(|rule| line.contains(rule));
            if is_default {
                continue;
            }
            if line.starts_with('-') || line.starts_with('*') {
                record
                    .code_standards
                    .push(line.trim_start_matches(['-', '*']).trim().to_string());
            } else if line.contains(':') {
                record.code_standards.push(line.to_string());
            }
        }
    }

    /// Custom forbidden-action bullets (cross mark or dash), boilerplate
    /// filtered out, bullet glyphs stripped.
    fn mine_forbidden_actions(&self, index: &DocumentIndex, record: &mut CustomizationRecord) {
        let Some(section) = self.extractor.extract(index, "Forbidden Actions", FORBIDDEN_STOPS)
        else {
            return;
        };

        for line in section.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("**") {
                continue;
            }
            if line.starts_with('❌') || line.starts_with('-') {
                let action = line.trim_start_matches(['❌', '-', ' ']).trim();
                let is_default = self
                    .policy
                    .forbidden_boilerplate
                    .iter()
                    .any(|df| action.contains(df));
                if !action.is_empty() && !is_default {
                    // Strip any residual cross mark left by odd spacing.
                    let action = action.trim_start_matches(['❌', ' ']);
                    record.forbidden_actions.push(action.to_string());
                }
            }
        }
    }

    /// Configured project-management tool, validated against the known set.
    fn mine_pm_tool(&self, index: &DocumentIndex, record: &mut CustomizationRecord) {
        let Some(section) = self.extractor.extract(index, "Project Management", PM_STOPS) else {
            return;
        };
        if let Some(caps) = CONFIGURED_TOOL_RE.captures(&section) {
            record.pm_tool = PmTool::parse(&caps[1]);
        }
    }

    /// Level-2 headings outside the standard vocabulary, title → raw text,
    /// in document order. Each section's stop-set is the standard vocabulary
    /// plus every discovered level-2 title, so a custom section ends at
    /// whichever heading comes next.
    fn mine_custom_sections(&self, index: &DocumentIndex, record: &mut CustomizationRecord) {
        let discovered: Vec<&str> = index
            .headings()
            .iter()
            .filter(|h| h.level == 2)
            .map(|h| h.title.as_str())
            .collect();

        let mut stops: Vec<&str> = self.policy.standard_sections.to_vec();
        stops.extend(&discovered);

        for heading in index.headings().iter().filter(|h| h.level == 2) {
            if self.policy.standard_sections.contains(&heading.title.as_str()) {
                continue;
            }
            if let Some(body) = self.extractor.extract(index, &heading.title, &stops) {
                record.custom_sections.insert(heading.title.clone(), body);
            }
        }
    }
}

impl Default for CustomizationMiner {
    fn default() -> Self {
        Self::new()
    }
}
