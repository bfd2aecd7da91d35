// src/template/mod.rs

use crate::extractors::customizations::{CustomizationRecord, PmTool};

// --- Placeholder Markers ---
// Literal template text replaced during rebuild. A placeholder whose record
// field is empty stays visible verbatim in the output, signaling that the
// value still needs manual input.
pub const PROJECT_NAME_PLACEHOLDER: &str = "[Project Name]";
pub const DESCRIPTION_PLACEHOLDER: &str =
    "[Brief project description - explain what this project does]";
pub const TECH_STACK_PLACEHOLDER: &str =
    "[List your technologies, e.g., Next.js, TypeScript, PostgreSQL]";
// One marker per field: standards and forbidden actions are replaced
// independently, so insertion order does not matter. Legacy templates
// carrying only the shared violations marker must add the standards marker
// to receive a code-standards subsection.
pub const CODE_STANDARDS_MARKER: &str = "[Add project-specific standards here]";
pub const FORBIDDEN_ACTIONS_MARKER: &str = "[Add project-specific violations here]";
pub const PM_TOOL_PLACEHOLDER: &str =
    "**Configured Tool**: [Linear / GitHub Issues / Jira / GitLab / None]";
pub const PM_CONFIG_PLACEHOLDER: &str = "\"project_management\": \"none\"";

const CUSTOM_SECTIONS_HEADER: &str = "\n\n---\n\n## Custom Project Sections\n\n";

/// Re-applies a customization record onto a blank template document.
///
/// Every substitution is independently optional: an empty field skips its
/// replacement and the template text is left untouched. There is no
/// partial-failure mode; the output is always a complete document.
pub struct TemplateRebuilder;

impl TemplateRebuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn rebuild(&self, record: &CustomizationRecord, template: &str) -> String {
        let mut output = template.to_string();

        if !record.project_name.is_empty() {
            output = output.replace(PROJECT_NAME_PLACEHOLDER, &record.project_name);
        }

        if !record.description.is_empty() {
            output = output.replace(DESCRIPTION_PLACEHOLDER, &record.description);
        }

        if !record.tech_stack.is_empty() {
            output = output.replace(TECH_STACK_PLACEHOLDER, &record.tech_stack.join(", "));
        }

        if !record.code_standards.is_empty() && output.contains(CODE_STANDARDS_MARKER) {
            let mut block = String::from("### Additional Project Standards\n");
            for standard in &record.code_standards {
                block.push_str("\n- ");
                block.push_str(standard);
            }
            output = output.replace(CODE_STANDARDS_MARKER, &block);
        }

        if !record.forbidden_actions.is_empty() && output.contains(FORBIDDEN_ACTIONS_MARKER) {
            let mut block = String::from("### Additional Forbidden Actions\n");
            for action in &record.forbidden_actions {
                block.push_str("\n- ❌ ");
                block.push_str(action);
            }
            output = output.replace(FORBIDDEN_ACTIONS_MARKER, &block);
        }

        if record.pm_tool != PmTool::None {
            // Two independent substitutions over the same logical fact: the
            // display line and the configuration value.
            output = output.replace(
                PM_TOOL_PLACEHOLDER,
                &format!("**Configured Tool**: {}", record.pm_tool.display_name()),
            );
            output = output.replace(
                PM_CONFIG_PLACEHOLDER,
                &format!("\"project_management\": \"{}\"", record.pm_tool.as_str()),
            );
        }

        if !record.custom_sections.is_empty() {
            output.push_str(CUSTOM_SECTIONS_HEADER);
            for (title, body) in &record.custom_sections {
                output.push_str(&format!("### {title}\n\n{body}\n\n"));
            }
        }

        tracing::debug!("Rebuilt document: {} bytes", output.len());
        output
    }
}

impl Default for TemplateRebuilder {
    fn default() -> Self {
        Self::new()
    }
}
