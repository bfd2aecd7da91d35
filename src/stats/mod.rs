// src/stats/mod.rs
//
// Session statistics display. Formatting only: token counts are estimated
// from file sizes (bytes / 4), and the telemetry report is rendered from a
// flat counters mapping scraped elsewhere. No shared data model with the
// extraction core.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BYTES_PER_TOKEN: u64 = 4;
const TOTAL_CONTEXT_TOKENS: u64 = 200_000;
const SYSTEM_OVERHEAD_TOKENS: u64 = 50_000;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Token estimate for a single file. A missing file yields zeros rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTokens {
    pub path: String,
    pub bytes: u64,
    pub tokens: u64,
    pub exists: bool,
}

/// Estimates token count from file size. Standard estimation: bytes / 4.
pub fn measure_file(path: &Path) -> FileTokens {
    // Not named `display`: tracing's event macros import
    // `tracing::field::display` internally and would shadow the local.
    let path_str = path.display().to_string();
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => FileTokens {
            path: path_str,
            bytes: meta.len(),
            tokens: meta.len() / BYTES_PER_TOKEN,
            exists: true,
        },
        _ => {
            tracing::debug!("File not found for token estimate: {}", path_str);
            FileTokens { path: path_str, bytes: 0, tokens: 0, exists: false }
        }
    }
}

/// Renders the session-start context budget report from the navigator
/// document and CLAUDE.md sizes.
pub fn render_context_report(navigator: &Path, claude_md: &Path) -> String {
    let navigator = measure_file(navigator);
    let claude_md = measure_file(claude_md);

    let total_tokens = navigator.tokens + claude_md.tokens;
    let available = TOTAL_CONTEXT_TOKENS
        .saturating_sub(SYSTEM_OVERHEAD_TOKENS)
        .saturating_sub(total_tokens);
    let percent = available * 100 / TOTAL_CONTEXT_TOKENS;

    let mut out = String::new();
    out.push_str(&format!("Navigator ({}):\n", navigator.path));
    if navigator.exists {
        out.push_str(&format!(
            "  Size: {} bytes = {} tokens\n",
            group_thousands(navigator.bytes),
            group_thousands(navigator.tokens)
        ));
    } else {
        out.push_str("  ❌ Not found\n");
    }

    out.push_str("\nCLAUDE.md (auto-loaded):\n");
    if claude_md.exists {
        out.push_str(&format!(
            "  Size: {} bytes = {} tokens\n",
            group_thousands(claude_md.bytes),
            group_thousands(claude_md.tokens)
        ));
    } else {
        out.push_str("  ⚠️  Not found (recommended to create)\n");
    }

    out.push_str(&format!("\n{RULE}\n"));
    out.push_str(&format!(
        "Total documentation:     {} tokens\n",
        group_thousands(total_tokens)
    ));
    out.push_str(&format!(
        "Available for work:      {} tokens ({}%)\n",
        group_thousands(available),
        percent
    ));
    out.push_str(&format!("{RULE}\n"));
    out
}

/// Renders real-time session statistics from a flat counters mapping
/// (token counts, cost in micro-USD, active seconds). Unknown counters are
/// ignored; missing counters read as zero.
pub fn render_session_stats(counters: &BTreeMap<String, u64>) -> String {
    let get = |key: &str| counters.get(key).copied().unwrap_or(0);

    let input = get("input_tokens");
    let output_tokens = get("output_tokens");
    let cache_read = get("cache_read_tokens");
    let fresh = input.saturating_sub(cache_read);
    let cost_microusd = get("cost_microusd");
    let active_seconds = get("active_time_seconds");

    let mut out = String::new();
    out.push_str(&format!("Session Statistics\n{RULE}\n\n"));

    out.push_str(&format!("Input Tokens:  {}\n", group_thousands(input)));
    out.push_str(&format!("  ├─ Cache read:  {} (free)\n", group_thousands(cache_read)));
    out.push_str(&format!("  └─ Fresh:       {} (charged)\n\n", group_thousands(fresh)));

    out.push_str(&format!("Output Tokens: {}\n\n", group_thousands(output_tokens)));

    if input > 0 {
        let hit_rate = cache_read as f64 / input as f64 * 100.0;
        out.push_str(&format!("Cache Hit Rate: {hit_rate:.1}%\n\n"));
    }

    out.push_str(&format!(
        "Session Cost:  ${:.4}\n\n",
        cost_microusd as f64 / 1_000_000.0
    ));

    out.push_str(&format!(
        "Active Time:   {}m {}s\n\n",
        active_seconds / 60,
        active_seconds % 60
    ));

    let used = input + output_tokens;
    let available = TOTAL_CONTEXT_TOKENS.saturating_sub(used);
    let percent = available * 100 / TOTAL_CONTEXT_TOKENS;
    out.push_str("Context Usage:\n");
    out.push_str(&format!("  ├─ Used:        {} tokens\n", group_thousands(used)));
    out.push_str(&format!(
        "  └─ Available:   {} tokens ({}%)\n\n",
        group_thousands(available),
        percent
    ));

    out.push_str(&format!("{RULE}\n"));
    out
}

/// Formats an integer with comma thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_measure_missing_file() {
        let measured = measure_file(Path::new("definitely/not/a/real/file.md"));
        assert!(!measured.exists);
        assert_eq!(measured.bytes, 0);
        assert_eq!(measured.tokens, 0);
        assert_eq!(measured.path, "definitely/not/a/real/file.md");
    }

    #[test]
    fn test_measure_file_token_estimate() {
        let path = std::env::temp_dir().join("claude_updater_stats_test.md");
        fs::write(&path, vec![b'x'; 400]).unwrap();

        let measured = measure_file(&path);
        assert!(measured.exists);
        assert_eq!(measured.bytes, 400);
        assert_eq!(measured.tokens, 100, "bytes / 4");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_session_stats_rendering() {
        let counters: BTreeMap<String, u64> = [
            ("input_tokens".to_string(), 10_000),
            ("output_tokens".to_string(), 2_000),
            ("cache_read_tokens".to_string(), 5_000),
            ("cost_microusd".to_string(), 123_400),
            ("active_time_seconds".to_string(), 125),
        ]
        .into_iter()
        .collect();

        let report = render_session_stats(&counters);
        assert!(report.contains("Input Tokens:  10,000"));
        assert!(report.contains("Fresh:       5,000"));
        assert!(report.contains("Cache Hit Rate: 50.0%"));
        assert!(report.contains("$0.1234"));
        assert!(report.contains("Active Time:   2m 5s"));
        assert!(report.contains("Used:        12,000 tokens"));
    }

    #[test]
    fn test_session_stats_with_empty_counters() {
        let report = render_session_stats(&BTreeMap::new());
        assert!(report.contains("Input Tokens:  0"));
        assert!(!report.contains("Cache Hit Rate"), "no rate without input tokens");
    }
}
