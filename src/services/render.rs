use crate::dialect::DialectId;
use crate::domain::models::{ConvertedRuleSet, RuleFile, UniversalRuleFormat};
use crate::services::canon::{FILE_HEADER_PREFIX, FILE_SEPARATOR};
use crate::services::storage::{date_stamp, now_secs};

type Renderer = fn(&UniversalRuleFormat) -> ConvertedRuleSet;

/// Closed dispatch table; each renderer is independently testable.
fn renderer_for(target: DialectId) -> Renderer {
    match target {
        DialectId::Cursor => to_cursor,
        DialectId::Windsurf => to_windsurf,
        DialectId::ClaudeCode => to_claude_code,
        DialectId::GeminiCli => to_gemini_cli,
        DialectId::Kiro => to_kiro,
    }
}

/// Convert a URF document into a target dialect's file set.
///
/// Unknown target names fall back to one generic file holding `raw`;
/// content is never silently dropped.
pub fn from_urf(urf: &UniversalRuleFormat, target: &str) -> ConvertedRuleSet {
    match DialectId::parse(target) {
        Some(dialect) => renderer_for(dialect)(urf),
        None => ConvertedRuleSet {
            dialect: target.to_string(),
            files: vec![RuleFile {
                relative_path: ".ai-rules".to_string(),
                content: urf.rules.raw.clone(),
            }],
        },
    }
}

fn provenance(urf: &UniversalRuleFormat) -> String {
    format!(
        "Imported from {} on {}",
        urf.metadata.source_dialect,
        date_stamp(now_secs())
    )
}

fn push_section(out: &mut Vec<String>, heading: &str, rules: &[String], bullet: &str) {
    if rules.is_empty() {
        return;
    }
    out.push(heading.to_string());
    out.extend(rules.iter().map(|r| format!("{} {}", bullet, r)));
    out.push(String::new());
}

/// When categorization found nothing, a template would otherwise emit an
/// empty document; embed `raw` verbatim instead.
fn raw_fallback(out: &mut Vec<String>, urf: &UniversalRuleFormat) {
    out.push(urf.rules.raw.clone());
}

fn to_cursor(urf: &UniversalRuleFormat) -> ConvertedRuleSet {
    let mut out = vec![
        "# Cursor Rules".to_string(),
        format!("# {}", provenance(urf)),
        String::new(),
    ];
    if urf.rules.categorized_count() == 0 {
        raw_fallback(&mut out, urf);
    } else {
        push_section(&mut out, "## General Guidelines", &urf.rules.general, "-");
        push_section(&mut out, "## Code Style", &urf.rules.code_style, "-");
        push_section(&mut out, "## Assistant Behavior", &urf.rules.behavior, "-");
        push_section(&mut out, "## Project Specific", &urf.rules.project_specific, "-");
    }
    single_file("cursor", ".cursorrules", out)
}

fn to_windsurf(urf: &UniversalRuleFormat) -> ConvertedRuleSet {
    let mut out = vec![
        "# Windsurf Configuration".to_string(),
        format!("# {}", provenance(urf)),
        String::new(),
    ];
    if urf.rules.categorized_count() == 0 {
        raw_fallback(&mut out, urf);
    } else {
        out.push("assistant_behavior:".to_string());
        let all = urf
            .rules
            .general
            .iter()
            .chain(&urf.rules.behavior)
            .chain(&urf.rules.code_style)
            .chain(&urf.rules.project_specific);
        out.extend(all.map(|r| format!("  - {}", r)));
    }
    single_file("windsurf", ".windsurfrules", out)
}

fn to_claude_code(urf: &UniversalRuleFormat) -> ConvertedRuleSet {
    // Same-dialect round trip: hand back raw with only the concatenation
    // markers stripped, to minimize churn.
    if urf.metadata.source_dialect == DialectId::ClaudeCode.as_str() {
        let cleaned: Vec<&str> = urf
            .rules
            .raw
            .lines()
            .filter(|l| !l.starts_with(FILE_HEADER_PREFIX) && l.trim() != FILE_SEPARATOR)
            .collect();
        return single_file(
            "claude-code",
            ".claude/CLAUDE.md",
            vec![cleaned.join("\n").trim().to_string()],
        );
    }

    let mut out = vec![
        "# Claude Instructions".to_string(),
        format!("*{}*", provenance(urf)),
        String::new(),
    ];
    if urf.rules.categorized_count() == 0 {
        raw_fallback(&mut out, urf);
    } else {
        push_section(&mut out, "## General Guidelines", &urf.rules.general, "-");
        push_section(&mut out, "## Code Style & Formatting", &urf.rules.code_style, "-");
        push_section(&mut out, "## Response Behavior", &urf.rules.behavior, "-");
        push_section(&mut out, "## Project Context", &urf.rules.project_specific, "-");
    }
    single_file("claude-code", ".claude/CLAUDE.md", out)
}

fn to_gemini_cli(urf: &UniversalRuleFormat) -> ConvertedRuleSet {
    let mut out = vec![
        "# Gemini Rules".to_string(),
        format!("*{}*", provenance(urf)),
        String::new(),
    ];
    if urf.rules.categorized_count() == 0 {
        raw_fallback(&mut out, urf);
    } else {
        out.push("## Response Format".to_string());
        out.push("Always follow these guidelines when responding:".to_string());
        out.push(String::new());
        if !urf.rules.behavior.is_empty() {
            out.extend(urf.rules.behavior.iter().map(|r| format!("* {}", r)));
            out.push(String::new());
        }
        if !urf.rules.code_style.is_empty() {
            out.push("## Code Style".to_string());
            out.push("When writing code, adhere to:".to_string());
            out.extend(urf.rules.code_style.iter().map(|r| format!("* {}", r)));
            out.push(String::new());
        }
        if !urf.rules.general.is_empty() || !urf.rules.project_specific.is_empty() {
            out.push("## Additional Context".to_string());
            out.extend(
                urf.rules
                    .general
                    .iter()
                    .chain(&urf.rules.project_specific)
                    .map(|r| format!("* {}", r)),
            );
        }
    }
    single_file("gemini-cli", ".gemini/rules.md", out)
}

fn to_kiro(urf: &UniversalRuleFormat) -> ConvertedRuleSet {
    let mut out = vec![
        "# Kiro Prompts".to_string(),
        format!("*{}*", provenance(urf)),
        String::new(),
    ];
    if urf.rules.categorized_count() == 0 {
        raw_fallback(&mut out, urf);
    } else {
        // The template leads with behavior; the section is always present,
        // with a documented default line when the bucket is empty.
        out.push("## Default Behavior".to_string());
        if urf.rules.behavior.is_empty() {
            out.push("- Act as a helpful assistant".to_string());
        } else {
            out.extend(urf.rules.behavior.iter().map(|r| format!("- {}", r)));
        }
        out.push(String::new());
        push_section(&mut out, "## Coding Standards", &urf.rules.code_style, "-");
        push_section(&mut out, "## Project Rules", &urf.rules.project_specific, "-");
        push_section(&mut out, "## General Guidelines", &urf.rules.general, "-");
    }
    single_file("kiro", ".kiro/prompts.md", out)
}

fn single_file(dialect: &str, path: &str, lines: Vec<String>) -> ConvertedRuleSet {
    ConvertedRuleSet {
        dialect: dialect.to_string(),
        files: vec![RuleFile {
            relative_path: path.to_string(),
            content: lines.join("\n"),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{RuleBuckets, UrfMetadata, URF_FORMAT_VERSION};

    fn urf(source: &str, rules: RuleBuckets) -> UniversalRuleFormat {
        UniversalRuleFormat {
            format_version: URF_FORMAT_VERSION.to_string(),
            metadata: UrfMetadata {
                source_dialect: source.to_string(),
                created_at: "0".to_string(),
                total_size_bytes: rules.raw.len() as u64,
                file_count: 1,
            },
            rules,
        }
    }

    fn sample_buckets() -> RuleBuckets {
        RuleBuckets {
            general: vec!["Be concise".to_string()],
            code_style: vec!["Use 2-space indent".to_string()],
            behavior: vec![],
            project_specific: vec![],
            raw: "## General Guidelines\n- Be concise\n## Code Style\n- Use 2-space indent"
                .to_string(),
        }
    }

    #[test]
    fn cursor_template_places_buckets_under_headings() {
        let set = from_urf(&urf("claude-code", sample_buckets()), "cursor");
        assert_eq!(set.dialect, "cursor");
        assert_eq!(set.files[0].relative_path, ".cursorrules");
        let content = &set.files[0].content;
        assert!(content.contains("## General Guidelines\n- Be concise"));
        assert!(content.contains("## Code Style\n- Use 2-space indent"));
        assert!(!content.contains("## Assistant Behavior"));
    }

    #[test]
    fn kiro_emits_default_behavior_line_when_bucket_is_empty() {
        let set = from_urf(&urf("cursor", sample_buckets()), "kiro");
        let content = &set.files[0].content;
        assert!(content.contains("## Default Behavior\n- Act as a helpful assistant"));
        assert!(content.contains("## Coding Standards\n- Use 2-space indent"));
    }

    #[test]
    fn empty_buckets_embed_raw_verbatim() {
        let rules = RuleBuckets {
            raw: "freeform content with no bullets".to_string(),
            ..RuleBuckets::default()
        };
        for target in ["cursor", "windsurf", "gemini-cli", "kiro"] {
            let set = from_urf(&urf("windsurf", rules.clone()), target);
            assert!(
                set.files[0].content.contains("freeform content with no bullets"),
                "{} dropped raw",
                target
            );
        }
    }

    #[test]
    fn unknown_target_falls_back_to_generic_file() {
        let set = from_urf(&urf("cursor", sample_buckets()), "zed");
        assert_eq!(set.dialect, "zed");
        assert_eq!(set.files[0].relative_path, ".ai-rules");
        assert_eq!(set.files[0].content, sample_buckets().raw);
    }

    #[test]
    fn claude_round_trip_strips_concatenation_markers() {
        let rules = RuleBuckets {
            raw: "### File: .claude/CLAUDE.md\n\n# Project\n- keep it simple\n\n---\n\n### File: CLAUDE.md\n\n- second file".to_string(),
            ..RuleBuckets::default()
        };
        let set = from_urf(&urf("claude-code", rules), "claude-code");
        let content = &set.files[0].content;
        assert!(!content.contains("### File:"));
        assert!(!content.contains("---"));
        assert!(content.contains("# Project\n- keep it simple"));
        assert!(content.contains("- second file"));
    }

    #[test]
    fn windsurf_combines_all_buckets_in_order() {
        let rules = RuleBuckets {
            general: vec!["g".to_string()],
            behavior: vec!["b".to_string()],
            code_style: vec!["c".to_string()],
            project_specific: vec!["p".to_string()],
            raw: "x".to_string(),
        };
        let set = from_urf(&urf("cursor", rules), "windsurf");
        let content = &set.files[0].content;
        assert!(content.contains("assistant_behavior:\n  - g\n  - b\n  - c\n  - p"));
    }

    #[test]
    fn gemini_always_opens_with_response_format() {
        let set = from_urf(&urf("cursor", sample_buckets()), "gemini-cli");
        let content = &set.files[0].content;
        assert!(content.contains("## Response Format"));
        assert!(content.contains("* Be concise"));
        assert!(content.contains("* Use 2-space indent"));
    }
}
