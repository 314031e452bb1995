use crate::domain::models::{
    DetectedRuleFile, RuleBuckets, UniversalRuleFormat, UrfMetadata, URF_FORMAT_VERSION,
};
use crate::services::storage::{config_dir, now_secs};
use serde::Deserialize;
use std::path::Path;

pub const FILE_HEADER_PREFIX: &str = "### File: ";
pub const FILE_SEPARATOR: &str = "---";

#[derive(thiserror::Error, Debug)]
pub enum CanonError {
    #[error("no rule files to canonicalize")]
    NoRules,
}

/// Fallback keyword sets for bullet lines outside any recognized section.
/// User-editable via `~/.config/ruleshare/keywords.toml`; the classifier
/// itself stays fixed, only the vocabulary moves.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeywordSets {
    pub code_style: Vec<String>,
    pub behavior: Vec<String>,
    pub project_specific: Vec<String>,
}

impl Default for KeywordSets {
    fn default() -> Self {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        KeywordSets {
            code_style: owned(&[
                "indent", "space", "tab", "semicolon", "quote", "bracket", "camelcase",
                "pascalcase", "snake_case", "naming", "style", "format", "lint", "prettier",
                "eslint", "typescript", "javascript",
            ]),
            behavior: owned(&[
                "always", "never", "must", "should", "avoid", "prefer", "don't", "do not",
                "be", "act", "respond", "explain", "concise", "verbose", "detailed", "brief",
            ]),
            project_specific: owned(&[
                "project", "directory", "structure", "architecture", "framework", "library",
                "dependency", "module", "api", "database", "schema", "model",
            ]),
        }
    }
}

pub fn load_keyword_sets() -> KeywordSets {
    let Ok(dir) = config_dir() else {
        return KeywordSets::default();
    };
    keyword_sets_from(&dir.join("keywords.toml"))
}

/// A missing or malformed override file falls back to the built-in
/// vocabulary; a bad override must never break sharing.
pub fn keyword_sets_from(path: &Path) -> KeywordSets {
    if !path.exists() {
        return KeywordSets::default();
    }
    std::fs::read_to_string(path)
        .ok()
        .and_then(|raw| toml::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Convert raw dialect files into the Universal Rule Format.
///
/// The categorized buckets are heuristic and lossy on structure only:
/// `raw` always retains the complete source content.
pub fn parse_to_urf(
    files: &[DetectedRuleFile],
    keywords: &KeywordSets,
) -> Result<UniversalRuleFormat, CanonError> {
    if files.is_empty() {
        return Err(CanonError::NoRules);
    }

    let source_dialect = files[0].dialect;
    let total_size_bytes = files.iter().map(|f| f.size_bytes).sum();

    // A single markdown-native file travels as-is; anything else gets
    // per-file headers so the origin of each chunk survives concatenation.
    let raw = if files.len() == 1 && source_dialect.markdown_native() {
        files[0].raw_content.clone()
    } else {
        files
            .iter()
            .map(|f| format!("{}{}\n\n{}", FILE_HEADER_PREFIX, f.relative_path, f.raw_content))
            .collect::<Vec<_>>()
            .join(&format!("\n\n{}\n\n", FILE_SEPARATOR))
    };

    let mut rules = categorize(&raw, keywords);
    rules.raw = raw;

    Ok(UniversalRuleFormat {
        format_version: URF_FORMAT_VERSION.to_string(),
        metadata: UrfMetadata {
            source_dialect: source_dialect.as_str().to_string(),
            created_at: now_secs().to_string(),
            total_size_bytes,
            file_count: files.len(),
        },
        rules,
    })
}

/// Italic one-liners like `*Imported from cursor*` are provenance metadata,
/// not rules.
fn is_metadata_line(trimmed: &str) -> bool {
    trimmed.starts_with('*')
        && trimmed.ends_with('*')
        && trimmed.len() > 1
        && !trimmed.starts_with("* ")
}

fn bullet_text(trimmed: &str) -> Option<&str> {
    let rest = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

#[derive(Clone, Copy, PartialEq)]
enum Bucket {
    General,
    CodeStyle,
    Behavior,
    ProjectSpecific,
}

fn section_bucket(heading: &str) -> Option<Bucket> {
    let h = heading.to_lowercase();
    let any = |needles: &[&str]| needles.iter().any(|n| h.contains(n));
    if any(&["code", "style", "format"]) {
        Some(Bucket::CodeStyle)
    } else if any(&["behavior", "response"]) {
        Some(Bucket::Behavior)
    } else if any(&["project", "context", "specific"]) {
        Some(Bucket::ProjectSpecific)
    } else if any(&["general", "guideline"]) {
        Some(Bucket::General)
    } else {
        None
    }
}

fn keyword_bucket(rule: &str, keywords: &KeywordSets) -> Bucket {
    let lower = rule.to_lowercase();
    let hits = |set: &[String]| set.iter().any(|k| lower.contains(k.as_str()));
    if hits(&keywords.code_style) {
        Bucket::CodeStyle
    } else if hits(&keywords.behavior) {
        Bucket::Behavior
    } else if hits(&keywords.project_specific) {
        Bucket::ProjectSpecific
    } else {
        Bucket::General
    }
}

/// Line-oriented, order-preserving decomposition of `content` into the four
/// categorized buckets. `raw` is left empty for the caller to fill.
fn categorize(content: &str, keywords: &KeywordSets) -> RuleBuckets {
    let mut buckets = RuleBuckets::default();
    let mut current_section: Option<Bucket> = None;
    let mut in_code_block = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            continue;
        }

        if trimmed.starts_with("##") && !trimmed.starts_with("###") {
            let heading = trimmed.trim_start_matches('#').trim();
            current_section = section_bucket(heading);
            continue;
        }

        // Blank lines, file headers, horizontal rules and provenance
        // markers stay in `raw` but carry no categorization signal.
        if trimmed.is_empty()
            || trimmed.starts_with("###")
            || trimmed.starts_with(FILE_SEPARATOR)
            || is_metadata_line(trimmed)
        {
            continue;
        }

        let Some(rule) = bullet_text(trimmed) else {
            continue;
        };

        let bucket = match current_section {
            Some(section) => section,
            None => keyword_bucket(rule, keywords),
        };
        match bucket {
            Bucket::General => buckets.general.push(rule.to_string()),
            Bucket::CodeStyle => buckets.code_style.push(rule.to_string()),
            Bucket::Behavior => buckets.behavior.push(rule.to_string()),
            Bucket::ProjectSpecific => buckets.project_specific.push(rule.to_string()),
        }
    }

    buckets
}

/// Drop the project-specific bucket and scrub its rule lines out of `raw`.
/// Exclusion has to be real: a recipient must not recover the excluded rules
/// from the lossless fallback.
pub fn strip_project_specific(urf: &mut UniversalRuleFormat) {
    let dropped: Vec<String> = std::mem::take(&mut urf.rules.project_specific);
    if dropped.is_empty() {
        return;
    }
    let kept: Vec<&str> = urf
        .rules
        .raw
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !bullet_text(trimmed).is_some_and(|rule| dropped.iter().any(|d| d == rule))
        })
        .collect();
    urf.rules.raw = kept.join("\n");
}
