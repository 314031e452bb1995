use crate::domain::models::DetectedRuleFile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One supported tool's rule-file convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
pub enum DialectId {
    Cursor,
    Windsurf,
    ClaudeCode,
    GeminiCli,
    Kiro,
}

pub const ALL_DIALECTS: [DialectId; 5] = [
    DialectId::Cursor,
    DialectId::Windsurf,
    DialectId::ClaudeCode,
    DialectId::GeminiCli,
    DialectId::Kiro,
];

impl DialectId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialectId::Cursor => "cursor",
            DialectId::Windsurf => "windsurf",
            DialectId::ClaudeCode => "claude-code",
            DialectId::GeminiCli => "gemini-cli",
            DialectId::Kiro => "kiro",
        }
    }

    pub fn parse(name: &str) -> Option<DialectId> {
        ALL_DIALECTS.into_iter().find(|d| d.as_str() == name)
    }

    /// Canonical rule-file paths, relative to the project root.
    pub fn rule_files(&self) -> &'static [&'static str] {
        match self {
            DialectId::Cursor => &[".cursorrules"],
            DialectId::Windsurf => &[".windsurfrules"],
            DialectId::ClaudeCode => &[".claude/CLAUDE.md", "CLAUDE.md"],
            DialectId::GeminiCli => &[".gemini/rules.md"],
            DialectId::Kiro => &[".kiro/prompts.md"],
        }
    }

    /// Substrings matched against env-var names and probed under $HOME.
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            DialectId::Cursor => &["cursor", "cursorless", ".cursor"],
            DialectId::Windsurf => &["windsurf", "codeium", ".windsurf"],
            DialectId::ClaudeCode => &["claude-code", "anthropic", ".claude"],
            DialectId::GeminiCli => &["gemini", "google-ai", ".gemini"],
            DialectId::Kiro => &["kiro", ".kiro"],
        }
    }

    /// Dialects whose rule file is plain markdown get raw passthrough on
    /// single-file canonicalization and on same-dialect re-render.
    pub fn markdown_native(&self) -> bool {
        matches!(self, DialectId::ClaudeCode)
    }
}

impl std::fmt::Display for DialectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determine which dialect is active in the current environment.
///
/// Absence of markers is a normal outcome, never an error.
pub fn detect(cwd: &Path) -> Option<DialectId> {
    let env_keys: Vec<String> = std::env::vars()
        .map(|(k, _)| k.to_ascii_lowercase())
        .collect();
    for dialect in ALL_DIALECTS {
        for marker in dialect.markers() {
            if env_keys.iter().any(|k| k.contains(marker)) {
                return Some(dialect);
            }
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        for dialect in ALL_DIALECTS {
            for marker in dialect.markers() {
                if PathBuf::from(&home).join(marker).exists() {
                    return Some(dialect);
                }
            }
        }
    }

    for dialect in ALL_DIALECTS {
        for rule_file in dialect.rule_files() {
            if cwd.join(rule_file).exists() {
                return Some(dialect);
            }
        }
    }

    None
}

/// Load raw rule files from `cwd`, for one dialect or for all of them.
///
/// Missing or unreadable candidates are skipped; an empty result means
/// "nothing to share" and is left to the caller to judge.
pub fn find_rule_files(cwd: &Path, dialect: Option<DialectId>) -> Vec<DetectedRuleFile> {
    let dialects: Vec<DialectId> = match dialect {
        Some(d) => vec![d],
        None => ALL_DIALECTS.to_vec(),
    };

    let mut found = Vec::new();
    for d in dialects {
        for rule_file in d.rule_files() {
            let path = cwd.join(rule_file);
            if !path.is_file() {
                continue;
            }
            let Ok(raw_content) = std::fs::read_to_string(&path) else {
                continue;
            };
            found.push(DetectedRuleFile {
                dialect: d,
                relative_path: rule_file.to_string(),
                size_bytes: raw_content.len() as u64,
                raw_content,
            });
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_names_round_trip() {
        for d in ALL_DIALECTS {
            assert_eq!(DialectId::parse(d.as_str()), Some(d));
        }
        assert_eq!(DialectId::parse("emacs"), None);
    }

    #[test]
    fn reader_skips_missing_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(find_rule_files(tmp.path(), None).is_empty());
        assert!(find_rule_files(tmp.path(), Some(DialectId::Cursor)).is_empty());
    }

    #[test]
    fn reader_scopes_to_requested_dialect() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(".cursorrules"), "- be kind\n").unwrap();
        std::fs::write(tmp.path().join(".windsurfrules"), "- be fast\n").unwrap();

        let all = find_rule_files(tmp.path(), None);
        assert_eq!(all.len(), 2);

        let cursor_only = find_rule_files(tmp.path(), Some(DialectId::Cursor));
        assert_eq!(cursor_only.len(), 1);
        assert_eq!(cursor_only[0].dialect, DialectId::Cursor);
        assert_eq!(cursor_only[0].relative_path, ".cursorrules");
        assert_eq!(cursor_only[0].size_bytes, 11);
    }

    #[test]
    fn claude_code_probes_both_locations() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(".claude")).unwrap();
        std::fs::write(tmp.path().join(".claude/CLAUDE.md"), "a").unwrap();
        std::fs::write(tmp.path().join("CLAUDE.md"), "b").unwrap();

        let found = find_rule_files(tmp.path(), Some(DialectId::ClaudeCode));
        let paths: Vec<&str> = found.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec![".claude/CLAUDE.md", "CLAUDE.md"]);
    }
}
