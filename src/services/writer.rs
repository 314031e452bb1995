use crate::dialect::DialectId;
use crate::domain::models::ConvertedRuleSet;
use crate::services::storage::now_secs;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Persist a rendered rule set under `base`, creating parent directories
/// and overwriting existing files. Returns the paths written.
pub fn write(rule_set: &ConvertedRuleSet, base: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for file in &rule_set.files {
        let path = base.join(&file.relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        std::fs::write(&path, &file.content)
            .with_context(|| format!("write rule file {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Copy every existing canonical rule file of `dialect` to a sibling path
/// with a sortable timestamp suffix. Must run before the corresponding
/// write; nothing existing to back up is a no-op, not an error.
pub fn backup_existing(dialect: DialectId, base: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let stamp = now_secs();
    let mut backups = Vec::new();
    for rule_file in dialect.rule_files() {
        let source = base.join(rule_file);
        if !source.is_file() {
            continue;
        }
        let backup = PathBuf::from(format!("{}.backup-{}", source.display(), stamp));
        std::fs::copy(&source, &backup)
            .with_context(|| format!("back up rule file {}", source.display()))?;
        backups.push(backup);
    }
    Ok(backups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RuleFile;

    fn rule_set(path: &str, content: &str) -> ConvertedRuleSet {
        ConvertedRuleSet {
            dialect: "kiro".to_string(),
            files: vec![RuleFile {
                relative_path: path.to_string(),
                content: content.to_string(),
            }],
        }
    }

    #[test]
    fn write_creates_parent_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let written = write(&rule_set(".kiro/prompts.md", "# Kiro"), tmp.path()).unwrap();
        assert_eq!(written.len(), 1);
        let content = std::fs::read_to_string(tmp.path().join(".kiro/prompts.md")).unwrap();
        assert_eq!(content, "# Kiro");
    }

    #[test]
    fn write_overwrites_existing_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(".cursorrules"), "old").unwrap();
        write(&rule_set(".cursorrules", "new"), tmp.path()).unwrap();
        let content = std::fs::read_to_string(tmp.path().join(".cursorrules")).unwrap();
        assert_eq!(content, "new");
    }

    #[test]
    fn backup_on_missing_target_touches_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backups = backup_existing(DialectId::Cursor, tmp.path()).unwrap();
        assert!(backups.is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn backup_preserves_original_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(".cursorrules"), "precious").unwrap();

        let backups = backup_existing(DialectId::Cursor, tmp.path()).unwrap();
        assert_eq!(backups.len(), 1);
        assert!(backups[0]
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(".cursorrules.backup-"));

        write(&rule_set(".cursorrules", "replacement"), tmp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), "precious");
    }

    #[test]
    fn backup_covers_every_canonical_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(".claude")).unwrap();
        std::fs::write(tmp.path().join(".claude/CLAUDE.md"), "a").unwrap();
        std::fs::write(tmp.path().join("CLAUDE.md"), "b").unwrap();

        let backups = backup_existing(DialectId::ClaudeCode, tmp.path()).unwrap();
        assert_eq!(backups.len(), 2);
    }
}
