use crate::dialect::{self, DialectId};
use crate::domain::models::UniversalRuleFormat;
use crate::services::canon::{load_keyword_sets, parse_to_urf, strip_project_specific};
use crate::services::codes::{generate_password, validate_share_code};
use crate::services::relay::{PreviewMetadata, PublishRequest, Relay};
use crate::services::storage::audit;
use crate::services::{crypto, render, writer};
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};

const PREVIEW_CHARS: usize = 100;

pub struct ShareOptions {
    pub dialect: Option<DialectId>,
    pub expires_in_days: u32,
    pub max_uses: Option<u32>,
    pub skip_project_rules: bool,
}

#[derive(Debug)]
pub struct ShareOutcome {
    pub share_code: String,
    pub password: String,
    pub source_dialect: String,
    pub files: Vec<String>,
    pub total_size_bytes: u64,
    pub expires_at: String,
}

pub struct ImportOptions {
    pub target: Option<DialectId>,
}

#[derive(Debug)]
pub struct ImportOutcome {
    pub source_dialect: String,
    pub target_dialect: DialectId,
    pub files_written: Vec<PathBuf>,
    pub backups: Vec<PathBuf>,
}

/// Build the URF for the share flow: read, canonicalize, apply options.
/// Split out so the offline `convert` path reuses it.
pub fn canonicalize_local(
    cwd: &Path,
    dialect: Option<DialectId>,
    skip_project_rules: bool,
) -> anyhow::Result<(UniversalRuleFormat, Vec<String>)> {
    let files = dialect::find_rule_files(cwd, dialect);
    if files.is_empty() {
        bail!(
            "no rule files found under {} (expected e.g. .cursorrules, .windsurfrules, .claude/CLAUDE.md)",
            cwd.display()
        );
    }
    let paths: Vec<String> = files.iter().map(|f| f.relative_path.clone()).collect();
    let keywords = load_keyword_sets();
    let mut urf = parse_to_urf(&files, &keywords)?;
    if skip_project_rules {
        strip_project_specific(&mut urf);
    }
    Ok((urf, paths))
}

/// Share flow: detect, read, canonicalize, encrypt, publish.
///
/// Password and share code are generated once and used once; a relay
/// failure is terminal, with no retry under fresh credentials.
pub fn share_rules(
    relay: &dyn Relay,
    cwd: &Path,
    opts: &ShareOptions,
) -> anyhow::Result<ShareOutcome> {
    let (urf, paths) = canonicalize_local(cwd, opts.dialect, opts.skip_project_rules)?;
    let preview: String = urf.rules.raw.chars().take(PREVIEW_CHARS).collect();

    let password = generate_password();
    let plaintext = serde_json::to_string(&urf).context("serialize rule document")?;
    let payload = crypto::encrypt(&plaintext, &password)?;

    let receipt = relay.publish(&PublishRequest {
        payload,
        source_dialect: urf.metadata.source_dialect.clone(),
        rule_metadata: Some(PreviewMetadata {
            file_count: urf.metadata.file_count,
            total_size_bytes: urf.metadata.total_size_bytes,
            preview: Some(preview),
        }),
        expires_in_days: opts.expires_in_days,
        max_uses: opts.max_uses,
    })?;

    audit(
        "share",
        serde_json::json!({
            "share_code": receipt.share_code,
            "source_dialect": urf.metadata.source_dialect,
            "file_count": urf.metadata.file_count,
        }),
    );

    Ok(ShareOutcome {
        share_code: receipt.share_code,
        password,
        source_dialect: urf.metadata.source_dialect,
        files: paths,
        total_size_bytes: urf.metadata.total_size_bytes,
        expires_at: receipt.expires_at,
    })
}

/// Import flow: validate, fetch, decrypt, resolve target, back up, render,
/// write, then a fire-and-forget usage increment.
pub fn import_rules(
    relay: &dyn Relay,
    cwd: &Path,
    share_code: &str,
    password: &str,
    opts: &ImportOptions,
) -> anyhow::Result<ImportOutcome> {
    if !validate_share_code(share_code) {
        bail!(
            "invalid share code format (expected {}-XXXX-XXXX)",
            crate::services::codes::SHARE_CODE_PREFIX
        );
    }

    let share = relay.fetch(share_code)?;
    let plaintext = crypto::decrypt(&share.payload, password)?;
    let urf: UniversalRuleFormat =
        serde_json::from_str(&plaintext).context("parse decrypted rule document")?;

    let target = match opts.target.or_else(|| dialect::detect(cwd)) {
        Some(t) => t,
        None => bail!("could not detect a target tool; pass --target explicitly"),
    };

    // Backup must complete before any write; a backup failure aborts the
    // import while the previous files are still intact.
    let backups = writer::backup_existing(target, cwd)?;
    let rule_set = render::from_urf(&urf, target.as_str());
    let files_written = writer::write(&rule_set, cwd)?;

    // Usage counting is best-effort: a failed increment never fails an
    // otherwise-successful import.
    if let Err(e) = relay.increment_usage(share_code) {
        eprintln!("warning: usage count update failed: {}", e);
        audit(
            "usage_increment_failed",
            serde_json::json!({"share_code": share_code, "error": e.to_string()}),
        );
    }

    audit(
        "import",
        serde_json::json!({
            "share_code": share_code,
            "source_dialect": share.source_dialect,
            "target_dialect": target.as_str(),
        }),
    );

    Ok(ImportOutcome {
        source_dialect: urf.metadata.source_dialect,
        target_dialect: target,
        files_written,
        backups,
    })
}
