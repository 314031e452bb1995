use crate::cli::{Cli, Commands};
use crate::dialect;
use crate::domain::models::{ConvertReport, DetectReport, ScanItem};
use crate::services::codes::validate_share_code;
use crate::services::output::{print_list, print_one, print_report};
use crate::services::share::canonicalize_local;
use crate::services::{render, writer};
use anyhow::bail;
use std::path::PathBuf;

fn base_dir(path: &Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(p) => Ok(p.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

pub fn handle(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Detect => {
            let cwd = std::env::current_dir()?;
            let dialect = dialect::detect(&cwd);
            let report = DetectReport {
                dialect: dialect.map(|d| d.as_str().to_string()).unwrap_or_else(|| {
                    "unknown".to_string()
                }),
            };
            print_one(cli.json, report, |r| r.dialect.clone())?;
        }
        Commands::Scan { dialect } => {
            let cwd = std::env::current_dir()?;
            let files = dialect::find_rule_files(&cwd, *dialect);
            let items: Vec<ScanItem> = files
                .iter()
                .map(|f| ScanItem {
                    dialect: f.dialect.as_str().to_string(),
                    path: f.relative_path.clone(),
                    size_bytes: f.size_bytes,
                })
                .collect();
            print_list(cli.json, &items, |i| {
                format!("{}\t{}\t{}", i.dialect, i.path, i.size_bytes)
            })?;
        }
        Commands::Convert {
            target,
            path,
            out,
            skip_project_rules,
        } => {
            let source_dir = base_dir(path)?;
            let out_dir = out.clone().unwrap_or_else(|| source_dir.clone());

            let (urf, _paths) = canonicalize_local(&source_dir, None, *skip_project_rules)?;
            let backups = writer::backup_existing(*target, &out_dir)?;
            let rule_set = render::from_urf(&urf, target.as_str());
            let written = writer::write(&rule_set, &out_dir)?;

            let report = ConvertReport {
                source_dialect: urf.metadata.source_dialect,
                target_dialect: target.to_string(),
                files_written: written.iter().map(|p| p.display().to_string()).collect(),
                backups: backups.iter().map(|p| p.display().to_string()).collect(),
            };
            print_report(cli.json, report, |r| {
                let mut lines = vec![format!(
                    "converted {} rules to {}",
                    r.source_dialect, r.target_dialect
                )];
                lines.extend(r.files_written.iter().map(|f| format!("wrote {}", f)));
                lines.extend(r.backups.iter().map(|b| format!("backed up {}", b)));
                lines
            })?;
        }
        Commands::Validate { code } => {
            if !validate_share_code(code) {
                bail!("invalid share code: {}", code);
            }
            print_one(cli.json, code.as_str(), |c| format!("valid: {}", c))?;
        }
        _ => unreachable!("handled by the relay-backed command set"),
    }
    Ok(())
}
