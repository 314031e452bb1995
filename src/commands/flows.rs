use crate::cli::{Cli, Commands};
use crate::domain::models::{ImportReport, ShareReport};
use crate::services::output::print_report;
use crate::services::relay::Relay;
use crate::services::share::{import_rules, share_rules, ImportOptions, ShareOptions};
use std::path::PathBuf;

fn base_dir(path: &Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(p) => Ok(p.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

pub fn handle(cli: &Cli, relay: &dyn Relay) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Share {
            dialect,
            expires_in_days,
            max_uses,
            skip_project_rules,
            path,
        } => {
            let cwd = base_dir(path)?;
            let outcome = share_rules(
                relay,
                &cwd,
                &ShareOptions {
                    dialect: *dialect,
                    expires_in_days: *expires_in_days,
                    max_uses: *max_uses,
                    skip_project_rules: *skip_project_rules,
                },
            )?;

            let report = ShareReport {
                share_code: outcome.share_code,
                password: outcome.password,
                source_dialect: outcome.source_dialect,
                files: outcome.files,
                total_size_bytes: outcome.total_size_bytes,
                expires_at: outcome.expires_at,
                max_uses: *max_uses,
            };
            print_report(cli.json, report, |r| {
                let mut lines = vec![
                    format!("shared {} rules", r.source_dialect),
                    format!("share code: {}", r.share_code),
                    format!("password:   {}", r.password),
                    format!("files: {}", r.files.join(", ")),
                    format!("expires: {}", r.expires_at),
                ];
                lines.push(match r.max_uses {
                    Some(n) => format!("max uses: {}", n),
                    None => "max uses: unlimited".to_string(),
                });
                lines
            })?;
        }
        Commands::Import {
            code,
            password,
            target,
            path,
        } => {
            let cwd = base_dir(path)?;
            let outcome = import_rules(
                relay,
                &cwd,
                code,
                password,
                &ImportOptions { target: *target },
            )?;

            let report = ImportReport {
                source_dialect: outcome.source_dialect,
                target_dialect: outcome.target_dialect.to_string(),
                files_written: outcome
                    .files_written
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
                backups: outcome
                    .backups
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            };
            print_report(cli.json, report, |r| {
                let mut lines = vec![format!(
                    "imported {} rules as {}",
                    r.source_dialect, r.target_dialect
                )];
                lines.extend(r.files_written.iter().map(|f| format!("wrote {}", f)));
                lines.extend(r.backups.iter().map(|b| format!("backed up {}", b)));
                if r.source_dialect != r.target_dialect {
                    lines.push(format!(
                        "note: rules were converted from {} format; review the result",
                        r.source_dialect
                    ));
                }
                lines
            })?;
        }
        _ => unreachable!("handled by the local command set"),
    }
    Ok(())
}
