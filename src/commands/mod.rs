//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `flows.rs` — relay-backed share/import.
//! - `local.rs` — detect/scan/convert/validate, fully offline.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod flows;
pub mod local;

use crate::cli::{Cli, Commands};
use crate::services::relay::HttpRelay;

pub fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Share { .. } | Commands::Import { .. } => {
            let relay = HttpRelay::new(&cli.relay);
            flows::handle(cli, &relay)
        }
        _ => local::handle(cli),
    }
}
