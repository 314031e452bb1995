use crate::dialect::DialectId;
use crate::services::relay::DEFAULT_RELAY_URL;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ruleshare", version, about = "Share AI assistant rules across coding tools")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_RELAY_URL,
        help = "Base URL of the share relay"
    )]
    pub relay: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt the rules in this project and publish them to the relay
    Share {
        #[arg(long, value_enum, help = "Only read this tool's rule files")]
        dialect: Option<DialectId>,
        #[arg(long, default_value_t = 1)]
        expires_in_days: u32,
        #[arg(long, help = "Limit how many times the share can be imported")]
        max_uses: Option<u32>,
        #[arg(long, help = "Leave project-specific rules out of the share")]
        skip_project_rules: bool,
        #[arg(long, help = "Project directory (defaults to the current one)")]
        path: Option<PathBuf>,
    },
    /// Fetch a shared rule set and write it in this tool's format
    Import {
        code: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum, help = "Target tool (detected when omitted)")]
        target: Option<DialectId>,
        #[arg(long, help = "Directory to write into (defaults to the current one)")]
        path: Option<PathBuf>,
    },
    /// Print which tool's rule convention is active here
    Detect,
    /// List rule files found in this project
    Scan {
        #[arg(long, value_enum)]
        dialect: Option<DialectId>,
    },
    /// Convert local rules to another tool's format without the relay
    Convert {
        #[arg(long, value_enum)]
        target: DialectId,
        #[arg(long, help = "Project directory to read from")]
        path: Option<PathBuf>,
        #[arg(long, help = "Directory to write into (defaults to the source directory)")]
        out: Option<PathBuf>,
        #[arg(long, help = "Leave project-specific rules out of the output")]
        skip_project_rules: bool,
    },
    /// Check share code syntax without contacting the relay
    Validate { code: String },
}
