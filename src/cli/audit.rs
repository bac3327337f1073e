//! Audit CLI commands

use clap::Subcommand;

use crate::display::audit::format_audit_list;
use crate::error::AddonHubResult;
use crate::models::Actor;
use crate::services::AuditService;
use crate::storage::Storage;

/// Audit subcommands
#[derive(Subcommand)]
pub enum AuditCommands {
    /// Show recent changes, newest first (team only)
    List {
        /// Maximum number of entries (defaults to the configured page size)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Handle an audit command
pub fn handle_audit_command(
    storage: &Storage,
    actor: &Actor,
    cmd: AuditCommands,
) -> AddonHubResult<()> {
    let service = AuditService::new(storage);

    match cmd {
        AuditCommands::List { limit, json } => {
            let entries = service.list(actor, limit)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", format_audit_list(&entries, service.count()?));
            }
        }
    }

    Ok(())
}
