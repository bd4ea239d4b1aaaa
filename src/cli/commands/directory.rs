use anyhow::Result;
use serde_json::json;

use crate::cli::commands::{session_lines, session_summary, Command, CommandContext};

pub struct UsersCommand;

impl Command for UsersCommand {
    fn name(&self) -> &'static str {
        "users"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        let users = ctx.store.all_users();
        let mut lines = vec![format!("👥 Users ({})", users.len())];
        for user in users {
            lines.push(format!(
                "  {:>3}  {:<16} {:<26} {}",
                user.id, user.name, user.email, user.role
            ));
        }
        ctx.emit(json!(users), &lines)
    }
}

pub struct AgenciesCommand;

impl Command for AgenciesCommand {
    fn name(&self) -> &'static str {
        "agencies"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        let agencies = ctx.store.agencies();
        let mut lines = vec![format!("🏢 Agencies ({})", agencies.len())];
        for agency in agencies {
            lines.push(format!("  {:>3}  {}", agency.id, agency.name));
        }
        ctx.emit(json!(agencies), &lines)
    }
}

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        ctx.emit(session_summary(&ctx.store), &session_lines(&ctx.store))
    }
}
