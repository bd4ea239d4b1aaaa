use anyhow::Result;

use crate::cli::commands::{session_lines, session_summary, Command, CommandContext};
use crate::views::AgencySwitcher;

pub struct SwitchAgencyCommand {
    pub agency_id: String,
}

impl Command for SwitchAgencyCommand {
    fn name(&self) -> &'static str {
        "switch-agency"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        let result = AgencySwitcher::select(&mut ctx.store, &ctx.notifier, &self.agency_id);
        ctx.flush_notifications();
        result?;

        let mut lines = session_lines(&ctx.store);
        if ctx.store.active_agency().is_none() {
            lines.push(format!(
                "⚠️  Agency {} does not exist; navbar shows '{}'",
                self.agency_id,
                AgencySwitcher::label(&ctx.store)
            ));
        }
        ctx.emit(session_summary(&ctx.store), &lines)
    }
}
