use anyhow::Result;
use serde_json::json;

use crate::cli::commands::{Command, CommandContext};
use crate::views::{visible_panels, AgencySwitcher};

pub struct PanelsCommand;

impl Command for PanelsCommand {
    fn name(&self) -> &'static str {
        "panels"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        let panels = visible_panels(&ctx.store);
        let agencies = if AgencySwitcher::is_shown(&ctx.store) {
            AgencySwitcher::options(&ctx.store)
        } else {
            Vec::new()
        };

        let mut lines = vec!["⚙️  Settings panels:".to_string()];
        lines.extend(panels.iter().map(|panel| format!("  • {panel}")));
        if !agencies.is_empty() {
            lines.push(String::new());
            lines.push("🔀 Agency switcher:".to_string());
            lines.extend(agencies.iter().map(|option| {
                let marker = if option.active { "●" } else { "○" };
                format!("  {marker} {} ({})", option.name, option.id)
            }));
        }

        ctx.emit(json!({ "panels": panels, "agency_switcher": agencies }), &lines)
    }
}
