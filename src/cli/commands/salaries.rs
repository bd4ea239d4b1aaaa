use anyhow::Result;
use serde_json::json;

use crate::cli::commands::{Command, CommandContext};
use crate::views::{format_currency, SalaryManagement};

pub struct SalariesCommand;

impl Command for SalariesCommand {
    fn name(&self) -> &'static str {
        "salaries"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        let view = SalaryManagement::new(&mut ctx.store, &ctx.notifier);
        let rows = view.visible_salaries();
        let summary = view.summary();

        let mut lines = vec!["💵 Salaries".to_string()];
        for row in &rows {
            lines.push(format!(
                "  {:<16} {:<10} {}",
                row.name,
                row.role,
                format_currency(row.salary)
            ));
        }
        if let Some(summary) = &summary {
            lines.push(format!("  Total: {}", format_currency(Some(summary.total))));
            lines.push(format!(
                "  Annual budget: {}",
                format_currency(Some(summary.annual_budget.round() as u64))
            ));
            lines.push(format!(
                "  Monthly budget: {}",
                format_currency(Some(summary.monthly_budget.round() as u64))
            ));
        }

        ctx.emit(json!({ "salaries": rows, "summary": summary }), &lines)
    }
}
