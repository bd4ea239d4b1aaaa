use anyhow::Result;

use crate::cli::commands::{session_lines, session_summary, Command, CommandContext};
use crate::identity::{AuthProvider, NewUser, Role};
use crate::views::LoginModal;

pub struct LoginCommand {
    pub email: Option<String>,
    pub password: String,
    pub provider: Option<AuthProvider>,
}

impl Command for LoginCommand {
    fn name(&self) -> &'static str {
        "login"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        let mut modal = LoginModal::new(&mut ctx.store, &ctx.notifier);
        let result = match (&self.email, self.provider) {
            (_, Some(provider)) => modal.external_login(provider),
            (Some(email), None) => modal.credentials_login(email, &self.password),
            (None, None) => anyhow::bail!("either --email or --provider is required"),
        };

        ctx.flush_notifications();
        result?;
        ctx.emit(session_summary(&ctx.store), &session_lines(&ctx.store))
    }
}

pub struct SignupCommand {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Command for SignupCommand {
    fn name(&self) -> &'static str {
        "signup"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        let result = LoginModal::new(&mut ctx.store, &ctx.notifier).signup(NewUser::new(
            self.name.as_str(),
            self.email.as_str(),
            self.role,
        ));

        ctx.flush_notifications();
        result?;
        ctx.emit(session_summary(&ctx.store), &session_lines(&ctx.store))
    }
}
