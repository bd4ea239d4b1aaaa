use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;

use crate::cli::commands::{session_lines, session_summary, Command, CommandContext};
use crate::identity::{AuthProvider, NewUser, ProfilePatch};
use crate::notifications::Notifier;
use crate::session::SessionStore;
use crate::views::{AccountActions, AgencySwitcher, LoginModal, ProfileSettings};

fn default_password() -> String {
    "demo".to_string()
}

/// One scripted interaction, routed through the same flows the views use
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplayAction {
    Login {
        email: String,
        #[serde(default = "default_password")]
        password: String,
    },
    LoginProvider {
        provider: AuthProvider,
    },
    Logout,
    Signup(NewUser),
    SwitchAgency {
        agency_id: String,
    },
    UpdateProfile(ProfilePatch),
    Deactivate {
        confirm_email: String,
    },
}

impl ReplayAction {
    pub fn name(&self) -> &'static str {
        match self {
            ReplayAction::Login { .. } => "login",
            ReplayAction::LoginProvider { .. } => "login_provider",
            ReplayAction::Logout => "logout",
            ReplayAction::Signup(_) => "signup",
            ReplayAction::SwitchAgency { .. } => "switch_agency",
            ReplayAction::UpdateProfile(_) => "update_profile",
            ReplayAction::Deactivate { .. } => "deactivate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub action: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn parse_script(content: &str) -> Result<Vec<ReplayAction>> {
    serde_json::from_str(content).context("replay script must be a JSON array of actions")
}

/// Apply every action in order. A rejected step is reported and the run
/// continues with the store unchanged by that step.
pub fn run_script<N: Notifier + ?Sized>(
    store: &mut SessionStore,
    notifier: &N,
    actions: &[ReplayAction],
) -> Vec<StepOutcome> {
    let mut outcomes = Vec::with_capacity(actions.len());
    for (index, action) in actions.iter().enumerate() {
        let result = match action {
            ReplayAction::Login { email, password } => LoginModal::new(&mut *store, notifier)
                .credentials_login(email, password)
                .map(|_| ()),
            ReplayAction::LoginProvider { provider } => LoginModal::new(&mut *store, notifier)
                .external_login(*provider)
                .map(|_| ()),
            ReplayAction::Logout => {
                AccountActions::new(&mut *store, notifier).logout();
                Ok(())
            }
            ReplayAction::Signup(new_user) => LoginModal::new(&mut *store, notifier)
                .signup(new_user.clone())
                .map(|_| ()),
            ReplayAction::SwitchAgency { agency_id } => {
                AgencySwitcher::select(&mut *store, notifier, agency_id)
            }
            ReplayAction::UpdateProfile(patch) => ProfileSettings::new(&mut *store, notifier)
                .save_profile(patch)
                .map(|_| ()),
            ReplayAction::Deactivate { confirm_email } => {
                AccountActions::new(&mut *store, notifier).deactivate(confirm_email)
            }
        };

        tracing::info!(
            step = index + 1,
            action = action.name(),
            ok = result.is_ok(),
            "Replay step applied"
        );
        outcomes.push(StepOutcome {
            step: index + 1,
            action: action.name(),
            ok: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
        });
    }
    outcomes
}

pub struct ReplayCommand {
    pub file: PathBuf,
}

impl ReplayCommand {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }
}

impl Command for ReplayCommand {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn execute(&self, ctx: &mut CommandContext) -> Result<()> {
        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let actions = parse_script(&content)?;

        let outcomes = run_script(&mut ctx.store, &ctx.notifier, &actions);
        let notifications = ctx.notifier.notifications();
        ctx.flush_notifications();

        let mut lines = vec![String::new(), format!("📜 Replayed {} actions", outcomes.len())];
        for outcome in &outcomes {
            let status = match &outcome.error {
                None => "ok".to_string(),
                Some(error) => format!("rejected: {error}"),
            };
            lines.push(format!("  {:>2}. {:<15} {status}", outcome.step, outcome.action));
        }
        lines.push(String::new());
        lines.extend(session_lines(&ctx.store));

        ctx.emit(
            json!({
                "steps": outcomes,
                "notifications": notifications,
                "session": session_summary(&ctx.store),
            }),
            &lines,
        )
    }
}
