use anyhow::Result;
use serde_json::{json, Value};

use crate::cli::Commands;
use crate::notifications::RecordingNotifier;
use crate::session::SessionStore;

pub mod directory;
pub mod login;
pub mod panels;
pub mod replay;
pub mod salaries;
pub mod switch_agency;

pub trait Command {
    fn name(&self) -> &'static str;
    fn execute(&self, ctx: &mut CommandContext) -> Result<()>;
}

/// Everything a command works against: one store, one notifier, one output mode
pub struct CommandContext {
    pub store: SessionStore,
    pub notifier: RecordingNotifier,
    pub json: bool,
}

impl CommandContext {
    pub fn new(store: SessionStore, json: bool) -> Self {
        Self {
            store,
            notifier: RecordingNotifier::new(),
            json,
        }
    }

    /// Print either the JSON document or the human-readable lines
    pub fn emit(&self, value: Value, lines: &[String]) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            for line in lines {
                println!("{line}");
            }
        }
        Ok(())
    }

    /// Print and drain pending notifications (text mode only)
    pub fn flush_notifications(&self) {
        let pending = self.notifier.take();
        if self.json {
            return;
        }
        for notification in pending {
            println!("{notification}");
        }
    }
}

pub fn session_summary(store: &SessionStore) -> Value {
    json!({
        "state": store.state(),
        "current_user": store.current_user(),
        "privileged": store.is_privileged(),
        "active_agency": store.active_agency(),
    })
}

pub fn session_lines(store: &SessionStore) -> Vec<String> {
    match store.current_user() {
        Some(user) => {
            let agency = store
                .active_agency()
                .map(|agency| agency.name.as_str())
                .unwrap_or("none");
            vec![
                format!("👤 {} <{}> (id {})", user.name, user.email, user.id),
                format!(
                    "🔑 Role: {}{}",
                    user.role,
                    if user.is_privileged() { " (privileged)" } else { "" }
                ),
                format!("🏢 Active agency: {agency}"),
            ]
        }
        None => vec!["🚪 Not logged in".to_string()],
    }
}

pub fn build(command: &Commands) -> Box<dyn Command> {
    match command {
        Commands::Users => Box::new(directory::UsersCommand),
        Commands::Agencies => Box::new(directory::AgenciesCommand),
        Commands::Whoami => Box::new(directory::WhoamiCommand),
        Commands::Login {
            email,
            password,
            provider,
        } => Box::new(login::LoginCommand {
            email: email.clone(),
            password: password.clone(),
            provider: *provider,
        }),
        Commands::Signup { name, email, role } => Box::new(login::SignupCommand {
            name: name.clone(),
            email: email.clone(),
            role: *role,
        }),
        Commands::SwitchAgency { agency_id } => Box::new(switch_agency::SwitchAgencyCommand {
            agency_id: agency_id.clone(),
        }),
        Commands::Panels => Box::new(panels::PanelsCommand),
        Commands::Salaries => Box::new(salaries::SalariesCommand),
        Commands::Replay { file } => Box::new(replay::ReplayCommand::new(file.clone())),
    }
}

pub fn show_usage() -> Result<()> {
    println!("🏢 AgencyUnison - session & identity store");
    println!();
    println!("Every command runs against a freshly seeded session:");
    println!("  👥 agency-unison users                       # Roster");
    println!("  👤 agency-unison whoami                      # Current session");
    println!("  🔐 agency-unison login --email <EMAIL>       # Log in");
    println!("  🆕 agency-unison signup --name N --email E   # Create an account");
    println!("  🔀 agency-unison switch-agency <ID>          # Change active agency");
    println!("  📜 agency-unison replay <FILE>               # Apply several actions");
    println!();
    println!("💡 Demo logins: admin@agencyunison.com, john@agencyunison.com, sarah@agencyunison.com");
    Ok(())
}
