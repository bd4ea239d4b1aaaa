use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::identity::{AuthProvider, Role};

pub mod commands;

#[derive(Parser)]
#[command(name = "agency-unison")]
#[command(about = "Agency dashboard session and identity store")]
#[command(long_about = "Runs one command against a freshly seeded in-memory session. \
                       Nothing is persisted between invocations; use 'agency-unison replay' \
                       to apply a sequence of actions to the same session.")]
pub struct Cli {
    /// Configuration file (defaults to agency-unison.toml in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every user in the roster
    Users,
    /// List every agency
    Agencies,
    /// Show the current session
    Whoami,
    /// Log in by email or through an external provider
    Login {
        /// Email of an existing user (exact match)
        #[arg(long, conflicts_with = "provider", required_unless_present = "provider")]
        email: Option<String>,
        /// Password field; required by the form but not verified
        #[arg(long, default_value = "demo")]
        password: String,
        /// External provider: google, microsoft or gmail
        #[arg(long)]
        provider: Option<AuthProvider>,
    },
    /// Create an account and log in as it
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "user")]
        role: Role,
    },
    /// Switch the current user's active agency
    SwitchAgency {
        /// Agency id
        agency_id: String,
    },
    /// List the settings panels available to the current user
    Panels,
    /// Show salaries visible to the current user
    Salaries,
    /// Apply a JSON list of session actions in order
    Replay {
        /// Path to the script file
        file: PathBuf,
    },
}
