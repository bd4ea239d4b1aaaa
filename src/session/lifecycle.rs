// Session lifecycle: LoggedOut <-> LoggedIn, with a record of every transition

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{AgencyId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    LoggedOut,
    LoggedIn { user_id: UserId },
}

impl SessionState {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            SessionState::LoggedOut => None,
            SessionState::LoggedIn { user_id } => Some(user_id),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Login { user_id: UserId },
    Signup { user_id: UserId },
    Logout,
    SwitchAgency { agency_id: AgencyId },
    /// The current user disappeared from a replaced roster
    UserRemoved { user_id: UserId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTransitionRecord {
    pub from: SessionState,
    pub to: SessionState,
    pub event: SessionEvent,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionLifecycle {
    state: SessionState,
    history: Vec<SessionTransitionRecord>,
}

impl SessionLifecycle {
    pub fn new(initial: SessionState) -> Self {
        Self {
            state: initial,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &[SessionTransitionRecord] {
        &self.history
    }

    pub(crate) fn apply(&mut self, event: SessionEvent, to: SessionState) {
        let from = std::mem::replace(&mut self.state, to.clone());
        tracing::debug!(from = ?from, to = ?to, event = ?event, "Session transition");
        self.history.push(SessionTransitionRecord {
            from,
            to,
            event,
            timestamp: Utc::now(),
        });
    }
}
