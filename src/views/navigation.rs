// Role gating for the settings tabs and the navbar agency switcher

use serde::Serialize;
use std::fmt;

use crate::identity::{AgencyId, IdentityError};
use crate::notifications::{Notification, Notifier};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsPanel {
    Profile,
    Agency,
    Users,
    Notifications,
    Security,
    Preferences,
    Subscription,
    Data,
    Support,
    Logout,
    Advanced,
}

impl SettingsPanel {
    /// Display order of the settings sidebar
    pub const ALL: [SettingsPanel; 11] = [
        SettingsPanel::Profile,
        SettingsPanel::Agency,
        SettingsPanel::Users,
        SettingsPanel::Notifications,
        SettingsPanel::Security,
        SettingsPanel::Preferences,
        SettingsPanel::Subscription,
        SettingsPanel::Data,
        SettingsPanel::Support,
        SettingsPanel::Logout,
        SettingsPanel::Advanced,
    ];

    pub fn requires_privilege(self) -> bool {
        matches!(
            self,
            SettingsPanel::Agency | SettingsPanel::Users | SettingsPanel::Advanced
        )
    }

    pub fn title(self) -> &'static str {
        match self {
            SettingsPanel::Profile => "Profile Settings",
            SettingsPanel::Agency => "Agency Settings",
            SettingsPanel::Users => "User Management",
            SettingsPanel::Notifications => "Notification Settings",
            SettingsPanel::Security => "Security Settings",
            SettingsPanel::Preferences => "App Preferences",
            SettingsPanel::Subscription => "Subscription & Billing",
            SettingsPanel::Data => "Data & Backup",
            SettingsPanel::Support => "Support & Feedback",
            SettingsPanel::Logout => "Logout & Deactivate",
            SettingsPanel::Advanced => "Advanced Settings",
        }
    }

    fn denial_message(self) -> &'static str {
        match self {
            SettingsPanel::Agency => "You need admin privileges to access agency settings.",
            SettingsPanel::Users => "You need admin privileges to manage users.",
            _ => "You need admin privileges to access advanced settings.",
        }
    }
}

impl fmt::Display for SettingsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAccess {
    Allowed,
    Denied(&'static str),
}

/// Tabs listed in the settings sidebar for the current session
pub fn visible_panels(store: &SessionStore) -> Vec<SettingsPanel> {
    let privileged = store.is_privileged();
    SettingsPanel::ALL
        .into_iter()
        .filter(|panel| privileged || !panel.requires_privilege())
        .collect()
}

pub fn panel_access(store: &SessionStore, panel: SettingsPanel) -> PanelAccess {
    if panel.requires_privilege() && !store.is_privileged() {
        PanelAccess::Denied(panel.denial_message())
    } else {
        PanelAccess::Allowed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgencyOption {
    pub id: AgencyId,
    pub name: String,
    pub active: bool,
}

/// Navbar agency picker over the current user's memberships
pub struct AgencySwitcher;

impl AgencySwitcher {
    /// Shown only when the current user belongs to more than one agency
    pub fn is_shown(store: &SessionStore) -> bool {
        store
            .current_user()
            .is_some_and(|user| user.agencies.len() > 1)
    }

    /// Member agencies in membership order. Unknown agency ids are skipped.
    pub fn options(store: &SessionStore) -> Vec<AgencyOption> {
        let Some(user) = store.current_user() else {
            return Vec::new();
        };
        user.agencies
            .iter()
            .filter_map(|id| store.agency(id))
            .map(|agency| AgencyOption {
                id: agency.id.clone(),
                name: agency.name.clone(),
                active: user.active_agency_id.as_deref() == Some(agency.id.as_str()),
            })
            .collect()
    }

    pub fn label(store: &SessionStore) -> String {
        store
            .active_agency()
            .map(|agency| agency.name.clone())
            .unwrap_or_else(|| "Select Agency".to_string())
    }

    /// Picking an entry from the dropdown
    pub fn select<N: Notifier + ?Sized>(
        store: &mut SessionStore,
        notifier: &N,
        agency_id: &str,
    ) -> Result<(), IdentityError> {
        match store.switch_agency(agency_id) {
            Ok(()) => {
                let description = match store.agency(agency_id) {
                    Some(agency) => format!("Now working in {}", agency.name),
                    None => format!("Agency {agency_id} is not known"),
                };
                notifier.notify(Notification::info("Agency switched", description));
                Ok(())
            }
            Err(e) => {
                notifier.notify(Notification::destructive("Agency not switched", e.to_string()));
                Err(e)
            }
        }
    }
}
