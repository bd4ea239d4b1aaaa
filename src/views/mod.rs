// Views Module - caller-side flows built on the session store
//
// Each flow borrows the store and a notifier for the duration of one
// interaction and turns every rejection into a notification.

pub mod account;
pub mod forms;
pub mod login;
pub mod navigation;
pub mod salary;
pub mod user_management;

pub use account::{AccountActions, ProfileSettings};
pub use login::LoginModal;
pub use navigation::{panel_access, visible_panels, AgencySwitcher, PanelAccess, SettingsPanel};
pub use salary::{format_currency, SalaryManagement, SalarySummary};
pub use user_management::UserManagement;

use crate::identity::IdentityError;
use crate::session::SessionStore;

pub(crate) fn require_privileged(store: &SessionStore, action: &str) -> Result<(), IdentityError> {
    if store.current_user().is_none() {
        return Err(IdentityError::NotLoggedIn);
    }
    if !store.is_privileged() {
        tracing::warn!(action = %action, "Privileged action denied");
        return Err(IdentityError::permission_denied(action));
    }
    Ok(())
}
