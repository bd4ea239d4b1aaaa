use crate::identity::{IdentityError, ProfilePatch, User};
use crate::notifications::{Notification, Notifier};
use crate::session::SessionStore;
use crate::views::forms;

/// Profile tab: edits to the logged-in user's own record
pub struct ProfileSettings<'a, N: Notifier + ?Sized> {
    store: &'a mut SessionStore,
    notifier: &'a N,
}

impl<'a, N: Notifier + ?Sized> ProfileSettings<'a, N> {
    pub fn new(store: &'a mut SessionStore, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    pub fn save_profile(&mut self, patch: &ProfilePatch) -> Result<User, IdentityError> {
        if let Some(email) = &patch.email {
            if !forms::is_valid_email(email) {
                let err = IdentityError::validation(format!("'{email}' is not a valid email address"));
                self.notifier
                    .notify(Notification::destructive("Profile not updated", err.to_string()));
                return Err(err);
            }
        }

        match self.store.update_user_profile(patch) {
            Ok(user) => {
                let user = user.clone();
                self.notifier.notify(Notification::info(
                    "Profile updated",
                    "Your profile has been successfully updated.",
                ));
                Ok(user)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::destructive("Profile not updated", e.to_string()));
                Err(e)
            }
        }
    }

    /// Confirms the two entries match; there is no credential store to update
    pub fn change_password(&self, password: &str, confirm: &str) -> Result<(), IdentityError> {
        let result = if self.store.current_user().is_none() {
            Err(IdentityError::NotLoggedIn)
        } else {
            forms::require_matching_passwords(password, confirm)
        };

        match &result {
            Ok(()) => self.notifier.notify(Notification::info(
                "Password changed",
                "Your password has been successfully changed.",
            )),
            Err(IdentityError::Validation { reason }) => self
                .notifier
                .notify(Notification::destructive("Passwords don't match", reason.clone())),
            Err(e) => self
                .notifier
                .notify(Notification::destructive("Password not changed", e.to_string())),
        }
        result
    }
}

/// Logout & deactivate tab
pub struct AccountActions<'a, N: Notifier + ?Sized> {
    store: &'a mut SessionStore,
    notifier: &'a N,
}

impl<'a, N: Notifier + ?Sized> AccountActions<'a, N> {
    pub fn new(store: &'a mut SessionStore, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    pub fn logout(&mut self) {
        self.store.logout();
        self.notifier.notify(Notification::info(
            "Logged out",
            "You have been successfully logged out.",
        ));
    }

    /// Ends the session once the user retypes their own email
    pub fn deactivate(&mut self, confirm_email: &str) -> Result<(), IdentityError> {
        let matches = self
            .store
            .current_user()
            .is_some_and(|user| user.email == confirm_email);

        if !matches {
            self.notifier.notify(Notification::destructive(
                "Email confirmation needed",
                "Please enter your email address to confirm account deactivation.",
            ));
            return Err(IdentityError::validation(
                "confirmation email does not match the current user",
            ));
        }

        self.store.logout();
        self.notifier.notify(Notification::destructive(
            "Account deactivated",
            "Your account has been deactivated. We're sorry to see you go.",
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::notifications::RecordingNotifier;

    fn store() -> SessionStore {
        SessionStore::seeded(&SessionConfig::default())
    }

    #[test]
    fn test_save_profile_updates_store() {
        let mut store = store();
        let notifier = RecordingNotifier::new();

        let patch = ProfilePatch {
            phone: Some("+1 (555) 000-1111".to_string()),
            ..Default::default()
        };
        let user = ProfileSettings::new(&mut store, &notifier)
            .save_profile(&patch)
            .unwrap();

        assert_eq!(user.phone.as_deref(), Some("+1 (555) 000-1111"));
        assert_eq!(
            store.roster().get("1").unwrap().phone.as_deref(),
            Some("+1 (555) 000-1111")
        );
        assert_eq!(notifier.last().unwrap().title, "Profile updated");
    }

    #[test]
    fn test_save_profile_rejects_bad_email() {
        let mut store = store();
        let notifier = RecordingNotifier::new();

        let patch = ProfilePatch {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert!(ProfileSettings::new(&mut store, &notifier)
            .save_profile(&patch)
            .is_err());
        assert_eq!(store.current_user().unwrap().email, "admin@agencyunison.com");
    }

    #[test]
    fn test_change_password_mismatch() {
        let mut store = store();
        let notifier = RecordingNotifier::new();
        let settings = ProfileSettings::new(&mut store, &notifier);

        assert!(settings.change_password("a", "b").is_err());
        assert_eq!(notifier.last().unwrap().title, "Passwords don't match");
        assert!(settings.change_password("a", "a").is_ok());
    }

    #[test]
    fn test_logout_notifies() {
        let mut store = store();
        let notifier = RecordingNotifier::new();

        AccountActions::new(&mut store, &notifier).logout();
        assert!(store.current_user().is_none());
        assert_eq!(notifier.last().unwrap().title, "Logged out");
    }

    #[test]
    fn test_deactivate_requires_matching_email() {
        let mut store = store();
        let notifier = RecordingNotifier::new();
        let mut actions = AccountActions::new(&mut store, &notifier);

        assert!(actions.deactivate("john@agencyunison.com").is_err());
        assert!(actions.deactivate("admin@agencyunison.com").is_ok());
        assert!(store.current_user().is_none());
        assert_eq!(notifier.last().unwrap().title, "Account deactivated");
    }
}
