use crate::identity::{AuthProvider, IdentityError, NewUser, User};
use crate::notifications::{Notification, Notifier};
use crate::session::SessionStore;
use crate::views::{forms, require_privileged};

const ACTION: &str = "manage users";

/// Settings panel for adding, editing and removing roster users.
/// Only privileged users may use it.
pub struct UserManagement<'a, N: Notifier + ?Sized> {
    store: &'a mut SessionStore,
    notifier: &'a N,
}

impl<'a, N: Notifier + ?Sized> UserManagement<'a, N> {
    pub fn new(store: &'a mut SessionStore, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    pub fn users(&self) -> &[User] {
        self.store.all_users()
    }

    pub fn add_user(&mut self, mut new_user: NewUser) -> Result<User, IdentityError> {
        new_user.auth_provider = Some(AuthProvider::Password);
        let name = new_user.name.clone();

        let result = require_privileged(self.store, ACTION)
            .and_then(|()| forms::require_name_and_email(&new_user.name, &new_user.email))
            .and_then(|()| self.store.add_user(new_user).cloned());

        self.report(
            &result,
            Notification::info("User Added", format!("{name} has been added successfully.")),
        );
        result
    }

    pub fn edit_user(&mut self, user: User) -> Result<(), IdentityError> {
        let name = user.name.clone();

        let result = require_privileged(self.store, ACTION)
            .and_then(|()| forms::require_name_and_email(&user.name, &user.email))
            .and_then(|()| self.store.update_user(user));

        self.report(
            &result,
            Notification::info(
                "User Updated",
                format!("{name}'s information has been updated."),
            ),
        );
        result
    }

    pub fn remove_user(&mut self, user_id: &str) -> Result<User, IdentityError> {
        let result = require_privileged(self.store, ACTION)
            .and_then(|()| self.store.remove_user(user_id));

        self.report(
            &result,
            Notification::destructive("User Removed", "The user has been removed successfully."),
        );
        result
    }

    /// Nothing is sent anywhere; the user is only told a link went out
    pub fn reset_password(&mut self, user_id: &str) -> Result<(), IdentityError> {
        let result = require_privileged(self.store, ACTION).and_then(|()| {
            self.store
                .roster()
                .get(user_id)
                .map(|user| user.email.clone())
                .ok_or_else(|| IdentityError::UnknownUser {
                    id: user_id.to_string(),
                })
        });

        match result {
            Ok(email) => {
                self.notifier.notify(Notification::info(
                    "Password Reset",
                    format!("A password reset link has been sent to {email}."),
                ));
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::destructive("Password Reset failed", e.to_string()));
                Err(e)
            }
        }
    }

    fn report<T>(&self, result: &Result<T, IdentityError>, success: Notification) {
        match result {
            Ok(_) => self.notifier.notify(success),
            Err(IdentityError::PermissionDenied { .. }) => self.notifier.notify(
                Notification::destructive("Access denied", "You need admin privileges to manage users."),
            ),
            Err(e) => self
                .notifier
                .notify(Notification::destructive("Action failed", e.to_string())),
        }
    }
}
