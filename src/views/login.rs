use crate::identity::{AuthProvider, IdentityError, NewUser, User};
use crate::notifications::{Notification, Notifier};
use crate::session::SessionStore;
use crate::views::forms;

/// Login and signup as driven from the login dialog.
///
/// Every outcome is reported through the notifier; the returned `Result` lets
/// callers branch on it but the error has already been shown to the user.
pub struct LoginModal<'a, N: Notifier + ?Sized> {
    store: &'a mut SessionStore,
    notifier: &'a N,
}

impl<'a, N: Notifier + ?Sized> LoginModal<'a, N> {
    pub fn new(store: &'a mut SessionStore, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    /// Email/password login. The password is required but never checked.
    pub fn credentials_login(&mut self, email: &str, password: &str) -> Result<User, IdentityError> {
        if email.trim().is_empty() || password.is_empty() {
            let err = IdentityError::validation("Email and password are required.");
            self.notifier
                .notify(Notification::destructive("Login failed", err.to_string()));
            return Err(err);
        }

        match self.store.login_with_email(email) {
            Ok(user) => {
                let user = user.clone();
                self.notifier.notify(Notification::info(
                    "Login successful",
                    format!("Welcome back, {}", user.name),
                ));
                Ok(user)
            }
            Err(e) => {
                self.notifier.notify(Notification::destructive(
                    "Login failed",
                    "Invalid email or password",
                ));
                Err(e)
            }
        }
    }

    pub fn external_login(&mut self, provider: AuthProvider) -> Result<User, IdentityError> {
        if !provider.is_external() {
            let err = IdentityError::validation(format!("{provider} is not an external provider"));
            self.notifier
                .notify(Notification::destructive("Login failed", err.to_string()));
            return Err(err);
        }

        match self.store.login_with_provider(provider) {
            Ok(user) => {
                let user = user.clone();
                self.notifier.notify(Notification::info(
                    "Login successful",
                    format!("Welcome back, {}", user.name),
                ));
                Ok(user)
            }
            Err(e) => {
                self.notifier.notify(Notification::destructive(
                    "Login failed",
                    format!("No user found with {provider} authentication"),
                ));
                Err(e)
            }
        }
    }

    pub fn signup(&mut self, new_user: NewUser) -> Result<User, IdentityError> {
        let result = forms::require_signup_fields(&new_user.name, &new_user.email)
            .and_then(|()| self.store.signup(new_user).cloned());

        match result {
            Ok(user) => {
                self.notifier.notify(Notification::info(
                    "Account created",
                    format!("Welcome to AgencyUnison, {}", user.name),
                ));
                Ok(user)
            }
            Err(e) => {
                let description = match &e {
                    IdentityError::EmailInUse { .. } => "Email already in use".to_string(),
                    other => other.to_string(),
                };
                self.notifier
                    .notify(Notification::destructive("Signup failed", description));
                Err(e)
            }
        }
    }
}
