use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::identity::seed::{self, avatar_for};
use crate::identity::{
    Agency, AuthProvider, IdentityError, NewUser, ProfilePatch, Role, Roster, User, UserId,
};
use crate::observability::SessionMetrics;
use crate::session::ids::IdAllocator;
use crate::session::lifecycle::{
    SessionEvent, SessionLifecycle, SessionState, SessionTransitionRecord,
};

/// Single source of truth for who is using the system and what they may see.
///
/// The store is an explicit value handed to whatever needs it; view flows take
/// `&SessionStore` or `&mut SessionStore` rather than reaching for a global.
/// Every mutating operation either applies completely or returns an error and
/// leaves the store untouched.
#[derive(Debug)]
pub struct SessionStore {
    roster: Roster,
    agencies: Vec<Agency>,
    lifecycle: SessionLifecycle,
    ids: IdAllocator,
    avatar_template: String,
    metrics: SessionMetrics,
}

impl SessionStore {
    /// Store over the built-in sample roster and agencies
    pub fn seeded(config: &SessionConfig) -> Self {
        Self::with_data(seed::roster(), seed::agencies(), config)
    }

    pub fn with_data(roster: Roster, agencies: Vec<Agency>, config: &SessionConfig) -> Self {
        let initial = if config.start_authenticated {
            match roster.first_with_role(Role::Admin) {
                Some(admin) => SessionState::LoggedIn {
                    user_id: admin.id.clone(),
                },
                None => SessionState::LoggedOut,
            }
        } else {
            SessionState::LoggedOut
        };

        info!(
            users = roster.len(),
            agencies = agencies.len(),
            initial_state = ?initial,
            "Session store initialized"
        );

        Self {
            ids: IdAllocator::seeded_from(&roster),
            roster,
            agencies,
            lifecycle: SessionLifecycle::new(initial),
            avatar_template: config.default_avatar_template.clone(),
            metrics: SessionMetrics::new(),
        }
    }

    // ----- derived reads -----

    pub fn current_user(&self) -> Option<&User> {
        self.lifecycle
            .state()
            .user_id()
            .and_then(|id| self.roster.get(id))
    }

    /// True iff the current user is an admin or cofounder
    pub fn is_privileged(&self) -> bool {
        self.current_user().is_some_and(User::is_privileged)
    }

    pub fn all_users(&self) -> &[User] {
        self.roster.users()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn agencies(&self) -> &[Agency] {
        &self.agencies
    }

    pub fn agency(&self, id: &str) -> Option<&Agency> {
        self.agencies.iter().find(|agency| agency.id == id)
    }

    /// Agency resolved from the current user's active agency reference
    pub fn active_agency(&self) -> Option<&Agency> {
        let active = self.current_user()?.active_agency_id.as_deref()?;
        self.agency(active)
    }

    pub fn state(&self) -> &SessionState {
        self.lifecycle.state()
    }

    pub fn history(&self) -> &[SessionTransitionRecord] {
        self.lifecycle.history()
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    // ----- session transitions -----

    /// Make an existing roster user current. No credential check is made.
    pub fn login(&mut self, user: &User) -> Result<(), IdentityError> {
        if !self.roster.contains_id(&user.id) {
            self.metrics.record_failed_login();
            warn!(user_id = %user.id, "Login rejected: user not in roster");
            return Err(IdentityError::UnknownUser {
                id: user.id.clone(),
            });
        }

        self.lifecycle.apply(
            SessionEvent::Login {
                user_id: user.id.clone(),
            },
            SessionState::LoggedIn {
                user_id: user.id.clone(),
            },
        );
        self.metrics.record_login();
        info!(user_id = %user.id, email = %user.email, "User logged in");
        Ok(())
    }

    /// Look the user up by exact email, then log in
    pub fn login_with_email(&mut self, email: &str) -> Result<&User, IdentityError> {
        let Some(user) = self.roster.find_by_email(email).cloned() else {
            self.metrics.record_failed_login();
            warn!(email = %email, "Login rejected: no matching user");
            return Err(IdentityError::UserNotFound {
                email: email.to_string(),
            });
        };
        self.login(&user)?;
        self.current_user().ok_or(IdentityError::NotLoggedIn)
    }

    /// External-provider login: the first user registered with that provider
    pub fn login_with_provider(&mut self, provider: AuthProvider) -> Result<&User, IdentityError> {
        let Some(user) = self.roster.find_by_provider(provider).cloned() else {
            self.metrics.record_failed_login();
            warn!(provider = %provider, "Login rejected: no user for provider");
            return Err(IdentityError::NoProviderUser { provider });
        };
        self.login(&user)?;
        self.current_user().ok_or(IdentityError::NotLoggedIn)
    }

    /// Clear the current user. Always succeeds.
    pub fn logout(&mut self) {
        match self.lifecycle.state().user_id().map(str::to_string) {
            Some(user_id) => {
                self.lifecycle
                    .apply(SessionEvent::Logout, SessionState::LoggedOut);
                self.metrics.record_logout();
                info!(user_id = %user_id, "User logged out");
            }
            None => info!("Logout requested with no active session"),
        }
    }

    /// Register a new user and make it current
    pub fn signup(&mut self, new_user: NewUser) -> Result<&User, IdentityError> {
        let user_id = match self.insert_new_user(new_user) {
            Ok(user_id) => user_id,
            Err(e) => {
                self.metrics.record_rejected_signup();
                warn!(error = %e, "Signup rejected");
                return Err(e);
            }
        };

        self.lifecycle.apply(
            SessionEvent::Signup {
                user_id: user_id.clone(),
            },
            SessionState::LoggedIn {
                user_id: user_id.clone(),
            },
        );
        self.metrics.record_signup();
        info!(user_id = %user_id, "User signed up");
        self.current_user().ok_or(IdentityError::NotLoggedIn)
    }

    /// Set the current user's active agency.
    ///
    /// Membership is not checked: switching to an agency the user does not
    /// belong to is allowed and only logged.
    pub fn switch_agency(&mut self, agency_id: &str) -> Result<(), IdentityError> {
        let user_id = self
            .lifecycle
            .state()
            .user_id()
            .map(str::to_string)
            .ok_or(IdentityError::NotLoggedIn)?;

        let patch = ProfilePatch {
            active_agency_id: Some(agency_id.to_string()),
            ..Default::default()
        };
        let user = self.roster.apply_patch(&user_id, &patch)?;
        if !user.is_member_of(agency_id) {
            warn!(
                user_id = %user_id,
                agency_id = %agency_id,
                "Switched to an agency the user is not a member of"
            );
        }

        let state = self.lifecycle.state().clone();
        self.lifecycle.apply(
            SessionEvent::SwitchAgency {
                agency_id: agency_id.to_string(),
            },
            state,
        );
        self.metrics.record_agency_switch();
        info!(user_id = %user_id, agency_id = %agency_id, "Active agency switched");
        Ok(())
    }

    /// Shallow-merge a patch into the current user's roster entry
    pub fn update_user_profile(&mut self, patch: &ProfilePatch) -> Result<&User, IdentityError> {
        let user_id = self
            .lifecycle
            .state()
            .user_id()
            .map(str::to_string)
            .ok_or(IdentityError::NotLoggedIn)?;

        self.roster.apply_patch(&user_id, patch)?;
        self.metrics.record_profile_update();
        info!(user_id = %user_id, "Profile updated");
        self.current_user().ok_or(IdentityError::NotLoggedIn)
    }

    // ----- roster management -----

    /// Swap in a whole new roster. A current user missing from it is logged out.
    pub fn replace_roster(&mut self, users: Vec<User>) -> Result<(), IdentityError> {
        let roster = Roster::from_users(users)?;
        for user in roster.iter() {
            self.ids.observe(&user.id);
        }
        self.roster = roster;
        info!(users = self.roster.len(), "Roster replaced");
        self.drop_session_if_orphaned();
        Ok(())
    }

    /// Append a user without changing who is logged in
    pub fn add_user(&mut self, new_user: NewUser) -> Result<&User, IdentityError> {
        let user_id = self.insert_new_user(new_user)?;
        info!(user_id = %user_id, "User added to roster");
        self.roster
            .get(&user_id)
            .ok_or(IdentityError::UnknownUser { id: user_id })
    }

    /// Replace the roster entry with the same id
    pub fn update_user(&mut self, user: User) -> Result<(), IdentityError> {
        let user_id = user.id.clone();
        self.roster.replace(user)?;
        info!(user_id = %user_id, "User updated");
        Ok(())
    }

    pub fn remove_user(&mut self, user_id: &str) -> Result<User, IdentityError> {
        let removed = self
            .roster
            .remove(user_id)
            .ok_or_else(|| IdentityError::UnknownUser {
                id: user_id.to_string(),
            })?;
        info!(user_id = %user_id, "User removed from roster");
        self.drop_session_if_orphaned();
        Ok(removed)
    }

    /// Fill defaults, assign an id and append. Nothing changes on error.
    fn insert_new_user(&mut self, new_user: NewUser) -> Result<UserId, IdentityError> {
        let user = self.build_user(new_user)?;
        let user_id = user.id.clone();
        self.roster.push(user)?;
        Ok(user_id)
    }

    fn build_user(&mut self, mut new_user: NewUser) -> Result<User, IdentityError> {
        if self.roster.contains_email(&new_user.email) {
            return Err(IdentityError::EmailInUse {
                email: new_user.email,
            });
        }

        if new_user.avatar.is_none() {
            new_user.avatar = Some(avatar_for(&self.avatar_template, &new_user.name));
        }
        if new_user.auth_provider.is_none() {
            new_user.auth_provider = Some(AuthProvider::Password);
        }
        if new_user.agencies.is_empty() {
            if let Some(first) = self.agencies.first() {
                new_user.agencies.push(first.id.clone());
            }
        }
        let active_is_member = new_user
            .active_agency_id
            .as_ref()
            .is_some_and(|active| new_user.agencies.contains(active));
        if !active_is_member {
            new_user.active_agency_id = new_user.agencies.first().cloned();
        }

        Ok(User::from_new(self.ids.allocate()?, new_user))
    }

    fn drop_session_if_orphaned(&mut self) {
        let Some(user_id) = self.lifecycle.state().user_id().map(str::to_string) else {
            return;
        };
        if !self.roster.contains_id(&user_id) {
            warn!(user_id = %user_id, "Current user left the roster; ending session");
            self.lifecycle
                .apply(SessionEvent::UserRemoved { user_id }, SessionState::LoggedOut);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::seeded(&SessionConfig::default())
    }

    fn logged_out_store() -> SessionStore {
        SessionStore::seeded(&SessionConfig {
            start_authenticated: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_starts_as_first_admin() {
        let store = store();
        let current = store.current_user().unwrap();
        assert_eq!(current.id, "1");
        assert_eq!(current.role, Role::Admin);
        assert!(store.is_privileged());
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_can_start_logged_out() {
        let store = logged_out_store();
        assert!(store.current_user().is_none());
        assert!(!store.is_privileged());
        assert!(store.active_agency().is_none());
    }

    #[test]
    fn test_login_unknown_user_is_rejected() {
        let mut store = store();
        let mut stranger = store.all_users()[2].clone();
        stranger.id = "99".to_string();

        let result = store.login(&stranger);
        assert_eq!(
            result,
            Err(IdentityError::UnknownUser {
                id: "99".to_string()
            })
        );
        assert_eq!(store.current_user().unwrap().id, "1");
        assert_eq!(store.metrics().get_stats().failed_logins, 1);
    }

    #[test]
    fn test_login_with_email_and_provider() {
        let mut store = logged_out_store();

        let sarah = store.login_with_email("sarah@agencyunison.com").unwrap();
        assert_eq!(sarah.role, Role::User);
        assert!(!store.is_privileged());

        let john = store.login_with_provider(AuthProvider::Google).unwrap();
        assert_eq!(john.email, "john@agencyunison.com");
        assert!(store.is_privileged());

        assert!(matches!(
            store.login_with_email("nobody@agencyunison.com"),
            Err(IdentityError::UserNotFound { .. })
        ));
        assert_eq!(store.current_user().unwrap().id, "2");
    }

    #[test]
    fn test_logout_when_logged_out_is_a_no_op() {
        let mut store = logged_out_store();
        store.logout();
        assert!(store.history().is_empty());
        assert_eq!(store.metrics().get_stats().logouts, 0);
    }

    #[test]
    fn test_signup_fills_defaults() {
        let mut store = store();
        let user = store
            .signup(NewUser::new("Nia Newcomer", "nia@agencyunison.com", Role::User))
            .unwrap()
            .clone();

        assert_eq!(user.id, "5");
        assert_eq!(user.auth_provider, Some(AuthProvider::Password));
        assert_eq!(user.agencies, vec!["1".to_string()]);
        assert_eq!(user.active_agency_id.as_deref(), Some("1"));
        assert!(user.avatar.unwrap().contains("name=Nia+Newcomer"));
        assert_eq!(store.current_user().unwrap().id, "5");
    }

    #[test]
    fn test_signup_keeps_given_avatar_and_agencies() {
        let mut store = store();
        let mut new_user = NewUser::new("Pat", "pat@agencyunison.com", Role::User)
            .with_agencies(vec!["3".to_string(), "2".to_string()]);
        new_user.avatar = Some("/avatars/pat.png".to_string());
        new_user.active_agency_id = Some("2".to_string());

        let user = store.signup(new_user).unwrap();
        assert_eq!(user.avatar.as_deref(), Some("/avatars/pat.png"));
        assert_eq!(user.active_agency_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_signup_duplicate_email_leaves_state_untouched() {
        let mut store = store();
        let before = store.all_users().to_vec();

        let result = store.signup(NewUser::new("Dup", "sarah@agencyunison.com", Role::User));
        assert!(matches!(result, Err(IdentityError::EmailInUse { .. })));
        assert_eq!(store.all_users(), before.as_slice());
        assert_eq!(store.current_user().unwrap().id, "1");
        assert_eq!(store.metrics().get_stats().rejected_signups, 1);
    }

    #[test]
    fn test_switch_agency_requires_session() {
        let mut store = logged_out_store();
        assert_eq!(store.switch_agency("2"), Err(IdentityError::NotLoggedIn));
    }

    #[test]
    fn test_switch_agency_is_permissive() {
        let mut store = store();
        let sarah = store.roster().find_by_email("sarah@agencyunison.com").cloned().unwrap();
        store.login(&sarah).unwrap();

        store.switch_agency("3").unwrap();
        assert_eq!(store.active_agency().unwrap().name, "Brightline Media");
        assert!(!store.current_user().unwrap().is_member_of("3"));
    }

    #[test]
    fn test_switch_to_unknown_agency_resolves_to_none() {
        let mut store = store();
        store.switch_agency("404").unwrap();
        assert_eq!(
            store.current_user().unwrap().active_agency_id.as_deref(),
            Some("404")
        );
        assert!(store.active_agency().is_none());
    }

    #[test]
    fn test_update_profile_requires_session() {
        let mut store = logged_out_store();
        assert_eq!(
            store.update_user_profile(&ProfilePatch::name("x")).err(),
            Some(IdentityError::NotLoggedIn)
        );
    }

    #[test]
    fn test_update_profile_rejects_taken_email() {
        let mut store = store();
        let patch = ProfilePatch {
            email: Some("john@agencyunison.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update_user_profile(&patch),
            Err(IdentityError::EmailInUse { .. })
        ));
        assert_eq!(store.current_user().unwrap().email, "admin@agencyunison.com");
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut store = store();
        store.remove_user("4").unwrap();
        let user = store
            .add_user(NewUser::new("Late", "late@agencyunison.com", Role::User))
            .unwrap();
        assert_eq!(user.id, "5");
    }

    #[test]
    fn test_removing_current_user_ends_session() {
        let mut store = store();
        store.remove_user("1").unwrap();
        assert!(store.current_user().is_none());
        assert_eq!(
            store.history().last().unwrap().event,
            SessionEvent::UserRemoved {
                user_id: "1".to_string()
            }
        );
    }

    #[test]
    fn test_replace_roster_rejects_duplicate_ids() {
        let mut store = store();
        let mut users = store.all_users().to_vec();
        users[1].id = "1".to_string();

        assert!(matches!(
            store.replace_roster(users),
            Err(IdentityError::DuplicateUserId { .. })
        ));
        assert_eq!(store.all_users().len(), 4);
    }

    #[test]
    fn test_replace_roster_bumps_id_allocator() {
        let mut store = store();
        let mut users = store.all_users().to_vec();
        users[3].id = "40".to_string();
        store.replace_roster(users).unwrap();

        let user = store
            .add_user(NewUser::new("Next", "next@agencyunison.com", Role::User))
            .unwrap();
        assert_eq!(user.id, "41");
    }

    #[test]
    fn test_signup_after_largest_id_is_rejected_without_side_effects() {
        let mut store = store();
        let mut users = store.all_users().to_vec();
        users[3].id = u64::MAX.to_string();
        store.replace_roster(users).unwrap();
        let before = store.all_users().to_vec();

        let result = store.signup(NewUser::new("Fresh", "fresh@x.com", Role::User));
        assert_eq!(result.err(), Some(IdentityError::IdsExhausted));
        assert_eq!(store.all_users(), before.as_slice());
        assert_eq!(store.current_user().unwrap().id, "1");
        assert!(store.history().is_empty());

        let stats = store.metrics().get_stats();
        assert_eq!(stats.rejected_signups, 1);
        assert_eq!(stats.signups, 0);
    }

    #[test]
    fn test_signup_resets_active_agency_outside_memberships() {
        let mut store = store();
        let mut new_user = NewUser::new("Lee", "lee@agencyunison.com", Role::User)
            .with_agencies(vec!["1".to_string()]);
        new_user.active_agency_id = Some("3".to_string());

        let user = store.signup(new_user).unwrap();
        assert_eq!(user.agencies, vec!["1".to_string()]);
        assert_eq!(user.active_agency_id.as_deref(), Some("1"));
    }
}
