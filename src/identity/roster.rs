use std::collections::HashSet;

use crate::identity::errors::IdentityError;
use crate::identity::types::{AuthProvider, ProfilePatch, Role, User};

/// Ordered collection of users. Insertion order is display order; ids and
/// emails are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, rejecting duplicate ids or emails
    pub fn from_users(users: Vec<User>) -> Result<Self, IdentityError> {
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();
        for user in &users {
            if !ids.insert(user.id.as_str()) {
                return Err(IdentityError::DuplicateUserId {
                    id: user.id.clone(),
                });
            }
            if !emails.insert(user.email.as_str()) {
                return Err(IdentityError::EmailInUse {
                    email: user.email.clone(),
                });
            }
        }
        Ok(Self { users })
    }

    /// For fixed data whose invariants are covered by tests
    pub(crate) fn from_users_unchecked(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Exact, case-sensitive email match
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email == email)
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    /// First user (in roster order) registered with the given provider
    pub fn find_by_provider(&self, provider: AuthProvider) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.auth_provider == Some(provider))
    }

    pub fn first_with_role(&self, role: Role) -> Option<&User> {
        self.users.iter().find(|user| user.role == role)
    }

    pub fn push(&mut self, user: User) -> Result<(), IdentityError> {
        if self.contains_id(&user.id) {
            return Err(IdentityError::DuplicateUserId { id: user.id });
        }
        if self.contains_email(&user.email) {
            return Err(IdentityError::EmailInUse { email: user.email });
        }
        self.users.push(user);
        Ok(())
    }

    /// Replace the entry with the same id, keeping its position
    pub fn replace(&mut self, user: User) -> Result<(), IdentityError> {
        self.ensure_email_free(&user.email, &user.id)?;
        let slot = self
            .users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| IdentityError::UnknownUser {
                id: user.id.clone(),
            })?;
        *slot = user;
        Ok(())
    }

    /// Shallow-merge a patch into the entry with the given id
    pub fn apply_patch(&mut self, id: &str, patch: &ProfilePatch) -> Result<&User, IdentityError> {
        if let Some(email) = &patch.email {
            self.ensure_email_free(email, id)?;
        }
        let user = self
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| IdentityError::UnknownUser { id: id.to_string() })?;
        patch.apply_to(user);
        Ok(user)
    }

    pub fn remove(&mut self, id: &str) -> Option<User> {
        let index = self.users.iter().position(|user| user.id == id)?;
        Some(self.users.remove(index))
    }

    fn ensure_email_free(&self, email: &str, owner_id: &str) -> Result<(), IdentityError> {
        match self.find_by_email(email) {
            Some(other) if other.id != owner_id => Err(IdentityError::EmailInUse {
                email: email.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
