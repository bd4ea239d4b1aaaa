// Core types for users, agencies and the profile patches applied to them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = String;
pub type AgencyId = String;

/// Role of a user within the agency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cofounder,
    User,
}

impl Role {
    /// Admins and cofounders get the agency, user-management and advanced views.
    /// Always derived from the role, never stored alongside it.
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Admin | Role::Cofounder)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cofounder => "cofounder",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "cofounder" => Ok(Role::Cofounder),
            "user" => Ok(Role::User),
            other => Err(format!(
                "unknown role '{other}' (expected admin, cofounder or user)"
            )),
        }
    }
}

/// How a user authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Password,
    Google,
    Microsoft,
    Gmail,
}

impl AuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthProvider::Password => "password",
            AuthProvider::Google => "google",
            AuthProvider::Microsoft => "microsoft",
            AuthProvider::Gmail => "gmail",
        }
    }

    pub fn is_external(self) -> bool {
        !matches!(self, AuthProvider::Password)
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(AuthProvider::Password),
            "google" => Ok(AuthProvider::Google),
            "microsoft" => Ok(AuthProvider::Microsoft),
            "gmail" => Ok(AuthProvider::Gmail),
            other => Err(format!(
                "unknown auth provider '{other}' (expected password, google, microsoft or gmail)"
            )),
        }
    }
}

/// A tenant-like grouping users can belong to and switch between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    pub id: AgencyId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Agency {
    pub fn new(id: impl Into<AgencyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique within a roster, compared case-sensitively
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<AuthProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub agencies: Vec<AgencyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_agency_id: Option<AgencyId>,
}

impl User {
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }

    pub fn is_member_of(&self, agency_id: &str) -> bool {
        self.agencies.iter().any(|id| id == agency_id)
    }

    pub(crate) fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            salary: new_user.salary,
            avatar: new_user.avatar,
            auth_provider: new_user.auth_provider,
            phone: new_user.phone,
            agencies: new_user.agencies,
            active_agency_id: new_user.active_agency_id,
        }
    }
}

/// A user that has not been assigned an identifier yet (signup input)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub salary: Option<u64>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub auth_provider: Option<AuthProvider>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub agencies: Vec<AgencyId>,
    #[serde(default)]
    pub active_agency_id: Option<AgencyId>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            salary: None,
            avatar: None,
            auth_provider: None,
            phone: None,
            agencies: Vec::new(),
            active_agency_id: None,
        }
    }

    pub fn with_salary(mut self, salary: u64) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn with_auth_provider(mut self, provider: AuthProvider) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    pub fn with_agencies(mut self, agencies: Vec<AgencyId>) -> Self {
        self.agencies = agencies;
        self
    }
}

/// Partial update merged shallowly into a user. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub salary: Option<u64>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub auth_provider: Option<AuthProvider>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub agencies: Option<Vec<AgencyId>>,
    #[serde(default)]
    pub active_agency_id: Option<AgencyId>,
}

impl ProfilePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field present in the patch, leave the rest untouched
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(salary) = self.salary {
            user.salary = Some(salary);
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = Some(avatar.clone());
        }
        if let Some(provider) = self.auth_provider {
            user.auth_provider = Some(provider);
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(agencies) = &self.agencies {
            user.agencies = agencies.clone();
        }
        if let Some(active) = &self.active_agency_id {
            user.active_agency_id = Some(active.clone());
        }
    }
}
