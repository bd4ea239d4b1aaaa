// Fixed sample data the dashboard starts with

use crate::identity::roster::Roster;
use crate::identity::types::{Agency, AuthProvider, Role, User};

pub const DEFAULT_AVATAR_TEMPLATE: &str =
    "https://ui-avatars.com/api/?name={name}&background=0D8ABC&color=fff";

/// Render an avatar reference from a template containing `{name}`
pub fn avatar_for(template: &str, name: &str) -> String {
    template.replace("{name}", &name.trim().replace(' ', "+"))
}

pub fn agencies() -> Vec<Agency> {
    vec![
        Agency {
            id: "1".to_string(),
            name: "AgencyUnison".to_string(),
            logo: Some("/logos/agencyunison.svg".to_string()),
        },
        Agency {
            id: "2".to_string(),
            name: "Pixel Forge Studio".to_string(),
            logo: Some("/logos/pixel-forge.svg".to_string()),
        },
        Agency::new("3", "Brightline Media"),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        seed_user(
            "1",
            "Admin User",
            "admin@agencyunison.com",
            Role::Admin,
            150_000,
            AuthProvider::Password,
            Some("+1 (555) 123-4567"),
            &["1", "2", "3"],
        ),
        seed_user(
            "2",
            "John Cofounder",
            "john@agencyunison.com",
            Role::Cofounder,
            140_000,
            AuthProvider::Google,
            Some("+1 (555) 987-6543"),
            &["1", "2"],
        ),
        seed_user(
            "3",
            "Sarah Team",
            "sarah@agencyunison.com",
            Role::User,
            85_000,
            AuthProvider::Microsoft,
            None,
            &["1"],
        ),
        seed_user(
            "4",
            "Mike Designer",
            "mike@agencyunison.com",
            Role::User,
            78_000,
            AuthProvider::Gmail,
            None,
            &["2", "1"],
        ),
    ]
}

pub fn roster() -> Roster {
    Roster::from_users_unchecked(users())
}

#[allow(clippy::too_many_arguments)]
fn seed_user(
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    salary: u64,
    provider: AuthProvider,
    phone: Option<&str>,
    agencies: &[&str],
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        salary: Some(salary),
        avatar: Some(avatar_for(DEFAULT_AVATAR_TEMPLATE, name)),
        auth_provider: Some(provider),
        phone: phone.map(str::to_string),
        agencies: agencies.iter().map(|id| id.to_string()).collect(),
        active_agency_id: agencies.first().map(|id| id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_roster_satisfies_roster_invariants() {
        assert!(Roster::from_users(users()).is_ok());
    }

    #[test]
    fn test_seed_active_agencies_are_memberships() {
        let known: Vec<String> = agencies().into_iter().map(|a| a.id).collect();
        for user in users() {
            let active = user.active_agency_id.as_deref().unwrap();
            assert!(user.is_member_of(active), "{} active agency", user.name);
            for agency in &user.agencies {
                assert!(known.contains(agency));
            }
        }
    }

    #[test]
    fn test_first_seeded_user_is_admin() {
        assert_eq!(users()[0].role, Role::Admin);
    }

    #[test]
    fn test_avatar_for_replaces_spaces() {
        assert_eq!(
            avatar_for(DEFAULT_AVATAR_TEMPLATE, "Jane Q Public"),
            "https://ui-avatars.com/api/?name=Jane+Q+Public&background=0D8ABC&color=fff"
        );
    }
}
