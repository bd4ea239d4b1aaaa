use serde::Serialize;

use crate::identity::{IdentityError, NewUser, Role, User, UserId};
use crate::notifications::{Notification, Notifier};
use crate::session::SessionStore;
use crate::views::{forms, require_privileged};

/// Salaries plus benefits and taxes
pub const BUDGET_OVERHEAD: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRow {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
    pub salary: Option<u64>,
}

impl From<&User> for SalaryRow {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            salary: user.salary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalarySummary {
    pub total: u64,
    pub annual_budget: f64,
    pub monthly_budget: f64,
}

impl SalarySummary {
    pub fn from_users<'u>(users: impl IntoIterator<Item = &'u User>) -> Self {
        let total: u64 = users.into_iter().filter_map(|user| user.salary).sum();
        let annual_budget = total as f64 * BUDGET_OVERHEAD;
        Self {
            total,
            annual_budget,
            monthly_budget: annual_budget / 12.0,
        }
    }
}

/// Whole-dollar USD with thousands separators, `N/A` when unknown
pub fn format_currency(amount: Option<u64>) -> String {
    let Some(amount) = amount else {
        return "N/A".to_string();
    };
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// Finance view over roster salaries. Everyone sees their own salary;
/// privileged users see and edit everyone's.
pub struct SalaryManagement<'a, N: Notifier + ?Sized> {
    store: &'a mut SessionStore,
    notifier: &'a N,
}

impl<'a, N: Notifier + ?Sized> SalaryManagement<'a, N> {
    pub fn new(store: &'a mut SessionStore, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    pub fn can_view_all(&self) -> bool {
        self.store.is_privileged()
    }

    pub fn own_salary(&self) -> Option<u64> {
        self.store.current_user().and_then(|user| user.salary)
    }

    pub fn visible_salaries(&self) -> Vec<SalaryRow> {
        if self.can_view_all() {
            self.store.all_users().iter().map(SalaryRow::from).collect()
        } else {
            self.store
                .current_user()
                .map(SalaryRow::from)
                .into_iter()
                .collect()
        }
    }

    /// Budget overview, only available to privileged users
    pub fn summary(&self) -> Option<SalarySummary> {
        self.can_view_all()
            .then(|| SalarySummary::from_users(self.store.all_users()))
    }

    pub fn update_salary(&mut self, user_id: &str, amount: u64) -> Result<(), IdentityError> {
        let result = require_privileged(self.store, "edit salaries").and_then(|()| {
            let mut user = self.store.roster().get(user_id).cloned().ok_or_else(|| {
                IdentityError::UnknownUser {
                    id: user_id.to_string(),
                }
            })?;
            user.salary = Some(amount);
            self.store.update_user(user)
        });

        match &result {
            Ok(()) => self.notifier.notify(Notification::info(
                "Salary updated",
                "The employee's salary has been updated successfully.",
            )),
            Err(e) => self
                .notifier
                .notify(Notification::destructive("Salary not updated", e.to_string())),
        }
        result
    }

    pub fn add_team_member(&mut self, name: &str, email: &str, salary: u64) -> Result<User, IdentityError> {
        let result = require_privileged(self.store, "add team members")
            .and_then(|()| forms::require_name_and_email(name, email))
            .and_then(|()| {
                self.store
                    .add_user(NewUser::new(name, email, Role::User).with_salary(salary))
                    .cloned()
            });

        match &result {
            Ok(_) => self.notifier.notify(Notification::info(
                "Team member added",
                format!("{name} has been added to the team."),
            )),
            Err(IdentityError::Validation { reason }) => self
                .notifier
                .notify(Notification::destructive("Missing information", reason.clone())),
            Err(e) => self
                .notifier
                .notify(Notification::destructive("Team member not added", e.to_string())),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::notifications::RecordingNotifier;

    fn store_as(email: &str) -> SessionStore {
        let mut store = SessionStore::seeded(&SessionConfig::default());
        store.login_with_email(email).unwrap();
        store
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(None), "N/A");
        assert_eq!(format_currency(Some(0)), "$0");
        assert_eq!(format_currency(Some(950)), "$950");
        assert_eq!(format_currency(Some(85_000)), "$85,000");
        assert_eq!(format_currency(Some(1_234_567)), "$1,234,567");
    }

    #[test]
    fn test_summary_applies_overhead() {
        let summary = SalarySummary::from_users(SessionStore::seeded(&SessionConfig::default()).all_users());
        assert_eq!(summary.total, 453_000);
        assert!((summary.annual_budget - 543_600.0).abs() < 1e-6);
        assert!((summary.monthly_budget - 45_300.0).abs() < 1e-6);
    }

    #[test]
    fn test_privileged_user_sees_everyone() {
        let mut store = store_as("john@agencyunison.com");
        let notifier = RecordingNotifier::new();
        let view = SalaryManagement::new(&mut store, &notifier);

        assert_eq!(view.visible_salaries().len(), 4);
        assert!(view.summary().is_some());
    }

    #[test]
    fn test_regular_user_sees_only_own_salary() {
        let mut store = store_as("sarah@agencyunison.com");
        let notifier = RecordingNotifier::new();
        let view = SalaryManagement::new(&mut store, &notifier);

        let rows = view.visible_salaries();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Sarah Team");
        assert_eq!(view.own_salary(), Some(85_000));
        assert!(view.summary().is_none());
    }

    #[test]
    fn test_update_salary_requires_privilege() {
        let mut store = store_as("sarah@agencyunison.com");
        let notifier = RecordingNotifier::new();

        let result = SalaryManagement::new(&mut store, &notifier).update_salary("3", 1_000_000);
        assert!(matches!(result, Err(IdentityError::PermissionDenied { .. })));
        assert_eq!(store.roster().get("3").unwrap().salary, Some(85_000));
    }

    #[test]
    fn test_update_salary() {
        let mut store = store_as("admin@agencyunison.com");
        let notifier = RecordingNotifier::new();

        SalaryManagement::new(&mut store, &notifier)
            .update_salary("3", 90_000)
            .unwrap();
        assert_eq!(store.roster().get("3").unwrap().salary, Some(90_000));
        assert_eq!(notifier.last().unwrap().title, "Salary updated");
    }

    #[test]
    fn test_add_team_member_missing_information() {
        let mut store = store_as("admin@agencyunison.com");
        let notifier = RecordingNotifier::new();

        let result = SalaryManagement::new(&mut store, &notifier).add_team_member("", "x@y.com", 10);
        assert!(result.is_err());
        assert_eq!(notifier.last().unwrap().title, "Missing information");
        assert_eq!(store.all_users().len(), 4);
    }

    #[test]
    fn test_add_team_member() {
        let mut store = store_as("admin@agencyunison.com");
        let notifier = RecordingNotifier::new();

        let user = SalaryManagement::new(&mut store, &notifier)
            .add_team_member("Ray Intern", "ray@agencyunison.com", 40_000)
            .unwrap();
        assert_eq!(user.salary, Some(40_000));
        assert_eq!(user.role, Role::User);
        assert_eq!(
            notifier.last().unwrap().description,
            "Ray Intern has been added to the team."
        );
    }
}
