//! Customer and staff profiles.

use serde::{Deserialize, Serialize};

use crate::types::{Measurements, UserId};

/// What a signed-in user is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Customer,
    /// Back-office access.
    Admin,
}

/// A shopper's profile, including the measurements snapshotted into
/// bespoke order lines at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub measurements: Measurements,
}

impl UserProfile {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// First letter of each name part, e.g. `KK` for Kevin Kamau.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Case-insensitive substring match on name, email or phone.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.phone.as_deref().is_some_and(|p| p.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kevin() -> UserProfile {
        UserProfile {
            id: UserId::new("u-101"),
            name: "Kevin Kamau".to_owned(),
            email: "kevin.kamau@example.co.ke".to_owned(),
            phone: Some("0712345678".to_owned()),
            role: Role::Customer,
            measurements: Measurements::default(),
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(kevin().initials(), "KK");
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let json = r#"{"id":"u-9","name":"A","email":"a@b.c"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap_or_else(|_| kevin());
        assert_eq!(user.role, Role::Customer);
        assert!(!user.is_admin());
        assert_eq!(user.phone, None);
    }

    #[test]
    fn test_search_matches_name_email_or_phone() {
        let user = kevin();
        assert!(user.matches_search("kamau"));
        assert!(user.matches_search("EXAMPLE.CO.KE"));
        assert!(user.matches_search("0712"));
        assert!(!user.matches_search("njeri"));
    }

    #[test]
    fn test_phone_search_trims_query() {
        let user = UserProfile {
            phone: Some("+254712345678".to_owned()),
            ..kevin()
        };
        assert!(user.matches_search("  +2547123 "));
        assert!(user.matches_search("\t345678\n"));
        assert!(!user.matches_search("0799"));
    }
}
