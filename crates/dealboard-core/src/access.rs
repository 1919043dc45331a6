//! Team allow-list.
//!
//! The pipeline is shared by a fixed set of team members. When a team is
//! configured, only its members may open the store, and their normalized
//! email is stamped on every record they create. Without a team the store
//! is open, which is how single-user and test setups run.

use crate::error::{CrmError, Result};

/// Fixed allow-list of team member emails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    members: Vec<String>,
}

impl AccessPolicy {
    /// A policy that lets anyone in.
    pub fn open() -> Self {
        Self::default()
    }

    /// A policy restricted to the given emails.
    pub fn team<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut members: Vec<String> = members
            .into_iter()
            .map(|m| normalize_email(m.as_ref()))
            .filter(|m| !m.is_empty())
            .collect();
        members.sort();
        members.dedup();
        Self { members }
    }

    /// Whether no allow-list is configured.
    pub fn is_open(&self) -> bool {
        self.members.is_empty()
    }

    /// Team members, sorted.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Checks an email against the policy and returns its normalized form.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::InvalidInput` for malformed addresses or domains
    /// with non-ASCII characters, and `CrmError::Unauthorized` when the
    /// address is not on a configured allow-list.
    pub fn authorize(&self, email: &str) -> Result<String> {
        let normalized = normalize_email(email);

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(CrmError::invalid_input("email")
                .with_reason(format!("'{normalized}' is not an email address")));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(CrmError::invalid_input("email")
                .with_reason(format!("'{normalized}' is not an email address")));
        }
        if !domain.is_ascii() {
            return Err(CrmError::invalid_input("email")
                .with_reason("email domains with special characters are not supported"));
        }

        if !self.is_open() && !self.members.contains(&normalized) {
            return Err(CrmError::Unauthorized { email: normalized });
        }
        Ok(normalized)
    }
}

/// Trims and lower-cases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> AccessPolicy {
        AccessPolicy::team(["anna@example.com", " Bo@Example.com "])
    }

    #[test]
    fn test_team_members_are_normalized_and_sorted() {
        assert_eq!(team().members(), ["anna@example.com", "bo@example.com"]);
    }

    #[test]
    fn test_authorize_member_normalizes() {
        assert_eq!(
            team().authorize("  ANNA@example.com").unwrap(),
            "anna@example.com"
        );
    }

    #[test]
    fn test_authorize_rejects_outsider() {
        let err = team().authorize("eve@example.com").unwrap_err();
        assert!(matches!(err, CrmError::Unauthorized { .. }));
    }

    #[test]
    fn test_authorize_rejects_non_ascii_domain() {
        let err = AccessPolicy::open().authorize("anna@exämple.se").unwrap_err();
        assert!(matches!(err, CrmError::InvalidInput { .. }));
    }

    #[test]
    fn test_authorize_rejects_malformed() {
        assert!(AccessPolicy::open().authorize("not-an-email").is_err());
        assert!(AccessPolicy::open().authorize("@example.com").is_err());
    }

    #[test]
    fn test_open_policy_accepts_anyone() {
        let policy = AccessPolicy::open();
        assert!(policy.is_open());
        assert_eq!(policy.authorize("x@y.z").unwrap(), "x@y.z");
    }
}
