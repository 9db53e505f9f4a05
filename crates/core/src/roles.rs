//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20261001000002_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STUDENT: &str = "student";

/// All valid roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STUDENT];

/// Normalise a role name supplied by a client (`"Admin"` -> `"admin"`).
///
/// Returns `None` for anything that is not a known role.
pub fn normalize_role(role: &str) -> Option<&'static str> {
    let lowered = role.trim().to_lowercase();
    VALID_ROLES.iter().copied().find(|r| *r == lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_any_case() {
        assert_eq!(normalize_role("Admin"), Some(ROLE_ADMIN));
        assert_eq!(normalize_role(" STUDENT "), Some(ROLE_STUDENT));
    }

    #[test]
    fn normalize_rejects_unknown_roles() {
        assert_eq!(normalize_role("warden"), None);
        assert_eq!(normalize_role(""), None);
    }
}
