use crate::client::LedgerClient;
use crate::error::{FmsError, Result};

/// Access level granted by the credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// The remote sends the role string verbatim; normalize case here so
    /// "Admin", "ADMIN" and "admin" all gate the same views.
    pub fn from_remote(raw: &str) -> Role {
        if raw.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

}

/// An authenticated session. Created on a successful credential check,
/// passed explicitly into every view, and gone when the process exits.
/// There is no token or expiry model.
#[derive(Debug, Clone)]
pub struct Session {
    pub identifier: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Gate for the three admin-only views.
    pub fn require_admin(&self, view: &str) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(FmsError::Denied(format!(
                "{view} requires the admin role (logged in as {})",
                self.identifier
            )))
        }
    }
}

/// Run the credential check and build a session from the response.
pub fn login(client: &LedgerClient, identifier: &str, secret: &str) -> Result<Session> {
    let user = client.check_credentials(identifier, secret)?;
    Ok(Session {
        identifier: identifier.to_string(),
        role: Role::from_remote(&user.role),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_normalizes_case() {
        assert_eq!(Role::from_remote("Admin"), Role::Admin);
        assert_eq!(Role::from_remote("ADMIN"), Role::Admin);
        assert_eq!(Role::from_remote(" admin "), Role::Admin);
        assert_eq!(Role::from_remote("user"), Role::User);
        assert_eq!(Role::from_remote("clerk"), Role::User);
        assert_eq!(Role::from_remote(""), Role::User);
    }

    #[test]
    fn test_admin_gate() {
        let admin = Session {
            identifier: "boss@hospital.example".to_string(),
            role: Role::Admin,
        };
        assert!(admin.require_admin("payment approval").is_ok());

        let user = Session {
            identifier: "clerk@hospital.example".to_string(),
            role: Role::User,
        };
        let err = user.require_admin("payment approval").unwrap_err();
        assert!(err.to_string().contains("admin role"));
    }
}
