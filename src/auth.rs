//! Admin login state.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::AdminCredentials;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid admin credentials")]
    InvalidCredentials,
    #[error("admin login required")]
    NotAuthorized,
}

/// Who is logged in. There is a single admin account; nobody else logs in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
    is_admin: bool,
    is_logged_in: bool,
    admin_user: Option<String>,
}

impl AdminSession {
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn admin_user(&self) -> Option<&str> {
        self.admin_user.as_deref()
    }

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any mismatch; the session
    /// is left unchanged.
    pub fn login(
        &mut self,
        expected: &AdminCredentials,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if username != expected.username || password != expected.password {
            tracing::warn!(username, "admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        self.is_admin = true;
        self.is_logged_in = true;
        self.admin_user = Some(username.to_owned());
        tracing::info!(username, "admin logged in");
        Ok(())
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }

    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthorized`] unless an admin is logged in.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin && self.is_logged_in {
            Ok(())
        } else {
            Err(AuthError::NotAuthorized)
        }
    }
}
