use super::*;
use crate::config::ClientConfig;

fn credentials() -> AdminCredentials {
    ClientConfig::default().admin
}

#[test]
fn fresh_session_is_anonymous() {
    let session = AdminSession::default();
    assert!(!session.is_admin());
    assert!(!session.is_logged_in());
    assert_eq!(session.admin_user(), None);
    assert_eq!(session.require_admin(), Err(AuthError::NotAuthorized));
}

#[test]
fn login_with_configured_credentials() {
    let mut session = AdminSession::default();
    session.login(&credentials(), "admin", "admin123").unwrap();
    assert!(session.is_admin());
    assert!(session.is_logged_in());
    assert_eq!(session.admin_user(), Some("admin"));
    assert_eq!(session.require_admin(), Ok(()));
}

#[test]
fn wrong_password_changes_nothing() {
    let mut session = AdminSession::default();
    assert_eq!(session.login(&credentials(), "admin", "admin"), Err(AuthError::InvalidCredentials));
    assert_eq!(session, AdminSession::default());
}

#[test]
fn custom_credentials_replace_defaults() {
    let expected = AdminCredentials {
        username: "ops".to_owned(),
        password: "s3cret".to_owned(),
    };
    let mut session = AdminSession::default();
    assert!(session.login(&expected, "admin", "admin123").is_err());
    session.login(&expected, "ops", "s3cret").unwrap();
    assert_eq!(session.admin_user(), Some("ops"));
}

#[test]
fn logout_clears_everything() {
    let mut session = AdminSession::default();
    session.login(&credentials(), "admin", "admin123").unwrap();
    session.logout();
    assert_eq!(session, AdminSession::default());
    assert!(session.require_admin().is_err());
}
