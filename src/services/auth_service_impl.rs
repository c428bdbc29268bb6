//! Directory-backed implementation of the `AuthService` trait.

use std::sync::Arc;

use crate::constants::auth;
use crate::services::auth_service::{AccessToken, AuthService, transform_password};
use crate::services::directory::{UserDirectory, UserRecord};

pub struct DirectoryAuthService {
    directory: Arc<UserDirectory>,
}

impl DirectoryAuthService {
    #[must_use]
    pub const fn new(directory: Arc<UserDirectory>) -> Self {
        Self { directory }
    }

    #[cfg(test)]
    fn directory(&self) -> &UserDirectory {
        &self.directory
    }
}

impl AuthService for DirectoryAuthService {
    fn verify(&self, username: &str, password: &str) -> bool {
        let Some(record) = self.directory.credentials(username) else {
            return false;
        };

        transform_password(password).as_bytes() == record.stored_secret.as_bytes()
    }

    fn issue(&self, username: &str) -> AccessToken {
        AccessToken {
            access_token: username.to_string(),
            token_type: auth::TOKEN_TYPE,
        }
    }

    fn resolve(&self, token: &str) -> Option<UserRecord> {
        self.directory.lookup(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, UserEntry};
    use crate::services::auth_service::AuthError;

    fn service() -> DirectoryAuthService {
        let mut users = Config::default().users;
        users.push(UserEntry {
            username: "jan".to_string(),
            email: None,
            full_name: Some("Jan Kowalski".to_string()),
            hashed_password: transform_password("haslo"),
            disabled: true,
        });

        let directory = UserDirectory::from_entries(&users).unwrap();
        DirectoryAuthService::new(Arc::new(directory))
    }

    #[test]
    fn test_verify() {
        let svc = service();
        assert!(svc.verify("marcin", "sekretnehaslo"));
        assert!(!svc.verify("marcin", "wrong"));
        assert!(!svc.verify("marcin", "hashedsekretnehaslo"));
        assert!(!svc.verify("marcin", ""));
        assert!(!svc.verify("nobody", "sekretnehaslo"));
        // Disabled accounts still verify; the gate rejects them later.
        assert!(svc.verify("jan", "haslo"));
    }

    #[test]
    fn test_login_hides_which_part_failed() {
        let svc = service();
        let unknown_user = svc.login("nobody", "sekretnehaslo").unwrap_err();
        let wrong_password = svc.login("marcin", "wrong").unwrap_err();
        assert_eq!(unknown_user, AuthError::InvalidCredentials);
        assert_eq!(unknown_user, wrong_password);
        assert_eq!(unknown_user.to_string(), wrong_password.to_string());
    }

    #[test]
    fn test_login_issues_passthrough_token() {
        let svc = service();
        let token = svc.login("marcin", "sekretnehaslo").unwrap();
        assert_eq!(token.access_token, "marcin");
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn test_issue_is_deterministic() {
        let svc = service();
        assert_eq!(svc.issue("marcin"), svc.issue("marcin"));
    }

    #[test]
    fn test_resolve_matches_lookup() {
        let svc = service();
        for username in ["marcin", "jan", "nobody", ""] {
            let token = svc.issue(username);
            assert_eq!(
                svc.resolve(&token.access_token).as_ref(),
                svc.directory().lookup(username)
            );
        }
    }

    #[test]
    fn test_authorize() {
        let svc = service();

        let user = svc.authorize("marcin").unwrap();
        assert_eq!(user.username, "marcin");
        assert_eq!(user.full_name.as_deref(), Some("Marcin Kopton"));

        assert_eq!(svc.authorize("doesnotexist"), Err(AuthError::InvalidToken));
        assert_eq!(svc.authorize("jan"), Err(AuthError::InactiveUser));
    }
}
