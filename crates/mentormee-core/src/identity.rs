//! Registration, login, profiles and user search.

use chrono::{DateTime, Utc};
use mentormee_shared::{is_email, SessionToken};
use mentormee_store::{Storage, User, UserStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::state::Core;

/// Fields supplied at sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial profile update.  `None` leaves the stored value alone.
///
/// The email is the record key and cannot be changed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub user: User,
    pub token: SessionToken,
}

/// A user as shown to other users: everything but the password.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub friends: Vec<String>,
    pub followers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicProfile {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            username: u.username.clone(),
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            friends: u.friends.clone(),
            followers: u.followers.clone(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl Core {
    /// Create an account.
    ///
    /// Fails with [`CoreError::DuplicateEmail`] or
    /// [`CoreError::DuplicateUsername`] (exact, case-sensitive match).  The
    /// checks and the insert share one transaction.
    pub fn register(&mut self, candidate: NewUser) -> Result<User> {
        let user = self.db.transaction(move |tx| -> Result<User> {
            if tx.get_user(&candidate.email)?.is_some() {
                return Err(CoreError::DuplicateEmail);
            }
            if find_by_username(tx, &candidate.username)?.is_some() {
                return Err(CoreError::DuplicateUsername);
            }

            let now = Utc::now();
            let user = User {
                id: Uuid::new_v4(),
                email: candidate.email,
                username: candidate.username,
                password: candidate.password,
                first_name: candidate.first_name,
                last_name: candidate.last_name,
                friends: Vec::new(),
                friend_requests: Vec::new(),
                followers: Vec::new(),
                follow_requests: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            tx.put_user(&user)?;
            Ok(user)
        })?;

        info!(email = %user.email, username = %user.username, "user registered");
        Ok(user)
    }

    /// Log in with an email or a username.
    ///
    /// On success a fresh session token is written to the session slot.
    pub fn login(&self, input: &str, password: &str) -> Result<LoginSession> {
        let user = if is_email(input) {
            self.db.get_user(input)?
        } else {
            find_by_username(&self.db, input)?
        };

        let Some(user) = user else {
            warn!(input, "login for unknown user");
            return Err(CoreError::UserNotFound(input.to_string()));
        };

        // plaintext comparison
        if user.password != password {
            warn!(email = %user.email, "login with wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        let token = self.session.issue(&user)?;
        info!(email = %user.email, "user logged in");

        Ok(LoginSession { user, token })
    }

    /// Forget the current session token.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        Ok(())
    }

    pub fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.db.get_user(email)?)
    }

    /// The user named by the stored session token, if both exist.
    pub fn current_user(&self) -> Result<Option<User>> {
        match self.session.recover_identity()? {
            Some(email) => self.get_by_email(&email),
            None => Ok(None),
        }
    }

    /// Overwrite the patched fields and refresh `updated_at`.
    ///
    /// Username uniqueness is not re-checked here.
    pub fn update_profile(&mut self, email: &str, patch: ProfilePatch) -> Result<User> {
        let mut user = self
            .db
            .get_user(email)?
            .ok_or_else(|| CoreError::UserNotFound(email.to_string()))?;

        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(password) = patch.password {
            user.password = password;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        user.updated_at = Utc::now();

        self.db.put_user(&user)?;
        info!(email, "profile updated");
        Ok(user)
    }

    /// Users whose username or email contains `query`, ignoring case.
    /// An empty query matches everyone.
    pub fn search(&self, query: &str) -> Result<Vec<User>> {
        let needle = query.to_lowercase();
        let users = self
            .db
            .list_users()?
            .into_iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .collect();
        Ok(users)
    }
}

/// Full scan for an exact, case-sensitive username match.
fn find_by_username<S: Storage + ?Sized>(store: &S, username: &str) -> Result<Option<User>> {
    Ok(store
        .list_users()?
        .into_iter()
        .find(|u| u.username == username))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(email: &str, username: &str) -> NewUser {
        NewUser {
            email: email.into(),
            username: username.into(),
            password: "pw123456".into(),
            first_name: "First".into(),
            last_name: "Last".into(),
        }
    }

    #[test]
    fn register_starts_with_empty_relationships() {
        let mut core = Core::in_memory().unwrap();
        let user = core.register(candidate("alice@x.com", "alice")).unwrap();

        assert!(user.friends.is_empty());
        assert!(user.friend_requests.is_empty());
        assert!(user.followers.is_empty());
        assert!(user.follow_requests.is_empty());
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(core.get_by_email("alice@x.com").unwrap(), Some(user));
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let mut core = Core::in_memory().unwrap();
        core.register(candidate("alice@x.com", "alice")).unwrap();
        core.register(candidate("alice2@x.com", "Alice")).unwrap();

        assert!(matches!(
            core.login("ALICE", "pw123456"),
            Err(CoreError::UserNotFound(_))
        ));
    }

    #[test]
    fn update_profile_can_introduce_duplicate_username() {
        let mut core = Core::in_memory().unwrap();
        core.register(candidate("alice@x.com", "alice")).unwrap();
        core.register(candidate("bob@x.com", "bob")).unwrap();

        let patch = ProfilePatch {
            username: Some("alice".into()),
            ..Default::default()
        };
        let bob = core.update_profile("bob@x.com", patch).unwrap();
        assert_eq!(bob.username, "alice");
        assert!(bob.updated_at >= bob.created_at);
    }

    #[test]
    fn public_profile_drops_password() {
        let mut core = Core::in_memory().unwrap();
        let user = core.register(candidate("alice@x.com", "alice")).unwrap();

        let json = serde_json::to_value(PublicProfile::from(&user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["firstName"], "First");
    }
}
