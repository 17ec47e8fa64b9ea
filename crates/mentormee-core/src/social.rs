//! Friend requests, friendships and followers.
//!
//! Relationship state lives in lists on the user records:
//!
//! - a friend request is a [`PendingRequest`] on the recipient; accepting it
//!   removes the entry and adds each user to the other's `friends`, rejecting
//!   it only removes the entry;
//! - a follow is accepted on the spot: the follower's email is appended to
//!   the recipient's `followers` and no pending entry is ever left behind.
//!   Following is one-directional and nothing is written on the follower.
//!
//! Every write runs in a transaction, so a two-user change is all or nothing.
//!
//! Expected no-ops come back as a [`SocialOutcome`], not an error.  Only a
//! missing user or a storage failure is a [`CoreError`].

use std::fmt;

use chrono::Utc;
use mentormee_shared::PendingRequest;
use mentormee_store::{Storage, User, UserStore};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CoreError, Result};
use crate::state::Core;

/// Coarse classification of a [`SocialOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The graph changed.
    Applied,
    /// Nothing to do: the relationship or request is already there.
    AlreadyExists,
    /// Nothing to do: there was no request to act on.
    NotFound,
}

/// What a social graph operation did.  `Display` gives the message shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SocialOutcome {
    RequestSent { username: String },
    AlreadyFriends { username: String },
    AlreadyRequested { username: String },
    Accepted { username: String },
    /// Carries the requester's email, not username.
    Rejected { email: String },
    /// `from` is the requester's username on accept and email on reject.
    NoSuchRequest { from: String },
    Following { username: String },
    AlreadyFollowing { username: String },
}

impl SocialOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::RequestSent { .. }
            | Self::Accepted { .. }
            | Self::Rejected { .. }
            | Self::Following { .. } => OutcomeKind::Applied,
            Self::AlreadyFriends { .. }
            | Self::AlreadyRequested { .. }
            | Self::AlreadyFollowing { .. } => OutcomeKind::AlreadyExists,
            Self::NoSuchRequest { .. } => OutcomeKind::NotFound,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.kind() == OutcomeKind::Applied
    }
}

impl fmt::Display for SocialOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestSent { username } => write!(f, "Friend request sent to {username}"),
            Self::AlreadyFriends { username } => {
                write!(f, "You are already friends with {username}")
            }
            Self::AlreadyRequested { username } => {
                write!(f, "Friend request already sent to {username}")
            }
            Self::Accepted { username } => write!(
                f,
                "Friend request accepted. You are now friends with {username}"
            ),
            Self::Rejected { email } => write!(f, "Friend request from {email} rejected."),
            Self::NoSuchRequest { from } => write!(f, "No friend request from {from}"),
            Self::Following { username } => write!(f, "You are now following {username}"),
            Self::AlreadyFollowing { username } => {
                write!(f, "You are already following {username}")
            }
        }
    }
}

impl Core {
    // ------------------------------------------------------------------
    // Friendship
    // ------------------------------------------------------------------

    /// Leave a pending request from `from` on `to`'s record.
    pub fn send_friend_request(&mut self, from: &str, to: &str) -> Result<SocialOutcome> {
        let outcome = self.db.transaction(|tx| -> Result<SocialOutcome> {
            let from_user = require_user(tx, from)?;
            let mut to_user = require_user(tx, to)?;

            if from_user.is_friend_with(to) {
                return Ok(SocialOutcome::AlreadyFriends {
                    username: to_user.username,
                });
            }
            if to_user.has_friend_request_from(from) {
                return Ok(SocialOutcome::AlreadyRequested {
                    username: to_user.username,
                });
            }

            to_user.friend_requests.push(PendingRequest::pending(from));
            to_user.updated_at = Utc::now();
            tx.put_user(&to_user)?;

            Ok(SocialOutcome::RequestSent {
                username: to_user.username,
            })
        })?;

        info!(from, to, %outcome, "friend request");
        Ok(outcome)
    }

    /// Turn `from`'s pending request on `to` into a friendship on both sides.
    pub fn accept_friend_request(&mut self, from: &str, to: &str) -> Result<SocialOutcome> {
        let outcome = self.db.transaction(|tx| -> Result<SocialOutcome> {
            let mut from_user = require_user(tx, from)?;
            let mut to_user = require_user(tx, to)?;

            if !to_user.has_friend_request_from(from) {
                return Ok(SocialOutcome::NoSuchRequest {
                    from: from_user.username,
                });
            }

            let now = Utc::now();
            to_user.friend_requests.retain(|r| r.from != from);
            push_unique(&mut to_user.friends, from);
            to_user.updated_at = now;

            if from_user.email == to_user.email {
                // self-request: one record holds both sides
                tx.put_user(&to_user)?;
            } else {
                push_unique(&mut from_user.friends, to);
                from_user.updated_at = now;
                tx.put_user(&from_user)?;
                tx.put_user(&to_user)?;
            }

            Ok(SocialOutcome::Accepted {
                username: from_user.username,
            })
        })?;

        info!(from, to, %outcome, "friend request accepted");
        Ok(outcome)
    }

    /// Drop `from`'s pending request on `to`.  Neither `friends` list changes.
    pub fn reject_friend_request(&mut self, from: &str, to: &str) -> Result<SocialOutcome> {
        let outcome = self.db.transaction(|tx| -> Result<SocialOutcome> {
            let mut to_user = require_user(tx, to)?;

            if !to_user.has_friend_request_from(from) {
                return Ok(SocialOutcome::NoSuchRequest {
                    from: from.to_string(),
                });
            }

            to_user.friend_requests.retain(|r| r.from != from);
            to_user.updated_at = Utc::now();
            tx.put_user(&to_user)?;

            Ok(SocialOutcome::Rejected {
                email: from.to_string(),
            })
        })?;

        info!(from, to, %outcome, "friend request rejected");
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Follow
    // ------------------------------------------------------------------

    /// Make `from` a follower of `to`, immediately.  Both users must exist.
    ///
    /// Any stale entry from `from` in `to.follow_requests` is dropped; no new
    /// one is written.
    pub fn send_follow_request(&mut self, from: &str, to: &str) -> Result<SocialOutcome> {
        let outcome = self.db.transaction(|tx| -> Result<SocialOutcome> {
            require_user(tx, from)?;
            let mut to_user = require_user(tx, to)?;

            if to_user.is_followed_by(from) {
                return Ok(SocialOutcome::AlreadyFollowing {
                    username: to_user.username,
                });
            }

            to_user.followers.push(from.to_string());
            to_user.follow_requests.retain(|r| r.from != from);
            to_user.updated_at = Utc::now();
            tx.put_user(&to_user)?;

            Ok(SocialOutcome::Following {
                username: to_user.username,
            })
        })?;

        info!(from, to, %outcome, "follow request");
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Full records of `email`'s friends.  An unknown user has no friends.
    pub fn fetch_friends(&self, email: &str) -> Result<Vec<User>> {
        match self.db.get_user(email)? {
            Some(user) => resolve_users(&self.db, &user.friends),
            None => Ok(Vec::new()),
        }
    }

    /// Full records of `email`'s followers.  An unknown user has none.
    pub fn fetch_followers(&self, email: &str) -> Result<Vec<User>> {
        match self.db.get_user(email)? {
            Some(user) => resolve_users(&self.db, &user.followers),
            None => Ok(Vec::new()),
        }
    }

    /// Everyone except `email` and its current friends.
    ///
    /// Pending requests and followers are not excluded.
    pub fn fetch_suggested_friends(&self, email: &str) -> Result<Vec<User>> {
        let user = require_user(&self.db, email)?;
        let suggested = self
            .search("")?
            .into_iter()
            .filter(|other| other.email != email && !user.is_friend_with(&other.email))
            .collect();
        Ok(suggested)
    }

    /// The raw pending friend requests on `email`'s record.
    pub fn fetch_friend_requests(&self, email: &str) -> Result<Vec<PendingRequest>> {
        Ok(require_user(&self.db, email)?.friend_requests)
    }
}

fn require_user<S: Storage + ?Sized>(store: &S, email: &str) -> Result<User> {
    store
        .get_user(email)?
        .ok_or_else(|| CoreError::UserNotFound(email.to_string()))
}

/// Look up each email, skipping any that no longer resolve to a user.
fn resolve_users<S: Storage + ?Sized>(store: &S, emails: &[String]) -> Result<Vec<User>> {
    let mut users = Vec::with_capacity(emails.len());
    for email in emails {
        match store.get_user(email)? {
            Some(user) => users.push(user),
            None => warn!(%email, "relationship points at unknown user"),
        }
    }
    Ok(users)
}

fn push_unique(list: &mut Vec<String>, email: &str) {
    if !list.iter().any(|e| e == email) {
        list.push(email.to_string());
    }
}
