//! Domain model structs persisted in the local SQLite database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the presentation layer.  Relationship lists are always present
//! and empty by default.

use chrono::{DateTime, Utc};
use mentormee_shared::PendingRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account.  The primary key is the email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Primary key; unique across all users.
    pub email: String,
    /// Unique across all users at registration time.
    pub username: String,
    /// Stored and compared in plaintext.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Emails of accepted friends.
    #[serde(default)]
    pub friends: Vec<String>,
    /// Incoming friend requests awaiting an answer.
    #[serde(default)]
    pub friend_requests: Vec<PendingRequest>,
    /// Emails of users following this one.
    #[serde(default)]
    pub followers: Vec<String>,
    /// Incoming follow requests.  Follows auto-accept, so this never gains
    /// entries in practice.
    #[serde(default)]
    pub follow_requests: Vec<PendingRequest>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_friend_with(&self, email: &str) -> bool {
        self.friends.iter().any(|f| f == email)
    }

    pub fn has_friend_request_from(&self, email: &str) -> bool {
        self.friend_requests.iter().any(|r| r.from == email)
    }

    pub fn is_followed_by(&self, email: &str) -> bool {
        self.followers.iter().any(|f| f == email)
    }
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// A post on the shared feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    /// Username of the author at the time of writing.
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// A fresh post with a new id and both timestamps set to now.
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            author: author.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A comment attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    /// The post this comment was written against.  Not checked on write.
    pub post_id: Uuid,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, content: impl Into<String>, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            content: content.into(),
            author: author.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
