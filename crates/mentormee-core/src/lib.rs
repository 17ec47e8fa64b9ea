//! # mentormee-core
//!
//! The local persistence and social-graph layer of MentorMee.
//!
//! [`Core`] owns the database handle and the session slot.  Its operations
//! are split by area across modules, each adding an `impl Core` block:
//!
//! - [`identity`]: registration, login, profiles and search
//! - [`content`]: posts and comments, including the post → comments cascade
//! - [`social`]: friend requests, friendships and followers
//!
//! Identity and content operations fail with [`CoreError`].  Social graph
//! operations report expected no-ops (already friends, no such request) as a
//! [`SocialOutcome`] instead; callers must inspect it to learn whether the
//! graph changed.

pub mod config;
pub mod content;
pub mod identity;
pub mod session;
pub mod social;
pub mod state;

mod error;

pub use config::CoreConfig;
pub use error::{CoreError, Result};
pub use identity::{LoginSession, NewUser, ProfilePatch, PublicProfile};
pub use session::{FileTokenSlot, MemoryTokenSlot, SessionContext, TokenSlot};
pub use social::{OutcomeKind, SocialOutcome};
pub use state::Core;

pub use mentormee_shared::{PendingRequest, RequestStatus, SessionToken};
pub use mentormee_store::{Comment, Post, User};
