//! # mentormee-store
//!
//! Local storage for MentorMee, backed by SQLite.
//!
//! Three independent collections live in one database file: `users` keyed by
//! email, `posts` and `comments` keyed by UUID.  The crate exposes a
//! synchronous [`Database`] handle plus typed get/put/delete/scan helpers for
//! each collection.  The helpers are provided through the [`Storage`] trait so
//! they work the same on a plain connection and inside a
//! [`Database::transaction`].

pub mod comments;
pub mod database;
pub mod migrations;
pub mod models;
pub mod posts;
pub mod storage;
pub mod users;

mod error;
mod row;

pub use comments::CommentStore;
pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;
pub use posts::PostStore;
pub use storage::{Storage, StoreTx};
pub use users::UserStore;
