//! # mentormee-shared
//!
//! Vocabulary shared by the store, the core and the command-line driver:
//! relationship request records, the session token format and the handful of
//! constants that name files and slots on disk.

pub mod constants;
pub mod types;

pub use types::{is_email, PendingRequest, RequestStatus, SessionToken};
