//! v001 -- Initial schema creation.
//!
//! Creates the three collections: `users`, `posts` and `comments`.
//! Relationship lists on users are JSON arrays in TEXT columns.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    email           TEXT PRIMARY KEY NOT NULL,
    id              TEXT NOT NULL,                -- UUID v4
    username        TEXT NOT NULL,                -- uniqueness checked by the core
    password        TEXT NOT NULL,                -- plaintext
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    friends         TEXT NOT NULL DEFAULT '[]',   -- JSON [email]
    friend_requests TEXT NOT NULL DEFAULT '[]',   -- JSON [{from, status}]
    followers       TEXT NOT NULL DEFAULT '[]',   -- JSON [email]
    follow_requests TEXT NOT NULL DEFAULT '[]',   -- JSON [{from, status}]
    created_at      TEXT NOT NULL,                -- RFC-3339
    updated_at      TEXT NOT NULL
);

-- ----------------------------------------------------------------
-- Posts
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS posts (
    id         TEXT PRIMARY KEY NOT NULL,         -- UUID v4
    content    TEXT NOT NULL,
    author     TEXT NOT NULL,                     -- username, not a reference
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- ----------------------------------------------------------------
-- Comments
-- ----------------------------------------------------------------
-- post_id is deliberately not a foreign key: comments may be written
-- against a post that no longer exists.
CREATE TABLE IF NOT EXISTS comments (
    id         TEXT PRIMARY KEY NOT NULL,         -- UUID v4
    post_id    TEXT NOT NULL,
    content    TEXT NOT NULL,
    author     TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
