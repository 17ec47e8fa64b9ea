//! CRUD operations for [`User`] records, keyed by email.

use rusqlite::{params, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::models::User;
use crate::row::{json_at, timestamp_at, uuid_at};
use crate::storage::Storage;

const SELECT_USER: &str = "SELECT email, id, username, password, first_name, last_name,
        friends, friend_requests, followers, follow_requests, created_at, updated_at
 FROM users";

/// Get/put/delete/scan over the `users` collection.
pub trait UserStore: Storage {
    /// Fetch a user by email.
    fn get_user(&self, email: &str) -> Result<Option<User>> {
        self.conn()
            .query_row(
                &format!("{SELECT_USER} WHERE email = ?1"),
                params![email],
                row_to_user,
            )
            .optional()
            .map_err(StoreError::from)
    }

    /// Insert or replace a user keyed by its email.
    fn put_user(&self, user: &User) -> Result<()> {
        let friends = serde_json::to_string(&user.friends)?;
        let friend_requests = serde_json::to_string(&user.friend_requests)?;
        let followers = serde_json::to_string(&user.followers)?;
        let follow_requests = serde_json::to_string(&user.follow_requests)?;

        self.conn().execute(
            "INSERT OR REPLACE INTO users (email, id, username, password, first_name, last_name,
                friends, friend_requests, followers, follow_requests, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                user.email,
                user.id.to_string(),
                user.username,
                user.password,
                user.first_name,
                user.last_name,
                friends,
                friend_requests,
                followers,
                follow_requests,
                user.created_at.to_rfc3339(),
                user.updated_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!(email = %user.email, "user stored");
        Ok(())
    }

    /// Delete a user by email.  Returns `true` if a row was deleted.
    fn delete_user(&self, email: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM users WHERE email = ?1", params![email])?;
        Ok(affected > 0)
    }

    /// Every stored user, in key order.
    fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{SELECT_USER} ORDER BY email ASC"))?;

        let rows = stmt.query_map([], row_to_user)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }
}

impl<S: Storage + ?Sized> UserStore for S {}

/// Map a `rusqlite::Row` to a [`User`].
fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        email: row.get(0)?,
        id: uuid_at(row, 1)?,
        username: row.get(2)?,
        password: row.get(3)?,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        friends: json_at(row, 6)?,
        friend_requests: json_at(row, 7)?,
        followers: json_at(row, 8)?,
        follow_requests: json_at(row, 9)?,
        created_at: timestamp_at(row, 10)?,
        updated_at: timestamp_at(row, 11)?,
    })
}
