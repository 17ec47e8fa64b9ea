//! CRUD operations for [`Post`] records.

use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::Post;
use crate::row::{timestamp_at, uuid_at};
use crate::storage::Storage;

/// Get/put/delete/scan over the `posts` collection.
pub trait PostStore: Storage {
    fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        self.conn()
            .query_row(
                "SELECT id, content, author, created_at, updated_at
                 FROM posts
                 WHERE id = ?1",
                params![id.to_string()],
                row_to_post,
            )
            .optional()
            .map_err(StoreError::from)
    }

    /// Insert or replace a post keyed by its id.
    fn put_post(&self, post: &Post) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO posts (id, content, author, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                post.id.to_string(),
                post.content,
                post.author,
                post.created_at.to_rfc3339(),
                post.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Delete a post by id.  Comments are not touched here.
    fn delete_post(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM posts WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, content, author, created_at, updated_at
             FROM posts
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], row_to_post)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }
}

impl<S: Storage + ?Sized> PostStore for S {}

fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: uuid_at(row, 0)?,
        content: row.get(1)?,
        author: row.get(2)?,
        created_at: timestamp_at(row, 3)?,
        updated_at: timestamp_at(row, 4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[test]
    fn post_crud() {
        let db = Database::open_in_memory().unwrap();
        let mut post = Post::new("first", "alice");
        db.put_post(&post).unwrap();
        assert_eq!(db.get_post(post.id).unwrap().as_ref(), Some(&post));

        post.content = "edited".into();
        db.put_post(&post).unwrap();
        assert_eq!(db.list_posts().unwrap(), vec![post.clone()]);

        assert!(db.delete_post(post.id).unwrap());
        assert!(!db.delete_post(post.id).unwrap());
        assert!(db.get_post(post.id).unwrap().is_none());
    }
}
