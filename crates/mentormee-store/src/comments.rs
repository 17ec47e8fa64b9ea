//! CRUD operations for [`Comment`] records.

use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::Comment;
use crate::row::{timestamp_at, uuid_at};
use crate::storage::Storage;

/// Get/put/delete/scan over the `comments` collection.
pub trait CommentStore: Storage {
    fn get_comment(&self, id: Uuid) -> Result<Option<Comment>> {
        self.conn()
            .query_row(
                "SELECT id, post_id, content, author, created_at, updated_at
                 FROM comments
                 WHERE id = ?1",
                params![id.to_string()],
                row_to_comment,
            )
            .optional()
            .map_err(StoreError::from)
    }

    /// Insert or replace a comment keyed by its id.
    fn put_comment(&self, comment: &Comment) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO comments (id, post_id, content, author, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                comment.id.to_string(),
                comment.post_id.to_string(),
                comment.content,
                comment.author,
                comment.created_at.to_rfc3339(),
                comment.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn delete_comment(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM comments WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    /// Every stored comment, across all posts.
    fn list_comments(&self) -> Result<Vec<Comment>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, post_id, content, author, created_at, updated_at
             FROM comments
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], row_to_comment)?;

        let mut comments = Vec::new();
        for row in rows {
            comments.push(row?);
        }
        Ok(comments)
    }
}

impl<S: Storage + ?Sized> CommentStore for S {}

fn row_to_comment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: uuid_at(row, 0)?,
        post_id: uuid_at(row, 1)?,
        content: row.get(2)?,
        author: row.get(3)?,
        created_at: timestamp_at(row, 4)?,
        updated_at: timestamp_at(row, 5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[test]
    fn comment_crud_is_independent_of_posts() {
        let db = Database::open_in_memory().unwrap();
        // no post with this id exists
        let comment = Comment::new(Uuid::new_v4(), "orphan", "bob");
        db.put_comment(&comment).unwrap();

        assert_eq!(db.get_comment(comment.id).unwrap(), Some(comment.clone()));
        assert_eq!(db.list_comments().unwrap().len(), 1);

        assert!(db.delete_comment(comment.id).unwrap());
        assert!(db.list_comments().unwrap().is_empty());
    }
}
