//! Posts and comments.
//!
//! Deleting a post removes its comments in the same transaction.  Comments
//! are only ever looked up through their post, so a comment whose post is
//! gone is simply unreachable.

use chrono::Utc;
use mentormee_store::{Comment, CommentStore, Post, PostStore, Storage};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::state::Core;

impl Core {
    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    pub fn create_post(&mut self, content: &str, author: &str) -> Result<Post> {
        let post = Post::new(content, author);
        self.db.put_post(&post)?;
        debug!(id = %post.id, author, "post created");
        Ok(post)
    }

    /// Every post, in storage order.  Sorting for display is up to the caller.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.db.list_posts()?)
    }

    /// Rewrite a post's content and author.
    pub fn update_post(&mut self, id: Uuid, content: &str, author: &str) -> Result<Post> {
        let mut post = self.db.get_post(id)?.ok_or(CoreError::PostNotFound(id))?;

        post.content = content.to_string();
        post.author = author.to_string();
        post.updated_at = Utc::now();

        self.db.put_post(&post)?;
        debug!(%id, "post updated");
        Ok(post)
    }

    /// Delete a post and every comment written against it.
    ///
    /// Deleting an id that does not exist is not an error; its comments, if
    /// any, are still removed.
    pub fn delete_post(&mut self, id: Uuid) -> Result<()> {
        let (existed, comments_removed) = self.db.transaction(|tx| -> Result<(bool, usize)> {
            let existed = tx.delete_post(id)?;
            let removed = remove_comments_for_post(tx, id)?;
            Ok((existed, removed))
        })?;

        info!(%id, existed, comments_removed, "post deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Attach a comment to `post_id`.  The post is not required to exist.
    pub fn create_comment(&mut self, post_id: Uuid, content: &str, author: &str) -> Result<Comment> {
        let comment = Comment::new(post_id, content, author);
        self.db.put_comment(&comment)?;
        debug!(id = %comment.id, %post_id, author, "comment created");
        Ok(comment)
    }

    pub fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        Ok(comments_for_post(&self.db, post_id)?)
    }

    /// Rewrite a comment.  The caller must name the post it belongs to: a
    /// comment stored under a different post counts as not found.
    pub fn update_comment(
        &mut self,
        id: Uuid,
        content: &str,
        author: &str,
        post_id: Uuid,
    ) -> Result<Comment> {
        let mut comment = self
            .db
            .get_comment(id)?
            .filter(|c| c.post_id == post_id)
            .ok_or(CoreError::CommentNotFound { id, post_id })?;

        comment.content = content.to_string();
        comment.author = author.to_string();
        comment.updated_at = Utc::now();

        self.db.put_comment(&comment)?;
        debug!(%id, %post_id, "comment updated");
        Ok(comment)
    }

    /// Delete a comment.  Absent ids are ignored.
    pub fn delete_comment(&mut self, id: Uuid) -> Result<()> {
        let existed = self.db.delete_comment(id)?;
        debug!(%id, existed, "comment deleted");
        Ok(())
    }

    /// Remove every comment of `post_id` without touching the post.
    /// Returns how many were removed.
    pub fn delete_comments_for_post(&mut self, post_id: Uuid) -> Result<usize> {
        let removed = self
            .db
            .transaction(|tx| -> Result<usize> { remove_comments_for_post(tx, post_id) })?;
        info!(%post_id, removed, "comments deleted for post");
        Ok(removed)
    }
}

fn comments_for_post<S: Storage + ?Sized>(
    store: &S,
    post_id: Uuid,
) -> mentormee_store::Result<Vec<Comment>> {
    Ok(store
        .list_comments()?
        .into_iter()
        .filter(|c| c.post_id == post_id)
        .collect())
}

fn remove_comments_for_post<S: Storage + ?Sized>(store: &S, post_id: Uuid) -> Result<usize> {
    let mut removed = 0;
    for comment in comments_for_post(store, post_id)? {
        if store.delete_comment(comment.id)? {
            removed += 1;
        }
    }
    Ok(removed)
}
