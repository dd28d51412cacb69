use anyhow::Result;
use libsql::Connection;

use crate::model::{Bookmark, NewBookmark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    NotFound,
}

/// Persistence boundary over the `bookmarks` table. Stores exactly what it is
/// given; validation and sanitization belong to the callers.
pub struct BookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Bookmark>> {
        let query = r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            ORDER BY id
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(Self::row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>> {
        let query = r#"
            SELECT id, title, url, description, rating
            FROM bookmarks WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn insert(&self, input: NewBookmark) -> Result<Bookmark> {
        let query = r#"
            INSERT INTO bookmarks (title, url, description, rating)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, url, description, rating
        "#;

        let mut rows = self
            .conn
            .query(
                query,
                libsql::params![input.title, input.url, input.description, input.rating],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Self::row_to_bookmark(&row)?)
        } else {
            anyhow::bail!("Failed to create bookmark")
        }
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<Deletion> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;

        Ok(if affected > 0 { Deletion::Deleted } else { Deletion::NotFound })
    }

    fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            rating: row.get(4)?,
        })
    }
}
