use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i64,
}

impl Bookmark {
    /// Read-path view with the free-text fields made safe for HTML.
    pub fn sanitized(self) -> Self {
        Bookmark {
            title: sanitize(&self.title),
            description: sanitize(&self.description),
            ..self
        }
    }
}

/// A validated bookmark that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i64,
}
