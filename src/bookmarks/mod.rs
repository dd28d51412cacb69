//! Bookmarks Module
//!
//! The bookmark resource: a libsql-backed store, create-body validation and the
//! HTTP handlers that tie them together. Free-text fields are stored raw and
//! sanitized on every read.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks_api::bookmarks;
//!
//! let app = Router::new()
//!     .merge(bookmarks::routes())
//!     .with_state(app_state);
//!
//! let store = bookmarks::BookmarkStore::new(db.connection());
//! let all = store.list_all().await?;
//! ```

mod handler;
mod routes;
mod store;
mod validate;

pub use routes::routes;
pub use store::{BookmarkStore, Deletion};
pub use validate::{BookmarkCandidate, validate_create};
