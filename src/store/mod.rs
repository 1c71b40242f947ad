//! Persistence for posts and contact messages.
//!
//! Handlers receive the store explicitly through the application state as a
//! [`Database`](crate::Database), so the backing implementation can be swapped
//! without touching any route.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::route::{
	blog::model::{CreatePost, Post, UpdatePost},
	contact::model::{ContactMessage, CreateContactMessage},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("a post with the slug {0:?} already exists")]
	UniquenessViolation(String),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait Store: Send + Sync {
	/// All posts, newest first. Posts with the same date keep their insertion order.
	async fn list_posts(&self) -> Result<Vec<Post>, Error>;

	/// The post with exactly this slug (case-sensitive).
	async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, Error>;

	async fn get_post(&self, id: Uuid) -> Result<Option<Post>, Error>;

	/// Inserts a post whose slug has already been resolved.
	///
	/// Fails with [`Error::UniquenessViolation`] if the slug is in use.
	async fn insert_post(&self, post: CreatePost) -> Result<Post, Error>;

	/// Applies the given changes, leaving `None` fields untouched.
	/// The date is never changed.
	async fn update_post(&self, id: Uuid, changes: UpdatePost) -> Result<Option<Post>, Error>;

	/// Returns `false` if no post had the given id.
	async fn delete_post(&self, id: Uuid) -> Result<bool, Error>;

	async fn insert_contact_message(
		&self,
		message: CreateContactMessage,
	) -> Result<ContactMessage, Error>;

	/// All contact messages, newest first.
	async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, Error>;

	async fn get_contact_message(&self, id: Uuid) -> Result<Option<ContactMessage>, Error>;

	async fn delete_contact_message(&self, id: Uuid) -> Result<bool, Error>;
}
