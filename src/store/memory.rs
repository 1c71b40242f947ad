//! In-memory store, used when no database is configured and in tests.
//! Data is lost on process restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Error, Store};
use crate::route::{
	blog::model::{CreatePost, Post, UpdatePost},
	contact::model::{ContactMessage, CreateContactMessage},
};

/// A [`Store`] holding every record in insertion order.
#[derive(Default)]
pub struct MemoryStore {
	posts: RwLock<Vec<Post>>,
	messages: RwLock<Vec<ContactMessage>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the creation date of a post, so ordering can be tested
	/// without waiting on the clock.
	#[cfg(test)]
	pub async fn set_post_date(&self, slug: &str, date: chrono::DateTime<Utc>) {
		let mut posts = self.posts.write().await;

		if let Some(post) = posts.iter_mut().find(|post| post.slug == slug) {
			post.date = date;
		}
	}
}

#[async_trait]
impl Store for MemoryStore {
	async fn list_posts(&self) -> Result<Vec<Post>, Error> {
		let mut posts = self.posts.read().await.clone();

		// stable, so equal dates keep insertion order
		posts.sort_by(|a, b| b.date.cmp(&a.date));

		Ok(posts)
	}

	async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, Error> {
		let posts = self.posts.read().await;

		Ok(posts.iter().find(|post| post.slug == slug).cloned())
	}

	async fn get_post(&self, id: Uuid) -> Result<Option<Post>, Error> {
		let posts = self.posts.read().await;

		Ok(posts.iter().find(|post| post.id == id).cloned())
	}

	async fn insert_post(&self, post: CreatePost) -> Result<Post, Error> {
		let mut posts = self.posts.write().await;

		if posts.iter().any(|existing| existing.slug == post.slug) {
			return Err(Error::UniquenessViolation(post.slug));
		}

		let post = Post {
			id: Uuid::new_v4(),
			title: post.title,
			slug: post.slug,
			description: post.description,
			image: post.image,
			date: Utc::now(),
			creator_name: post.creator_name,
			creator_job_title: post.creator_job_title,
		};

		posts.push(post.clone());

		Ok(post)
	}

	async fn update_post(&self, id: Uuid, changes: UpdatePost) -> Result<Option<Post>, Error> {
		let mut posts = self.posts.write().await;

		let Some(index) = posts.iter().position(|post| post.id == id) else {
			return Ok(None);
		};

		if let Some(ref slug) = changes.slug {
			if posts.iter().any(|post| post.id != id && &post.slug == slug) {
				return Err(Error::UniquenessViolation(slug.clone()));
			}
		}

		let post = &mut posts[index];

		if let Some(title) = changes.title {
			post.title = title;
		}
		if let Some(slug) = changes.slug {
			post.slug = slug;
		}
		if let Some(description) = changes.description {
			post.description = description;
		}
		if let Some(image) = changes.image {
			post.image = image;
		}
		if let Some(creator_name) = changes.creator_name {
			post.creator_name = creator_name;
		}
		if let Some(creator_job_title) = changes.creator_job_title {
			post.creator_job_title = creator_job_title;
		}

		Ok(Some(post.clone()))
	}

	async fn delete_post(&self, id: Uuid) -> Result<bool, Error> {
		let mut posts = self.posts.write().await;
		let len = posts.len();

		posts.retain(|post| post.id != id);

		Ok(posts.len() != len)
	}

	async fn insert_contact_message(
		&self,
		message: CreateContactMessage,
	) -> Result<ContactMessage, Error> {
		let message = ContactMessage {
			id: Uuid::new_v4(),
			name: message.name,
			email: message.email,
			subject: message.subject,
			message: message.message,
			created_at: Utc::now(),
		};

		self.messages.write().await.push(message.clone());

		Ok(message)
	}

	async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, Error> {
		let mut messages = self
			.messages
			.read()
			.await
			.iter()
			.rev()
			.cloned()
			.collect::<Vec<_>>();

		messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		Ok(messages)
	}

	async fn get_contact_message(&self, id: Uuid) -> Result<Option<ContactMessage>, Error> {
		let messages = self.messages.read().await;

		Ok(messages.iter().find(|message| message.id == id).cloned())
	}

	async fn delete_contact_message(&self, id: Uuid) -> Result<bool, Error> {
		let mut messages = self.messages.write().await;
		let len = messages.len();

		messages.retain(|message| message.id != id);

		Ok(messages.len() != len)
	}
}
