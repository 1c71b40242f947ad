//! Helpers shared by the test modules.

pub use std::sync::Arc;

use axum::http::HeaderValue;
pub use axum_test::TestServer;
pub use serde_json::json;

use crate::{
	config::Assets,
	extract::AdminKey,
	route::{blog::model::CreatePost, contact::model::CreateContactMessage},
	template::Templates,
	State,
};
pub use crate::{
	store::{MemoryStore, Store},
	Database,
};

pub const ADMIN_KEY: &str = "test-admin-key";

/// A token the contact form accepts when sent along with [`csrf_cookie`].
pub const CSRF_TOKEN: &str = "0123456789abcdef0123456789abcdef";

pub fn csrf_cookie() -> HeaderValue {
	HeaderValue::from_static("csrftoken=0123456789abcdef0123456789abcdef")
}

pub fn admin_authorization() -> HeaderValue {
	HeaderValue::from_static("Bearer test-admin-key")
}

pub fn memory() -> Arc<MemoryStore> {
	Arc::new(MemoryStore::new())
}

/// Serves the whole application on top of `database`.
pub fn app(database: Database) -> TestServer {
	let state = State {
		database,
		templates: Templates::new().unwrap(),
		admin_key: AdminKey::new(Some(ADMIN_KEY.to_owned())),
	};

	TestServer::new(crate::route::app(state, &Assets::default())).unwrap()
}

pub fn create_post(title: &str, slug: &str) -> CreatePost {
	CreatePost {
		title: title.to_owned(),
		slug: slug.to_owned(),
		description: "Some words.\nMore words.".to_owned(),
		image: "blog_images/x.jpg".to_owned(),
		creator_name: "Jane Doe".to_owned(),
		creator_job_title: "Editor".to_owned(),
	}
}

pub fn contact_form(name: &str, email: &str, subject: &str, message: &str) -> CreateContactMessage {
	CreateContactMessage {
		name: name.to_owned(),
		email: email.to_owned(),
		subject: subject.to_owned(),
		message: message.to_owned(),
	}
}
