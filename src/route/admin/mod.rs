use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::{error, route::blog::model::SLUG_MAX_LENGTH, AppState};

pub mod model;
pub mod route;

/// An error that can occur in the admin API.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	#[error("missing_admin_key")]
	MissingAdminKey,
	#[error("invalid_admin_key")]
	InvalidAdminKey,
	#[error("unknown_post")]
	UnknownPost(Uuid),
	#[error("unknown_message")]
	UnknownMessage(Uuid),
	#[error("slug_taken")]
	SlugTaken(String),
	#[error("empty_slug")]
	EmptySlug,
	#[error("slug_too_long")]
	SlugTooLong(usize),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/posts",
			get_with(list_posts, list_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route(
			"/posts/:id",
			get_with(get_post, get_post_docs)
				.put_with(update_post, update_post_docs)
				.delete_with(delete_post, delete_post_docs),
		)
		.api_route("/messages", get_with(list_messages, list_messages_docs))
		.api_route(
			"/messages/:id",
			get_with(get_message, get_message_docs).delete_with(delete_message, delete_message_docs),
		)
		.nest("/docs", super::docs::routes())
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::MissingAdminKey | Self::InvalidAdminKey => StatusCode::UNAUTHORIZED,
			Self::UnknownPost(..) | Self::UnknownMessage(..) => StatusCode::NOT_FOUND,
			Self::SlugTaken(..) => StatusCode::CONFLICT,
			Self::EmptySlug | Self::SlugTooLong(..) => StatusCode::BAD_REQUEST,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		let message = error::Message::new(self.to_string());

		match self {
			Self::UnknownPost(post) => message.detail("post", post.to_string()),
			Self::UnknownMessage(id) => message.detail("message", id.to_string()),
			Self::SlugTaken(slug) => message.field("slug").detail("slug", slug.as_str()),
			Self::EmptySlug => message.field("slug"),
			Self::SlugTooLong(length) => message
				.field("slug")
				.detail("length", *length)
				.detail("max", SLUG_MAX_LENGTH),
			Self::MissingAdminKey | Self::InvalidAdminKey => message,
		}
		.into_vec()
	}
}
