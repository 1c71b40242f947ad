use axum::extract::State;
use macros::route;

use crate::{
	extract::{Admin, Json, Path},
	openapi::tag,
	store, Database,
};

use super::{model, Error, RouteError};

/// Turns a slug conflict into a client error.
fn slug_taken(error: store::Error) -> RouteError {
	match error {
		store::Error::UniquenessViolation(slug) => Error::SlugTaken(slug).into(),
		error => error.into(),
	}
}

/// List posts
/// Returns every post, newest first.
#[route(tag = tag::POST)]
pub async fn list_posts(
	_: Admin,
	State(database): State<Database>,
) -> Result<Json<Vec<model::Post>>, RouteError> {
	Ok(Json(database.list_posts().await?))
}

/// Get single post
/// Returns a single post by its unique id.
#[route(tag = tag::POST)]
pub async fn get_post(
	_: Admin,
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = database.get_post(path.id).await?;

	Ok(Json(post.ok_or(Error::UnknownPost(path.id))?))
}

/// Create post
/// Creates a new post. When no slug is given, it is derived from the title.
#[route(tag = tag::POST)]
pub async fn create_post(
	_: Admin,
	State(database): State<Database>,
	Json(input): Json<model::CreatePost>,
) -> Result<Json<model::Post>, RouteError> {
	let input = input.with_derived_slug();

	if input.slug.is_empty() {
		return Err(Error::EmptySlug.into());
	}

	let length = input.slug.chars().count();

	if length > model::SLUG_MAX_LENGTH {
		return Err(Error::SlugTooLong(length).into());
	}

	let post = database.insert_post(input).await.map_err(slug_taken)?;

	tracing::info!(id = %post.id, slug = %post.slug, "created post");

	Ok(Json(post))
}

/// Update post
/// Updates an existing post by its unique id. The date is never changed.
#[route(tag = tag::POST)]
pub async fn update_post(
	_: Admin,
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
	Json(input): Json<model::UpdatePost>,
) -> Result<Json<model::Post>, RouteError> {
	let post = database
		.update_post(path.id, input.without_empty_slug())
		.await
		.map_err(slug_taken)?;

	Ok(Json(post.ok_or(Error::UnknownPost(path.id))?))
}

/// Delete post
/// Deletes an existing post by its unique id.
#[route(tag = tag::POST)]
pub async fn delete_post(
	_: Admin,
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<(), RouteError> {
	if !database.delete_post(path.id).await? {
		return Err(Error::UnknownPost(path.id).into());
	}

	Ok(())
}

/// List messages
/// Returns every contact message, newest first.
#[route(tag = tag::MESSAGE)]
pub async fn list_messages(
	_: Admin,
	State(database): State<Database>,
) -> Result<Json<Vec<model::ContactMessage>>, RouteError> {
	Ok(Json(database.list_contact_messages().await?))
}

/// Get single message
#[route(tag = tag::MESSAGE)]
pub async fn get_message(
	_: Admin,
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::ContactMessage>, RouteError> {
	let message = database.get_contact_message(path.id).await?;

	Ok(Json(message.ok_or(Error::UnknownMessage(path.id))?))
}

/// Delete message
#[route(tag = tag::MESSAGE)]
pub async fn delete_message(
	_: Admin,
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<(), RouteError> {
	if !database.delete_contact_message(path.id).await? {
		return Err(Error::UnknownMessage(path.id).into());
	}

	Ok(())
}
