use axum::{
	extract::{Path, State},
	response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
	error::AppError,
	template::{Page, Templates},
	Database,
};

use super::model;

/// The home page, listing every post newest first.
pub async fn home(
	State(database): State<Database>,
	State(templates): State<Templates>,
) -> Result<Response, AppError> {
	let posts = database.list_posts().await?;

	Ok(templates
		.render(Page::Home, &json!({ "posts": posts }))?
		.into_response())
}

/// The blog listing, in the same order as the home page.
pub async fn list_posts(
	State(database): State<Database>,
	State(templates): State<Templates>,
) -> Result<Response, AppError> {
	let posts = database.list_posts().await?;

	Ok(templates
		.render(Page::BlogList, &json!({ "posts": posts }))?
		.into_response())
}

/// A single post by its slug.
pub async fn get_post(
	State(database): State<Database>,
	State(templates): State<Templates>,
	Path(slug): Path<String>,
) -> Result<Response, AppError> {
	// no post can have a slug with other characters
	if !model::is_slug(&slug) {
		return Ok(crate::route::not_found(&templates));
	}

	let Some(post) = database.get_post_by_slug(&slug).await? else {
		return Ok(crate::route::not_found(&templates));
	};

	Ok(templates
		.render(Page::BlogDetail, &json!({ "post": post }))?
		.into_response())
}
