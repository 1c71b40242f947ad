use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::store;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single error message presented to an admin API client.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'a> {
	/// A machine-readable error code, such as `unknown_post`.
	pub content: Cow<'a, str>,
	/// The field of the input that caused the error, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'a, str>>,
	/// Additional information about the error.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Cow<'a, Map>>,
}

impl<'a> Message<'a> {
	pub fn new(content: impl Into<Cow<'a, str>>) -> Self {
		Self {
			content: content.into(),
			field: None,
			details: None,
		}
	}

	pub fn field(mut self, field: impl Into<Cow<'a, str>>) -> Self {
		self.field = Some(field.into());
		self
	}

	pub fn detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(|| Cow::Owned(Map::new()))
			.to_mut()
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Self> {
		vec![self]
	}
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse<'a> {
	pub success: bool,
	pub errors: Vec<Message<'a>>,
}

impl<'a> ErrorResponse<'a> {
	fn new(errors: Vec<Message<'a>>) -> Self {
		Self {
			success: false,
			errors,
		}
	}
}

/// The shape of a route-specific error when sent to the client.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;
	fn errors(&self) -> Vec<Message<'_>>;
}

/// Error type for failures that are not specific to a single route.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
	#[error("template error: {0}")]
	Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::Validation(errors) => {
				let errors = errors
					.field_errors()
					.into_iter()
					.flat_map(|(field, errors)| {
						let field = field.to_string();

						errors.iter().map(move |error| {
							let mut message = Message::new(error.code.to_string()).field(field.clone());

							for (key, value) in &error.params {
								message = message.detail(key, value.clone());
							}

							message
						})
					})
					.collect();

				(StatusCode::BAD_REQUEST, Json(ErrorResponse::new(errors))).into_response()
			}
			Self::Json(rejection) => (
				rejection.status(),
				Json(ErrorResponse::new(Message::new(rejection.body_text()).into_vec())),
			)
				.into_response(),
			Self::Path(rejection) => (
				rejection.status(),
				Json(ErrorResponse::new(Message::new(rejection.body_text()).into_vec())),
			)
				.into_response(),
			Self::Store(store::Error::UniquenessViolation(ref slug)) => (
				StatusCode::CONFLICT,
				Json(ErrorResponse::new(
					Message::new("slug_taken").detail("slug", slug.as_str()).into_vec(),
				)),
			)
				.into_response(),
			error => {
				tracing::error!(%error, "request failed");

				(
					StatusCode::INTERNAL_SERVER_ERROR,
					Json(ErrorResponse::new(Vec::new())),
				)
					.into_response()
			}
		}
	}
}

impl OperationOutput for AppError {
	type Inner = Self;
}

/// The error type returned by route handlers: either an error specific
/// to the route, or an [`AppError`].
#[derive(Debug)]
pub enum RouteError<T> {
	Route(T),
	App(AppError),
}

impl<T: ErrorShape> From<T> for RouteError<T> {
	fn from(error: T) -> Self {
		Self::Route(error)
	}
}

impl<T> From<AppError> for RouteError<T> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<T> From<store::Error> for RouteError<T> {
	fn from(error: store::Error) -> Self {
		Self::App(AppError::Store(error))
	}
}

impl<T: ErrorShape> IntoResponse for RouteError<T> {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::Route(error) => {
				let status = error.status();

				(status, Json(ErrorResponse::new(error.errors()))).into_response()
			}
			Self::App(error) => error.into_response(),
		}
	}
}

impl<T> OperationOutput for RouteError<T> {
	type Inner = Self;
}
