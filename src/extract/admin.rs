use std::sync::Arc;

use aide::OperationInput;
use axum::{
	extract::{FromRef, FromRequestParts},
	http::{header, request},
};
use subtle::ConstantTimeEq;

use crate::{error::RouteError, openapi::SECURITY_SCHEME_ADMIN_KEY, route::admin};

pub const AUTHORIZATION_PREFIX: &str = "Bearer ";

/// The key that grants access to the admin API.
///
/// When no key is configured, the admin API rejects every request.
#[derive(Clone, Default)]
pub struct AdminKey(Option<Arc<str>>);

impl AdminKey {
	pub fn new(key: Option<String>) -> Self {
		Self(key.filter(|key| !key.is_empty()).map(Arc::from))
	}

	/// Compares in constant time for keys of the same length.
	fn matches(&self, candidate: &str) -> bool {
		self.0
			.as_deref()
			.is_some_and(|key| bool::from(key.as_bytes().ct_eq(candidate.as_bytes())))
	}
}

/// Proof that the request was made by an administrator.
///
/// If no `Authorization` header is present, an [`admin::Error::MissingAdminKey`] is returned.
/// If the key does not match, an [`admin::Error::InvalidAdminKey`] is returned.
///
/// ```rust
/// async fn route(_: Admin) {
///   // only reachable with the admin key
/// }
/// ```
#[derive(Debug)]
pub struct Admin;

#[axum::async_trait]
impl<S> FromRequestParts<S> for Admin
where
	AdminKey: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = RouteError<admin::Error>;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let header = parts
			.headers
			.get(header::AUTHORIZATION)
			.ok_or(admin::Error::MissingAdminKey)?;

		let key = header
			.to_str()
			.ok()
			.and_then(|value| value.strip_prefix(AUTHORIZATION_PREFIX))
			.ok_or(admin::Error::InvalidAdminKey)?;

		if !AdminKey::from_ref(state).matches(key) {
			tracing::warn!("rejected admin request with an invalid key");

			return Err(admin::Error::InvalidAdminKey.into());
		}

		Ok(Self)
	}
}

impl OperationInput for Admin {
	/// Operation input for the admin extractor.
	///
	/// This adds an admin key requirement to the `OpenAPI` operation.
	fn operation_input(_ctx: &mut aide::gen::GenContext, operation: &mut aide::openapi::Operation) {
		operation.security.push(
			[(SECURITY_SCHEME_ADMIN_KEY.to_string(), Vec::new())]
				.into_iter()
				.collect(),
		);
	}
}
