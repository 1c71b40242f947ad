//! Cross-site request forgery protection for HTML forms.
//!
//! A random token is kept in a cookie and repeated in a hidden form field.
//! A submission is only accepted when both are present and equal, which a
//! cross-site form cannot arrange since it cannot read the cookie.

use std::convert::Infallible;

use axum::{
	extract::FromRequestParts,
	http::{header, request},
};
use subtle::ConstantTimeEq;
use uuid::Uuid;

pub const COOKIE_NAME: &str = "csrftoken";
/// The hidden form field carrying the token.
pub const FIELD_NAME: &str = "csrfmiddlewaretoken";

const TOKEN_LENGTH: usize = 32;

fn is_token(value: &str) -> bool {
	value.len() == TOKEN_LENGTH && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// The token of the current visitor.
///
/// Taken from the request cookie when present, otherwise a new one is
/// generated and must be sent back with [`CsrfToken::cookie`].
#[derive(Debug, Clone)]
pub struct CsrfToken {
	token: String,
	fresh: bool,
}

impl CsrfToken {
	fn generate() -> Self {
		Self {
			token: Uuid::new_v4().simple().to_string(),
			fresh: true,
		}
	}

	pub fn value(&self) -> &str {
		&self.token
	}

	/// The cookie to set, if the visitor did not have a token yet.
	pub fn cookie(&self) -> Option<cookie::Cookie<'static>> {
		self.fresh.then(|| {
			cookie::Cookie::build((COOKIE_NAME, self.token.clone()))
				.http_only(true)
				.same_site(cookie::SameSite::Lax)
				.path("/")
				.max_age(cookie::time::Duration::days(365))
				.into()
		})
	}

	/// Whether a submitted token matches the one in the cookie.
	///
	/// Always `false` for a fresh token, since the request carried no cookie.
	pub fn verify(&self, submitted: &str) -> bool {
		!self.fresh && bool::from(self.token.as_bytes().ct_eq(submitted.as_bytes()))
	}
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CsrfToken
where
	S: Sync + Send,
{
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		let token = parts
			.headers
			.get_all(header::COOKIE)
			.into_iter()
			.filter_map(|value| value.to_str().ok())
			.flat_map(cookie::Cookie::split_parse)
			.filter_map(Result::ok)
			.find(|cookie| cookie.name() == COOKIE_NAME)
			.map(|cookie| cookie.value().to_owned())
			.filter(|token| is_token(token));

		Ok(token.map_or_else(Self::generate, |token| Self {
			token,
			fresh: false,
		}))
	}
}
