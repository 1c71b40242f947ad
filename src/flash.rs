//! One-time notices carried across a redirect in a cookie.

use std::convert::Infallible;

use axum::{
	extract::FromRequestParts,
	http::{header, request},
};

pub const COOKIE_NAME: &str = "notice";
/// Notices are only shown by the contact page.
pub const COOKIE_PATH: &str = "/contact/";

/// A notice shown once on the next page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
	MessageSent,
}

impl Notice {
	fn code(self) -> &'static str {
		match self {
			Self::MessageSent => "message_sent",
		}
	}

	fn from_code(code: &str) -> Option<Self> {
		match code {
			"message_sent" => Some(Self::MessageSent),
			_ => None,
		}
	}

	pub fn text(self) -> &'static str {
		match self {
			Self::MessageSent => "Your message has been sent successfully!",
		}
	}
}

/// Creates a cookie holding the notice until it is shown
pub fn create_cookie(notice: Notice) -> cookie::Cookie<'static> {
	cookie::Cookie::build((COOKIE_NAME, notice.code()))
		.http_only(true)
		.same_site(cookie::SameSite::Lax)
		.path(COOKIE_PATH)
		.into()
}

/// Creates an empty cookie used to discard a notice once shown
pub fn clear_cookie() -> cookie::Cookie<'static> {
	cookie::Cookie::build(COOKIE_NAME)
		.http_only(true)
		.path(COOKIE_PATH)
		.max_age(cookie::time::Duration::ZERO)
		.into()
}

/// Extracts the pending notice, if any. Unknown notices are ignored.
///
/// ```rust
/// async fn route(Flash(notice): Flash) {
///   println!("{:?}", notice.map(Notice::text));
/// }
/// ```
#[derive(Debug)]
pub struct Flash(pub Option<Notice>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Flash
where
	S: Sync + Send,
{
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		let notice = parts
			.headers
			.get_all(header::COOKIE)
			.into_iter()
			.filter_map(|value| value.to_str().ok())
			.flat_map(cookie::Cookie::split_parse)
			.filter_map(Result::ok)
			.find(|cookie| cookie.name() == COOKIE_NAME)
			.and_then(|cookie| Notice::from_code(cookie.value()));

		Ok(Self(notice))
	}
}
