//! HTML rendering.
//!
//! Templates are compiled into the binary, so rendering only depends on the
//! page and the context it is given.

use std::sync::Arc;

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::AppError;

const TEMPLATES: [(&str, &str); 7] = [
	("base.html", include_str!("../templates/base.html")),
	("index.html", include_str!("../templates/index.html")),
	("blog_list.html", include_str!("../templates/blog_list.html")),
	("blog_detail.html", include_str!("../templates/blog_detail.html")),
	("contact.html", include_str!("../templates/contact.html")),
	("403.html", include_str!("../templates/403.html")),
	("404.html", include_str!("../templates/404.html")),
];

/// A page that can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
	Home,
	BlogList,
	BlogDetail,
	Contact,
	Forbidden,
	NotFound,
}

impl Page {
	pub fn template(self) -> &'static str {
		match self {
			Self::Home => "index.html",
			Self::BlogList => "blog_list.html",
			Self::BlogDetail => "blog_detail.html",
			Self::Contact => "contact.html",
			Self::Forbidden => "403.html",
			Self::NotFound => "404.html",
		}
	}
}

#[derive(Clone)]
pub struct Templates(Arc<Tera>);

impl Templates {
	/// Parses every template. `.html` templates are autoescaped.
	pub fn new() -> Result<Self, tera::Error> {
		let mut tera = Tera::default();

		tera.add_raw_templates(TEMPLATES)?;

		Ok(Self(Arc::new(tera)))
	}

	/// Renders a page with the given context, which must serialize to a map.
	pub fn render<T: Serialize>(&self, page: Page, context: &T) -> Result<Html<String>, AppError> {
		let context = Context::from_serialize(context)?;

		Ok(Html(self.0.render(page.template(), &context)?))
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_every_page_renders() {
		let templates = Templates::new().unwrap();

		for page in [
			Page::Home,
			Page::BlogList,
			Page::Contact,
			Page::Forbidden,
			Page::NotFound,
		] {
			let html = templates
				.render(
					page,
					&json!({ "posts": [], "form": {}, "errors": {}, "csrf_token": "x" }),
				)
				.unwrap();

			assert!(html.0.contains("<html"), "{page:?}");
		}
	}

	#[test]
	fn test_content_is_escaped() {
		let templates = Templates::new().unwrap();

		let html = templates
			.render(
				Page::Contact,
				&json!({
					"form": { "name": "<script>alert(1)</script>" },
					"errors": {},
					"csrf_token": "x",
				}),
			)
			.unwrap();

		assert!(!html.0.contains("<script>alert(1)</script>"));
		assert!(html.0.contains("&lt;script&gt;"));
	}
}
