use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{
	extract::State,
	http::{header, HeaderValue, Method, StatusCode, Uri},
	response::{IntoResponse, Response},
	Extension, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	services::ServeDir,
	set_header::SetResponseHeaderLayer,
	trace::TraceLayer,
};

use crate::{
	config::Assets,
	openapi,
	template::{Page, Templates},
	AppState,
};

pub mod admin;
pub mod blog;
pub mod contact;
pub mod docs;
pub mod model;

/// Builds the whole application: public pages, the admin API, assets and
/// the not-found fallback.
pub fn app(state: AppState, assets: &Assets) -> Router {
	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/admin", admin::routes())
		.finish_api_with(&mut api, openapi::docs)
		.merge(blog::routes())
		.merge(contact::routes())
		.nest_service("/static", ServeDir::new(&assets.static_dir))
		.nest_service("/media", ServeDir::new(&assets.media_dir))
		.fallback(fallback)
		.layer(Extension(Arc::new(api)))
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http())
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(SetResponseHeaderLayer::overriding(
					header::X_FRAME_OPTIONS,
					HeaderValue::from_static("DENY"),
				))
				.layer(SetResponseHeaderLayer::if_not_present(
					header::X_CONTENT_TYPE_OPTIONS,
					HeaderValue::from_static("nosniff"),
				))
				.layer(SetResponseHeaderLayer::if_not_present(
					header::REFERRER_POLICY,
					HeaderValue::from_static("same-origin"),
				))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Renders the not-found page with a 404 status.
pub fn not_found(templates: &Templates) -> Response {
	match templates.render(Page::NotFound, &json!({})) {
		Ok(page) => (StatusCode::NOT_FOUND, page).into_response(),
		Err(error) => error.into_response(),
	}
}

/// Whether `path` is served by one of the public pages.
fn is_page(path: &str) -> bool {
	match path {
		"/" | "/blog/" | contact::route::CONTACT_PATH => true,
		_ => path
			.strip_prefix("/blog/")
			.and_then(|rest| rest.strip_suffix('/'))
			.is_some_and(blog::model::is_slug),
	}
}

/// The address of the page `uri` points to once a trailing slash is added,
/// keeping the query string.
fn append_slash(uri: &Uri) -> Option<String> {
	let path = format!("{}/", uri.path());

	if uri.path().ends_with('/') || !is_page(&path) {
		return None;
	}

	Some(match uri.query() {
		Some(query) => format!("{path}?{query}"),
		None => path,
	})
}

async fn fallback(State(templates): State<Templates>, method: Method, uri: Uri) -> Response {
	if method == Method::GET || method == Method::HEAD {
		if let Some(location) = append_slash(&uri) {
			return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
		}
	}

	not_found(&templates)
}
