use std::collections::BTreeMap;

use axum::{
	extract::State,
	http::{header, StatusCode},
	response::{AppendHeaders, IntoResponse, Redirect, Response},
	Form,
};
use serde_json::json;

use crate::{
	csrf::CsrfToken,
	error::AppError,
	flash::{self, Flash, Notice},
	template::{Page, Templates},
	Database,
};

use super::model::{self, FieldErrors};

pub const CONTACT_PATH: &str = "/contact/";

fn render_form(
	templates: &Templates,
	csrf: &CsrfToken,
	form: &model::CreateContactMessage,
	errors: &FieldErrors,
	notice: Option<Notice>,
) -> Result<Response, AppError> {
	let errors = errors
		.iter()
		.map(|(field, error)| (field.as_str(), error.text()))
		.collect::<BTreeMap<_, _>>();

	let page = templates.render(
		Page::Contact,
		&json!({
			"form": form,
			"errors": errors,
			"notice": notice.map(Notice::text),
			"csrf_token": csrf.value(),
		}),
	)?;

	Ok(page.into_response())
}

/// `Set-Cookie` headers for a response: the token cookie of a new visitor
/// and any cookie given.
fn set_cookies(
	csrf: &CsrfToken,
	cookie: Option<cookie::Cookie<'static>>,
) -> AppendHeaders<Vec<(header::HeaderName, String)>> {
	AppendHeaders(
		cookie
			.into_iter()
			.chain(csrf.cookie())
			.map(|cookie| (header::SET_COOKIE, cookie.to_string()))
			.collect(),
	)
}

/// Shows an empty contact form, along with a pending notice.
pub async fn show_form(
	State(templates): State<Templates>,
	csrf: CsrfToken,
	Flash(notice): Flash,
) -> Result<Response, AppError> {
	let page = render_form(
		&templates,
		&csrf,
		&model::CreateContactMessage::default(),
		&FieldErrors::new(),
		notice,
	)?;

	// the notice is only shown once
	let clear = notice.map(|_| flash::clear_cookie());

	Ok((set_cookies(&csrf, clear), page).into_response())
}

/// Stores a valid submission and redirects back to the form, or shows the
/// form again with the submitted values and the rejected fields.
///
/// Submissions without the visitor's token are refused with 403.
pub async fn submit_form(
	State(database): State<Database>,
	State(templates): State<Templates>,
	csrf: CsrfToken,
	Form(form): Form<model::ContactForm>,
) -> Result<Response, AppError> {
	if !csrf.verify(&form.csrf_token) {
		tracing::warn!("rejected contact form with a missing or invalid token");

		let page = templates.render(Page::Forbidden, &json!({}))?;

		return Ok((StatusCode::FORBIDDEN, set_cookies(&csrf, None), page).into_response());
	}

	let message = match form.message.check() {
		Ok(message) => message,
		Err(errors) => {
			tracing::debug!(?errors, "rejected contact form");

			return render_form(&templates, &csrf, &form.message, &errors, None);
		}
	};

	let message = database.insert_contact_message(message).await?;

	tracing::info!(id = %message.id, subject = %message.subject, "received contact message");

	Ok((
		set_cookies(&csrf, Some(flash::create_cookie(Notice::MessageSent))),
		Redirect::to(CONTACT_PATH),
	)
		.into_response())
}
