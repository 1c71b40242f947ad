use axum::{routing::get, Router};

use crate::AppState;

pub mod model;
pub mod route;

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new().route(CONTACT_PATH, get(show_form).post(submit_form))
}

#[cfg(test)]
mod test {
	use axum::http::{header, HeaderValue};
	use axum_test::TestResponse;

	use crate::{csrf, test::*};

	const VALID: [(&str, &str); 4] = [
		("name", "A"),
		("email", "a@b.com"),
		("subject", "S"),
		("message", "M"),
	];

	/// Submits the form the way a browser that loaded it would.
	async fn submit(app: &TestServer, fields: &[(&str, &str)]) -> TestResponse {
		let mut fields = fields.to_vec();
		fields.push((csrf::FIELD_NAME, CSRF_TOKEN));

		app.post("/contact/")
			.add_header(header::COOKIE, csrf_cookie())
			.form(&fields)
			.await
	}

	fn set_cookies(response: &TestResponse) -> Vec<String> {
		response
			.headers()
			.get_all(header::SET_COOKIE)
			.iter()
			.map(|value| value.to_str().unwrap().to_owned())
			.collect()
	}

	#[tokio::test]
	async fn test_empty_form() {
		let app = app(memory());

		let response = app.get("/contact/").await;

		assert_eq!(response.status_code(), 200);

		let cookies = set_cookies(&response);

		assert_eq!(cookies.len(), 1);
		assert!(cookies[0].starts_with("csrftoken="));

		let html = response.text();

		assert!(html.contains("<form id=\"contactForm\""));
		assert!(html.contains("name=\"csrfmiddlewaretoken\""));
		assert!(!html.contains("field-error"));
		assert!(!html.contains("notice success"));
	}

	#[tokio::test]
	async fn test_form_reuses_token() {
		let app = app(memory());

		let response = app
			.get("/contact/")
			.add_header(header::COOKIE, csrf_cookie())
			.await;

		assert!(set_cookies(&response).is_empty());
		assert!(response
			.text()
			.contains(&format!("value=\"{CSRF_TOKEN}\"")));
	}

	#[tokio::test]
	async fn test_valid_submission() {
		let store = memory();
		let app = app(store.clone());

		let response = submit(&app, &VALID).await;

		assert_eq!(response.status_code(), 303);
		assert_eq!(response.header("location"), "/contact/");

		let messages = store.list_contact_messages().await.unwrap();

		assert_eq!(messages.len(), 1);
		assert_eq!(messages[0].name, "A");
		assert_eq!(messages[0].email, "a@b.com");
		assert_eq!(messages[0].subject, "S");
		assert_eq!(messages[0].message, "M");
	}

	#[tokio::test]
	async fn test_submission_without_token() {
		let store = memory();
		let app = app(store.clone());

		let response = app
			.post("/contact/")
			.add_header(header::ORIGIN, HeaderValue::from_static("https://evil.example"))
			.form(&VALID)
			.await;

		assert_eq!(response.status_code(), 403);
		assert!(response.text().contains("CSRF verification failed"));
		assert!(store.list_contact_messages().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_submission_with_wrong_token() {
		let store = memory();
		let app = app(store.clone());

		let mut fields = VALID.to_vec();
		fields.push((csrf::FIELD_NAME, "ffffffffffffffffffffffffffffffff"));

		let response = app
			.post("/contact/")
			.add_header(header::COOKIE, csrf_cookie())
			.form(&fields)
			.await;

		assert_eq!(response.status_code(), 403);

		// the token alone is not enough without the cookie
		let mut fields = VALID.to_vec();
		fields.push((csrf::FIELD_NAME, CSRF_TOKEN));

		let response = app.post("/contact/").form(&fields).await;

		assert_eq!(response.status_code(), 403);
		assert!(store.list_contact_messages().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_invalid_email() {
		let store = memory();
		let app = app(store.clone());

		let response = submit(
			&app,
			&[
				("name", "A"),
				("email", "not-an-email"),
				("subject", "S"),
				("message", "M"),
			],
		)
		.await;

		assert_eq!(response.status_code(), 200);

		let html = response.text();

		assert!(html.contains("Enter a valid email address."));
		// submitted values are kept
		assert!(html.contains("value=\"not-an-email\""));
		assert!(html.contains("value=\"A\""));

		assert!(store.list_contact_messages().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_missing_fields() {
		let store = memory();
		let app = app(store.clone());

		let response = submit(&app, &[("name", "A")]).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(
			response.text().matches("This field is required.").count(),
			3
		);
		assert!(store.list_contact_messages().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_duplicate_submissions_are_kept() {
		let store = memory();
		let app = app(store.clone());

		for _ in 0..2 {
			let response = submit(&app, &VALID).await;

			assert_eq!(response.status_code(), 303);
		}

		assert_eq!(store.list_contact_messages().await.unwrap().len(), 2);
	}

	#[tokio::test]
	async fn test_notice_is_shown_once() {
		let app = app(memory());

		let response = submit(&app, &VALID).await;
		let cookies = set_cookies(&response);

		assert_eq!(cookies.len(), 1);
		assert!(cookies[0].starts_with("notice=message_sent"));

		let response = app
			.get("/contact/")
			.add_header(
				header::COOKIE,
				HeaderValue::from_static(
					"csrftoken=0123456789abcdef0123456789abcdef; notice=message_sent",
				),
			)
			.await;

		assert_eq!(response.status_code(), 200);
		assert!(response
			.text()
			.contains("Your message has been sent successfully!"));

		let cookies = set_cookies(&response);

		assert_eq!(cookies.len(), 1);
		assert!(cookies[0].starts_with("notice=;"));
		assert!(cookies[0].contains("Max-Age=0"));
	}
}
