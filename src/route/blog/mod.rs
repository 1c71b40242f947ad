use axum::{routing::get, Router};

use crate::AppState;

pub mod model;
pub mod route;

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/", get(home))
		.route("/blog/", get(list_posts))
		.route("/blog/:slug/", get(get_post))
}

#[cfg(test)]
mod test {
	use chrono::{Duration, Utc};

	use crate::test::*;

	#[tokio::test]
	async fn test_home_and_blog_list_newest_first() {
		let store = memory();

		store.insert_post(create_post("Older post", "older-post")).await.unwrap();
		store.insert_post(create_post("Newer post", "newer-post")).await.unwrap();
		store
			.set_post_date("older-post", Utc::now() - Duration::days(1))
			.await;

		let app = app(store);

		for path in ["/", "/blog/"] {
			let response = app.get(path).await;

			assert_eq!(response.status_code(), 200);

			let html = response.text();
			let newer = html.find("/blog/newer-post/").unwrap();
			let older = html.find("/blog/older-post/").unwrap();

			assert!(newer < older, "{path}");
		}
	}

	#[tokio::test]
	async fn test_empty_listing() {
		let app = app(memory());

		let response = app.get("/blog/").await;

		assert_eq!(response.status_code(), 200);
		assert!(response.text().contains("No posts yet."));
	}

	#[tokio::test]
	async fn test_post_detail() {
		let store = memory();

		store
			.insert_post(create_post("Hello World", "").with_derived_slug())
			.await
			.unwrap();

		let app = app(store);
		let response = app.get("/blog/hello-world/").await;

		assert_eq!(response.status_code(), 200);

		let html = response.text();

		assert!(html.contains("<h1>Hello World</h1>"));
		assert!(html.contains("Jane Doe"));
	}

	#[tokio::test]
	async fn test_unknown_post() {
		let app = app(memory());

		let response = app.get("/blog/unknown-slug/").await;

		assert_eq!(response.status_code(), 404);
		assert!(response.text().contains("Page not found"));
	}

	#[tokio::test]
	async fn test_slug_lookup_is_exact() {
		let store = memory();

		store
			.insert_post(create_post("Hello World", "hello-world"))
			.await
			.unwrap();

		let app = app(store);

		assert_eq!(app.get("/blog/Hello-World/").await.status_code(), 404);
		assert_eq!(app.get("/blog/hello/").await.status_code(), 404);
	}
}
