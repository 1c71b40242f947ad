use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::{Error, Store};
use crate::route::{
	blog::model::{CreatePost, Post, UpdatePost},
	contact::model::{ContactMessage, CreateContactMessage},
};

const POST_SLUG_KEY: &str = "post_slug_key";

/// A [`Store`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
	pool: PgPool,
}

impl PgStore {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}

	/// Connects to the database and applies any pending migrations.
	pub async fn connect(url: &str, max_connections: u32) -> Result<Self, Error> {
		let pool = PgPoolOptions::new()
			.max_connections(max_connections)
			.connect(url)
			.await?;

		sqlx::migrate!().run(&pool).await?;

		Ok(Self::new(pool))
	}
}

/// Maps a violation of the slug constraint to [`Error::UniquenessViolation`].
fn slug_conflict(error: sqlx::Error, slug: Option<&str>) -> Error {
	match error {
		sqlx::Error::Database(ref d) if d.constraint() == Some(POST_SLUG_KEY) => {
			Error::UniquenessViolation(slug.unwrap_or_default().to_owned())
		}
		e => Error::Database(e),
	}
}

#[async_trait]
impl Store for PgStore {
	async fn list_posts(&self) -> Result<Vec<Post>, Error> {
		let posts = sqlx::query_as::<_, Post>(
			r#"
				SELECT id, title, slug, description, image, date, creator_name, creator_job_title
				FROM post
				ORDER BY date DESC, seq ASC
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		Ok(posts)
	}

	async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				SELECT id, title, slug, description, image, date, creator_name, creator_job_title
				FROM post
				WHERE slug = $1
			"#,
		)
		.bind(slug)
		.fetch_optional(&self.pool)
		.await?;

		Ok(post)
	}

	async fn get_post(&self, id: Uuid) -> Result<Option<Post>, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				SELECT id, title, slug, description, image, date, creator_name, creator_job_title
				FROM post
				WHERE id = $1
			"#,
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(post)
	}

	async fn insert_post(&self, post: CreatePost) -> Result<Post, Error> {
		sqlx::query_as::<_, Post>(
			r#"
				INSERT INTO post (title, slug, description, image, creator_name, creator_job_title)
				VALUES ($1, $2, $3, $4, $5, $6)
				RETURNING id, title, slug, description, image, date, creator_name, creator_job_title
			"#,
		)
		.bind(&post.title)
		.bind(&post.slug)
		.bind(&post.description)
		.bind(&post.image)
		.bind(&post.creator_name)
		.bind(&post.creator_job_title)
		.fetch_one(&self.pool)
		.await
		.map_err(|e| slug_conflict(e, Some(&post.slug)))
	}

	async fn update_post(&self, id: Uuid, changes: UpdatePost) -> Result<Option<Post>, Error> {
		sqlx::query_as::<_, Post>(
			r#"
				UPDATE post
				SET
					title = COALESCE($1, title),
					slug = COALESCE($2, slug),
					description = COALESCE($3, description),
					image = COALESCE($4, image),
					creator_name = COALESCE($5, creator_name),
					creator_job_title = COALESCE($6, creator_job_title)
				WHERE id = $7
				RETURNING id, title, slug, description, image, date, creator_name, creator_job_title
			"#,
		)
		.bind(&changes.title)
		.bind(&changes.slug)
		.bind(&changes.description)
		.bind(&changes.image)
		.bind(&changes.creator_name)
		.bind(&changes.creator_job_title)
		.bind(id)
		.fetch_optional(&self.pool)
		.await
		.map_err(|e| slug_conflict(e, changes.slug.as_deref()))
	}

	async fn delete_post(&self, id: Uuid) -> Result<bool, Error> {
		let result = sqlx::query("DELETE FROM post WHERE id = $1")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}

	async fn insert_contact_message(
		&self,
		message: CreateContactMessage,
	) -> Result<ContactMessage, Error> {
		let message = sqlx::query_as::<_, ContactMessage>(
			r#"
				INSERT INTO contact_message (name, email, subject, message)
				VALUES ($1, $2, $3, $4)
				RETURNING id, name, email, subject, message, created_at
			"#,
		)
		.bind(message.name)
		.bind(message.email)
		.bind(message.subject)
		.bind(message.message)
		.fetch_one(&self.pool)
		.await?;

		Ok(message)
	}

	async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, Error> {
		let messages = sqlx::query_as::<_, ContactMessage>(
			r#"
				SELECT id, name, email, subject, message, created_at
				FROM contact_message
				ORDER BY created_at DESC, seq DESC
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		Ok(messages)
	}

	async fn get_contact_message(&self, id: Uuid) -> Result<Option<ContactMessage>, Error> {
		let message = sqlx::query_as::<_, ContactMessage>(
			r#"
				SELECT id, name, email, subject, message, created_at
				FROM contact_message
				WHERE id = $1
			"#,
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(message)
	}

	async fn delete_contact_message(&self, id: Uuid) -> Result<bool, Error> {
		let result = sqlx::query("DELETE FROM contact_message WHERE id = $1")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test::*;

	#[sqlx::test]
	#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
	async fn test_slug_constraint(pool: PgPool) {
		let store = PgStore::new(pool);

		store.insert_post(create_post("Hello", "hello")).await.unwrap();

		let error = store
			.insert_post(create_post("Hello again", "hello"))
			.await
			.unwrap_err();

		assert!(matches!(error, Error::UniquenessViolation(ref slug) if slug == "hello"));
	}

	#[sqlx::test]
	#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
	async fn test_posts_newest_first(pool: PgPool) {
		let store = PgStore::new(pool.clone());

		store.insert_post(create_post("Old", "old")).await.unwrap();
		store.insert_post(create_post("New", "new")).await.unwrap();

		sqlx::query("UPDATE post SET date = date - INTERVAL '1 day' WHERE slug = 'old'")
			.execute(&pool)
			.await
			.unwrap();

		let slugs = store
			.list_posts()
			.await
			.unwrap()
			.into_iter()
			.map(|post| post.slug)
			.collect::<Vec<_>>();

		assert_eq!(slugs, ["new", "old"]);
	}
}
