use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// The longest slug a post can have, in characters.
pub const SLUG_MAX_LENGTH: usize = 255;

/// Derives a URL-safe slug from a title.
///
/// The title is transliterated to ASCII and lowercased, every run of
/// characters that are not ASCII alphanumerics becomes a single `-`, and
/// separators at either end are trimmed. May return an empty string if the
/// title has no alphanumeric characters, and transliteration can make it
/// longer than the title.
pub fn derive_slug(title: &str) -> String {
	let transliterated = deunicode::deunicode(title);
	let mut slug = String::with_capacity(transliterated.len());

	for word in transliterated
		.split(|c: char| !c.is_ascii_alphanumeric())
		.filter(|word| !word.is_empty())
	{
		if !slug.is_empty() {
			slug.push('-');
		}

		slug.extend(word.chars().map(|c| c.to_ascii_lowercase()));
	}

	slug
}

/// Whether `value` only contains characters allowed in a slug.
pub fn is_slug(value: &str) -> bool {
	!value.is_empty()
		&& value
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// An empty slug is allowed here, it is derived from the title on creation.
fn validate_slug(slug: &str) -> Result<(), ValidationError> {
	if slug.is_empty() || is_slug(slug) {
		return Ok(());
	}

	Err(ValidationError::new("invalid_slug"))
}

/// A published article.
#[model]
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct Post {
	/// The unique identifier of the post.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The title of the post.
	#[validate(length(min = 1, max = 200))]
	pub title: String,
	/// The unique, URL-safe identifier used in the post's address.
	/// Derived from the title when left empty on creation.
	#[serde(default)]
	#[validate(length(max = 255), custom(function = "validate_slug"))]
	pub slug: String,
	/// The body of the post.
	#[validate(length(min = 1))]
	pub description: String,
	/// Path of the cover image, relative to the media directory.
	#[validate(length(min = 1, max = 100))]
	pub image: String,
	/// The creation time of the post.
	#[serde(skip_deserializing)]
	pub date: chrono::DateTime<chrono::Utc>,
	#[validate(length(min = 1, max = 100))]
	pub creator_name: String,
	#[validate(length(min = 1, max = 100))]
	pub creator_job_title: String,
}

impl CreatePost {
	/// Fills in the slug from the title if none was given.
	#[must_use]
	pub fn with_derived_slug(mut self) -> Self {
		if self.slug.is_empty() {
			self.slug = derive_slug(&self.title);
		}

		self
	}
}

impl UpdatePost {
	/// Slugs are never re-derived on update, so an empty slug leaves it unchanged.
	#[must_use]
	pub fn without_empty_slug(mut self) -> Self {
		self.slug = self.slug.filter(|slug| !slug.is_empty());
		self
	}
}
