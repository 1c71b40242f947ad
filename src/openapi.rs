use aide::{
	openapi::{SecurityScheme, Tag},
	transform::TransformOpenApi,
};

use crate::{error, extract::Json};

pub const SECURITY_SCHEME_ADMIN_KEY: &str = "Admin Key";

pub mod tag {
	pub const POST: &str = "Post";
	pub const MESSAGE: &str = "Message";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Lunotech Admin API")
		.summary("Manage blog posts and read contact messages")
		.description(
			"Every operation requires the admin key, sent as `Authorization: Bearer <key>`.",
		)
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Blog post management".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::MESSAGE.into(),
			description: Some("Messages submitted through the contact form".into()),
			..Default::default()
		})
		.security_scheme(
			SECURITY_SCHEME_ADMIN_KEY,
			SecurityScheme::Http {
				scheme: "bearer".into(),
				bearer_format: None,
				description: Some("The configured admin key".into()),
				extensions: Default::default(),
			},
		)
		.default_response_with::<Json<error::Message>, _>(|res| {
			res.example(
				error::Message::new("unknown_post").detail("post", "00000000-0000-0000-0000-000000000000"),
			)
		})
}
