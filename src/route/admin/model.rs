pub use crate::route::{
	blog::model::{CreatePost, Post, UpdatePost, SLUG_MAX_LENGTH},
	contact::model::ContactMessage,
	model::IdInput,
};
