#![warn(clippy::pedantic)]

mod config;
mod csrf;
mod error;
mod extract;
mod flash;
mod openapi;
mod route;
mod store;
mod template;
#[cfg(test)]
mod test;
mod trace;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
	config::Config,
	extract::AdminKey,
	store::{MemoryStore, PgStore},
	template::Templates,
};

pub type Database = Arc<dyn store::Store>;
pub type AppState = State;

/// The shared application state.
///
/// Handlers pick the parts they need with `State<T>`, so each field must
/// be cheap to clone.
#[derive(Clone, FromRef)]
pub struct State {
	pub database: Database,
	pub templates: Templates,
	pub admin_key: AdminKey,
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let config = Config::from_env().expect("invalid configuration");
	let _guard = trace::init_tracing_subscriber(config.otlp_endpoint.as_deref());

	let database: Database = match config.database {
		Some(ref database) => Arc::new(
			PgStore::connect(&database.url, database.max_connections)
				.await
				.expect("failed to connect to database"),
		),
		None => {
			tracing::warn!("DATABASE_URL is not set, records are kept in memory");
			Arc::new(MemoryStore::new())
		}
	};

	if config.admin_key.is_none() {
		tracing::warn!("ADMIN_KEY is not set, the admin API is disabled");
	}

	let state = State {
		database,
		templates: Templates::new().expect("failed to load templates"),
		admin_key: AdminKey::new(config.admin_key),
	};

	let app = route::app(state, &config.assets);

	let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
		.await
		.expect("failed to bind to port");

	tracing::info!(host = %config.host, port = config.port, "listening");

	axum::serve(listener, app).await.expect("server error");
}
