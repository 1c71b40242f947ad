//! Application configuration loaded from environment variables.

use std::{path::PathBuf, str::FromStr};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} must be a number, got {value:?}")]
	InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
	pub host: String,
	pub port: u16,
	/// Without a database, records are kept in memory.
	pub database: Option<DatabaseConfig>,
	pub admin_key: Option<String>,
	pub assets: Assets,
	pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
	pub url: String,
	pub max_connections: u32,
}

/// Directories served as-is.
#[derive(Debug, Clone)]
pub struct Assets {
	pub static_dir: PathBuf,
	pub media_dir: PathBuf,
}

impl Default for Assets {
	fn default() -> Self {
		Self {
			static_dir: "static".into(),
			media_dir: "media".into(),
		}
	}
}

fn parse_or<T: FromStr>(
	lookup: &impl Fn(&str) -> Option<String>,
	name: &'static str,
	default: T,
) -> Result<T, Error> {
	match lookup(name) {
		Some(value) => value
			.parse()
			.map_err(|_| Error::InvalidNumber { name, value }),
		None => Ok(default),
	}
}

impl Config {
	/// Load configuration from environment variables.
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Load configuration from any source of variables.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let database = match lookup("DATABASE_URL") {
			Some(url) => Some(DatabaseConfig {
				url,
				max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
			}),
			None => None,
		};

		let defaults = Assets::default();

		Ok(Self {
			host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".into()),
			port: parse_or(&lookup, "PORT", 3000)?,
			database,
			admin_key: lookup("ADMIN_KEY"),
			assets: Assets {
				static_dir: lookup("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
				media_dir: lookup("MEDIA_DIR").map_or(defaults.media_dir, PathBuf::from),
			},
			otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT"),
		})
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashMap;

	use super::*;

	fn load(vars: &[(&str, &str)]) -> Result<Config, Error> {
		let vars = vars
			.iter()
			.map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
			.collect::<HashMap<_, _>>();

		Config::from_lookup(|name| vars.get(name).cloned())
	}

	#[test]
	fn test_defaults() {
		let config = load(&[]).unwrap();

		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.port, 3000);
		assert!(config.database.is_none());
		assert!(config.admin_key.is_none());
		assert_eq!(config.assets.static_dir, PathBuf::from("static"));
		assert_eq!(config.assets.media_dir, PathBuf::from("media"));
	}

	#[test]
	fn test_database() {
		let config = load(&[
			("DATABASE_URL", "postgres://localhost/lunotech"),
			("DB_MAX_CONNECTIONS", "12"),
			("PORT", "8080"),
		])
		.unwrap();

		let database = config.database.unwrap();

		assert_eq!(database.url, "postgres://localhost/lunotech");
		assert_eq!(database.max_connections, 12);
		assert_eq!(config.port, 8080);
	}

	#[test]
	fn test_invalid_port() {
		let error = load(&[("PORT", "eighty")]).unwrap_err();

		assert!(matches!(
			error,
			Error::InvalidNumber { name: "PORT", ref value } if value == "eighty"
		));
	}
}
