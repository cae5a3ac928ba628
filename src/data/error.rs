use thiserror::Error;

/// Why one portfolio resource could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("request for {resource} failed: {source}")]
	Request {
		resource: &'static str,
		#[source]
		source: gloo_net::Error,
	},

	#[error("{resource} returned HTTP {status}")]
	Status { resource: &'static str, status: u16 },

	#[error("{resource} is not valid: {source}")]
	Parse {
		resource: &'static str,
		#[source]
		source: serde_json::Error,
	},

	#[error("unknown portfolio resource `{0}`")]
	UnknownResource(String),
}
