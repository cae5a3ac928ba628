//! Portfolio content loaded from `data/<resource>.json`.
//!
//! Each resource loads on its own; a failed one is logged and left empty so
//! the page can still render the rest.

mod error;
mod types;

use gloo_net::http::Request;
use log::{info, warn};
use serde::de::DeserializeOwned;

pub use error::LoadError;
pub use types::*;

/// Directory the resources are served from.
pub const DATA_DIR: &str = "data";

/// Every resource the page knows about, in load order.
pub const RESOURCES: [&str; 6] = ["personal", "education", "research", "projects", "awards", "skills"];

/// Headline numbers for the about section. Each one needs its own resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AboutStats {
	pub projects: Option<usize>,
	pub years_in_research: Option<i32>,
	pub awards: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct PortfolioData {
	pub personal: Option<Personal>,
	pub education: Option<Education>,
	pub research: Option<Research>,
	pub projects: Option<Projects>,
	pub awards: Option<Awards>,
	pub skills: Option<Skills>,
}

fn parse<T: DeserializeOwned>(resource: &'static str, body: &str) -> Result<T, LoadError> {
	serde_json::from_str(body).map_err(|source| LoadError::Parse { resource, source })
}

impl PortfolioData {
	/// Parses `body` into the slot named `resource`.
	pub fn insert_raw(&mut self, resource: &str, body: &str) -> Result<(), LoadError> {
		let Some(&name) = RESOURCES.iter().find(|&&r| r == resource) else {
			return Err(LoadError::UnknownResource(resource.to_string()));
		};
		match name {
			"personal" => self.personal = Some(parse(name, body)?),
			"education" => self.education = Some(parse(name, body)?),
			"research" => self.research = Some(parse(name, body)?),
			"projects" => self.projects = Some(parse(name, body)?),
			"awards" => self.awards = Some(parse(name, body)?),
			_ => self.skills = Some(parse(name, body)?),
		}
		Ok(())
	}

	pub fn loaded(&self) -> usize {
		[
			self.personal.is_some(),
			self.education.is_some(),
			self.research.is_some(),
			self.projects.is_some(),
			self.awards.is_some(),
			self.skills.is_some(),
		]
		.into_iter()
		.filter(|&b| b)
		.count()
	}

	pub fn about_stats(&self, current_year: i32) -> AboutStats {
		AboutStats {
			projects: self.projects.as_ref().map(|p| p.projects.len()),
			years_in_research: self
				.education
				.as_ref()
				.and_then(|e| e.years_in_research(current_year)),
			awards: self.awards.as_ref().map(Awards::total),
		}
	}

	pub fn roles(&self) -> Vec<String> {
		self.research.as_ref().map(Research::roles).unwrap_or_default()
	}
}

async fn fetch(resource: &'static str) -> Result<String, LoadError> {
	let url = format!("{DATA_DIR}/{resource}.json");
	let resp = Request::get(&url)
		.send()
		.await
		.map_err(|source| LoadError::Request { resource, source })?;
	if !resp.ok() {
		return Err(LoadError::Status {
			resource,
			status: resp.status(),
		});
	}
	resp.text()
		.await
		.map_err(|source| LoadError::Request { resource, source })
}

/// Fetches every resource in [`RESOURCES`]. Never fails as a whole.
pub async fn load_portfolio() -> PortfolioData {
	let mut data = PortfolioData::default();
	for resource in RESOURCES {
		let result = match fetch(resource).await {
			Ok(body) => data.insert_raw(resource, &body),
			Err(err) => Err(err),
		};
		if let Err(err) = result {
			warn!("{err}");
		}
	}
	info!("portfolio data: {}/{} resources loaded", data.loaded(), RESOURCES.len());
	data
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_fills_named_slot() {
		let mut data = PortfolioData::default();
		data.insert_raw("research", r#"{"areas": ["Vision"]}"#).unwrap();
		assert_eq!(data.roles(), ["Vision Researcher"]);
		assert_eq!(data.loaded(), 1);
	}

	#[test]
	fn unknown_resource_rejected() {
		let mut data = PortfolioData::default();
		let err = data.insert_raw("publications", "{}").unwrap_err();
		assert!(matches!(err, LoadError::UnknownResource(ref r) if r == "publications"));
	}

	#[test]
	fn bad_resource_leaves_others() {
		let mut data = PortfolioData::default();
		data.insert_raw("projects", r#"{"projects": [{"title": "A"}, {"title": "B"}]}"#)
			.unwrap();
		let err = data.insert_raw("awards", "{not json").unwrap_err();
		assert!(matches!(err, LoadError::Parse { resource: "awards", .. }));

		assert!(data.awards.is_none());
		let stats = data.about_stats(2025);
		assert_eq!(stats.projects, Some(2));
		assert_eq!(stats.awards, None);
		assert_eq!(stats.years_in_research, None);
	}

	#[test]
	fn empty_registry_has_no_roles() {
		let data = PortfolioData::default();
		assert!(data.roles().is_empty());
		assert_eq!(data.about_stats(2025), AboutStats::default());
	}
}
