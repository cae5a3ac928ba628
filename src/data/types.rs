//! Typed views of the portfolio JSON files.
//!
//! Every field defaults when absent so a sparse file still renders what it
//! has.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Personal {
	pub name: Name,
	pub subtitle: String,
	pub title: String,
	pub about: About,
	pub social: Social,
	pub contact: Contact,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Name {
	pub full: String,
	pub first: String,
	pub last: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct About {
	pub detailed: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Social {
	pub google_scholar: Option<String>,
	pub linkedin: Option<String>,
	pub github: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contact {
	pub email: String,
	pub phone: String,
}

impl Personal {
	pub fn greeting(&self) -> String {
		format!("Hi, I'm {} {}", self.name.first, self.name.last)
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Education {
	pub degrees: Vec<Degree>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Degree {
	/// `"YYYY.MM"`, or just the year.
	pub start_date: String,
}

impl Degree {
	pub fn start_year(&self) -> Option<i32> {
		self.start_date.split('.').next()?.trim().parse().ok()
	}
}

impl Education {
	/// Whole years since the earliest degree started.
	pub fn years_in_research(&self, current_year: i32) -> Option<i32> {
		let first = self.degrees.iter().filter_map(Degree::start_year).min()?;
		Some((current_year - first).max(0))
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Research {
	pub areas: Vec<String>,
}

impl Research {
	/// Headline roles, one per leading research area.
	pub fn roles(&self) -> Vec<String> {
		self.areas
			.iter()
			.take(4)
			.map(|area| format!("{area} Researcher"))
			.collect()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Projects {
	pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
	pub title: String,
	pub category: String,
	pub technologies: Vec<String>,
	pub status: String,
}

impl Project {
	pub fn status_label(&self) -> &'static str {
		if self.status == "ongoing" { "Ongoing" } else { "Completed" }
	}

	pub fn headline_technologies(&self) -> &[String] {
		&self.technologies[..self.technologies.len().min(2)]
	}
}

impl Projects {
	pub fn top(&self) -> &[Project] {
		&self.projects[..self.projects.len().min(6)]
	}
}

/// Award entries vary in shape; only their count is shown.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Awards {
	pub grants: Vec<serde_json::Value>,
	pub scholarships: Vec<serde_json::Value>,
}

impl Awards {
	pub fn total(&self) -> usize {
		self.grants.len() + self.scholarships.len()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Skills {
	pub technical: TechnicalSkills,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TechnicalSkills {
	pub languages: Vec<String>,
	pub areas: Vec<String>,
}

impl Skills {
	/// First three languages followed by the first three areas.
	pub fn main(&self) -> Vec<String> {
		let t = &self.technical;
		t.languages.iter().take(3).chain(t.areas.iter().take(3)).cloned().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn personal_reads_camel_case_social() {
		let p: Personal = serde_json::from_str(
			r#"{
				"name": {"full": "Ada L.", "first": "Ada", "last": "Lovelace"},
				"social": {"googleScholar": "https://scholar.example", "github": "https://gh.example"},
				"contact": {"email": "ada@example.org"}
			}"#,
		)
		.unwrap();
		assert_eq!(p.greeting(), "Hi, I'm Ada Lovelace");
		assert_eq!(p.social.google_scholar.as_deref(), Some("https://scholar.example"));
		assert!(p.social.linkedin.is_none());
		assert_eq!(p.contact.phone, "");
	}

	#[test]
	fn years_from_earliest_degree() {
		let e: Education = serde_json::from_str(
			r#"{"degrees": [
				{"startDate": "2021.03"},
				{"startDate": "2019.03"},
				{"startDate": "2015.09"},
				{"startDate": "unknown"}
			]}"#,
		)
		.unwrap();
		assert_eq!(e.years_in_research(2025), Some(10));
		assert_eq!(Education::default().years_in_research(2025), None);
	}

	#[test]
	fn roles_take_four_areas() {
		let r = Research {
			areas: ["Vision", "Robotics", "NLP", "RL", "Audio"].map(String::from).to_vec(),
		};
		assert_eq!(
			r.roles(),
			["Vision Researcher", "Robotics Researcher", "NLP Researcher", "RL Researcher"]
		);
	}

	#[test]
	fn project_summaries() {
		let p: Projects = serde_json::from_str(
			r#"{"projects": [
				{"title": "A", "status": "ongoing", "technologies": ["Rust", "WASM", "WebGL"]},
				{"title": "B", "status": "done"},
				{"title": "C"}, {"title": "D"}, {"title": "E"}, {"title": "F"}, {"title": "G"}
			]}"#,
		)
		.unwrap();
		assert_eq!(p.top().len(), 6);
		assert_eq!(p.projects[0].status_label(), "Ongoing");
		assert_eq!(p.projects[1].status_label(), "Completed");
		assert_eq!(p.projects[0].headline_technologies(), ["Rust", "WASM"]);
		assert!(p.projects[2].headline_technologies().is_empty());
	}

	#[test]
	fn awards_and_skills() {
		let a: Awards =
			serde_json::from_str(r#"{"grants": [{"title": "x"}, "y"], "scholarships": [{}]}"#)
				.unwrap();
		assert_eq!(a.total(), 3);

		let s: Skills = serde_json::from_str(
			r#"{"technical": {"languages": ["Rust", "Python", "C++", "Go"], "areas": ["ML"]}}"#,
		)
		.unwrap();
		assert_eq!(s.main(), ["Rust", "Python", "C++", "ML"]);
	}
}
