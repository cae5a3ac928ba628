use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::network_canvas::{NetworkCanvas, NetworkConfig};
use crate::data::{self, PortfolioData};

fn current_year() -> i32 {
	js_sys::Date::new_0().get_full_year() as i32
}

#[component]
fn Hero(data: RwSignal<PortfolioData>) -> impl IntoView {
	let personal = move || data.with(|d| d.personal.clone());
	let roles = move || data.with(PortfolioData::roles).join(" · ");

	view! {
		<section id="home" class="hero">
			<div class="hero-network">
				<NetworkCanvas id="hero-network" />
			</div>
			<div class="hero-content">
				{move || {
					personal()
						.map(|p| {
							view! {
								<p class="nav-brand">{p.name.full.clone()}</p>
								<h1 class="hero-title">{p.greeting()}</h1>
								<p class="hero-subtitle">{p.subtitle}</p>
							}
						})
				}}
				<p class="hero-roles">{roles}</p>
			</div>
		</section>
	}
}

#[component]
fn About(data: RwSignal<PortfolioData>) -> impl IntoView {
	let year = current_year();
	let detailed = move || data.with(|d| d.personal.as_ref().map(|p| p.about.detailed.clone()));
	let stats = move || data.with(|d| d.about_stats(year));

	view! {
		<section id="about" class="about">
			<div class="about-network">
				<NetworkCanvas id="about-network" config=NetworkConfig::layered() />
			</div>
			<div class="about-text">
				<p>{detailed}</p>
			</div>
			<div class="about-stats">
				{move || {
					let stats = stats();
					view! {
						{stats.projects.map(|n| view! { <Stat value=n.to_string() label="Research Projects" /> })}
						{stats.years_in_research.map(|n| view! { <Stat value=format!("{n}+") label="Years in Research" /> })}
						{stats.awards.map(|n| view! { <Stat value=n.to_string() label="Awards & Scholarships" /> })}
					}
				}}
			</div>
		</section>
	}
}

#[component]
fn Stat(value: String, label: &'static str) -> impl IntoView {
	view! {
		<div class="stat">
			<h3>{value}</h3>
			<p>{label}</p>
		</div>
	}
}

#[component]
fn SkillTags(data: RwSignal<PortfolioData>) -> impl IntoView {
	view! {
		<div class="skills">
			{move || {
				data.with(|d| d.skills.as_ref().map(|s| s.main()).unwrap_or_default())
					.into_iter()
					.map(|skill| view! { <div class="skill-tag">{skill}</div> })
					.collect_view()
			}}
		</div>
	}
}

#[component]
fn ProjectGrid(data: RwSignal<PortfolioData>) -> impl IntoView {
	view! {
		<section id="portfolio" class="portfolio">
			<div class="portfolio-grid">
				{move || {
					data.with(|d| d.projects.as_ref().map(|p| p.top().to_vec()).unwrap_or_default())
						.into_iter()
						.map(|project| {
							let status = project.status_label();
							let tech = project
								.headline_technologies()
								.iter()
								.map(|t| view! { <span class="tech-tag">{t.clone()}</span> })
								.collect_view();
							view! {
								<div class="portfolio-item">
									<h3>{project.title}</h3>
									<p>{project.category}</p>
									<div class="project-tech">{tech}</div>
									<p class="project-status">{status}</p>
								</div>
							}
						})
						.collect_view()
				}}
			</div>
		</section>
	}
}

#[component]
fn Contact(data: RwSignal<PortfolioData>) -> impl IntoView {
	view! {
		<section id="contact" class="contact">
			{move || {
				data.with(|d| d.personal.clone())
					.map(|p| {
						let mailto = format!("mailto:{}", p.contact.email);
						let links = [
							("Google Scholar", p.social.google_scholar.clone()),
							("LinkedIn", p.social.linkedin.clone()),
							("GitHub", p.social.github.clone()),
						]
						.into_iter()
						.filter_map(|(title, href)| {
							href.map(|href| {
								view! {
									<a href=href target="_blank" class="social-link" title=title>
										{title}
									</a>
								}
							})
						})
						.collect_view();
						view! {
							<div class="contact-links">
								{links}
								<a href=mailto.clone() class="social-link" title="Email">"Email"</a>
							</div>
							<div class="contact-info">
								<p>
									{format!("Currently a {}.", p.title)}
									<br />
									"Email: "
									<a href=mailto>{p.contact.email.clone()}</a>
									<br />
									{format!("Phone: {}", p.contact.phone)}
								</p>
							</div>
						}
					})
			}}
		</section>
	}
}

/// Portfolio landing page with the animated network behind the hero.
#[component]
pub fn Home() -> impl IntoView {
	let data = RwSignal::new(PortfolioData::default());
	spawn_local(async move {
		data.set(data::load_portfolio().await);
	});

	view! {
		<Hero data />
		<About data />
		<SkillTags data />
		<ProjectGrid data />
		<Contact data />
	}
}
