//! Placeholder content shown when a section has nothing stored.

use super::{ContactCard, FooterLink, HeroView, ProjectCard, ServiceCard, StatView};

pub const OWNER_NAME: &str = "Your Name";
pub const TAGLINE: &str = "Full Stack Developer & Designer";
pub const ABOUT: &str = "I build fast, accessible web applications and care about the details \
     from database schema to the last pixel.";
pub const COPYRIGHT: &str = "Your Name. All rights reserved.";

pub fn hero() -> HeroView {
    HeroView {
        name: OWNER_NAME.to_string(),
        initial: HeroView::initial_of(OWNER_NAME),
        tagline: TAGLINE.to_string(),
        profile_photo_url: None,
        availability_status: None,
        location: None,
        email: None,
        resume_url: None,
        linkedin_url: None,
        github_url: None,
        placeholder: true,
    }
}

pub fn services() -> Vec<ServiceCard> {
    [
        ("Development", "Full stack web applications built to last.", "Code"),
        ("Design", "Clean interfaces with a focus on usability.", "Palette"),
        ("Performance", "Fast load times and smooth interactions.", "Zap"),
    ]
    .into_iter()
    .map(|(title, description, icon)| ServiceCard {
        title: title.to_string(),
        description: description.to_string(),
        icon_name: icon.to_string(),
    })
    .collect()
}

pub fn stats() -> Vec<StatView> {
    [
        ("Years Experience", "5+"),
        ("Projects Completed", "50+"),
        ("Happy Clients", "30+"),
    ]
    .into_iter()
    .map(|(label, value)| StatView {
        label: label.to_string(),
        value: value.to_string(),
    })
    .collect()
}

pub fn projects() -> Vec<ProjectCard> {
    [
        (
            "E-Commerce Platform",
            "A full-featured online store with cart, checkout and payment processing.",
            &["React", "Node.js", "PostgreSQL", "Stripe"][..],
            true,
        ),
        (
            "Task Management App",
            "Collaborative task tracking with real-time updates and team workspaces.",
            &["Next.js", "TypeScript", "Supabase"][..],
            true,
        ),
        (
            "Weather Dashboard",
            "Location-based forecasts with interactive charts and maps.",
            &["React", "Tailwind CSS", "OpenWeather API"][..],
            false,
        ),
    ]
    .into_iter()
    .map(|(title, description, stack, featured)| ProjectCard {
        id: None,
        title: title.to_string(),
        description: Some(description.to_string()),
        tech_stack: stack.iter().map(|s| s.to_string()).collect(),
        image_urls: Vec::new(),
        live_url: Some("https://example.com".to_string()),
        github_url: Some("https://github.com".to_string()),
        featured,
    })
    .collect()
}

pub fn contact_info() -> Vec<ContactCard> {
    [
        ("email", "Email", "hello@example.com", Some("mailto:hello@example.com")),
        ("phone", "Phone", "+1 (555) 123-4567", Some("tel:+15551234567")),
        ("location", "Location", "San Francisco, CA", None),
    ]
    .into_iter()
    .map(|(kind, label, value, href)| ContactCard {
        kind: kind.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        href: href.map(str::to_string),
    })
    .collect()
}

pub fn footer_links() -> Vec<FooterLink> {
    [
        ("GitHub", "https://github.com", "Github"),
        ("LinkedIn", "https://linkedin.com", "Linkedin"),
        ("Email", "mailto:hello@example.com", "Mail"),
    ]
    .into_iter()
    .map(|(label, href, icon)| FooterLink {
        label: label.to_string(),
        href: href.to_string(),
        icon_name: icon.to_string(),
    })
    .collect()
}
