//! Public site sections.
//!
//! Read-only projections of the content tables. A section whose fetch fails or comes
//! back empty renders placeholder content instead, so the public page is never blank.

pub mod fallback;

use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ContactInfo, FooterItem, Profile, Project, Service, Stat};
use crate::error::PortfolioResult;
use crate::manager::{EntityManager, ProfileManager};
use crate::storage::{TableLocks, TableStore};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HeroView {
    pub name: String,
    /// Shown in place of the photo when none was uploaded.
    pub initial: String,
    pub tagline: String,
    pub profile_photo_url: Option<String>,
    pub availability_status: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    /// True when no profile was available and placeholder content is shown.
    pub placeholder: bool,
}

impl HeroView {
    pub fn initial_of(name: &str) -> String {
        name.trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

impl From<Profile> for HeroView {
    fn from(p: Profile) -> Self {
        Self {
            initial: Self::initial_of(&p.name),
            tagline: p
                .tagline
                .unwrap_or_else(|| fallback::TAGLINE.to_string()),
            name: p.name,
            profile_photo_url: p.profile_photo_url,
            availability_status: p.availability_status,
            location: p.location,
            email: p.email,
            resume_url: p.resume_url,
            linkedin_url: p.linkedin_url,
            github_url: p.github_url,
            placeholder: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceCard {
    pub title: String,
    pub description: String,
    pub icon_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AboutView {
    pub about: String,
    pub services: Vec<ServiceCard>,
    pub stats: Vec<StatView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectCard {
    /// Absent on placeholder projects.
    pub id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub image_urls: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: bool,
}

impl From<Project> for ProjectCard {
    fn from(p: Project) -> Self {
        Self {
            id: Some(p.id),
            title: p.title,
            description: p.description,
            tech_stack: p.tech_stack,
            image_urls: p.image_urls,
            live_url: p.live_url,
            github_url: p.github_url,
            featured: p.featured,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactCard {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub value: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
    pub icon_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FooterView {
    pub links: Vec<FooterLink>,
    /// Full copyright line, e.g. "© 2026 Your Name. All rights reserved."
    pub copyright: String,
}

/// Everything the landing page renders.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomePage {
    pub hero: HeroView,
    pub about: AboutView,
    pub projects: Vec<ProjectCard>,
    pub contact_info: Vec<ContactCard>,
    pub footer: FooterView,
}

/// Use fetched content, or the placeholder when the fetch failed or found nothing.
fn or_placeholder<T, U>(
    section: &'static str,
    fetched: PortfolioResult<Vec<T>>,
    map: impl FnMut(T) -> U,
    placeholder: impl FnOnce() -> Vec<U>,
) -> Vec<U> {
    match fetched {
        Ok(rows) if !rows.is_empty() => rows.into_iter().map(map).collect(),
        Ok(_) => placeholder(),
        Err(e) => {
            tracing::warn!(section, error = %e, "Section fetch failed, showing placeholder");
            placeholder()
        }
    }
}

fn copyright_line(text: &str) -> String {
    format!("© {} {}", Utc::now().year(), text)
}

/// Read side of the public site.
#[derive(Clone)]
pub struct Sections {
    profiles: ProfileManager,
    projects: EntityManager<Project>,
    services: EntityManager<Service>,
    stats: EntityManager<Stat>,
    contact_info: EntityManager<ContactInfo>,
    footer: EntityManager<FooterItem>,
}

impl Sections {
    pub fn new(store: Arc<dyn TableStore>, locks: TableLocks) -> Self {
        Self {
            profiles: ProfileManager::new(store.clone(), locks.clone()),
            projects: EntityManager::new(store.clone(), locks.clone()),
            services: EntityManager::new(store.clone(), locks.clone()),
            stats: EntityManager::new(store.clone(), locks.clone()),
            contact_info: EntityManager::new(store.clone(), locks.clone()),
            footer: EntityManager::new(store, locks),
        }
    }

    pub async fn hero(&self) -> HeroView {
        match self.profiles.primary().await {
            Ok(Some(profile)) => profile.into(),
            Ok(None) => fallback::hero(),
            Err(e) => {
                tracing::warn!(section = "hero", error = %e, "Section fetch failed, showing placeholder");
                fallback::hero()
            }
        }
    }

    pub async fn about(&self) -> AboutView {
        let (profile, services, stats) = tokio::join!(
            self.profiles.primary(),
            self.services.list(),
            self.stats.list()
        );

        let about = match profile {
            Ok(Some(Profile {
                about: Some(text), ..
            })) => text,
            _ => fallback::ABOUT.to_string(),
        };

        AboutView {
            about,
            services: or_placeholder(
                "services",
                services,
                |s| ServiceCard {
                    title: s.title,
                    description: s.description,
                    icon_name: s.icon_name,
                },
                fallback::services,
            ),
            stats: or_placeholder(
                "stats",
                stats,
                |s| StatView {
                    label: s.label,
                    value: s.value,
                },
                fallback::stats,
            ),
        }
    }

    pub async fn projects(&self) -> Vec<ProjectCard> {
        or_placeholder(
            "projects",
            self.projects.list().await,
            ProjectCard::from,
            fallback::projects,
        )
    }

    /// A single stored project. Placeholder projects have no detail page.
    pub async fn project(&self, id: Uuid) -> PortfolioResult<ProjectCard> {
        Ok(self.projects.get(id).await?.into())
    }

    pub async fn contact_info(&self) -> Vec<ContactCard> {
        or_placeholder(
            "contact_info",
            self.contact_info.list().await,
            |c| ContactCard {
                kind: c.kind,
                label: c.label,
                value: c.value,
                href: c.href,
            },
            fallback::contact_info,
        )
    }

    pub async fn footer(&self) -> FooterView {
        let items = match self.footer.list().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(section = "footer", error = %e, "Section fetch failed, showing placeholder");
                Vec::new()
            }
        };

        let copyright = items
            .iter()
            .find(|item| item.is_copyright())
            .map(|item| item.value.clone())
            .unwrap_or_else(|| fallback::COPYRIGHT.to_string());

        let links: Vec<FooterLink> = items
            .into_iter()
            .filter(|item| !item.is_copyright())
            .map(|item| FooterLink {
                href: item.href.unwrap_or_else(|| item.value.clone()),
                icon_name: item.icon_name.unwrap_or_else(|| "Link".to_string()),
                label: item.label,
            })
            .collect();

        FooterView {
            links: if links.is_empty() {
                fallback::footer_links()
            } else {
                links
            },
            copyright: copyright_line(&copyright),
        }
    }

    pub async fn home(&self) -> HomePage {
        let (hero, about, projects, contact_info, footer) = tokio::join!(
            self.hero(),
            self.about(),
            self.projects(),
            self.contact_info(),
            self.footer()
        );
        HomePage {
            hero,
            about,
            projects,
            contact_info,
            footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FooterItemForm, ProfileForm, ProjectForm};
    use crate::storage::testing::RecordingStore;
    use crate::storage::Table;

    async fn setup() -> (RecordingStore, Sections) {
        crate::logging::init_test();
        let store = RecordingStore::new().await;
        let sections = Sections::new(Arc::new(store.clone()), TableLocks::new());
        (store, sections)
    }

    #[tokio::test]
    async fn test_failing_projects_table_shows_demo_projects() {
        let (store, sections) = setup().await;
        store.fail_table(Table::Projects).await;

        let projects = sections.projects().await;

        let titles: Vec<_> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["E-Commerce Platform", "Task Management App", "Weather Dashboard"]
        );
        assert!(projects.iter().all(|p| p.id.is_none()));
        assert_eq!(
            projects.iter().filter(|p| p.featured).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_stored_projects_replace_placeholders() {
        let (store, sections) = setup().await;
        let projects = EntityManager::<Project>::new(Arc::new(store.clone()), TableLocks::new());
        let created = projects
            .create(ProjectForm {
                title: "Portfolio".into(),
                tech_stack: "Rust, Axum".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let cards = sections.projects().await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, Some(created.record.id));

        let detail = sections.project(created.record.id).await.unwrap();
        assert_eq!(detail.tech_stack, vec!["Rust", "Axum"]);
        assert!(sections.project(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_store_renders_placeholders() {
        let (_store, sections) = setup().await;

        let home = sections.home().await;

        assert!(home.hero.placeholder);
        assert_eq!(home.hero.name, "Your Name");
        assert_eq!(home.hero.initial, "Y");
        assert_eq!(home.hero.tagline, "Full Stack Developer & Designer");
        let services: Vec<_> = home.about.services.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(services, vec!["Development", "Design", "Performance"]);
        assert_eq!(home.about.stats.len(), 3);
        assert_eq!(home.contact_info.len(), 3);
        let links: Vec<_> = home.footer.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(links, vec!["GitHub", "LinkedIn", "Email"]);
        assert!(home
            .footer
            .copyright
            .ends_with(" Your Name. All rights reserved."));
        assert!(home
            .footer
            .copyright
            .starts_with(&format!("© {}", Utc::now().year())));
    }

    #[tokio::test]
    async fn test_hero_uses_profile() {
        let (store, sections) = setup().await;
        ProfileManager::new(Arc::new(store.clone()), TableLocks::new())
            .save(
                "admin",
                ProfileForm {
                    name: "jane doe".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let hero = sections.hero().await;
        assert!(!hero.placeholder);
        assert_eq!(hero.name, "jane doe");
        assert_eq!(hero.initial, "J");
        assert_eq!(hero.tagline, fallback::TAGLINE);
    }

    #[tokio::test]
    async fn test_footer_keeps_default_copyright_when_missing() {
        let (store, sections) = setup().await;
        EntityManager::<FooterItem>::new(Arc::new(store.clone()), TableLocks::new())
            .create(FooterItemForm {
                kind: "social".into(),
                label: "Twitter".into(),
                value: "@jane".into(),
                href: None,
                icon_name: Some("Twitter".into()),
            })
            .await
            .unwrap();

        let footer = sections.footer().await;
        assert_eq!(footer.links.len(), 1);
        assert_eq!(footer.links[0].href, "@jane");
        assert!(footer.copyright.ends_with(fallback::COPYRIGHT));
    }
}
