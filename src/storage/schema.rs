//! Table catalogue for the content store.
//!
//! Every content table is flat and independent. The column lists here are the
//! whitelist the generic store builds SQL from.

use serde::{Deserialize, Serialize};

/// How a column is stored in SQLite and exposed as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// TEXT, JSON string.
    Text,
    /// INTEGER, JSON number.
    Integer,
    /// INTEGER 0/1, JSON boolean.
    Bool,
    /// TEXT holding a JSON array of strings.
    TextList,
}

/// A single table column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn text(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Text,
    }
}

const fn integer(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Integer,
    }
}

const fn boolean(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Bool,
    }
}

const fn text_list(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::TextList,
    }
}

/// Columns the store fills in itself. Callers may filter on them but never write them.
pub const MANAGED_COLUMNS: [&str; 3] = ["id", "created_at", "updated_at"];

const PROFILES: &[Column] = &[
    text("id"),
    text("user_id"),
    text("name"),
    text("tagline"),
    text("about"),
    text("email"),
    text("phone"),
    text("location"),
    text("years_of_experience"),
    text("availability_status"),
    text("profile_photo_url"),
    text("resume_url"),
    text("website_url"),
    text("linkedin_url"),
    text("github_url"),
    text("created_at"),
    text("updated_at"),
];

const PROJECTS: &[Column] = &[
    text("id"),
    text("title"),
    text("description"),
    text_list("tech_stack"),
    text_list("image_urls"),
    text("live_url"),
    text("github_url"),
    boolean("featured"),
    integer("sort_order"),
    text("created_at"),
    text("updated_at"),
];

const EXPERIENCES: &[Column] = &[
    text("id"),
    text("company"),
    text("position"),
    text("description"),
    text("location"),
    text("start_date"),
    text("end_date"),
    boolean("is_current"),
    integer("sort_order"),
    text("created_at"),
    text("updated_at"),
];

const EDUCATIONS: &[Column] = &[
    text("id"),
    text("institution"),
    text("degree"),
    text("field_of_study"),
    text("gpa"),
    text("description"),
    text("start_date"),
    text("end_date"),
    boolean("is_current"),
    integer("sort_order"),
    text("created_at"),
    text("updated_at"),
];

const SKILLS: &[Column] = &[
    text("id"),
    text("name"),
    text("category"),
    text("proficiency_level"),
    integer("sort_order"),
    text("created_at"),
    text("updated_at"),
];

const SERVICES: &[Column] = &[
    text("id"),
    text("title"),
    text("description"),
    text("icon_name"),
    integer("sort_order"),
    text("created_at"),
    text("updated_at"),
];

const STATS: &[Column] = &[
    text("id"),
    text("label"),
    text("value"),
    integer("sort_order"),
    text("created_at"),
    text("updated_at"),
];

const CONTACT_INFO: &[Column] = &[
    text("id"),
    text("type"),
    text("label"),
    text("value"),
    text("href"),
    text("created_at"),
    text("updated_at"),
];

const FOOTER_INFO: &[Column] = &[
    text("id"),
    text("type"),
    text("label"),
    text("value"),
    text("href"),
    text("icon_name"),
    integer("sort_order"),
    text("created_at"),
    text("updated_at"),
];

const CONTACT_SUBMISSIONS: &[Column] = &[
    text("id"),
    text("name"),
    text("email"),
    text("message"),
    text("created_at"),
];

/// A content table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Profiles,
    Projects,
    Experiences,
    Educations,
    Skills,
    Services,
    Stats,
    ContactInfo,
    FooterInfo,
    ContactSubmissions,
}

impl Table {
    /// Every table, in schema creation order.
    pub const ALL: [Table; 10] = [
        Table::Profiles,
        Table::Projects,
        Table::Experiences,
        Table::Educations,
        Table::Skills,
        Table::Services,
        Table::Stats,
        Table::ContactInfo,
        Table::FooterInfo,
        Table::ContactSubmissions,
    ];

    /// SQL table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::Projects => "projects",
            Table::Experiences => "experiences",
            Table::Educations => "educations",
            Table::Skills => "skills",
            Table::Services => "services",
            Table::Stats => "stats",
            Table::ContactInfo => "contact_info",
            Table::FooterInfo => "footer_info",
            Table::ContactSubmissions => "contact_submissions",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            Table::Profiles => PROFILES,
            Table::Projects => PROJECTS,
            Table::Experiences => EXPERIENCES,
            Table::Educations => EDUCATIONS,
            Table::Skills => SKILLS,
            Table::Services => SERVICES,
            Table::Stats => STATS,
            Table::ContactInfo => CONTACT_INFO,
            Table::FooterInfo => FOOTER_INFO,
            Table::ContactSubmissions => CONTACT_SUBMISSIONS,
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns().iter().find(|c| c.name == name)
    }

    /// Whether rows carry an `updated_at` timestamp.
    pub fn has_updated_at(&self) -> bool {
        self.column("updated_at").is_some()
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_has_id_and_created_at() {
        for table in Table::ALL {
            assert!(table.column("id").is_some(), "{table} has no id");
            assert!(table.column("created_at").is_some(), "{table} has no created_at");
        }
    }

    #[test]
    fn test_submissions_have_no_updated_at() {
        assert!(!Table::ContactSubmissions.has_updated_at());
        assert!(Table::FooterInfo.has_updated_at());
    }

    #[test]
    fn test_column_lookup() {
        let col = Table::Projects.column("tech_stack").unwrap();
        assert_eq!(col.kind, ColumnKind::TextList);
        assert!(Table::Skills.column("proficiency").is_none());
    }
}
