//! Skills, grouped by category on the public page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{min_chars, one_of, to_row, Entity};
use crate::storage::{OrderBy, Row, Table};

/// Categories a skill may be filed under, in display order.
pub const SKILL_CATEGORIES: [&str; 8] = [
    "Programming Languages",
    "Frameworks & Libraries",
    "Databases",
    "Tools & Platforms",
    "Cloud Services",
    "Design",
    "Soft Skills",
    "Other",
];

/// How well a skill is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 4] = [
        ProficiencyLevel::Beginner,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
        ProficiencyLevel::Expert,
    ];

    /// Star rating shown next to the skill.
    pub fn stars(&self) -> u8 {
        match self {
            ProficiencyLevel::Beginner => 1,
            ProficiencyLevel::Intermediate => 2,
            ProficiencyLevel::Advanced => 3,
            ProficiencyLevel::Expert => 4,
        }
    }
}

impl std::fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProficiencyLevel::Beginner => write!(f, "beginner"),
            ProficiencyLevel::Intermediate => write!(f, "intermediate"),
            ProficiencyLevel::Advanced => write!(f, "advanced"),
            ProficiencyLevel::Expert => write!(f, "expert"),
        }
    }
}

impl std::str::FromStr for ProficiencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(ProficiencyLevel::Beginner),
            "intermediate" => Ok(ProficiencyLevel::Intermediate),
            "advanced" => Ok(ProficiencyLevel::Advanced),
            "expert" => Ok(ProficiencyLevel::Expert),
            _ => Err(format!("Unknown proficiency level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub proficiency_level: ProficiencyLevel,
    /// Position within the category.
    #[serde(default)]
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct SkillForm {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[serde(default)]
    #[validate(custom(function = "validate_proficiency"))]
    pub proficiency_level: String,
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    one_of(value, &SKILL_CATEGORIES, "Please select a category")
}

fn validate_proficiency(value: &str) -> Result<(), ValidationError> {
    one_of(
        &value.to_lowercase(),
        &["beginner", "intermediate", "advanced", "expert"],
        "Please select a proficiency level",
    )
}

/// Skills of one category, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<Skill>,
}

/// Group skills by category.
///
/// Known categories come first in their canonical order, then any other category in
/// the order it first appears. Skills keep their relative order within a group.
pub fn group_skills(skills: Vec<Skill>) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for skill in skills {
        match groups.iter_mut().find(|g| g.category == skill.category) {
            Some(group) => group.skills.push(skill),
            None => groups.push(SkillGroup {
                category: skill.category.clone(),
                skills: vec![skill],
            }),
        }
    }
    groups.sort_by_key(|g| {
        SKILL_CATEGORIES
            .iter()
            .position(|c| *c == g.category)
            .unwrap_or(SKILL_CATEGORIES.len())
    });
    groups
}

impl Entity for Skill {
    const TABLE: Table = Table::Skills;
    const LABEL: &'static str = "Skill";
    const ORDER: &'static [OrderBy] = &[OrderBy::asc("category"), OrderBy::asc("sort_order")];

    type Form = SkillForm;

    fn id(&self) -> Uuid {
        self.id
    }

    fn fields(form: SkillForm) -> Row {
        to_row(json!({
            "name": form.name.trim(),
            "category": form.category,
            "proficiency_level": form.proficiency_level.to_lowercase(),
        }))
    }

    /// New skills go to the end of their own category.
    fn insert_fields(form: SkillForm, existing: &[Self]) -> Row {
        let in_category = existing
            .iter()
            .filter(|s| s.category == form.category)
            .count();
        let mut row = Self::fields(form);
        row.insert("sort_order".to_string(), Value::from(in_category as i64));
        row
    }
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 2, "Skill name must be at least 2 characters")
}
