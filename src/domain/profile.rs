//! The site owner's profile.
//!
//! Each admin user has at most one profile row, keyed by `user_id`. The hero and
//! about sections read from the first profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{blank_as_none, min_chars, to_row};
use crate::storage::Row;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    /// Owning admin user.
    pub user_id: String,
    pub name: String,
    pub tagline: Option<String>,
    pub about: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub years_of_experience: Option<String>,
    pub availability_status: Option<String>,
    pub profile_photo_url: Option<String>,
    pub resume_url: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile editor form. The photo is uploaded separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub about: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub years_of_experience: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub availability_status: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Must be a valid URL"))]
    pub resume_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Must be a valid URL"))]
    pub website_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Must be a valid URL"))]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Must be a valid URL"))]
    pub github_url: Option<String>,
}

impl ProfileForm {
    pub fn into_row(self) -> Row {
        to_row(json!({
            "name": self.name.trim(),
            "tagline": self.tagline,
            "about": self.about,
            "email": self.email,
            "phone": self.phone,
            "location": self.location,
            "years_of_experience": self.years_of_experience,
            "availability_status": self.availability_status,
            "resume_url": self.resume_url,
            "website_url": self.website_url,
            "linkedin_url": self.linkedin_url,
            "github_url": self.github_url,
        }))
    }
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 2, "Name must be at least 2 characters")
}
