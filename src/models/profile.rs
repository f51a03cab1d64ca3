use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UserSummary;

/// Developer profile stored in the `profiles` collection, one per user.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning user id.
    pub user: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub from: NaiveDate,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    #[schema(value_type = String, format = Date)]
    pub from: NaiveDate,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create-or-edit form. Every field arrives as text; `skills` is a CSV list.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct ProfileRequest {
    pub handle: String,
    pub company: String,
    pub website: String,
    pub location: String,
    pub status: String,
    pub skills: String,
    pub bio: String,
    pub githubusername: String,
    pub youtube: String,
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub instagram: String,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct ExperienceRequest {
    pub title: String,
    pub company: String,
    pub location: String,
    pub from: String,
    pub to: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct EducationRequest {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    pub to: String,
    pub current: bool,
    pub description: String,
}

/// Profile with its `user` reference populated.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: UserSummary,
    pub handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub social: Social,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub date: i64,
}

impl ProfileResponse {
    pub fn new(profile: Profile, user: UserSummary) -> Self {
        ProfileResponse {
            id: profile.id,
            user,
            handle: profile.handle,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            status: profile.status,
            skills: profile.skills,
            bio: profile.bio,
            githubusername: profile.githubusername,
            social: profile.social,
            experience: profile.experience,
            education: profile.education,
            date: profile.date,
        }
    }
}

/// Optional text field: blank input means "not provided".
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits the comma separated skills input, dropping blank entries.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl ProfileRequest {
    pub fn social(&self) -> Social {
        Social {
            youtube: non_empty(&self.youtube),
            twitter: non_empty(&self.twitter),
            facebook: non_empty(&self.facebook),
            linkedin: non_empty(&self.linkedin),
            instagram: non_empty(&self.instagram),
        }
    }
}
