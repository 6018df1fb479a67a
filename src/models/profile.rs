use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::UserSummary;
use crate::utils::{millis_to_rfc3339, now_millis, AppError};

/// Documento da collection "profiles" (um por usuário)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owner; unique across the collection
    pub user: ObjectId,

    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub social: Social,

    /// Newest first
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Newest first
    #[serde(default)]
    pub education: Vec<Education>,

    pub date: i64,

    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
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

impl Social {
    /// Overwrites only the links present in `other`.
    fn merge(&mut self, other: Social) {
        merge_field(&mut self.youtube, other.youtube);
        merge_field(&mut self.twitter, other.twitter);
        merge_field(&mut self.facebook, other.facebook);
        merge_field(&mut self.linkedin, other.linkedin);
        merge_field(&mut self.instagram, other.instagram);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl Profile {
    pub fn new(user: ObjectId) -> Self {
        Profile {
            id: None,
            user,
            company: None,
            website: None,
            location: None,
            status: String::new(),
            skills: vec![],
            bio: None,
            githubusername: None,
            social: Social::default(),
            experience: vec![],
            education: vec![],
            date: now_millis(),
            version: 0,
        }
    }

    /// Merges a normalized update; absent fields keep their stored value.
    pub fn apply(&mut self, update: ProfileUpdate) {
        merge_field(&mut self.company, update.company);
        merge_field(&mut self.website, update.website);
        merge_field(&mut self.location, update.location);
        merge_field(&mut self.bio, update.bio);
        merge_field(&mut self.githubusername, update.githubusername);
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        self.social.merge(update.social);
    }

    pub fn add_experience(&mut self, experience: Experience) {
        self.experience.insert(0, experience);
    }

    /// Returns false when no entry carries `id`; the profile is then left as is.
    pub fn remove_experience(&mut self, id: &ObjectId) -> bool {
        match self.experience.iter().position(|exp| &exp.id == id) {
            Some(index) => {
                self.experience.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_education(&mut self, education: Education) {
        self.education.insert(0, education);
    }

    pub fn remove_education(&mut self, id: &ObjectId) -> bool {
        match self.education.iter().position(|edu| &edu.id == id) {
            Some(index) => {
                self.education.remove(index);
                true
            }
            None => false,
        }
    }
}

fn merge_field(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = value;
    }
}

/// Prefixes `http://` unless the link already names an http(s) scheme.
pub fn normalize_link(raw: &str) -> String {
    let link = raw.trim();
    let lower = link.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        link.to_string()
    } else {
        format!("http://{}", link)
    }
}

/// Skills arrive either as a list or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

impl SkillsInput {
    pub fn into_skills(self) -> Vec<String> {
        let raw = match self {
            SkillsInput::List(list) => list,
            SkillsInput::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };

        raw.into_iter()
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect()
    }
}

/// Body of `POST /api/profile`. Every key is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[validate(schema(function = "validate_required_fields", skip_on_field_errors = false))]
pub struct ProfileInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[validate(
        required(message = "Status is required"),
        length(min = 1, message = "Status is required")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[validate(required(message = "Skills are required"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillsInput>,
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

fn validate_required_fields(input: &ProfileInput) -> Result<(), ValidationError> {
    if matches!(&input.status, Some(status) if status.trim().is_empty()) {
        return Err(ValidationError::new("status").with_message("Status is required".into()));
    }

    match &input.skills {
        Some(skills) if skills.clone().into_skills().is_empty() => {
            Err(ValidationError::new("skills").with_message("Skills are required".into()))
        }
        _ => Ok(()),
    }
}

/// Normalized profile fields; `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

impl ProfileInput {
    /// Blank strings count as absent, links gain a scheme, skills are split and trimmed.
    pub fn normalize(self) -> ProfileUpdate {
        let link = |value: Option<String>| present(value).map(|v| normalize_link(&v));

        ProfileUpdate {
            company: present(self.company),
            website: link(self.website),
            location: present(self.location),
            bio: present(self.bio),
            status: present(self.status),
            githubusername: present(self.githubusername),
            skills: self.skills.map(SkillsInput::into_skills),
            social: Social {
                youtube: link(self.youtube),
                twitter: link(self.twitter),
                facebook: link(self.facebook),
                linkedin: link(self.linkedin),
                instagram: link(self.instagram),
            },
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(param: &str, raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::validation(param, format!("{} must be a valid date", param)))
}

fn parse_range(
    from: &str,
    to: Option<String>,
    current: Option<bool>,
) -> Result<(NaiveDate, Option<NaiveDate>, bool), AppError> {
    let from = parse_date("from", from)?;
    let current = current.unwrap_or(false);
    let to = match present(to) {
        Some(raw) if !current => Some(parse_date("to", &raw)?),
        _ => None,
    };
    Ok((from, to, current))
}

/// Body of `PUT /api/profile/experience`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct ExperienceInput {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Company is required"),
        length(min = 1, message = "Company is required")
    )]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[validate(
        required(message = "From date is required"),
        length(min = 1, message = "From date is required")
    )]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExperienceInput {
    /// Validates and builds a fresh entry; `current` clears `to`.
    pub fn into_experience(self) -> Result<Experience, AppError> {
        self.validate()?;
        let (from, to, current) = parse_range(
            self.from.as_deref().unwrap_or_default(),
            self.to,
            self.current,
        )?;

        Ok(Experience {
            id: ObjectId::new(),
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            location: present(self.location),
            from,
            to,
            current,
            description: present(self.description),
        })
    }
}

/// Body of `PUT /api/profile/education`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct EducationInput {
    #[validate(
        required(message = "School is required"),
        length(min = 1, message = "School is required")
    )]
    pub school: Option<String>,
    #[validate(
        required(message = "Degree is required"),
        length(min = 1, message = "Degree is required")
    )]
    pub degree: Option<String>,
    #[validate(
        required(message = "Field of study is required"),
        length(min = 1, message = "Field of study is required")
    )]
    pub fieldofstudy: Option<String>,
    #[validate(
        required(message = "From date is required"),
        length(min = 1, message = "From date is required")
    )]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EducationInput {
    pub fn into_education(self) -> Result<Education, AppError> {
        self.validate()?;
        let (from, to, current) = parse_range(
            self.from.as_deref().unwrap_or_default(),
            self.to,
            self.current,
        )?;

        Ok(Education {
            id: ObjectId::new(),
            school: self.school.unwrap_or_default(),
            degree: self.degree.unwrap_or_default(),
            fieldofstudy: self.fieldofstudy.unwrap_or_default(),
            from,
            to,
            current,
            description: present(self.description),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExperienceResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EducationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Profile with its owner's public name/avatar joined in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: Option<UserSummary>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: Social,
    pub experience: Vec<ExperienceResponse>,
    pub education: Vec<EducationResponse>,
    pub date: String,
}

impl From<Experience> for ExperienceResponse {
    fn from(exp: Experience) -> Self {
        ExperienceResponse {
            id: exp.id.to_hex(),
            title: exp.title,
            company: exp.company,
            location: exp.location,
            from: exp.from,
            to: exp.to,
            current: exp.current,
            description: exp.description,
        }
    }
}

impl From<Education> for EducationResponse {
    fn from(edu: Education) -> Self {
        EducationResponse {
            id: edu.id.to_hex(),
            school: edu.school,
            degree: edu.degree,
            fieldofstudy: edu.fieldofstudy,
            from: edu.from,
            to: edu.to,
            current: edu.current,
            description: edu.description,
        }
    }
}

impl ProfileResponse {
    pub fn new(profile: Profile, user: Option<UserSummary>) -> Self {
        ProfileResponse {
            id: profile.id.map(|id| id.to_hex()).unwrap_or_default(),
            user,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            status: profile.status,
            skills: profile.skills,
            bio: profile.bio,
            githubusername: profile.githubusername,
            social: profile.social,
            experience: profile.experience.into_iter().map(Into::into).collect(),
            education: profile.education.into_iter().map(Into::into).collect(),
            date: millis_to_rfc3339(profile.date),
        }
    }
}
