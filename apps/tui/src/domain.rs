use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Code of the synthetic "every city" filter entry.
pub const ALL_CITIES_CODE: &str = "ALL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExperienceStatus {
    Draft,
    Active,
    Inactive,
    Completed,
    Cancelled,
    /// Missing or unrecognised on the wire. Never displayed.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ExperienceStatus {
    pub const ALL: [Self; 6] = [
        Self::Draft,
        Self::Active,
        Self::Inactive,
        Self::Completed,
        Self::Cancelled,
        Self::Unknown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkillLevel {
    Intermediate,
    Advanced,
    #[default]
    #[serde(other)]
    Beginner,
}

impl SkillLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountKind {
    Percentage,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
}

/// A bookable city or venue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "locationId", default, deserialize_with = "null_as_default")]
    pub location_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Location {
    pub fn new(id: &str, location_id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            location_id: location_id.to_string(),
            name: name.to_string(),
        }
    }

    /// First three characters of the location id. Not guaranteed unique.
    pub fn city_code(&self) -> String {
        self.location_id.chars().take(3).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
}

/// A bookable catalogue entry as served by `/api/experiences`.
///
/// Every field falls back to its default so partially filled backend
/// documents still decode. Nulls read as the default, and a malformed
/// optional sub-document reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub experience_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: ExperienceStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub heading: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subheading: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub experience_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: Location,
    #[serde(deserialize_with = "null_as_default")]
    pub experience_address: String,
    #[serde(deserialize_with = "lenient_option")]
    pub google_map_link: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub age_group: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub skill_level: SkillLevel,
    #[serde(deserialize_with = "null_as_default")]
    pub max_participants: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub price_per_participant: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub gst_included: bool,
    #[serde(deserialize_with = "lenient_option")]
    pub discount: Option<Discount>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience_images: Vec<ExperienceImage>,
    #[serde(deserialize_with = "lenient_option")]
    pub brochure_pdf: Option<ExperienceImage>,
    #[serde(deserialize_with = "null_as_default")]
    pub hosts: Vec<Host>,
    #[serde(deserialize_with = "null_as_default")]
    pub faqs: Vec<Faq>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

impl Experience {
    /// Matches the document id first, then the business `experienceId`.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || (!self.experience_id.is_empty() && self.experience_id == id)
    }

    /// Calendar date of the session. Accepts both `2025-01-10` and full
    /// ISO timestamps.
    pub fn date(&self) -> Option<NaiveDate> {
        let prefix = self.experience_date.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.experience_images
            .first()
            .map(|image| image.url.as_str())
    }

    pub fn time_window(&self) -> String {
        match (self.start_time.is_empty(), self.end_time.is_empty()) {
            (false, false) => format!("{} - {}", self.start_time, self.end_time),
            (false, true) => self.start_time.clone(),
            _ => String::new(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Entry in the city filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityFilter {
    pub code: String,
    pub name: String,
}

impl CityFilter {
    pub fn all() -> Self {
        Self {
            code: ALL_CITIES_CODE.to_string(),
            name: "All Locations".to_string(),
        }
    }
}

impl From<&Location> for CityFilter {
    fn from(location: &Location) -> Self {
        Self {
            code: location.city_code(),
            name: location.name.clone(),
        }
    }
}
