//! Report draft — the record a conversation fills in step by step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of animal found.
///
/// Values outside the known set are kept as-is and rendered with a generic
/// label instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Dog,
    Cat,
    Other,
    Unrecognized(String),
}

impl Category {
    pub fn from_key(key: &str) -> Self {
        match key {
            "dog" => Self::Dog,
            "cat" => Self::Cat,
            "other" => Self::Other,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Other => "other",
            Self::Unrecognized(key) => key,
        }
    }

    /// Label used in the published text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dog => "🐶 Dog",
            Self::Cat => "🐱 Cat",
            Self::Other => "🐾 Other animal",
            Self::Unrecognized(_) => "Unknown",
        }
    }

    /// Label used in saved snapshots.
    pub fn plain_label(&self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Other => "Other animal",
            Self::Unrecognized(_) => "Unknown",
        }
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.key().to_string()
    }
}

/// Sex of the animal, as far as the reporter can tell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
    Unknown,
    Unrecognized(String),
}

impl Sex {
    pub fn from_key(key: &str) -> Self {
        match key {
            "male" => Self::Male,
            "female" => Self::Female,
            "unknown" => Self::Unknown,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
            Self::Unrecognized(key) => key,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "♂️ Male",
            Self::Female => "♀️ Female",
            Self::Unknown => "❓ Sex unknown",
            Self::Unrecognized(_) => "Unknown",
        }
    }

    pub fn plain_label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unknown => "Sex unknown",
            Self::Unrecognized(_) => "Unknown",
        }
    }
}

impl From<String> for Sex {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        sex.key().to_string()
    }
}

/// A photo held by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub file_id: String,
    pub file_unique_id: String,
}

impl PhotoRef {
    pub fn new(file_id: impl Into<String>, file_unique_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            file_unique_id: file_unique_id.into(),
        }
    }
}

/// Where the animal was found: a geo point, a typed address, or (in
/// principle) both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

impl Location {
    pub fn geo(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            address: None,
        }
    }

    pub fn address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Default::default()
        }
    }

    /// Both coordinates, if present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn is_valid(&self) -> bool {
        self.coordinates().is_some() || self.address.is_some()
    }
}

/// Who is reporting, and from which conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reporter {
    pub subject_id: String,
    pub chat_id: String,
    pub display_name: Option<String>,
}

/// The in-progress report of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub subject_id: String,
    pub chat_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub category: Option<Category>,
    pub sex: Option<Sex>,
    pub photos: Vec<PhotoRef>,
    pub location: Location,
    /// `Some("")` means the reporter explicitly declined to comment.
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Draft {
    pub fn new(reporter: &Reporter) -> Self {
        Self {
            subject_id: reporter.subject_id.clone(),
            chat_id: reporter.chat_id.clone(),
            display_name: reporter.display_name.clone(),
            category: None,
            sex: None,
            photos: Vec::new(),
            location: Location::default(),
            comment: None,
            created_at: Utc::now(),
        }
    }

    pub fn apply_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn apply_sex(&mut self, sex: Sex) {
        self.sex = Some(sex);
    }

    /// Append a photo unless `max` photos are already stored.
    /// Returns whether the photo was accepted.
    pub fn add_photo(&mut self, photo: PhotoRef, max: usize) -> bool {
        if self.photos.len() >= max {
            return false;
        }
        self.photos.push(photo);
        true
    }

    pub fn set_location_geo(&mut self, latitude: f64, longitude: f64) {
        self.location = Location::geo(latitude, longitude);
    }

    /// Replace the location with a typed address. Blank input is rejected
    /// and leaves the draft untouched.
    pub fn set_location_address(&mut self, text: &str) -> bool {
        let address = text.trim();
        if address.is_empty() {
            return false;
        }
        self.location = Location::address(address);
        true
    }

    /// Store a trimmed comment; any of `no_words` (case-insensitive) stores
    /// the empty "no comment" value instead.
    pub fn set_comment(&mut self, text: &str, no_words: &[String]) {
        let comment = text.trim();
        let lowered = comment.to_lowercase();
        let declined = no_words.iter().any(|w| w.to_lowercase() == lowered);
        self.comment = Some(if declined {
            String::new()
        } else {
            comment.to_string()
        });
    }

    pub fn clear_category(&mut self) {
        self.category = None;
    }

    pub fn clear_sex(&mut self) {
        self.sex = None;
    }

    pub fn clear_photos(&mut self) {
        self.photos.clear();
    }

    pub fn clear_location(&mut self) {
        self.location = Location::default();
    }

    pub fn clear_comment(&mut self) {
        self.comment = None;
    }

    /// Whether the draft carries everything a publication needs.
    pub fn is_complete(&self) -> bool {
        self.category.is_some()
            && self.sex.is_some()
            && !self.photos.is_empty()
            && self.location.is_valid()
    }

    /// Contact line content: `@handle` or the raw identifier.
    pub fn contact(&self) -> String {
        match self.display_name.as_deref() {
            Some(handle) if !handle.is_empty() => format!("@{handle}"),
            _ => self.subject_id.clone(),
        }
    }

    /// Render the human-readable announcement text.
    pub fn render_preview(&self) -> String {
        let category = self.category.as_ref().map(Category::label).unwrap_or("Unknown");
        let sex = self.sex.as_ref().map(Sex::label).unwrap_or("Unknown");

        let mut parts = vec![
            "🆘 FOUND PET 🆘\n".to_string(),
            format!("Species: {category}"),
            format!("Sex: {sex}"),
        ];

        if let Some(ref address) = self.location.address {
            parts.push(format!("📍 Location: {address}"));
        } else if let Some((lat, lon)) = self.location.coordinates() {
            parts.push(format!("📍 Coordinates: {lat}, {lon}"));
        }

        if let Some(comment) = self.comment.as_deref().filter(|c| !c.is_empty()) {
            parts.push(format!("\n💬 Additional information:\n{comment}"));
        }

        match self.display_name.as_deref() {
            Some(handle) if !handle.is_empty() => {
                parts.push(format!("\n📱 Contact: @{handle}"));
            }
            _ => parts.push(format!("\n📱 Contact ID: {}", self.subject_id)),
        }

        parts.join("\n")
    }
}
