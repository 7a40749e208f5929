//! Domain entities for the Artworks domain
//!
//! An artwork is the only persisted record of the gallery: descriptive text,
//! a reference to an externally stored image and a gallery-global position.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use lindenau_common::{Error, Result};

/// Whether an artwork can still be bought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Availability {
    Available,
    Sold,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Sold => "Sold",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Availability::Available),
            "sold" => Ok(Availability::Sold),
            other => Err(Error::Validation(format!(
                "Invalid availability: {other}. Expected Available or Sold"
            ))),
        }
    }
}

impl TryFrom<String> for Availability {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Admin list tab; a read-side projection that never touches positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Sold,
}

impl AvailabilityFilter {
    pub fn matches(&self, artwork: &Artwork) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Available => artwork.availability == Availability::Available,
            AvailabilityFilter::Sold => artwork.availability == Availability::Sold,
        }
    }

    pub fn apply<'a>(&self, artworks: &'a [Artwork]) -> Vec<&'a Artwork> {
        artworks.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Gallery artwork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub measurements: String,
    pub techniques: String,
    pub availability: Availability,
    pub image_url: String,
    /// Canonical slug derived from the title at write time
    pub slug: String,
    /// Zero-based display rank, contiguous across the gallery at rest
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable text fields as submitted by the admin forms.
///
/// Everything is kept as raw text so a form can hold partial input;
/// [`ArtworkDraft::validate`] turns it into [`ArtworkFields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkDraft {
    pub title: String,
    pub description: String,
    pub measurements: String,
    pub techniques: String,
    pub availability: String,
}

impl ArtworkDraft {
    /// Whether every field carries non-blank text
    pub fn is_complete(&self) -> bool {
        [
            &self.title,
            &self.description,
            &self.measurements,
            &self.techniques,
            &self.availability,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    /// Check completeness and parse availability.
    ///
    /// `missing_message` is the validation message used when a field is blank;
    /// create and update report missing input differently.
    pub fn validate(&self, missing_message: &str) -> Result<ArtworkFields> {
        if !self.is_complete() {
            return Err(Error::Validation(missing_message.to_string()));
        }

        Ok(ArtworkFields {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            measurements: self.measurements.trim().to_string(),
            techniques: self.techniques.trim().to_string(),
            availability: self.availability.parse()?,
        })
    }
}

impl From<&Artwork> for ArtworkDraft {
    fn from(artwork: &Artwork) -> Self {
        Self {
            title: artwork.title.clone(),
            description: artwork.description.clone(),
            measurements: artwork.measurements.clone(),
            techniques: artwork.techniques.clone(),
            availability: artwork.availability.to_string(),
        }
    }
}

/// Validated editable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkFields {
    pub title: String,
    pub description: String,
    pub measurements: String,
    pub techniques: String,
    pub availability: Availability,
}

/// Uploaded image file. An empty body means "no new image".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Text after the last '.', or the whole file name when there is none
    pub fn extension(&self) -> &str {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or(&self.filename)
    }
}

/// One entry of a bulk reposition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub id: Uuid,
    pub position: i32,
}

/// Next `updated_at` for a record last stamped at `previous`.
///
/// Always strictly later than `previous`, even when the clock has not
/// advanced past it (microsecond resolution, matching Postgres).
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
