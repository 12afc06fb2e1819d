//! Submission payload types
//!
//! The wire shape the render endpoint expects: trimmed report fields, the
//! localized date, and the photos in insertion order. The issuer travels
//! under the legacy wire name `system`.

use crate::fields::ReportFields;
use crate::photo::PhotoEntry;
use serde::{Deserialize, Serialize};

/// Caption placed on the wire when the user left one empty.
pub const EMPTY_CAPTION_PLACEHOLDER: &str = "No observations";

/// JSON body of the generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub title: String,
    pub location: String,
    pub system_reference: String,
    /// Localized display form, `DD/MM/YYYY`.
    pub date: String,
    #[serde(rename = "system")]
    pub issued_by: String,
    pub photos: Vec<PhotoPayload>,
}

/// One photo on the wire: the data-URL image and its caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPayload {
    pub image: String,
    pub caption: String,
}

impl ReportPayload {
    /// Build the payload from session state. Fields are trimmed, the date
    /// localized, and empty captions replaced with the fixed placeholder.
    pub fn assemble(fields: &ReportFields, photos: &[PhotoEntry]) -> Self {
        Self {
            title: fields.title.trim().to_string(),
            location: fields.location.trim().to_string(),
            system_reference: fields.system_reference.trim().to_string(),
            date: fields.display_date(),
            issued_by: fields.issued_by.trim().to_string(),
            photos: photos
                .iter()
                .map(|photo| PhotoPayload {
                    image: photo.image().to_string(),
                    caption: if photo.caption().is_empty() {
                        EMPTY_CAPTION_PLACEHOLDER.to_string()
                    } else {
                        photo.caption().to_string()
                    },
                })
                .collect(),
        }
    }
}
