// src/metadata.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Flat metadata record for a single image.
///
/// The identity fields (`image_id`, `file_name`, `file_size`,
/// `upload_timestamp`) belong to the caller and are never written by
/// extraction. EXIF-derived fields hold their zero value when the source tag
/// is absent, malformed, or undecodable, so a serialized record always
/// carries every key.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    #[serde(rename = "imageID")]
    pub image_id: String,
    pub file_name: String,
    pub file_size: u64,
    pub upload_timestamp: Option<DateTime<Utc>>,
    pub manufacturer: String,
    pub model: String,
    pub date_time_original: Option<NaiveDateTime>,
    pub exposure_time: String,
    pub f_number: f64,
    pub iso_speed_ratings: u32,
    pub focal_length: String,
    pub gps_latitude: f64,
    pub gps_longitude: f64,
}

impl ImageMetadata {
    /// Render the record as a flat JSON object.
    pub fn to_json(&self) -> Result<String, ExtractError> {
        Ok(serde_json::to_string(self)?)
    }
}
