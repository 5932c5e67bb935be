use std::io::{BufRead, Cursor, Seek};

use chrono::NaiveDateTime;
use exif::{Reader, Tag};

use crate::config::{self, ExtractorConfig};
use crate::error::ExtractError;
use crate::gps;
use crate::metadata::ImageMetadata;
use crate::value::{decode_field, TagValue};
use crate::walk::{walk_fields, VisitOutcome};

/// EXIF datetimes carry no timezone and use this fixed layout.
const EXIF_DATETIME_LAYOUT: &str = "%Y:%m:%d %H:%M:%S";

/// Extracts the curated EXIF field subset from image byte streams.
///
/// Construction installs the injected logging configuration; each
/// [`extract`](MetadataExtractor::extract) call reads one stream to
/// completion and returns a fresh record. Missing or damaged EXIF degrades
/// to an empty record; the error channel is reserved for stream I/O faults
/// and structural traversal failures.
pub struct MetadataExtractor {
    pub config: ExtractorConfig,
}

impl MetadataExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        config::init_logging(&config);
        Self { config }
    }

    /// Extract metadata from a readable image byte stream.
    pub fn extract<R: BufRead + Seek>(
        &self,
        reader: &mut R,
    ) -> Result<ImageMetadata, ExtractError> {
        let exif = match Reader::new().read_from_container(reader) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => {
                // Screenshots and stripped images land here.
                log::debug!("no EXIF segment in image, returning empty metadata");
                return Ok(ImageMetadata::default());
            }
            Err(exif::Error::Io(e)) => return Err(ExtractError::Io(e)),
            Err(e) => {
                // A present-but-garbage EXIF block degrades to "no metadata".
                log::warn!("could not collect EXIF data: {}", e);
                return Ok(ImageMetadata::default());
            }
        };

        let mut record = ImageMetadata::default();

        walk_fields(exif.fields(), |field| {
            log::trace!("found tag {} in {:?}", field.tag, field.ifd_num);

            match decode_field(field) {
                Some(value) => apply_tag(&mut record, field.tag, value),
                None => log::warn!("could not decode tag {}, skipping", field.tag),
            }

            VisitOutcome::Continue
        })?;

        if gps::has_gps_directory(&exif) {
            match gps::resolve_position(&exif) {
                Some(position) => {
                    log::debug!(
                        "resolved GPS position: {}, {}",
                        position.latitude,
                        position.longitude
                    );
                    record.gps_latitude = position.latitude;
                    record.gps_longitude = position.longitude;
                }
                None => log::warn!("could not convert GPS sub-directory to coordinates"),
            }
        }

        Ok(record)
    }

    /// Extract metadata from an in-memory image buffer.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<ImageMetadata, ExtractError> {
        self.extract(&mut Cursor::new(data))
    }
}

/// Fold one decoded tag into the record. Dispatch is joint on the tag and
/// the value's representation; a mismatch leaves the field untouched.
fn apply_tag(record: &mut ImageMetadata, tag: Tag, value: TagValue) {
    match (tag, value) {
        (Tag::Make, TagValue::Text(text)) => record.manufacturer = text,
        (Tag::Model, TagValue::Text(text)) => record.model = text,
        (Tag::DateTimeOriginal, TagValue::Text(text)) => {
            record.date_time_original = parse_exif_datetime(&text);
        }
        (Tag::ExposureTime, TagValue::Rationals(rationals)) => {
            if let Some(r) = rationals.first() {
                record.exposure_time = format!("{}/{}", r.num, r.denom);
            }
        }
        (Tag::FNumber, TagValue::Rationals(rationals)) => {
            // A zero denominator would render as infinity; treat as absent.
            if let Some(r) = rationals.first().filter(|r| r.denom != 0) {
                record.f_number = r.to_f64();
            }
        }
        (Tag::PhotographicSensitivity, TagValue::Integers(values)) => {
            if let Some(&iso) = values.first() {
                record.iso_speed_ratings = iso;
            }
        }
        (Tag::FocalLength, TagValue::Rationals(rationals)) => {
            if let Some(r) = rationals.first() {
                record.focal_length = format!("{}/{}", r.num, r.denom);
            }
        }
        _ => {}
    }
}

fn parse_exif_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), EXIF_DATETIME_LAYOUT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use exif::Rational;

    #[test]
    fn parses_the_fixed_datetime_layout() {
        let dt = parse_exif_datetime("2004:08:27 13:52:55").unwrap();
        assert_eq!(dt.year(), 2004);
        assert_eq!(dt.month(), 8);
        assert_eq!(dt.day(), 27);
        assert_eq!(dt.hour(), 13);
        assert_eq!(dt.minute(), 52);
        assert_eq!(dt.second(), 55);

        assert!(parse_exif_datetime("2004-08-27 13:52:55").is_none());
        assert!(parse_exif_datetime("not a datetime").is_none());
    }

    #[test]
    fn mismatched_representation_reads_as_absence() {
        let mut record = ImageMetadata::default();
        apply_tag(
            &mut record,
            Tag::Make,
            TagValue::Rationals(vec![Rational { num: 1, denom: 2 }]),
        );
        assert_eq!(record.manufacturer, "");

        apply_tag(
            &mut record,
            Tag::ExposureTime,
            TagValue::Text("1/400".to_string()),
        );
        assert_eq!(record.exposure_time, "");
    }

    #[test]
    fn rational_tags_use_only_the_first_element() {
        let mut record = ImageMetadata::default();
        apply_tag(
            &mut record,
            Tag::ExposureTime,
            TagValue::Rationals(vec![
                Rational { num: 1, denom: 400 },
                Rational { num: 1, denom: 60 },
            ]),
        );
        assert_eq!(record.exposure_time, "1/400");
    }

    #[test]
    fn f_number_is_the_rational_quotient() {
        let mut record = ImageMetadata::default();
        apply_tag(
            &mut record,
            Tag::FNumber,
            TagValue::Rationals(vec![Rational { num: 28, denom: 10 }]),
        );
        assert!((record.f_number - 2.8).abs() < 1e-9);
    }

    #[test]
    fn zero_denominator_f_number_stays_absent() {
        let mut record = ImageMetadata::default();
        apply_tag(
            &mut record,
            Tag::FNumber,
            TagValue::Rationals(vec![Rational { num: 28, denom: 0 }]),
        );
        assert_eq!(record.f_number, 0.0);
    }

    #[test]
    fn iso_uses_the_first_list_element() {
        let mut record = ImageMetadata::default();
        apply_tag(
            &mut record,
            Tag::PhotographicSensitivity,
            TagValue::Integers(vec![200, 400]),
        );
        assert_eq!(record.iso_speed_ratings, 200);
    }

    #[test]
    fn empty_rational_list_leaves_field_at_zero() {
        let mut record = ImageMetadata::default();
        apply_tag(&mut record, Tag::FocalLength, TagValue::Rationals(vec![]));
        assert_eq!(record.focal_length, "");
    }

    #[test]
    fn unrecognized_tags_are_ignored() {
        let mut record = ImageMetadata::default();
        apply_tag(
            &mut record,
            Tag::Software,
            TagValue::Text("digiKam".to_string()),
        );
        assert_eq!(record, ImageMetadata::default());
    }
}
