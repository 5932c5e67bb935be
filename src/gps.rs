use exif::{Context, Exif, In, Rational, Tag, Value};

/// A resolved GPS position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Whether the tag tree carries a GPS sub-directory at all.
///
/// Images without one are the normal case and not worth a log line. The
/// check is structural (tag context), never a comparison on error text.
pub fn has_gps_directory(exif: &Exif) -> bool {
    exif.fields()
        .any(|field| matches!(field.tag.context(), Context::Gps))
}

/// Resolve the GPS sub-directory into decimal-degree coordinates.
///
/// Returns `None` when the directory is present but not convertible: a
/// missing or non-rational coordinate, fewer than three components, a zero
/// denominator, or an unrecognized hemisphere reference.
pub fn resolve_position(exif: &Exif) -> Option<GpsPosition> {
    let latitude = coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
    let longitude = coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;
    Some(GpsPosition {
        latitude,
        longitude,
    })
}

fn coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let components = match &field.value {
        Value::Rational(components) => components,
        _ => return None,
    };
    let reference = reference_letter(exif, ref_tag)?;
    dms_to_decimal(components, &reference)
}

fn reference_letter(exif: &Exif, ref_tag: Tag) -> Option<String> {
    let field = exif.get_field(ref_tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(lines) => lines
            .first()
            .map(|line| String::from_utf8_lossy(line).trim().to_string()),
        _ => None,
    }
}

/// Convert a degrees/minutes/seconds triple to decimal degrees, negated for
/// the southern and western hemispheres.
fn dms_to_decimal(components: &[Rational], reference: &str) -> Option<f64> {
    if components.len() < 3 || components.iter().take(3).any(|r| r.denom == 0) {
        return None;
    }

    let degrees = components[0].to_f64()
        + components[1].to_f64() / 60.0
        + components[2].to_f64() / 3600.0;

    match reference {
        "N" | "E" => Some(degrees),
        "S" | "W" => Some(-degrees),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rational(num: u32, denom: u32) -> Rational {
        Rational { num, denom }
    }

    #[test]
    fn northern_and_eastern_references_stay_positive() {
        let dms = [rational(35, 1), rational(39, 1), rational(291572, 10000)];
        let decimal = dms_to_decimal(&dms, "N").unwrap();
        assert!((decimal - 35.658_099_222).abs() < 1e-6);
    }

    #[test]
    fn southern_and_western_references_negate() {
        let dms = [rational(122, 1), rational(25, 1), rational(6, 1)];
        let west = dms_to_decimal(&dms, "W").unwrap();
        let south = dms_to_decimal(&dms, "S").unwrap();
        assert!(west < 0.0);
        assert_eq!(west, south);
        assert!((west + 122.418_333_333).abs() < 1e-6);
    }

    #[test]
    fn short_component_list_is_not_convertible() {
        let dms = [rational(35, 1), rational(39, 1)];
        assert!(dms_to_decimal(&dms, "N").is_none());
    }

    #[test]
    fn zero_denominator_is_not_convertible() {
        let dms = [rational(35, 1), rational(39, 0), rational(29, 1)];
        assert!(dms_to_decimal(&dms, "N").is_none());
    }

    #[test]
    fn unrecognized_reference_is_not_convertible() {
        let dms = [rational(35, 1), rational(39, 1), rational(29, 1)];
        assert!(dms_to_decimal(&dms, "Q").is_none());
    }
}
