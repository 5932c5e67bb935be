use exif::{Field, Rational, Value};

/// Decoded representation of a single tag value.
///
/// The underlying tag store is loosely typed; the shapes the field mapper
/// cares about are narrowed into variants and everything else collapses to
/// `Other`, so a representation mismatch reads as absence rather than error.
#[derive(Debug, Clone)]
pub enum TagValue {
    Text(String),
    Rationals(Vec<Rational>),
    Integers(Vec<u32>),
    Other,
}

/// Decode a field's raw value. Returns `None` when the value bytes could not
/// be decoded at all, which callers treat as a skippable tag.
pub fn decode_field(field: &Field) -> Option<TagValue> {
    match &field.value {
        Value::Ascii(lines) => {
            let first = lines.first()?;
            Some(TagValue::Text(String::from_utf8_lossy(first).into_owned()))
        }
        Value::Rational(rationals) => Some(TagValue::Rationals(rationals.clone())),
        Value::Short(values) => Some(TagValue::Integers(
            values.iter().map(|&v| u32::from(v)).collect(),
        )),
        Value::Long(values) => Some(TagValue::Integers(values.clone())),
        // The parser keeps values it cannot interpret as an opaque reference.
        Value::Unknown(..) => None,
        _ => Some(TagValue::Other),
    }
}
