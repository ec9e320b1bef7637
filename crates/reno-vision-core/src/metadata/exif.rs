//! EXIF capture-metadata extraction.
//!
//! Reads the GPS block, original-capture timestamp, and camera model.
//! Every failure mode degrades to an empty summary; metadata problems
//! never abort an analysis.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Tag, Value};
use tracing::debug;

use crate::domain::{ExifSummary, GpsCoordinates};

/// Reads capture metadata from the image at `path`.
///
/// Returns the default (empty) summary when the file has no EXIF
/// container or the container is corrupt.
#[must_use]
pub fn read_exif(path: &Path) -> ExifSummary {
    match try_read(path) {
        Ok(summary) => summary,
        Err(e) => {
            debug!("No EXIF metadata for {}: {e:#}", path.display());
            ExifSummary::default()
        }
    }
}

fn try_read(path: &Path) -> anyhow::Result<ExifSummary> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader)?;

    let gps = read_gps(&exif);

    let date_taken = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .map(|field| field.display_value().to_string());

    let camera_model = exif
        .get_field(Tag::Model, In::PRIMARY)
        .and_then(ascii_value);

    Ok(ExifSummary {
        gps,
        date_taken,
        camera_model,
    })
}

/// Reads the GPS position, requiring both latitude and longitude.
fn read_gps(exif: &exif::Exif) -> Option<GpsCoordinates> {
    let lat = coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
    let lng = coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;
    Some(GpsCoordinates { lat, lng })
}

/// Reads one coordinate axis: a degrees/minutes/seconds rational triplet
/// plus its hemisphere reference.
fn coordinate(exif: &exif::Exif, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let Value::Rational(ref rationals) = field.value else {
        return None;
    };
    if rationals.len() < 3 {
        return None;
    }

    let reference = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(ascii_value)
        .unwrap_or_default();

    Some(to_decimal_degrees(
        rationals[0].to_f64(),
        rationals[1].to_f64(),
        rationals[2].to_f64(),
        &reference,
    ))
}

/// Converts degrees/minutes/seconds to signed decimal degrees.
///
/// Southern and western hemispheres negate the value.
#[must_use]
pub fn to_decimal_degrees(degrees: f64, minutes: f64, seconds: f64, reference: &str) -> f64 {
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    if matches!(reference, "S" | "W") {
        -decimal
    } else {
        decimal
    }
}

/// First ASCII component of a field, trimmed of NULs and whitespace.
fn ascii_value(field: &exif::Field) -> Option<String> {
    if let Value::Ascii(ref components) = field.value {
        components.first().map(|bytes| {
            String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .trim()
                .to_string()
        })
    } else {
        None
    }
}
