//! Strict reader for ALOV `.ann` files.
//!
//! Every non-blank line holds a frame index followed by the four corners of a
//! quadrilateral, separated by whitespace:
//!
//! ```text
//! 1 137.44 63.98 215.65 63.98 215.65 217.39 137.44 217.39
//! ```

use log::debug;
use std::fs;
use std::path::Path;

use crate::error::ConvertError;
use crate::types::{AnnotationRecord, RawAnnotation, ANN_FIELDS, MAX_FRAME};

/// Grouping key of an annotation file: everything before the first underscore.
pub fn directory_key(filename: &str) -> &str {
    filename.split('_').next().unwrap_or(filename)
}

/// Parse one line. Blank lines yield `Ok(None)`.
pub fn parse_line(
    line: &str,
    path: &Path,
    line_number: usize,
) -> Result<Option<RawAnnotation>, ConvertError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }
    if fields.len() != ANN_FIELDS {
        return Err(ConvertError::parse(
            path,
            Some(line_number),
            format!("expected {} fields, found {}", ANN_FIELDS, fields.len()),
        ));
    }

    let frame: u32 = fields[0].parse().map_err(|_| {
        ConvertError::parse(
            path,
            Some(line_number),
            format!("frame index '{}' is not a non-negative integer", fields[0]),
        )
    })?;
    if frame > MAX_FRAME {
        return Err(ConvertError::parse(
            path,
            Some(line_number),
            format!("frame index {} does not fit in 8 digits", frame),
        ));
    }

    let mut coords = [0.0f64; ANN_FIELDS - 1];
    for (slot, field) in coords.iter_mut().zip(&fields[1..]) {
        *slot = match field.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                return Err(ConvertError::parse(
                    path,
                    Some(line_number),
                    format!("coordinate '{}' is not a finite number", field),
                ))
            }
        };
    }

    Ok(Some(RawAnnotation {
        frame,
        corners: [
            (coords[0], coords[1]),
            (coords[2], coords[3]),
            (coords[4], coords[5]),
            (coords[6], coords[7]),
        ],
    }))
}

/// Read an annotation file and tag each of its rows with the file name and grouping key.
///
/// A file without a single annotation line is rejected.
pub fn parse_ann_file(path: &Path) -> Result<Vec<AnnotationRecord>, ConvertError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ConvertError::parse(path, None, "file name is not valid UTF-8"))?;
    let directory = directory_key(filename);

    let bytes = fs::read(path)
        .map_err(|e| ConvertError::parse(path, None, format!("unreadable file: {}", e)))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| ConvertError::parse(path, None, format!("invalid UTF-8: {}", e)))?;

    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if let Some(raw) = parse_line(line, path, idx + 1)? {
            records.push(AnnotationRecord::from_raw(raw, filename, directory));
        }
    }

    if records.is_empty() {
        return Err(ConvertError::parse(path, None, "no annotation lines"));
    }

    debug!("Parsed {} records from {}", records.len(), path.display());
    Ok(records)
}
