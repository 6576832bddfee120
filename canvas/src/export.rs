//! Export and import of floor plans as portable JSON documents.
//!
//! DESIGN
//! ======
//! An export document wraps a floor, unchanged, with an RFC 3339 timestamp and
//! a format version. Import is the reverse, plus a validation pass: the
//! document must carry a known version, a parseable date, a floor that passes
//! the same name and size rules as a created floor, positive object sizes,
//! non-negative positions, quarter-turn rotations, and unique object ids.
//! Bounds are not checked here; the engine re-clamps imported objects when its
//! edit policy clamps.
//!
//! File names come from floor names, so anything a filesystem would read as a
//! path separator or reject outright is replaced with `_`.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::consts::{EXPORT_FILE_SUFFIX, EXPORT_VERSION, FULL_TURN_DEG, ROTATION_STEP_DEG};
use crate::doc::{Floor, validate_floor};
use crate::error::ExportError;

/// The portable document written on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub floor: Floor,
    /// RFC 3339 timestamp of the export.
    pub export_date: String,
    pub version: String,
}

/// A serialized export, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Wrap `floor` in an export document stamped with the current time.
///
/// # Errors
///
/// Returns `Timestamp` if the clock value can't be formatted.
pub fn export(floor: &Floor) -> Result<ExportDocument, ExportError> {
    export_at(floor, OffsetDateTime::now_utc())
}

/// Wrap `floor` in an export document stamped with `at`.
///
/// # Errors
///
/// Returns `Timestamp` if `at` can't be formatted as RFC 3339.
pub fn export_at(floor: &Floor, at: OffsetDateTime) -> Result<ExportDocument, ExportError> {
    Ok(ExportDocument { floor: floor.clone(), export_date: at.format(&Rfc3339)?, version: EXPORT_VERSION.to_string() })
}

impl ExportDocument {
    /// Pretty-printed JSON with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize and name the document.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_file(&self) -> Result<ExportFile, ExportError> {
        Ok(ExportFile { file_name: file_name(&self.floor.name), contents: self.to_json()? })
    }
}

/// File name for a floor: whitespace runs become `_`, as do path separators
/// and characters filesystems reject, then `_floor_plan.json` is appended.
/// The result is always a single path component.
#[must_use]
pub fn file_name(floor_name: &str) -> String {
    let mut out = String::with_capacity(floor_name.len() + EXPORT_FILE_SUFFIX.len());
    let mut in_space = false;
    for ch in floor_name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(if is_reserved(ch) { '_' } else { ch });
            in_space = false;
        }
    }
    out.push_str(EXPORT_FILE_SUFFIX);
    out
}

fn is_reserved(ch: char) -> bool {
    ch.is_control() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// Parse and validate an export document.
///
/// # Errors
///
/// Returns `Json` for malformed input or a validation error describing the
/// first problem found.
pub fn import(json: &str) -> Result<ExportDocument, ExportError> {
    let doc: ExportDocument = serde_json::from_str(json)?;
    validate(&doc)?;
    Ok(doc)
}

fn validate(doc: &ExportDocument) -> Result<(), ExportError> {
    if doc.version != EXPORT_VERSION {
        return Err(ExportError::UnsupportedVersion(doc.version.clone()));
    }
    if OffsetDateTime::parse(&doc.export_date, &Rfc3339).is_err() {
        return Err(ExportError::InvalidDate(doc.export_date.clone()));
    }
    let floor = &doc.floor;
    validate_floor(&floor.name, floor.width, floor.height)?;
    let mut seen = HashSet::new();
    for obj in &floor.objects {
        if !seen.insert(obj.id.as_str()) {
            return Err(ExportError::DuplicateObjectId(obj.id.clone()));
        }
        if !is_positive(obj.width) || !is_positive(obj.height) {
            return Err(ExportError::InvalidObjectSize { id: obj.id.clone(), width: obj.width, height: obj.height });
        }
        if !obj.x.is_finite() || !obj.y.is_finite() || obj.x < 0.0 || obj.y < 0.0 {
            return Err(ExportError::InvalidObjectPosition { id: obj.id.clone(), x: obj.x, y: obj.y });
        }
        if !is_quarter_turn(obj.rotation) {
            return Err(ExportError::InvalidObjectRotation { id: obj.id.clone(), rotation: obj.rotation });
        }
    }
    Ok(())
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn is_quarter_turn(deg: f64) -> bool {
    (0.0..FULL_TURN_DEG).contains(&deg) && deg % ROTATION_STEP_DEG == 0.0
}
