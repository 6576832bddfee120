//! Error types for every fallible canvas operation.
//!
//! Each error maps to a stable `E_*` code via [`ErrorCode`] so a host can
//! surface it without matching on message text.

use crate::doc::{FloorId, ObjectId};

/// Stable machine-readable code for an error.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// Floor validation and lookup failures.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FloorError {
    #[error("floor name must not be empty")]
    EmptyName,
    #[error("floor width {width} outside accepted range {min}..={max}")]
    WidthOutOfRange { width: f64, min: f64, max: f64 },
    #[error("floor height {height} outside accepted range {min}..={max}")]
    HeightOutOfRange { height: f64, min: f64, max: f64 },
    #[error("floor not found: {0}")]
    NotFound(FloorId),
}

impl ErrorCode for FloorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "E_FLOOR_NAME_EMPTY",
            Self::WidthOutOfRange { .. } => "E_FLOOR_WIDTH_RANGE",
            Self::HeightOutOfRange { .. } => "E_FLOOR_HEIGHT_RANGE",
            Self::NotFound(_) => "E_FLOOR_NOT_FOUND",
        }
    }
}

/// Property-editor failures. A failed edit leaves the object untouched.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("object name must not be empty")]
    EmptyName,
    #[error("floor not found: {0}")]
    FloorNotFound(FloorId),
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),
}

impl ErrorCode for EditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "E_OBJECT_NAME_EMPTY",
            Self::FloorNotFound(_) => "E_FLOOR_NOT_FOUND",
            Self::ObjectNotFound(_) => "E_OBJECT_NOT_FOUND",
        }
    }
}

/// Export and import failures.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to format export timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("unsupported export version: {0}")]
    UnsupportedVersion(String),
    #[error("invalid export date: {0}")]
    InvalidDate(String),
    #[error("invalid floor: {0}")]
    InvalidFloor(#[from] FloorError),
    #[error("object {id} has invalid size {width}x{height}")]
    InvalidObjectSize { id: ObjectId, width: f64, height: f64 },
    #[error("object {id} has invalid position ({x}, {y})")]
    InvalidObjectPosition { id: ObjectId, x: f64, y: f64 },
    #[error("object {id} has invalid rotation {rotation}")]
    InvalidObjectRotation { id: ObjectId, rotation: f64 },
    #[error("duplicate object id: {0}")]
    DuplicateObjectId(ObjectId),
    #[error("floor not found: {0}")]
    FloorNotFound(FloorId),
}

impl ErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Json(_) => "E_EXPORT_JSON",
            Self::Timestamp(_) => "E_EXPORT_TIMESTAMP",
            Self::UnsupportedVersion(_) => "E_IMPORT_VERSION",
            Self::InvalidDate(_) => "E_IMPORT_DATE",
            Self::InvalidFloor(_) => "E_IMPORT_FLOOR",
            Self::InvalidObjectSize { .. } => "E_IMPORT_OBJECT_SIZE",
            Self::InvalidObjectPosition { .. } => "E_IMPORT_OBJECT_POSITION",
            Self::InvalidObjectRotation { .. } => "E_IMPORT_OBJECT_ROTATION",
            Self::DuplicateObjectId(_) => "E_IMPORT_DUPLICATE_ID",
            Self::FloorNotFound(_) => "E_FLOOR_NOT_FOUND",
        }
    }
}

/// Background image loading failures.
#[derive(Debug, thiserror::Error)]
pub enum BackgroundError {
    #[error("failed to read background image: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("background image is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

impl ErrorCode for BackgroundError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_BACKGROUND_IO",
            Self::UnsupportedType(_) => "E_BACKGROUND_TYPE",
            Self::TooLarge { .. } => "E_BACKGROUND_TOO_LARGE",
        }
    }
}
