//! Shared numeric constants for the canvas crate.

// ── Floors ──────────────────────────────────────────────────────

/// Name of the floor every new session starts with.
pub const DEFAULT_FLOOR_NAME: &str = "Main Floor";

/// Width of a freshly created floor when the caller has no preference.
pub const DEFAULT_FLOOR_WIDTH: f64 = 800.0;

/// Height of a freshly created floor when the caller has no preference.
pub const DEFAULT_FLOOR_HEIGHT: f64 = 600.0;

/// Accepted floor width range, inclusive.
pub const MIN_FLOOR_WIDTH: f64 = 400.0;
pub const MAX_FLOOR_WIDTH: f64 = 2000.0;

/// Accepted floor height range, inclusive.
pub const MIN_FLOOR_HEIGHT: f64 = 300.0;
pub const MAX_FLOOR_HEIGHT: f64 = 1500.0;

// ── Objects ─────────────────────────────────────────────────────

/// Side length used when a size is unknown or could not be parsed.
pub const FALLBACK_OBJECT_SIZE: f64 = 50.0;

/// Degrees added by a single rotate step.
pub const ROTATION_STEP_DEG: f64 = 90.0;

/// One full turn in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

// ── Export ──────────────────────────────────────────────────────

/// Version tag written into every export document.
pub const EXPORT_VERSION: &str = "1.0";

/// Suffix appended to the sanitized floor name to form the export file name.
pub const EXPORT_FILE_SUFFIX: &str = "_floor_plan.json";
