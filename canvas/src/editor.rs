//! Property editor: field-level edits, rotation, and removal of a placed object.
//!
//! DESIGN
//! ======
//! Field values arrive as raw text from a form. Names are validated (blank
//! names refuse the whole edit); numbers are coerced rather than rejected.
//! A number is read from the longest numeric prefix of the field, so `"12px"`
//! reads as 12 the way a browser form would. Positions with no numeric prefix
//! become 0, sizes with none (or that aren't positive) become the fallback size.
//!
//! Whether the resulting rectangle is pulled back inside the floor is an
//! [`EditClampPolicy`] decision made by the host.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use tracing::{debug, warn};

use crate::consts::{FALLBACK_OBJECT_SIZE, FULL_TURN_DEG, ROTATION_STEP_DEG};
use crate::doc::{FloorStore, PartialObject};
use crate::engine::{Action, Notice};
use crate::error::EditError;
use crate::geometry::{self, Point, Size};

/// How the editor treats positions that leave the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditClampPolicy {
    /// Clamp every edit so the object stays on the floor.
    #[default]
    Clamp,
    /// Store values exactly as entered.
    Override,
}

/// Raw form input for an object. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEdits {
    pub name: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Applies validated edits to objects in a [`FloorStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyEditor {
    policy: EditClampPolicy,
}

impl PropertyEditor {
    #[must_use]
    pub fn new(policy: EditClampPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> EditClampPolicy {
        self.policy
    }

    /// Validate and apply `edits` to an object.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` for a blank name (nothing is applied), or a
    /// not-found error if the floor or object doesn't exist.
    pub fn apply_edits(
        &self,
        store: &mut FloorStore,
        floor_id: &str,
        object_id: &str,
        edits: &FieldEdits,
    ) -> Result<Vec<Action>, EditError> {
        let floor = store.floor(floor_id).ok_or_else(|| EditError::FloorNotFound(floor_id.to_string()))?;
        let obj = floor
            .object(object_id)
            .ok_or_else(|| EditError::ObjectNotFound(object_id.to_string()))?;

        let name = match edits.name.as_deref().map(str::trim) {
            Some("") => {
                warn!(floor_id = %floor_id, object_id = %object_id, "blank object name rejected");
                return Err(EditError::EmptyName);
            }
            other => other.map(str::to_string),
        };

        let mut fields = PartialObject {
            x: edits.x.as_deref().map(parse_coordinate),
            y: edits.y.as_deref().map(parse_coordinate),
            width: edits.width.as_deref().map(parse_dimension),
            height: edits.height.as_deref().map(parse_dimension),
            rotation: None,
            name,
        };

        if self.policy == EditClampPolicy::Clamp {
            let proposed = Point::new(fields.x.unwrap_or(obj.x), fields.y.unwrap_or(obj.y));
            let size = Size::new(fields.width.unwrap_or(obj.width), fields.height.unwrap_or(obj.height));
            let at = geometry::clamp_point(proposed, size, floor.size());
            if at != obj.origin() || fields.x.is_some() || fields.y.is_some() {
                fields.x = Some(at.x);
                fields.y = Some(at.y);
            }
        }

        store.update_object(floor_id, object_id, &fields);
        debug!(floor_id = %floor_id, object_id = %object_id, ?fields, "object properties edited");
        Ok(vec![
            Action::ObjectUpdated { floor_id: floor_id.to_string(), id: object_id.to_string(), fields },
            Action::Notify(Notice::success("Object properties updated")),
        ])
    }

    /// Rotate an object a quarter turn clockwise, wrapping at 360.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the floor or object doesn't exist.
    pub fn rotate(&self, store: &mut FloorStore, floor_id: &str, object_id: &str) -> Result<Vec<Action>, EditError> {
        let obj = lookup(store, floor_id, object_id)?;
        let rotation = (obj.rotation + ROTATION_STEP_DEG).rem_euclid(FULL_TURN_DEG);
        let fields = PartialObject { rotation: Some(rotation), ..Default::default() };
        store.update_object(floor_id, object_id, &fields);
        debug!(floor_id = %floor_id, object_id = %object_id, rotation, "object rotated");
        Ok(vec![
            Action::ObjectUpdated { floor_id: floor_id.to_string(), id: object_id.to_string(), fields },
            Action::Notify(Notice::success("Object rotated")),
        ])
    }

    /// Remove an object from its floor.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the floor or object doesn't exist.
    pub fn remove(&self, store: &mut FloorStore, floor_id: &str, object_id: &str) -> Result<Vec<Action>, EditError> {
        lookup(store, floor_id, object_id)?;
        store.remove_object(floor_id, object_id);
        Ok(vec![
            Action::ObjectDeleted { floor_id: floor_id.to_string(), id: object_id.to_string() },
            Action::Notify(Notice::success("Object removed")),
        ])
    }
}

fn lookup(store: &FloorStore, floor_id: &str, object_id: &str) -> Result<crate::doc::PlacedObject, EditError> {
    if store.floor(floor_id).is_none() {
        return Err(EditError::FloorNotFound(floor_id.to_string()));
    }
    store
        .object(floor_id, object_id)
        .ok_or_else(|| EditError::ObjectNotFound(object_id.to_string()))
}

/// Parse a position field. Text without a finite numeric prefix becomes 0.
#[must_use]
pub fn parse_coordinate(raw: &str) -> f64 {
    let v = leading_number(raw);
    if v.is_finite() { v } else { 0.0 }
}

/// Parse a size field. Text without a positive finite numeric prefix becomes the fallback size.
#[must_use]
pub fn parse_dimension(raw: &str) -> f64 {
    let v = leading_number(raw);
    if v.is_finite() && v > 0.0 { v } else { FALLBACK_OBJECT_SIZE }
}

/// The longest prefix of `raw` (after leading whitespace) shaped like a
/// decimal number: sign, digits, optional fraction, optional exponent.
/// NaN when there is no such prefix.
fn leading_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let int_start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(int_start);
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(f64::NAN)
}
