//! Document model: floors, placed objects, and the in-memory floor store.
//!
//! This module defines the data types that describe what is on each floor
//! (`Floor`, `PlacedObject`, `ObjectKind`), sparse-update types for incremental
//! edits (`PartialFloor`, `PartialObject`), the caller-supplied description of a
//! new floor (`FloorSpec`), and the store that owns every floor (`FloorStore`).
//!
//! DESIGN
//! ======
//! Floors are held as `Arc<Floor>` and mutated through `Arc::make_mut`. A caller
//! that read a floor earlier keeps its own snapshot; later mutations clone the
//! floor instead of writing through the shared handle, so nobody observes a
//! change after the fact. Callers re-read to see new state.
//!
//! The store always holds at least one floor, and the active-floor id always
//! names one of them.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::consts::{MAX_FLOOR_HEIGHT, MAX_FLOOR_WIDTH, MIN_FLOOR_HEIGHT, MIN_FLOOR_WIDTH};
use crate::error::FloorError;
use crate::geometry::{self, Point, Size};

/// Unique identifier for a floor.
pub type FloorId = String;

/// Identifier for a placed object, unique within its floor.
pub type ObjectId = String;

/// Generate a fresh opaque identifier.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The category of a placed object. Closed set; wire names match the export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    /// Multi-purpose table (`"table"`).
    Table,
    /// Slot machine (`"slot-machine"`).
    SlotMachine,
    /// Round poker table (`"poker-table"`).
    PokerTable,
    /// Roulette wheel table (`"roulette"`).
    Roulette,
    /// Blackjack table (`"blackjack"`).
    Blackjack,
}

impl ObjectKind {
    /// Every category, in palette order.
    pub const ALL: [ObjectKind; 5] =
        [Self::SlotMachine, Self::PokerTable, Self::Roulette, Self::Blackjack, Self::Table];

    /// Wire name as written in export documents.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::SlotMachine => "slot-machine",
            Self::PokerTable => "poker-table",
            Self::Roulette => "roulette",
            Self::Blackjack => "blackjack",
        }
    }

    /// Parse a wire name. Returns `None` for anything outside the closed set.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.wire_name() == name)
    }

    /// Prefix used for auto-generated object names, e.g. `"SLOT MACHINE"`.
    #[must_use]
    pub fn name_prefix(self) -> String {
        self.wire_name().replacen('-', " ", 1).to_uppercase()
    }
}

/// An object placed on a floor, as stored and exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Identifier, unique within the owning floor.
    pub id: ObjectId,
    /// Category of the object.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Left edge in floor-local coordinates.
    pub x: f64,
    /// Top edge in floor-local coordinates.
    pub y: f64,
    /// Width; positive.
    pub width: f64,
    /// Height; positive.
    pub height: f64,
    /// Clockwise rotation in degrees, a multiple of 90 in `[0, 360)`.
    pub rotation: f64,
    /// Display name.
    pub name: String,
}

impl PlacedObject {
    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A named rectangular canvas holding placed objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// Inline `data:` URI of the background image, if any.
    pub background_image: Option<String>,
    /// Objects in insertion order.
    pub objects: Vec<PlacedObject>,
}

impl Floor {
    /// Floor dimensions.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Look up an object by id.
    #[must_use]
    pub fn object(&self, id: &str) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn object_mut(&mut self, id: &str) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }
}

/// Caller-supplied description of a new floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorSpec {
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub background_image: Option<String>,
}

impl FloorSpec {
    /// Check the name is non-blank and the dimensions are within the accepted ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), FloorError> {
        validate_floor(&self.name, self.width, self.height)
    }
}

/// Validate floor fields against the accepted name and dimension rules.
///
/// # Errors
///
/// Returns `EmptyName` for a blank name, or a range error for a width or
/// height outside the accepted bounds.
pub fn validate_floor(name: &str, width: f64, height: f64) -> Result<(), FloorError> {
    if name.trim().is_empty() {
        return Err(FloorError::EmptyName);
    }
    if !(MIN_FLOOR_WIDTH..=MAX_FLOOR_WIDTH).contains(&width) {
        return Err(FloorError::WidthOutOfRange { width, min: MIN_FLOOR_WIDTH, max: MAX_FLOOR_WIDTH });
    }
    if !(MIN_FLOOR_HEIGHT..=MAX_FLOOR_HEIGHT).contains(&height) {
        return Err(FloorError::HeightOutOfRange { height, min: MIN_FLOOR_HEIGHT, max: MAX_FLOOR_HEIGHT });
    }
    Ok(())
}

/// Sparse update for a floor. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialFloor {
    pub name: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// `Some(None)` clears the background; `None` leaves it untouched.
    pub background_image: Option<Option<String>>,
}

/// Sparse update for a placed object. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PartialObject {
    /// A position-only update.
    #[must_use]
    pub fn position(at: Point) -> Self {
        Self { x: Some(at.x), y: Some(at.y), ..Default::default() }
    }

    fn apply(&self, obj: &mut PlacedObject) {
        if let Some(x) = self.x {
            obj.x = x;
        }
        if let Some(y) = self.y {
            obj.y = y;
        }
        if let Some(w) = self.width {
            obj.width = w;
        }
        if let Some(h) = self.height {
            obj.height = h;
        }
        if let Some(r) = self.rotation {
            obj.rotation = r;
        }
        if let Some(ref name) = self.name {
            obj.name.clone_from(name);
        }
    }
}

/// In-memory store of floors plus the active-floor pointer.
#[derive(Debug, Clone)]
pub struct FloorStore {
    floors: Vec<Arc<Floor>>,
    active_id: FloorId,
}

impl FloorStore {
    /// Create a store seeded with a single floor, which becomes active.
    #[must_use]
    pub fn new(initial: FloorSpec) -> Self {
        let floor = build_floor(new_id(), initial);
        let active_id = floor.id.clone();
        Self { floors: vec![Arc::new(floor)], active_id }
    }

    // --- Floors ---

    /// Add a floor with a fresh id and no objects. Does not change the active floor.
    pub fn add_floor(&mut self, spec: FloorSpec) -> Arc<Floor> {
        let floor = Arc::new(build_floor(new_id(), spec));
        info!(floor_id = %floor.id, name = %floor.name, "floor added");
        self.floors.push(Arc::clone(&floor));
        floor
    }

    /// Insert a fully-formed floor (e.g. from an import). A colliding id is
    /// replaced with a fresh one.
    pub fn insert_floor(&mut self, mut floor: Floor) -> Arc<Floor> {
        if self.index_of(&floor.id).is_some() {
            floor.id = new_id();
        }
        let floor = Arc::new(floor);
        info!(floor_id = %floor.id, objects = floor.objects.len(), "floor inserted");
        self.floors.push(Arc::clone(&floor));
        floor
    }

    /// Merge `partial` into the floor. Returns false if the floor doesn't exist.
    pub fn update_floor(&mut self, id: &str, partial: &PartialFloor) -> bool {
        let Some(floor) = self.floor_mut(id) else {
            return false;
        };
        if let Some(ref name) = partial.name {
            floor.name.clone_from(name);
        }
        if let Some(w) = partial.width {
            floor.width = w;
        }
        if let Some(h) = partial.height {
            floor.height = h;
        }
        if let Some(ref bg) = partial.background_image {
            floor.background_image.clone_from(bg);
        }
        debug!(floor_id = %id, "floor updated");
        true
    }

    /// Remove a floor, returning it. Refuses (returns `None`) when the floor
    /// doesn't exist or is the last one. Removing the active floor moves the
    /// active pointer to the first remaining floor.
    pub fn remove_floor(&mut self, id: &str) -> Option<Arc<Floor>> {
        if self.floors.len() <= 1 {
            debug!(floor_id = %id, "refusing to remove last floor");
            return None;
        }
        let idx = self.index_of(id)?;
        let removed = self.floors.remove(idx);
        if self.active_id == id {
            if let Some(first) = self.floors.first() {
                self.active_id.clone_from(&first.id);
            }
        }
        info!(floor_id = %id, active = %self.active_id, "floor removed");
        Some(removed)
    }

    /// Snapshot of a floor by id.
    #[must_use]
    pub fn floor(&self, id: &str) -> Option<Arc<Floor>> {
        self.index_of(id).map(|idx| Arc::clone(&self.floors[idx]))
    }

    /// Snapshot of every floor in insertion order.
    #[must_use]
    pub fn floors(&self) -> Vec<Arc<Floor>> {
        self.floors.clone()
    }

    /// Number of floors. Never zero.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    // --- Active floor ---

    /// Id of the active floor.
    #[must_use]
    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// Snapshot of the active floor.
    #[must_use]
    pub fn active_floor(&self) -> Option<Arc<Floor>> {
        self.floor(&self.active_id)
    }

    /// Make `id` the active floor. Returns false if no such floor exists.
    pub fn set_active(&mut self, id: &str) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.active_id = id.to_string();
        debug!(floor_id = %id, "active floor changed");
        true
    }

    // --- Objects ---

    /// Append an object to a floor. Returns false if the floor doesn't exist or
    /// already holds an object with the same id.
    pub fn add_object(&mut self, floor_id: &str, object: PlacedObject) -> bool {
        let Some(floor) = self.floor_mut(floor_id) else {
            return false;
        };
        if floor.object(&object.id).is_some() {
            return false;
        }
        debug!(floor_id = %floor_id, object_id = %object.id, kind = object.kind.wire_name(), "object added");
        floor.objects.push(object);
        true
    }

    /// Apply a partial update to an object. Returns false if either id is unknown.
    pub fn update_object(&mut self, floor_id: &str, object_id: &str, partial: &PartialObject) -> bool {
        let Some(obj) = self.floor_mut(floor_id).and_then(|f| f.object_mut(object_id)) else {
            return false;
        };
        partial.apply(obj);
        debug!(floor_id = %floor_id, object_id = %object_id, "object updated");
        true
    }

    /// Remove an object from a floor, returning it if it was present.
    pub fn remove_object(&mut self, floor_id: &str, object_id: &str) -> Option<PlacedObject> {
        let floor = self.floor_mut(floor_id)?;
        let idx = floor.objects.iter().position(|o| o.id == object_id)?;
        debug!(floor_id = %floor_id, object_id = %object_id, "object removed");
        Some(floor.objects.remove(idx))
    }

    /// Copy of an object by floor and object id.
    #[must_use]
    pub fn object(&self, floor_id: &str, object_id: &str) -> Option<PlacedObject> {
        let idx = self.index_of(floor_id)?;
        self.floors[idx].object(object_id).cloned()
    }

    /// Pull every object on the floor back inside its bounds. Returns the ids
    /// and new positions of objects that moved.
    pub fn reclamp_objects(&mut self, floor_id: &str) -> Vec<(ObjectId, Point)> {
        let Some(idx) = self.index_of(floor_id) else {
            return Vec::new();
        };
        let bounds = self.floors[idx].size();
        let moves: Vec<(ObjectId, Point)> = self.floors[idx]
            .objects
            .iter()
            .filter_map(|o| {
                let at = geometry::clamp_point(o.origin(), o.size(), bounds);
                (at != o.origin()).then(|| (o.id.clone(), at))
            })
            .collect();
        if moves.is_empty() {
            return moves;
        }
        let floor = Arc::make_mut(&mut self.floors[idx]);
        for (id, at) in &moves {
            if let Some(obj) = floor.object_mut(id) {
                obj.x = at.x;
                obj.y = at.y;
            }
        }
        debug!(floor_id = %floor_id, moved = moves.len(), "objects re-clamped");
        moves
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.floors.iter().position(|f| f.id == id)
    }

    fn floor_mut(&mut self, id: &str) -> Option<&mut Floor> {
        let idx = self.index_of(id)?;
        Some(Arc::make_mut(&mut self.floors[idx]))
    }
}

impl Default for FloorStore {
    fn default() -> Self {
        Self::new(FloorSpec {
            name: crate::consts::DEFAULT_FLOOR_NAME.to_string(),
            width: crate::consts::DEFAULT_FLOOR_WIDTH,
            height: crate::consts::DEFAULT_FLOOR_HEIGHT,
            background_image: None,
        })
    }
}

fn build_floor(id: FloorId, spec: FloorSpec) -> Floor {
    Floor {
        id,
        name: spec.name,
        width: spec.width,
        height: spec.height,
        background_image: spec.background_image,
        objects: Vec::new(),
    }
}
